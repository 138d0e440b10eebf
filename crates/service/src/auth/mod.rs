//! Auth module: identity claim, token service and ownership guard.
//!
//! Everything here is framework independent; the HTTP layer only decides where
//! the credential travels (a cookie) and how errors are rendered.

pub mod domain;
pub mod errors;
pub mod service;
pub mod guard;

pub use domain::IdentityClaim;
pub use errors::AuthError;
pub use service::{IssuedToken, TokenConfig, TokenService};
