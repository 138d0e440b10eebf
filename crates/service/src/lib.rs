//! Service layer for the career maker backend.
//! - Token issuance/verification and the ownership guard (`auth`).
//! - Document store abstraction with a JSON-file implementation (`storage`).
//! - Listing and booking business operations on top of the store (`services`).

pub mod errors;
pub mod auth;
pub mod runtime;
pub mod storage;
pub mod services;
