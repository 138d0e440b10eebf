//! Shared building blocks for the career maker workspace: logging setup,
//! startup environment checks and small wire types reused across crates.

pub mod types;
pub mod utils;
pub mod env;
