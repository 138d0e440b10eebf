use thiserror::Error;

/// Errors raised while issuing or checking credentials and ownership.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("credential missing")]
    MissingCredential,
    #[error("invalid credential: {0}")]
    InvalidCredential(String),
    #[error("credential expired")]
    Expired,
    #[error("identity does not own the requested scope")]
    Forbidden,
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("token error: {0}")]
    TokenError(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Validation(_) => 1001,
            AuthError::MissingCredential => 1004,
            AuthError::InvalidCredential(_) => 1005,
            AuthError::Expired => 1006,
            AuthError::Forbidden => 1007,
            AuthError::TokenError(_) => 1102,
        }
    }

    /// Missing, malformed, forged and expired credentials all collapse into
    /// one "not authenticated" outcome at the HTTP boundary.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, AuthError::MissingCredential | AuthError::InvalidCredential(_) | AuthError::Expired)
    }
}
