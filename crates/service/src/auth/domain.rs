use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::errors::AuthError;

/// Identity payload carried inside a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IdentityClaim {
    pub email: String,
}

impl IdentityClaim {
    pub fn new(email: impl Into<String>) -> Self { Self { email: email.into() } }

    /// Schema check applied before a claim is ever signed.
    pub fn validate(&self) -> Result<(), AuthError> {
        models::email::validate_email(&self.email).map_err(|e| AuthError::Validation(e.to_string()))
    }
}

/// Wire payload of the signed token: the claim plus registered time claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct TokenClaims {
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

impl TokenClaims {
    pub(crate) fn into_identity(self) -> IdentityClaim {
        IdentityClaim { email: self.email }
    }
}
