use tracing::debug;

use super::domain::IdentityClaim;
use super::errors::AuthError;

/// Ownership check for identity-scoped routes: the caller-declared scope must
/// be exactly (case-sensitively) the authenticated email. No scope is a mismatch.
pub fn ensure_owner(identity: &IdentityClaim, target_email: Option<&str>) -> Result<(), AuthError> {
    match target_email {
        Some(target) if target == identity.email => Ok(()),
        other => {
            debug!(identity = %identity.email, target = ?other, "ownership mismatch");
            Err(AuthError::Forbidden)
        }
    }
}
