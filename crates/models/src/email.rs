use crate::errors::ModelError;

/// Structural email check: one `@`, non-empty local part and a dotted-or-plain
/// domain, no whitespace. Comparison elsewhere stays case-sensitive, so no
/// normalization happens here.
pub fn validate_email(email: &str) -> Result<(), ModelError> {
    if email.is_empty() {
        return Err(ModelError::Validation("email required".into()));
    }
    if email.chars().any(char::is_whitespace) {
        return Err(ModelError::Validation("email must not contain whitespace".into()));
    }
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(ModelError::Validation(format!("invalid email: {email}"))),
    }
}
