use axum::{
    extract::{Query, Request},
    middleware::Next,
    response::Response,
    Extension,
};
use axum_extra::extract::WithRejection;
use service::auth::{guard::ensure_owner, IdentityClaim};
use tracing::warn;
use utoipa::IntoParams;

use crate::errors::JsonApiError;

/// Caller-declared scope of an identity-scoped listing.
#[derive(Debug, Default, PartialEq, Eq, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OwnerScope {
    /// Must equal the authenticated email exactly.
    pub email: Option<String>,
}

impl OwnerScope {
    /// Scope from raw query pairs. Only a single `email` key names a scope;
    /// absent or repeated keys leave it unset.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut emails = pairs.into_iter().filter(|(k, _)| k == "email").map(|(_, v)| v);
        match (emails.next(), emails.next()) {
            (Some(email), None) => Self { email: Some(email) },
            _ => Self::default(),
        }
    }
}

/// Route middleware, layered inside `require_token`: the `email` query
/// parameter must match the authenticated identity, otherwise 403.
pub async fn require_owner(
    WithRejection(Query(pairs), _): WithRejection<Query<Vec<(String, String)>>, JsonApiError>,
    Extension(identity): Extension<IdentityClaim>,
    req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let scope = OwnerScope::from_pairs(pairs);
    if let Err(e) = ensure_owner(&identity, scope.email.as_deref()) {
        warn!(path = %req.uri().path(), email = %identity.email, "forbidden scope");
        return Err(e.into());
    }
    Ok(next.run(req).await)
}
