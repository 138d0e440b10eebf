use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
    Json,
};
use axum_extra::extract::{cookie::CookieJar, WithRejection};
use common::types::Ack;
use service::auth::{AuthError, IdentityClaim, TokenConfig, TokenService};
use service::services::{BookingService, ListingService};
use service::storage::Database;
use tracing::{debug, info, warn};

use crate::errors::{JsonApiError, StartupError};
use crate::session::TokenCookie;

/// Everything a request needs, built once at startup and shared by handle.
#[derive(Clone)]
pub struct ServerState {
    pub tokens: Arc<TokenService>,
    pub cookie: TokenCookie,
    pub listings: Arc<ListingService>,
    pub bookings: Arc<BookingService>,
}

impl ServerState {
    pub fn new(auth: &configs::AuthConfig, db: Database) -> Result<Self, StartupError> {
        let tokens = TokenService::new(TokenConfig::new(auth.token_secret.clone(), auth.token_ttl_secs))
            .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
        Ok(Self {
            tokens: Arc::new(tokens),
            cookie: TokenCookie::from_config(auth),
            listings: Arc::new(ListingService::new(db.services)),
            bookings: Arc::new(BookingService::new(db.bookings)),
        })
    }
}

/// Issue a session token for the posted identity and set it as a cookie.
#[utoipa::path(
    post, path = "/api/v1/auth/access-token", tag = "auth",
    request_body = IdentityClaim,
    responses(
        (status = 200, description = "Token cookie set"),
        (status = 400, description = "Invalid identity claim")
    )
)]
pub async fn issue_token(
    State(state): State<ServerState>,
    jar: CookieJar,
    WithRejection(Json(claim), _): WithRejection<Json<IdentityClaim>, JsonApiError>,
) -> Result<(CookieJar, Json<Ack>), JsonApiError> {
    let issued = state.tokens.issue(&claim)?;
    info!(email = %claim.email, expires_at = %issued.expires_at, "access_token_issued");
    Ok((jar.add(state.cookie.issue(issued.token)), Json(Ack::ok())))
}

/// Tell the client to drop its token cookie. Does not revoke the token.
#[utoipa::path(
    post, path = "/api/v1/auth/logOut", tag = "auth",
    responses((status = 200, description = "Token cookie cleared"))
)]
pub async fn log_out(State(state): State<ServerState>, jar: CookieJar) -> (CookieJar, Json<Ack>) {
    info!(had_cookie = state.cookie.read(&jar).is_some(), "logging_out");
    (jar.add(state.cookie.invalidate()), Json(Ack::ok()))
}

/// Route middleware: require a verified token cookie and put the decoded
/// identity into request extensions. One attempt, fail closed with 401.
pub async fn require_token(
    State(state): State<ServerState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let path = req.uri().path().to_owned();

    let Some(token) = state.cookie.read(&jar) else {
        warn!(%path, "missing token cookie");
        return Err(AuthError::MissingCredential.into());
    };

    match state.tokens.verify(&token) {
        Ok(identity) => {
            debug!(%path, email = %identity.email, "token verified");
            req.extensions_mut().insert(identity);
            Ok(next.run(req).await)
        }
        Err(e) => {
            warn!(%path, code = e.code(), err = %e, "token validation failed");
            Err(e.into())
        }
    }
}
