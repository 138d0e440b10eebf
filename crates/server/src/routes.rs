pub mod auth;
pub mod bookings;
pub mod guard;
pub mod services;

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;
use configs::CorsConfig;

use crate::errors::{self, StartupError};
use crate::openapi::ApiDoc;
use auth::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn welcome() -> &'static str {
    "Welcome to Career Maker Server"
}

/// Allow-listed origins with credentials, so the browser sends the token cookie.
pub fn build_cors(cfg: &CorsConfig) -> Result<CorsLayer, StartupError> {
    let origins = cfg
        .allowed_origins
        .iter()
        .map(|o| {
            HeaderValue::from_str(o).map_err(|e| StartupError::InvalidConfig(format!("cors origin {o:?}: {e}")))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true))
}

/// Build the full application router: public, owner-scoped and authenticated routes
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    // Public routes
    let public = Router::new()
        .route("/", get(welcome))
        .route("/health", get(health))
        .route("/api/v1/services", get(services::list_all))
        .route("/api/v1/service/:service_id", get(services::get_one))
        .route("/api/v1/services/create-service", post(services::create))
        .route("/api/v1/services/update-service/:id", put(services::update))
        .route("/api/v1/service/remove-service/:service_id", delete(services::remove))
        .route("/api/v1/user/create-booking", post(bookings::create))
        .route("/api/v1/auth/access-token", post(auth::issue_token))
        .route("/api/v1/auth/logOut", post(auth::log_out));

    // Token required, and `?email=` must name the token identity.
    // The last route_layer runs first.
    let owner_scoped = Router::new()
        .route("/api/v1/owner/services", get(services::list_owned))
        .route("/api/v1/user/bookings", get(bookings::list_own))
        .route_layer(middleware::from_fn(guard::require_owner))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_token));

    // Token required; ownership is checked against the stored row
    let authenticated = Router::new()
        .route("/api/v1/user/cancel-booking/:booking_id", delete(bookings::cancel))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_token));

    public
        .merge(owner_scoped)
        .merge(authenticated)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(CatchPanicLayer::custom(errors::handle_panic))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
