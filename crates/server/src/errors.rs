use std::any::Any;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use models::errors::ModelError;
use service::auth::AuthError;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{debug, error};

pub const UNAUTHORIZED_MESSAGE: &str = "You are not authorized";
pub const FORBIDDEN_MESSAGE: &str = "forbidden access";

/// JSON error body: `{"error": <title>, "message": <detail>}`.
/// Internal failures never carry a detail message.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: String,
    pub message: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: impl Into<String>, message: Option<String>) -> Self {
        Self { status, error: error.into(), message }
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized", Some(UNAUTHORIZED_MESSAGE.into()))
    }

    pub fn forbidden() -> Self {
        Self::new(StatusCode::FORBIDDEN, "Forbidden", Some(FORBIDDEN_MESSAGE.into()))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Validation Error", Some(message.into()))
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", None)
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = match self.message {
            Some(msg) => serde_json::json!({"error": self.error, "message": msg}),
            None => serde_json::json!({"error": self.error}),
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<AuthError> for JsonApiError {
    fn from(e: AuthError) -> Self {
        debug!(code = e.code(), err = %e, "auth rejected");
        match e {
            e if e.is_unauthenticated() => JsonApiError::unauthorized(),
            AuthError::Forbidden => JsonApiError::forbidden(),
            AuthError::Validation(msg) => JsonApiError::validation(msg),
            other => {
                error!(code = other.code(), err = %other, "token handling failed");
                JsonApiError::internal()
            }
        }
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Model(ModelError::Validation(msg)) => JsonApiError::validation(msg),
            ServiceError::NotFound(msg) => JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(msg)),
            ServiceError::Auth(auth) => auth.into(),
            other => {
                error!(err = %other, "store operation failed");
                JsonApiError::internal()
            }
        }
    }
}

// Extractor rejections all surface as 400 Validation Error, never as axum's
// plain-text bodies.
impl From<JsonRejection> for JsonApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!(status = %rejection.status(), "json body rejected");
        JsonApiError::validation(rejection.body_text())
    }
}

impl From<QueryRejection> for JsonApiError {
    fn from(rejection: QueryRejection) -> Self {
        JsonApiError::validation(rejection.body_text())
    }
}

impl From<PathRejection> for JsonApiError {
    fn from(rejection: PathRejection) -> Self {
        JsonApiError::validation(rejection.body_text())
    }
}

/// Fault boundary for `CatchPanicLayer`: log the panic, answer a bare 500.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    error!(panic = %detail, "handler panicked");
    JsonApiError::internal().into_response()
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_errors_map_to_status() {
        assert_eq!(JsonApiError::from(AuthError::MissingCredential).status, StatusCode::UNAUTHORIZED);
        assert_eq!(JsonApiError::from(AuthError::Expired).status, StatusCode::UNAUTHORIZED);
        assert_eq!(JsonApiError::from(AuthError::InvalidCredential("x".into())).status, StatusCode::UNAUTHORIZED);
        assert_eq!(JsonApiError::from(AuthError::Forbidden).status, StatusCode::FORBIDDEN);
        assert_eq!(JsonApiError::from(AuthError::Validation("x".into())).status, StatusCode::BAD_REQUEST);
        assert_eq!(JsonApiError::from(AuthError::TokenError("x".into())).status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn store_failures_do_not_leak_details() {
        let e = JsonApiError::from(ServiceError::Store("disk on fire at /var/data".into()));
        assert_eq!(e.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(e.message.is_none());

        let e = JsonApiError::from(ServiceError::Model(ModelError::Malformed("bad row".into())));
        assert_eq!(e.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn service_errors_map_to_status() {
        assert_eq!(JsonApiError::from(ServiceError::not_found("service")).status, StatusCode::NOT_FOUND);
        assert_eq!(JsonApiError::from(ServiceError::Model(ModelError::Validation("x".into()))).status, StatusCode::BAD_REQUEST);
        assert_eq!(JsonApiError::from(ServiceError::Auth(AuthError::Forbidden)).status, StatusCode::FORBIDDEN);
    }

    #[test]
    fn panic_becomes_generic_500() {
        let resp = handle_panic(Box::new("boom"));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
