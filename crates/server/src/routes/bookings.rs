use axum::{
    extract::{Path, State},
    Extension, Json,
};
use axum_extra::extract::WithRejection;
use models::{Booking, Record};
use service::auth::IdentityClaim;
use service::storage::{DeleteOutcome, InsertOutcome};
use uuid::Uuid;

use super::auth::ServerState;
use crate::errors::JsonApiError;

/// Bookings made by the authenticated identity.
#[utoipa::path(
    get, path = "/api/v1/user/bookings", tag = "bookings",
    params(super::guard::OwnerScope),
    responses(
        (status = 200, description = "The caller's bookings", body = [Booking]),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Scope does not match the token identity")
    )
)]
pub async fn list_own(
    State(state): State<ServerState>,
    Extension(identity): Extension<IdentityClaim>,
) -> Result<Json<Vec<Record<Booking>>>, JsonApiError> {
    Ok(Json(state.bookings.list_for_customer(&identity).await?))
}

#[utoipa::path(
    post, path = "/api/v1/user/create-booking", tag = "bookings",
    request_body = Booking,
    responses(
        (status = 200, description = "Inserted"),
        (status = 400, description = "Invalid booking")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    WithRejection(Json(booking), _): WithRejection<Json<Booking>, JsonApiError>,
) -> Result<Json<InsertOutcome>, JsonApiError> {
    Ok(Json(state.bookings.create(booking).await?))
}

#[utoipa::path(
    delete, path = "/api/v1/user/cancel-booking/{booking_id}", tag = "bookings",
    params(("booking_id" = Uuid, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Cancelled"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Booking belongs to someone else"),
        (status = 404, description = "No such booking")
    )
)]
pub async fn cancel(
    State(state): State<ServerState>,
    Extension(identity): Extension<IdentityClaim>,
    WithRejection(Path(booking_id), _): WithRejection<Path<Uuid>, JsonApiError>,
) -> Result<Json<DeleteOutcome>, JsonApiError> {
    Ok(Json(state.bookings.cancel(booking_id, &identity).await?))
}
