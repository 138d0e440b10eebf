//! Service listing handlers. Only the owner-scoped listing sits behind
//! `require_token` and `require_owner`; the rest are public.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use axum_extra::extract::WithRejection;
use models::{Record, ServiceListing};
use service::auth::IdentityClaim;
use service::storage::{DeleteOutcome, InsertOutcome, UpdateOutcome};
use uuid::Uuid;

use super::auth::ServerState;
use crate::errors::JsonApiError;

#[utoipa::path(
    get, path = "/api/v1/services", tag = "services",
    responses((status = 200, description = "All service listings", body = [ServiceListing]))
)]
pub async fn list_all(State(state): State<ServerState>) -> Result<Json<Vec<Record<ServiceListing>>>, JsonApiError> {
    Ok(Json(state.listings.list_all().await?))
}

/// Listings owned by the authenticated identity. The `email` query parameter
/// has already been checked against it by `require_owner`.
#[utoipa::path(
    get, path = "/api/v1/owner/services", tag = "services",
    params(super::guard::OwnerScope),
    responses(
        (status = 200, description = "Listings owned by the caller", body = [ServiceListing]),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Scope does not match the token identity")
    )
)]
pub async fn list_owned(
    State(state): State<ServerState>,
    Extension(identity): Extension<IdentityClaim>,
) -> Result<Json<Vec<Record<ServiceListing>>>, JsonApiError> {
    Ok(Json(state.listings.list_owned_by(&identity).await?))
}

#[utoipa::path(
    get, path = "/api/v1/service/{service_id}", tag = "services",
    params(("service_id" = Uuid, Path, description = "Listing id")),
    responses(
        (status = 200, description = "The listing", body = ServiceListing),
        (status = 404, description = "No such listing")
    )
)]
pub async fn get_one(
    State(state): State<ServerState>,
    WithRejection(Path(service_id), _): WithRejection<Path<Uuid>, JsonApiError>,
) -> Result<Json<Record<ServiceListing>>, JsonApiError> {
    Ok(Json(state.listings.get(service_id).await?))
}

#[utoipa::path(
    post, path = "/api/v1/services/create-service", tag = "services",
    request_body = ServiceListing,
    responses(
        (status = 200, description = "Inserted"),
        (status = 400, description = "Invalid listing")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    WithRejection(Json(listing), _): WithRejection<Json<ServiceListing>, JsonApiError>,
) -> Result<Json<InsertOutcome>, JsonApiError> {
    Ok(Json(state.listings.create(listing).await?))
}

#[utoipa::path(
    put, path = "/api/v1/services/update-service/{id}", tag = "services",
    params(("id" = Uuid, Path, description = "Listing id")),
    request_body = ServiceListing,
    responses(
        (status = 200, description = "Updated or inserted"),
        (status = 400, description = "Invalid listing")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, JsonApiError>,
    WithRejection(Json(listing), _): WithRejection<Json<ServiceListing>, JsonApiError>,
) -> Result<Json<UpdateOutcome>, JsonApiError> {
    Ok(Json(state.listings.upsert(id, listing).await?))
}

#[utoipa::path(
    delete, path = "/api/v1/service/remove-service/{service_id}", tag = "services",
    params(("service_id" = Uuid, Path, description = "Listing id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "No such listing")
    )
)]
pub async fn remove(
    State(state): State<ServerState>,
    WithRejection(Path(service_id), _): WithRejection<Path<Uuid>, JsonApiError>,
) -> Result<Json<DeleteOutcome>, JsonApiError> {
    Ok(Json(state.listings.delete(service_id).await?))
}
