use utoipa::OpenApi;

use models::{Booking, BookingStatus, ServiceListing};
use service::auth::IdentityClaim;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::issue_token,
        crate::routes::auth::log_out,
        crate::routes::services::list_all,
        crate::routes::services::list_owned,
        crate::routes::services::get_one,
        crate::routes::services::create,
        crate::routes::services::update,
        crate::routes::services::remove,
        crate::routes::bookings::list_own,
        crate::routes::bookings::create,
        crate::routes::bookings::cancel,
    ),
    components(schemas(ServiceListing, Booking, BookingStatus, IdentityClaim)),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "services"),
        (name = "bookings")
    )
)]
pub struct ApiDoc;
