//! Document schemas stored in the `services` and `bookings` collections,
//! plus the `_id` envelope and field validation shared by the service layer.

pub mod errors;
pub mod email;
pub mod record;
pub mod service_listing;
pub mod booking;

pub use record::{Document, DocumentId, Record};
pub use service_listing::ServiceListing;
pub use booking::{Booking, BookingStatus};
