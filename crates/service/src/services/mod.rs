//! Resource services translating validated requests into store operations.

pub mod listing_service;
pub mod booking_service;

pub use booking_service::BookingService;
pub use listing_service::ListingService;
