use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::email::validate_email;
use crate::errors::ModelError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

/// A customer's booking of a service listing. Stored in the `bookings` collection
/// and owned by `customer_email`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Booking {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_id: Option<Uuid>,
    pub service_name: String,
    pub service_image: String,
    pub provider_email: String,
    pub customer_name: String,
    pub customer_email: String,
    pub service_date: String,
    pub price: f64,
    pub instructions: String,
    pub status: BookingStatus,
}

impl Booking {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_email(&self.customer_email)?;
        if !self.provider_email.is_empty() {
            validate_email(&self.provider_email)?;
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ModelError::Validation("price must be a non-negative number".into()));
        }
        Ok(())
    }
}
