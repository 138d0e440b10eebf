use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::email::validate_email;
use crate::errors::ModelError;

/// A career service offered by an owner. Stored in the `services` collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceListing {
    pub service_name: String,
    pub service_image: String,
    pub owner_name: String,
    pub owner_email: String,
    pub owner_image: String,
    pub price: f64,
    pub service_area: String,
    pub description: String,
}

impl ServiceListing {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.service_name.trim().is_empty() {
            return Err(ModelError::Validation("serviceName required".into()));
        }
        validate_email(&self.owner_email)?;
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ModelError::Validation("price must be a non-negative number".into()));
        }
        Ok(())
    }
}
