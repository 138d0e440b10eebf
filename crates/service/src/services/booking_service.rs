use std::sync::Arc;

use tracing::{info, instrument, warn};

use models::{record::to_document, Booking, DocumentId, Record};

use crate::auth::{guard::ensure_owner, IdentityClaim};
use crate::errors::ServiceError;
use crate::storage::{DeleteOutcome, DocumentStore, Filter, InsertOutcome, StoredDocument};

pub const CUSTOMER_FIELD: &str = "customerEmail";

/// Business operations over the `bookings` collection.
pub struct BookingService {
    store: Arc<dyn DocumentStore>,
}

fn to_record(doc: StoredDocument) -> Result<Record<Booking>, ServiceError> {
    Ok(Record::from_document(doc.id, doc.body)?)
}

impl BookingService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self { Self { store } }

    #[instrument(skip(self, customer), fields(email = %customer.email))]
    pub async fn list_for_customer(&self, customer: &IdentityClaim) -> Result<Vec<Record<Booking>>, ServiceError> {
        let rows = self
            .store
            .find_many(&Filter::eq(CUSTOMER_FIELD, customer.email.as_str()))
            .await?;
        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let rec = to_record(row)?;
            if rec.data.customer_email != customer.email {
                warn!(id = %rec.id, "store returned booking outside the requested customer scope");
                continue;
            }
            out.push(rec);
        }
        Ok(out)
    }

    #[instrument(skip(self, booking), fields(customer = %booking.customer_email))]
    pub async fn create(&self, booking: Booking) -> Result<InsertOutcome, ServiceError> {
        booking.validate()?;
        let out = self.store.insert_one(to_document(&booking)?).await?;
        info!(id = %out.inserted_id, "booking_created");
        Ok(out)
    }

    /// Cancel a booking on behalf of `caller`. The stored row must belong to the
    /// caller; a foreign booking is reported as forbidden, a missing one as not found.
    #[instrument(skip(self, caller), fields(%id, email = %caller.email))]
    pub async fn cancel(&self, id: DocumentId, caller: &IdentityClaim) -> Result<DeleteOutcome, ServiceError> {
        let existing = self
            .store
            .find_one(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("booking"))?;
        let rec = to_record(existing)?;
        ensure_owner(caller, Some(rec.data.customer_email.as_str()))?;

        let out = self.store.delete_one(id).await?;
        if out.deleted_count == 0 {
            // removed concurrently between lookup and delete
            return Err(ServiceError::not_found("booking"));
        }
        info!("booking_cancelled");
        Ok(out)
    }
}
