use std::sync::Arc;

use tracing::{info, instrument, warn};

use models::{record::to_document, DocumentId, Record, ServiceListing};

use crate::auth::IdentityClaim;
use crate::errors::ServiceError;
use crate::storage::{DeleteOutcome, DocumentStore, Filter, InsertOutcome, StoredDocument, UpdateOptions, UpdateOutcome};

pub const OWNER_FIELD: &str = "ownerEmail";

/// Business operations over the `services` collection.
pub struct ListingService {
    store: Arc<dyn DocumentStore>,
}

fn to_record(doc: StoredDocument) -> Result<Record<ServiceListing>, ServiceError> {
    Ok(Record::from_document(doc.id, doc.body)?)
}

impl ListingService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self { Self { store } }

    /// Public listing of every service.
    pub async fn list_all(&self) -> Result<Vec<Record<ServiceListing>>, ServiceError> {
        self.store
            .find_many(&Filter::all())
            .await?
            .into_iter()
            .map(to_record)
            .collect()
    }

    /// Listings owned by `owner`. The query is built from the authenticated
    /// identity and each returned row is checked again before it leaves.
    #[instrument(skip(self, owner), fields(email = %owner.email))]
    pub async fn list_owned_by(&self, owner: &IdentityClaim) -> Result<Vec<Record<ServiceListing>>, ServiceError> {
        let rows = self
            .store
            .find_many(&Filter::eq(OWNER_FIELD, owner.email.as_str()))
            .await?;
        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let rec = to_record(row)?;
            if rec.data.owner_email != owner.email {
                warn!(id = %rec.id, "store returned listing outside the requested owner scope");
                continue;
            }
            out.push(rec);
        }
        Ok(out)
    }

    pub async fn get(&self, id: DocumentId) -> Result<Record<ServiceListing>, ServiceError> {
        match self.store.find_one(id).await? {
            Some(doc) => to_record(doc),
            None => Err(ServiceError::not_found("service")),
        }
    }

    #[instrument(skip(self, listing), fields(owner = %listing.owner_email))]
    pub async fn create(&self, listing: ServiceListing) -> Result<InsertOutcome, ServiceError> {
        listing.validate()?;
        let out = self.store.insert_one(to_document(&listing)?).await?;
        info!(id = %out.inserted_id, "service_created");
        Ok(out)
    }

    /// Overwrite the listing fields of `id`, creating the document if absent.
    #[instrument(skip(self, listing), fields(%id))]
    pub async fn upsert(&self, id: DocumentId, listing: ServiceListing) -> Result<UpdateOutcome, ServiceError> {
        listing.validate()?;
        let out = self
            .store
            .update_one(id, to_document(&listing)?, UpdateOptions { upsert: true })
            .await?;
        info!(matched = out.matched_count, modified = out.modified_count, upserted = out.upserted_id.is_some(), "service_upserted");
        Ok(out)
    }

    pub async fn delete(&self, id: DocumentId) -> Result<DeleteOutcome, ServiceError> {
        let out = self.store.delete_one(id).await?;
        if out.deleted_count == 0 {
            return Err(ServiceError::not_found("service"));
        }
        info!(%id, "service_deleted");
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::JsonCollection;

    fn listing(owner: &str, name: &str) -> ServiceListing {
        ServiceListing { service_name: name.into(), owner_email: owner.into(), price: 10.0, ..Default::default() }
    }

    fn svc() -> ListingService {
        ListingService::new(Arc::new(JsonCollection::in_memory("services")))
    }

    #[tokio::test]
    async fn owned_listing_only_returns_owner_rows() -> anyhow::Result<()> {
        let s = svc();
        s.create(listing("a@x.com", "Resume")).await?;
        s.create(listing("b@x.com", "Interview")).await?;
        s.create(listing("a@x.com", "Portfolio")).await?;

        let mine = s.list_owned_by(&IdentityClaim::new("a@x.com")).await?;
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|r| r.data.owner_email == "a@x.com"));
        assert_eq!(s.list_all().await?.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let err = svc().get(uuid::Uuid::now_v7()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn create_validates_input() {
        let err = svc().create(listing("no-at-sign", "X")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Model(_)));
    }

    #[tokio::test]
    async fn upsert_then_update_then_delete() -> anyhow::Result<()> {
        let s = svc();
        let id = uuid::Uuid::now_v7();
        let out = s.upsert(id, listing("a@x.com", "Resume")).await?;
        assert_eq!(out.upserted_id, Some(id));

        let out = s.upsert(id, listing("a@x.com", "Resume Pro")).await?;
        assert_eq!((out.matched_count, out.modified_count), (1, 1));
        assert_eq!(s.get(id).await?.data.service_name, "Resume Pro");

        assert_eq!(s.delete(id).await?.deleted_count, 1);
        assert!(matches!(s.delete(id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
