use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use models::{Document, DocumentId};

use crate::errors::ServiceError;
use crate::storage::document_store::{
    DeleteOutcome, DocumentStore, Filter, InsertOutcome, StoredDocument, UpdateOptions, UpdateOutcome,
};
use crate::storage::json_map_store::JsonMapStore;

/// A named collection of JSON documents backed by a [`JsonMapStore`].
///
/// Ids are UUID v7, so listing order follows insertion order.
///
/// # Examples
/// ```
/// use service::storage::{DocumentStore, Filter, JsonCollection};
/// let coll = JsonCollection::in_memory("notes");
/// let mut doc = serde_json::Map::new();
/// doc.insert("owner".into(), "a@x.com".into());
/// let out = tokio_test::block_on(coll.insert_one(doc)).unwrap();
/// let found = tokio_test::block_on(coll.find_many(&Filter::eq("owner", "a@x.com"))).unwrap();
/// assert_eq!(found[0].id, out.inserted_id);
/// ```
pub struct JsonCollection {
    name: String,
    docs: Arc<JsonMapStore<DocumentId, Document>>,
}

impl JsonCollection {
    /// Open `<dir>/<name>.json`, creating it if missing.
    pub async fn open<P: Into<PathBuf>>(dir: P, name: &str) -> Result<Self, ServiceError> {
        let path = dir.into().join(format!("{name}.json"));
        let docs = JsonMapStore::open(path).await?;
        Ok(Self { name: name.to_string(), docs })
    }

    pub fn in_memory(name: &str) -> Self {
        Self { name: name.to_string(), docs: JsonMapStore::in_memory() }
    }
}

fn strip_id(mut doc: Document) -> Document {
    doc.remove("_id");
    doc
}

#[async_trait]
impl DocumentStore for JsonCollection {
    async fn find_many(&self, filter: &Filter) -> Result<Vec<StoredDocument>, ServiceError> {
        let rows = self.docs.list_where(|d| filter.matches(d)).await;
        debug!(collection = %self.name, count = rows.len(), "find_many");
        Ok(rows.into_iter().map(|(id, body)| StoredDocument { id, body }).collect())
    }

    async fn find_one(&self, id: DocumentId) -> Result<Option<StoredDocument>, ServiceError> {
        Ok(self.docs.get(&id).await.map(|body| StoredDocument { id, body }))
    }

    async fn insert_one(&self, doc: Document) -> Result<InsertOutcome, ServiceError> {
        let id = Uuid::now_v7();
        self.docs.insert(id, strip_id(doc)).await?;
        debug!(collection = %self.name, %id, "insert_one");
        Ok(InsertOutcome { acknowledged: true, inserted_id: id })
    }

    async fn update_one(&self, id: DocumentId, patch: Document, opts: UpdateOptions) -> Result<UpdateOutcome, ServiceError> {
        let patch = strip_id(patch);
        let outcome = self
            .docs
            .update_map(|map| {
                if let Some(existing) = map.get_mut(&id) {
                    let before = existing.clone();
                    existing.extend(patch);
                    let modified = u64::from(*existing != before);
                    return Ok(UpdateOutcome { acknowledged: true, matched_count: 1, modified_count: modified, upserted_id: None });
                }
                if opts.upsert {
                    map.insert(id, patch);
                    return Ok(UpdateOutcome { acknowledged: true, matched_count: 0, modified_count: 0, upserted_id: Some(id) });
                }
                Ok(UpdateOutcome { acknowledged: true, matched_count: 0, modified_count: 0, upserted_id: None })
            })
            .await?;
        debug!(collection = %self.name, %id, matched = outcome.matched_count, upserted = outcome.upserted_id.is_some(), "update_one");
        Ok(outcome)
    }

    async fn delete_one(&self, id: DocumentId) -> Result<DeleteOutcome, ServiceError> {
        let existed = self.docs.remove(&id).await?;
        debug!(collection = %self.name, %id, existed, "delete_one");
        Ok(DeleteOutcome { acknowledged: true, deleted_count: u64::from(existed) })
    }
}
