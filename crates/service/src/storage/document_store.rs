use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use models::{Document, DocumentId};

use crate::errors::ServiceError;

/// A document as returned by the store: body plus its id.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: DocumentId,
    pub body: Document,
}

/// Conjunction of field-equality conditions. An empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(String, Value)>,
}

impl Filter {
    pub fn all() -> Self { Self::default() }

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::all().and_eq(field, value)
    }

    pub fn and_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push((field.into(), value.into()));
        self
    }

    pub fn matches(&self, doc: &Document) -> bool {
        self.conditions
            .iter()
            .all(|(field, expected)| doc.get(field) == Some(expected))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOptions {
    /// Create the document under the given id when nothing matches.
    pub upsert: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOutcome {
    pub acknowledged: bool,
    pub inserted_id: DocumentId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_id: Option<DocumentId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

/// Minimal document-database surface the handlers rely on.
/// Implementations must be safe for concurrent use.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find_many(&self, filter: &Filter) -> Result<Vec<StoredDocument>, ServiceError>;
    async fn find_one(&self, id: DocumentId) -> Result<Option<StoredDocument>, ServiceError>;
    async fn insert_one(&self, doc: Document) -> Result<InsertOutcome, ServiceError>;
    /// `$set` semantics: keys in `patch` overwrite, other keys are kept.
    async fn update_one(&self, id: DocumentId, patch: Document, opts: UpdateOptions) -> Result<UpdateOutcome, ServiceError>;
    async fn delete_one(&self, id: DocumentId) -> Result<DeleteOutcome, ServiceError>;
}
