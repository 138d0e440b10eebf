use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;

/// Opaque store-generated identifier, exposed on the wire as `_id`.
pub type DocumentId = Uuid;

/// Raw document body as kept by the store (never contains `_id`).
pub type Document = serde_json::Map<String, serde_json::Value>;

/// A typed document together with its store id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<T> {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    #[serde(flatten)]
    pub data: T,
}

impl<T: DeserializeOwned> Record<T> {
    pub fn from_document(id: DocumentId, doc: Document) -> Result<Self, ModelError> {
        let data = serde_json::from_value(serde_json::Value::Object(doc))
            .map_err(|e| ModelError::Malformed(format!("{id}: {e}")))?;
        Ok(Self { id, data })
    }
}

/// Serialize a schema type into a store document body.
pub fn to_document<T: Serialize>(value: &T) -> Result<Document, ModelError> {
    match serde_json::to_value(value).map_err(|e| ModelError::Malformed(e.to_string()))? {
        serde_json::Value::Object(mut map) => {
            map.remove("_id");
            Ok(map)
        }
        other => Err(ModelError::Malformed(format!("expected object, got {other}"))),
    }
}
