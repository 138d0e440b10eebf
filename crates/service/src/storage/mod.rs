//! Storage abstractions for service layer
//!
//! `JsonMapStore` is the reusable file-backed (or in-memory) map; the
//! document store trait and its JSON collection implementation sit on top of it.

pub mod json_map_store;
pub mod document_store;
pub mod collection;
pub mod database;

pub use collection::JsonCollection;
pub use database::Database;
pub use document_store::{DeleteOutcome, DocumentStore, Filter, InsertOutcome, StoredDocument, UpdateOptions, UpdateOutcome};
