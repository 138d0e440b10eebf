use std::{path::PathBuf, sync::Arc};

use tracing::info;

use crate::errors::ServiceError;
use crate::storage::{collection::JsonCollection, document_store::DocumentStore};

pub const SERVICES_COLLECTION: &str = "services";
pub const BOOKINGS_COLLECTION: &str = "bookings";

/// The two collections the application works with, as shared trait objects.
#[derive(Clone)]
pub struct Database {
    pub services: Arc<dyn DocumentStore>,
    pub bookings: Arc<dyn DocumentStore>,
}

impl Database {
    /// Open file-backed collections under `data_dir`.
    pub async fn open<P: Into<PathBuf>>(data_dir: P) -> Result<Self, ServiceError> {
        let dir: PathBuf = data_dir.into();
        let services = JsonCollection::open(&dir, SERVICES_COLLECTION).await?;
        let bookings = JsonCollection::open(&dir, BOOKINGS_COLLECTION).await?;
        info!(data_dir = %dir.display(), "opened document collections");
        Ok(Self { services: Arc::new(services), bookings: Arc::new(bookings) })
    }

    pub fn in_memory() -> Self {
        Self {
            services: Arc::new(JsonCollection::in_memory(SERVICES_COLLECTION)),
            bookings: Arc::new(JsonCollection::in_memory(BOOKINGS_COLLECTION)),
        }
    }
}
