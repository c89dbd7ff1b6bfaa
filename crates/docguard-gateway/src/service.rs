//! Record service
//!
//! A thin pass-through over the [`IRecordStore`] port. It applies no policy;
//! authorization, caching and auditing all live in the gateway.

use std::sync::Arc;

use docguard_core::domain::{Record, RecordId};
use docguard_core::ports::IRecordStore;

/// Forwards fetch and update calls to the record store
pub struct RecordService {
    store: Arc<dyn IRecordStore>,
}

impl RecordService {
    pub fn new(store: Arc<dyn IRecordStore>) -> Self {
        tracing::info!("Initializing record service on demand");
        Self { store }
    }

    pub async fn fetch(&self, id: &RecordId) -> anyhow::Result<Option<Record>> {
        self.store.fetch(id).await
    }

    pub async fn update(&self, id: &RecordId, content: &str) -> anyhow::Result<()> {
        self.store.update(id, content).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docguard_store::{seed, InMemoryRecordStore, StoreOptions};

    #[tokio::test]
    async fn test_forwards_to_store() {
        let store = Arc::new(InMemoryRecordStore::new(
            seed::default_records(),
            StoreOptions::instant(),
        ));
        let service = RecordService::new(store.clone());
        let id = RecordId::new("DOC003").unwrap();

        service.update(&id, "forwarded").await.unwrap();
        let record = service.fetch(&id).await.unwrap().unwrap();

        assert_eq!(record.content(), "forwarded");
        assert_eq!(store.fetch_count(), 1);
        assert_eq!(store.update_count(), 1);
    }
}
