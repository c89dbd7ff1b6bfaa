//! In-memory record store
//!
//! Holds the canonical copy of every record behind a `tokio::sync::RwLock`
//! and simulates the cost of a real backend:
//! - a one-off connect delay when opened with [`InMemoryRecordStore::open`]
//! - a delay on every fetch and update
//!
//! Fetches hand out clones, so callers never alias the stored record.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use docguard_core::config::StoreConfig;
use docguard_core::domain::{Record, RecordId};
use docguard_core::ports::IRecordStore;

/// Simulated latency for store operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    pub fetch_latency: Duration,
    pub update_latency: Duration,
    pub connect_latency: Duration,
}

impl StoreOptions {
    /// No latency at all (tests)
    pub fn instant() -> Self {
        Self {
            fetch_latency: Duration::ZERO,
            update_latency: Duration::ZERO,
            connect_latency: Duration::ZERO,
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self {
            fetch_latency: config.fetch_latency(),
            update_latency: config.update_latency(),
            connect_latency: config.connect_latency(),
        }
    }
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self::from_config(&StoreConfig::default())
    }
}

/// `IRecordStore` implementation backed by a `HashMap`
pub struct InMemoryRecordStore {
    records: RwLock<HashMap<RecordId, Record>>,
    options: StoreOptions,
    fetches: AtomicU64,
    updates: AtomicU64,
}

impl InMemoryRecordStore {
    /// Creates a store holding `records` without paying the connect delay
    ///
    /// A later record with the same id replaces an earlier one.
    pub fn new(records: impl IntoIterator<Item = Record>, options: StoreOptions) -> Self {
        let records = records
            .into_iter()
            .map(|record| (record.id().clone(), record))
            .collect();
        Self {
            records: RwLock::new(records),
            options,
            fetches: AtomicU64::new(0),
            updates: AtomicU64::new(0),
        }
    }

    /// Creates a store and waits out the simulated connect delay
    pub async fn open(records: impl IntoIterator<Item = Record>, options: StoreOptions) -> Self {
        tracing::info!(
            connect_ms = options.connect_latency.as_millis() as u64,
            "Opening record store"
        );
        simulate(options.connect_latency).await;
        let store = Self::new(records, options);
        tracing::debug!(records = store.records.read().await.len(), "Record store ready");
        store
    }

    /// Number of `fetch` calls served so far
    pub fn fetch_count(&self) -> u64 {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Number of `update` calls served so far
    pub fn update_count(&self) -> u64 {
        self.updates.load(Ordering::SeqCst)
    }

    /// Reads a record without latency and without counting as a fetch
    pub async fn peek(&self, id: &RecordId) -> Option<Record> {
        self.records.read().await.get(id).cloned()
    }

    /// All records, ordered by id, without latency and without counting
    pub async fn list(&self) -> Vec<Record> {
        let mut records: Vec<Record> = self.records.read().await.values().cloned().collect();
        records.sort_by(|a, b| a.id().cmp(b.id()));
        records
    }
}

async fn simulate(latency: Duration) {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}

#[async_trait]
impl IRecordStore for InMemoryRecordStore {
    async fn fetch(&self, id: &RecordId) -> anyhow::Result<Option<Record>> {
        tracing::debug!(record_id = %id, "Fetching record from store");
        self.fetches.fetch_add(1, Ordering::SeqCst);
        simulate(self.options.fetch_latency).await;
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn update(&self, id: &RecordId, content: &str) -> anyhow::Result<()> {
        tracing::debug!(record_id = %id, "Updating record in store");
        self.updates.fetch_add(1, Ordering::SeqCst);
        simulate(self.options.update_latency).await;
        if let Some(record) = self.records.write().await.get_mut(id) {
            record.update_content(content);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::default_records;

    fn id(s: &str) -> RecordId {
        RecordId::new(s).unwrap()
    }

    #[tokio::test]
    async fn fetch_returns_copy_and_counts() {
        let store = InMemoryRecordStore::new(default_records(), StoreOptions::instant());

        let mut record = store.fetch(&id("DOC001")).await.unwrap().unwrap();
        assert_eq!(record.title(), "Q4 Financial Report");
        assert_eq!(store.fetch_count(), 1);

        record.update_content("local edit");
        let again = store.peek(&id("DOC001")).await.unwrap();
        assert_ne!(again.content(), "local edit");
    }

    #[tokio::test]
    async fn fetch_missing_is_none() {
        let store = InMemoryRecordStore::new(default_records(), StoreOptions::instant());
        assert!(store.fetch(&id("DOC999")).await.unwrap().is_none());
        assert_eq!(store.fetch_count(), 1);
    }

    #[tokio::test]
    async fn update_replaces_content() {
        let store = InMemoryRecordStore::new(default_records(), StoreOptions::instant());
        store.update(&id("DOC003"), "new text").await.unwrap();

        let record = store.peek(&id("DOC003")).await.unwrap();
        assert_eq!(record.content(), "new text");
        assert_eq!(store.update_count(), 1);
        assert_eq!(store.fetch_count(), 0);
    }

    #[tokio::test]
    async fn update_unknown_id_is_noop() {
        let store = InMemoryRecordStore::new(default_records(), StoreOptions::instant());
        store.update(&id("DOC999"), "ghost").await.unwrap();

        assert!(store.peek(&id("DOC999")).await.is_none());
        assert_eq!(store.list().await.len(), 3);
    }

    #[tokio::test]
    async fn list_is_sorted_by_id() {
        let mut records = default_records();
        records.reverse();
        let store = InMemoryRecordStore::new(records, StoreOptions::instant());

        let ids: Vec<String> = store
            .list()
            .await
            .iter()
            .map(|r| r.id().to_string())
            .collect();
        assert_eq!(ids, vec!["DOC001", "DOC002", "DOC003"]);
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_waits_for_latency() {
        let options = StoreOptions {
            fetch_latency: Duration::from_millis(500),
            ..StoreOptions::instant()
        };
        let store = InMemoryRecordStore::new(default_records(), options);

        let started = tokio::time::Instant::now();
        store.fetch(&id("DOC001")).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn open_pays_connect_latency_once() {
        let options = StoreOptions {
            connect_latency: Duration::from_secs(1),
            ..StoreOptions::instant()
        };

        let started = tokio::time::Instant::now();
        let store = InMemoryRecordStore::open(default_records(), options).await;
        assert!(started.elapsed() >= Duration::from_secs(1));

        let before_fetch = tokio::time::Instant::now();
        store.fetch(&id("DOC001")).await.unwrap();
        assert!(before_fetch.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn options_from_config() {
        let options = StoreOptions::from_config(&StoreConfig::default());
        assert_eq!(options.fetch_latency, Duration::from_millis(500));
        assert_eq!(options.update_latency, Duration::from_millis(300));
        assert_eq!(options.connect_latency, Duration::from_millis(1000));
    }
}
