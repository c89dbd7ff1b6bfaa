//! Shared test doubles for gateway integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::bail;
use async_trait::async_trait;
use tokio::sync::{oneshot, Notify};

use docguard_core::domain::{ClearanceLevel, Principal, Record, RecordId};
use docguard_core::ports::IRecordStore;
use docguard_store::{seed, InMemoryRecordStore, StoreOptions};

pub fn id(s: &str) -> RecordId {
    RecordId::new(s).unwrap()
}

pub fn principal(name: &str, clearance: ClearanceLevel) -> Principal {
    Principal::new(name, clearance).unwrap()
}

pub fn manager() -> Principal {
    principal("manager", ClearanceLevel::TopSecret)
}

pub fn employee() -> Principal {
    principal("employee", ClearanceLevel::Internal)
}

pub fn record(id_str: &str, content: &str, clearance: ClearanceLevel) -> Record {
    Record::new(id(id_str), format!("Record {id_str}"), content, clearance).unwrap()
}

pub fn seeded_store() -> Arc<InMemoryRecordStore> {
    Arc::new(InMemoryRecordStore::new(
        seed::default_records(),
        StoreOptions::instant(),
    ))
}

// ============================================================================
// ScriptedStore
// ============================================================================

/// Wraps the in-memory store and fails fetches or updates on request
pub struct ScriptedStore {
    inner: InMemoryRecordStore,
    fail_fetch: AtomicBool,
    fail_update: AtomicBool,
    failures: AtomicU64,
}

impl ScriptedStore {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            inner: InMemoryRecordStore::new(records, StoreOptions::instant()),
            fail_fetch: AtomicBool::new(false),
            fail_update: AtomicBool::new(false),
            failures: AtomicU64::new(0),
        }
    }

    pub fn fail_fetches(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    pub fn fail_updates(&self, fail: bool) {
        self.fail_update.store(fail, Ordering::SeqCst);
    }

    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::SeqCst)
    }

    pub fn inner(&self) -> &InMemoryRecordStore {
        &self.inner
    }
}

#[async_trait]
impl IRecordStore for ScriptedStore {
    async fn fetch(&self, id: &RecordId) -> anyhow::Result<Option<Record>> {
        if self.fail_fetch.load(Ordering::SeqCst) {
            self.failures.fetch_add(1, Ordering::SeqCst);
            bail!("connection refused while fetching {id}");
        }
        self.inner.fetch(id).await
    }

    async fn update(&self, id: &RecordId, content: &str) -> anyhow::Result<()> {
        if self.fail_update.load(Ordering::SeqCst) {
            self.failures.fetch_add(1, Ordering::SeqCst);
            bail!("connection reset while updating {id}");
        }
        self.inner.update(id, content).await
    }
}

// ============================================================================
// GatedStore
// ============================================================================

/// Holds one armed fetch after it has read its snapshot
///
/// Lets a test interleave an edit between a view's store read and the
/// moment that view tries to cache what it read.
pub struct GatedStore {
    inner: InMemoryRecordStore,
    gate: Mutex<Option<oneshot::Receiver<()>>>,
    entered: Notify,
}

impl GatedStore {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            inner: InMemoryRecordStore::new(records, StoreOptions::instant()),
            gate: Mutex::new(None),
            entered: Notify::new(),
        }
    }

    /// Arms the gate for the next fetch; send on the returned channel to release it
    pub fn arm(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.gate.lock().unwrap() = Some(rx);
        tx
    }

    /// Waits until the armed fetch has read its snapshot
    pub async fn wait_entered(&self) {
        self.entered.notified().await;
    }

    pub fn inner(&self) -> &InMemoryRecordStore {
        &self.inner
    }
}

#[async_trait]
impl IRecordStore for GatedStore {
    async fn fetch(&self, id: &RecordId) -> anyhow::Result<Option<Record>> {
        let snapshot = self.inner.fetch(id).await?;
        let gate = self.gate.lock().unwrap().take();
        if let Some(release) = gate {
            self.entered.notify_one();
            let _ = release.await;
        }
        Ok(snapshot)
    }

    async fn update(&self, id: &RecordId, content: &str) -> anyhow::Result<()> {
        self.inner.update(id, content).await
    }
}
