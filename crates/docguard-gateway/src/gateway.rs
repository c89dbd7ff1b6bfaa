//! AccessGateway - the caching, authorizing, audit-logging façade
//!
//! Every request moves through the same states:
//!
//! ```text
//! RECEIVED -> (CACHE_HIT | STORE_LOOKUP) -> (NOT_FOUND | AUTHORIZED | DENIED)
//! ```
//!
//! ## Design Notes
//!
//! - The [`RecordService`] is built on first use inside a
//!   `tokio::sync::OnceCell`, so concurrent first calls construct it once.
//! - Only records that some principal was authorized to see are cached, and
//!   a cache hit is still checked against the caller's clearance.
//! - `edit` always reads the authoritative store and evicts the id
//!   afterwards; the cached copy is never rewritten in place.
//! - Each request writes its audit entries through one [`AuditBatch`], so
//!   they stay adjacent in the log even under concurrent callers.
//!
//! [`AuditBatch`]: docguard_audit::AuditBatch

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::OnceCell;
use tracing::{debug, info, info_span, warn, Instrument};

use docguard_audit::AuditLog;
use docguard_core::config::GatewayConfig;
use docguard_core::domain::{AuditEntry, Principal, Record, RecordId, RequestId};
use docguard_core::ports::IRecordStore;

use crate::cache::{CacheTicket, RecordCache};
use crate::outcome::AccessOutcome;
use crate::service::RecordService;
use crate::GatewayError;

/// How a read located its record
enum Lookup {
    CacheHit(Record),
    Fetched(Record, CacheTicket),
}

/// Clearance-gated, cached, audited access to the record store
pub struct AccessGateway {
    store: Arc<dyn IRecordStore>,
    service: OnceCell<RecordService>,
    initializations: AtomicUsize,
    cache: RecordCache,
    audit: AuditLog,
    store_timeout: Option<Duration>,
}

impl AccessGateway {
    /// Creates a gateway over an externally owned store
    ///
    /// No record service is created until the first request.
    pub fn new(store: Arc<dyn IRecordStore>) -> Self {
        Self {
            store,
            service: OnceCell::new(),
            initializations: AtomicUsize::new(0),
            cache: RecordCache::new(),
            audit: AuditLog::new(),
            store_timeout: None,
        }
    }

    /// Creates a gateway using the deadline from `config`
    pub fn with_config(store: Arc<dyn IRecordStore>, config: &GatewayConfig) -> Self {
        let gateway = Self::new(store);
        match config.store_timeout() {
            Some(timeout) => gateway.with_store_timeout(timeout),
            None => gateway,
        }
    }

    /// Bounds every store call by `timeout`
    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = Some(timeout);
        self
    }

    async fn service(&self) -> &RecordService {
        self.service
            .get_or_init(|| async {
                self.initializations.fetch_add(1, Ordering::SeqCst);
                RecordService::new(Arc::clone(&self.store))
            })
            .await
    }

    /// Returns true once the record service has been created
    pub fn is_service_initialized(&self) -> bool {
        self.service.initialized()
    }

    /// Number of times the record service was constructed (0 or 1)
    pub fn service_initializations(&self) -> usize {
        self.initializations.load(Ordering::SeqCst)
    }

    /// Runs a store call under the configured deadline
    async fn call<T, F>(&self, operation: &'static str, fut: F) -> Result<T, GatewayError>
    where
        F: Future<Output = anyhow::Result<T>>,
    {
        let result = match self.store_timeout {
            Some(limit) => match tokio::time::timeout(limit, fut).await {
                Ok(result) => result,
                Err(_) => {
                    warn!(operation, after_ms = limit.as_millis() as u64, "Store call timed out");
                    return Err(GatewayError::Timeout {
                        operation,
                        after_ms: limit.as_millis() as u64,
                    });
                }
            },
            None => fut.await,
        };

        result.map_err(|e| {
            warn!(operation, error = %e, "Store call failed");
            GatewayError::StoreUnavailable {
                operation,
                message: format!("{e:#}"),
            }
        })
    }

    /// Reads a record on behalf of `principal`
    ///
    /// Serves from the cache when possible. A record fetched from the store
    /// is cached only if `principal` is authorized for it.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the store fails or times out. The cache is
    /// left untouched in that case.
    pub async fn view(
        &self,
        record_id: &RecordId,
        principal: &Principal,
    ) -> Result<AccessOutcome<Record>, GatewayError> {
        let request_id = RequestId::new();
        let span = info_span!(
            "view",
            request_id = %request_id,
            record_id = %record_id,
            principal = %principal.id()
        );
        self.view_inner(request_id, record_id, principal)
            .instrument(span)
            .await
    }

    async fn view_inner(
        &self,
        request_id: RequestId,
        record_id: &RecordId,
        principal: &Principal,
    ) -> Result<AccessOutcome<Record>, GatewayError> {
        let mut audit = self.audit.begin(request_id);
        audit.view_attempt(principal.id(), record_id);

        let lookup = match self.cache.get(record_id) {
            Some(record) => {
                debug!("Record served from cache");
                Lookup::CacheHit(record)
            }
            None => {
                let ticket = self.cache.ticket(record_id);
                let service = self.service().await;
                match self.call("fetch", service.fetch(record_id)).await? {
                    Some(record) => Lookup::Fetched(record, ticket),
                    None => {
                        info!("Record not found");
                        return Ok(AccessOutcome::NotFound);
                    }
                }
            }
        };

        let (record, ticket) = match lookup {
            Lookup::CacheHit(record) => (record, None),
            Lookup::Fetched(record, ticket) => (record, Some(ticket)),
        };

        if !principal.is_authorized_for(&record) {
            warn!(
                clearance = %principal.clearance(),
                required = %record.required_clearance(),
                "Access denied"
            );
            audit.access_denied(principal.id(), record_id);
            return Ok(AccessOutcome::Denied);
        }

        if let Some(ticket) = ticket {
            if !self.cache.insert_if_current(record.clone(), ticket) {
                debug!("Record invalidated during fetch; not cached");
            }
        }

        info!(title = record.title(), "Access granted");
        audit.commit();
        Ok(AccessOutcome::Granted(record))
    }

    /// Replaces a record's content on behalf of `principal`
    ///
    /// Always reads the authoritative store (never the cache) to authorize,
    /// then updates the store and evicts the id from the cache.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the store fails or times out. If the
    /// update itself fails the id is still evicted, since the store may have
    /// applied it.
    pub async fn edit(
        &self,
        record_id: &RecordId,
        principal: &Principal,
        new_content: &str,
    ) -> Result<AccessOutcome<()>, GatewayError> {
        let request_id = RequestId::new();
        let span = info_span!(
            "edit",
            request_id = %request_id,
            record_id = %record_id,
            principal = %principal.id()
        );
        self.edit_inner(request_id, record_id, principal, new_content)
            .instrument(span)
            .await
    }

    async fn edit_inner(
        &self,
        request_id: RequestId,
        record_id: &RecordId,
        principal: &Principal,
        new_content: &str,
    ) -> Result<AccessOutcome<()>, GatewayError> {
        let mut audit = self.audit.begin(request_id);
        audit.edit_attempt(principal.id(), record_id);

        let service = self.service().await;
        let Some(current) = self.call("fetch", service.fetch(record_id)).await? else {
            info!("Record not found");
            return Ok(AccessOutcome::NotFound);
        };

        if !principal.is_authorized_for(&current) {
            warn!(
                clearance = %principal.clearance(),
                required = %current.required_clearance(),
                "Edit denied"
            );
            audit.access_denied(principal.id(), record_id);
            return Ok(AccessOutcome::Denied);
        }

        let updated = self.call("update", service.update(record_id, new_content)).await;
        let was_cached = self.cache.invalidate(record_id);
        updated?;

        info!(was_cached, "Record updated; cache entry invalidated");
        audit.commit();
        Ok(AccessOutcome::Granted(()))
    }

    /// The gateway's audit log
    pub fn audit_log(&self) -> &AuditLog {
        &self.audit
    }

    /// All audit entries in insertion order
    pub fn dump_audit(&self) -> Vec<AuditEntry> {
        self.audit.dump()
    }

    /// Returns true if `record_id` is currently cached
    pub fn is_cached(&self, record_id: &RecordId) -> bool {
        self.cache.contains(record_id)
    }

    /// Ids currently cached, sorted
    pub fn cached_ids(&self) -> Vec<RecordId> {
        self.cache.ids()
    }
}
