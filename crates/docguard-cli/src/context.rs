//! Shared setup for commands that touch the store

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use docguard_core::config::Config;
use docguard_core::domain::Record;
use docguard_gateway::AccessGateway;
use docguard_store::{seed, InMemoryRecordStore, StoreOptions};

/// Configuration resolved from `--config` or the default location
#[derive(Debug)]
pub struct AppContext {
    pub config: Config,
    pub config_path: PathBuf,
    /// True when the path came from `--config`
    pub explicit: bool,
}

impl AppContext {
    /// Loads the configuration
    ///
    /// An explicit path must exist and parse. A missing or unreadable
    /// default file falls back to built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let config = Config::load(path)
                    .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
                Ok(Self {
                    config,
                    config_path: path.to_path_buf(),
                    explicit: true,
                })
            }
            None => {
                let config_path = Config::default_path();
                Ok(Self {
                    config: Config::load_or_default(&config_path),
                    config_path,
                    explicit: false,
                })
            }
        }
    }

    /// Records to seed the store with
    pub fn seed_records(&self) -> Result<Vec<Record>> {
        match &self.config.store.seed_file {
            Some(path) => seed::load_seed_file(path)
                .with_context(|| format!("Failed to seed store from {}", path.display())),
            None => Ok(seed::default_records()),
        }
    }

    pub fn store_options(&self) -> StoreOptions {
        StoreOptions::from_config(&self.config.store)
    }

    /// Opens the store, paying its connect latency, and builds a gateway over it
    pub async fn open_gateway(&self) -> Result<(Arc<InMemoryRecordStore>, AccessGateway)> {
        let records = self.seed_records()?;
        let store = Arc::new(InMemoryRecordStore::open(records, self.store_options()).await);
        let gateway = AccessGateway::with_config(store.clone(), &self.config.gateway);
        Ok((store, gateway))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_explicit_missing_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");

        let err = AppContext::load(Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("Failed to load configuration"));
    }

    #[test]
    fn test_explicit_path_is_used() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "store:\n  fetch_latency_ms: 5\ngateway:\n  store_timeout_ms: 50").unwrap();

        let ctx = AppContext::load(Some(file.path())).unwrap();
        assert!(ctx.explicit);
        assert_eq!(ctx.config.store.fetch_latency_ms, 5);
        assert_eq!(ctx.config.gateway.store_timeout_ms, Some(50));
        assert_eq!(ctx.config_path, file.path());
    }

    #[test]
    fn test_seed_file_replaces_defaults() {
        let mut seed_file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            seed_file,
            "- id: NOTE1\n  title: Lab Notes\n  content: beaker\n  required_clearance: restricted"
        )
        .unwrap();

        let ctx = AppContext {
            config: docguard_core::config::ConfigBuilder::new()
                .store_seed_file(seed_file.path().to_path_buf())
                .build(),
            config_path: PathBuf::from("unused.yaml"),
            explicit: false,
        };

        let records = ctx.seed_records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title(), "Lab Notes");
    }

    #[tokio::test]
    async fn test_open_gateway_with_default_seed() {
        let config = docguard_core::config::ConfigBuilder::new()
            .store_fetch_latency_ms(0)
            .store_update_latency_ms(0)
            .store_connect_latency_ms(0)
            .build();
        let ctx = AppContext {
            config,
            config_path: PathBuf::from("unused.yaml"),
            explicit: false,
        };

        let (store, gateway) = ctx.open_gateway().await.unwrap();
        assert_eq!(store.list().await.len(), 3);
        assert!(!gateway.is_service_initialized());
    }
}
