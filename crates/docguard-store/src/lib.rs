//! docguard Store - Authoritative record storage
//!
//! In-memory record store with simulated latency, used as the source of
//! truth behind the access gateway.
//!
//! ## Architecture
//!
//! This crate implements the `IRecordStore` port from `docguard-core`.
//! It is a driven (secondary) adapter in the hexagonal architecture.
//!
//! ## Key Components
//!
//! - [`InMemoryRecordStore`] - `IRecordStore` implementation over a `HashMap`
//! - [`StoreOptions`] - Simulated latency settings
//! - [`seed`] - Built-in sample records and YAML seed files
//! - [`StoreError`] - Error types for seeding operations
//!
//! ## Usage
//!
//! ```no_run
//! use docguard_store::{seed, InMemoryRecordStore, StoreOptions};
//!
//! # async fn example() {
//! let store = InMemoryRecordStore::open(seed::default_records(), StoreOptions::default()).await;
//! // Use store as IRecordStore...
//! # }
//! ```

pub mod memory;
pub mod seed;

pub use memory::{InMemoryRecordStore, StoreOptions};

use docguard_core::domain::DomainError;

/// Errors that can occur while building a store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The seed file could not be read
    #[error("Failed to read seed file {path}: {source}")]
    SeedUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The seed file is not valid YAML for a list of records
    #[error("Failed to parse seed file: {0}")]
    SeedMalformed(String),

    /// A seeded record failed domain validation
    #[error("Invalid record in seed: {0}")]
    InvalidRecord(#[from] DomainError),

    /// Two seeded records share an id
    #[error("Duplicate record id in seed: {0}")]
    DuplicateId(String),
}

impl From<serde_yaml::Error> for StoreError {
    fn from(e: serde_yaml::Error) -> Self {
        StoreError::SeedMalformed(e.to_string())
    }
}
