//! Port definitions (hexagonal architecture interfaces)
//!
//! Ports are interfaces that the gateway depends on, but whose
//! implementations live in adapter crates.
//!
//! ## Ports Overview
//!
//! - [`IRecordStore`] - Authoritative record lookup and update

pub mod record_store;

pub use record_store::IRecordStore;
