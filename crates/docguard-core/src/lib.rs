//! docguard Core - Domain types and ports
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain entities** - `Record`, `Principal`, `ClearanceLevel`, `AuditEntry`
//! - **Port definitions** - `IRecordStore`, implemented by adapter crates
//! - **Configuration** - typed YAML configuration with validation
//!
//! # Architecture
//!
//! The domain module is pure and performs no I/O. The access gateway
//! (`docguard-gateway`) orchestrates domain types through the ports.

pub mod config;
pub mod domain;
pub mod ports;
