//! # aura-store
//!
//! `SQLite` persistence layer for the Aura migraine tracker.
//!
//! This crate owns everything that touches the database:
//!
//! - **Connection pool**: `r2d2` pool with WAL mode, foreign keys, and
//!   performance pragmas applied to every connection
//! - **Migrations**: Version-tracked schema evolution, embedded at compile time
//! - **Repositories**: Stateless structs whose methods take `&Connection`
//! - **`TrackerStore`**: High-level facade — multi-statement writes run inside
//!   a single transaction so callers never observe partial state
//! - **Schema browser**: Allow-listed raw table inspection for the debug pages

#![deny(unsafe_code)]

pub mod browse;
pub mod sqlite;
pub mod store;

pub use sqlite::connection::{
    ConnectionConfig, ConnectionPool, PooledConnection, PragmaState, new_file, new_in_memory,
    verify_pragmas,
};
pub use sqlite::migrations::{current_version, latest_version, run_migrations};
pub use sqlite::repositories::LookupKind;
pub use store::TrackerStore;
