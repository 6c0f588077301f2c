//! Error types for the tracker.
//!
//! [`TrackerError`] is the primary error type returned by all storage and
//! domain operations. It provides specific variants for common failure modes
//! while keeping the surface area small enough for exhaustive pattern
//! matching; the HTTP layer maps each variant to a status code.

use thiserror::Error;

/// Errors that can occur during tracker operations.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Submitted form data failed validation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Requested episode was not found.
    #[error("episode not found: {0}")]
    EpisodeNotFound(i64),

    /// Requested reference entity (symptom, trigger, etc.) was not found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Human-readable entity name, e.g. "symptom".
        entity: &'static str,
        /// Row ID that was requested.
        id: i64,
    },

    /// Table browser was asked for a table outside the schema allow-list.
    #[error("unknown table: {0}")]
    UnknownTable(String),

    /// `SQLite` database error.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool error.
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Schema migration failed.
    #[error("migration error: {message}")]
    Migration {
        /// Describes which migration failed and why.
        message: String,
    },
}

/// Convenience type alias for tracker results.
pub type Result<T> = std::result::Result<T, TrackerError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
