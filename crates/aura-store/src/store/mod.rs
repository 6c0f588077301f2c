//! High-level `TrackerStore` API.
//!
//! The [`TrackerStore`] provides a transactional, episode-centric API built
//! on top of the repository layer. Multi-statement writes execute within a
//! single `SQLite` transaction, so callers never see partial state.

mod tracker_store;

pub use tracker_store::TrackerStore;
