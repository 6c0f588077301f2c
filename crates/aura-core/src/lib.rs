//! # aura-core
//!
//! Foundation types, errors, and utilities for the Aura migraine tracker.
//!
//! This crate provides the shared vocabulary that all other Aura crates depend on:
//!
//! - **Domain records**: `Episode`, `LookupItem`, `Medication` as they exist in storage
//! - **Typed inputs**: `EpisodeInput`, `LookupInput`, `MedicationInput` with validation
//! - **Composed views**: `EpisodeDetail`, `EpisodeEditView`, `FormOptions` for rendering
//! - **Errors**: `TrackerError` hierarchy via `thiserror`, mapped to HTTP statuses upstream
//! - **Logging**: `init_subscriber` for the `tracing` stderr subscriber

#![deny(unsafe_code)]

pub mod constants;
pub mod errors;
pub mod logging;
pub mod types;

pub use errors::{Result, TrackerError};
pub use types::{
    Episode, EpisodeDetail, EpisodeEditView, EpisodeInput, EpisodeStats, FormOptions, LookupInput,
    LookupItem, Medication, MedicationInput, SelectedIds, format_datetime_input,
    parse_datetime_input,
};
