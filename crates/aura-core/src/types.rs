//! Domain types for the migraine tracker.
//!
//! These are the shapes the rest of the system speaks in: records as they
//! exist in storage ([`Episode`], [`LookupItem`], [`Medication`]), typed
//! inputs produced from submitted forms ([`EpisodeInput`], [`LookupInput`],
//! [`MedicationInput`]), and composed read models for rendering
//! ([`EpisodeDetail`], [`EpisodeEditView`], [`FormOptions`]).
//!
//! Raw form strings never cross the storage boundary — the HTTP layer
//! converts them into these structs first, so every storage operation works
//! with already-validated data.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, TrackerError};

/// Format accepted from and rendered into `datetime-local` form inputs.
const DATETIME_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Same format with a seconds component, which some browsers submit.
const DATETIME_INPUT_FORMAT_SECONDS: &str = "%Y-%m-%dT%H:%M:%S";

// ─────────────────────────────────────────────────────────────────────────────
// Stored records
// ─────────────────────────────────────────────────────────────────────────────

/// A migraine episode as stored in the `episodes` table.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Episode {
    /// Row ID.
    pub id: i64,
    /// Owning user ID (always [`crate::constants::DEFAULT_USER_ID`] today).
    pub user_id: i64,
    /// When the episode began.
    pub start_time: NaiveDateTime,
    /// When the episode ended (null while ongoing or unrecorded).
    pub end_time: Option<NaiveDateTime>,
    /// Pain intensity as submitted (1-10 on the form).
    pub intensity: i64,
    /// Attack type classification, if one was picked.
    pub attack_type_id: Option<i64>,
    /// Whether menstruation coincided with the episode.
    pub had_menses: bool,
    /// Free-text notes (empty string when none were entered).
    pub notes: String,
    /// Creation timestamp, set once on insert.
    pub created_at: NaiveDateTime,
}

/// A name-only reference entity: attack type, symptom, trigger, or pain
/// location. All four tables share this shape.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LookupItem {
    /// Row ID.
    pub id: i64,
    /// Display name.
    pub name: String,
}

/// A medication as stored in the `medications` table.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Medication {
    /// Row ID.
    pub id: i64,
    /// Generic drug name.
    pub generic_name: String,
    /// Dose in milligrams (null when not recorded).
    pub milligrams: Option<f64>,
    /// Administration route (empty string when not recorded).
    pub route: String,
}

impl Medication {
    /// Label shown in pick lists and on the episode detail page.
    ///
    /// Appends the dose when one is recorded, e.g. `Sumatriptan (50mg)`.
    /// Whole-number doses render without a decimal point; a zero dose is
    /// treated as unrecorded.
    pub fn display_label(&self) -> String {
        match self.milligrams {
            Some(mg) if mg > 0.0 => format!("{} ({mg}mg)", self.generic_name),
            _ => self.generic_name.clone(),
        }
    }
}

/// Aggregate episode counts for the home page.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EpisodeStats {
    /// Total episodes recorded.
    pub total: i64,
    /// Episodes whose start time falls in the current calendar month.
    pub this_month: i64,
    /// Mean intensity across all episodes, rounded to one decimal
    /// (null when no episodes exist).
    pub mean_intensity: Option<f64>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Typed inputs
// ─────────────────────────────────────────────────────────────────────────────

/// Validated input for creating or updating an episode.
///
/// Built by the HTTP layer from the submitted form. The four ID vectors
/// fully replace the episode's association sets on update.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EpisodeInput {
    /// Owning user ID.
    pub user_id: i64,
    /// When the episode began.
    pub start_time: NaiveDateTime,
    /// When the episode ended, if recorded.
    pub end_time: Option<NaiveDateTime>,
    /// Pain intensity.
    pub intensity: i64,
    /// Attack type classification, if one was picked.
    pub attack_type_id: Option<i64>,
    /// Whether menstruation coincided with the episode.
    pub had_menses: bool,
    /// Free-text notes.
    pub notes: String,
    /// Selected pain location IDs.
    pub pain_location_ids: Vec<i64>,
    /// Selected symptom IDs.
    pub symptom_ids: Vec<i64>,
    /// Selected trigger IDs.
    pub trigger_ids: Vec<i64>,
    /// Selected medication IDs.
    pub medication_ids: Vec<i64>,
}

impl EpisodeInput {
    /// Check cross-field invariants before any storage work happens.
    ///
    /// An episode may end at the same instant it starts, but never earlier.
    pub fn validate(&self) -> Result<()> {
        if let Some(end) = self.end_time {
            if end < self.start_time {
                return Err(TrackerError::InvalidInput(
                    "end time cannot be before start time".into(),
                ));
            }
        }
        Ok(())
    }
}

/// Validated input for creating or updating a name-only reference entity.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LookupInput {
    /// Display name.
    pub name: String,
}

/// Validated input for creating or updating a medication.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MedicationInput {
    /// Generic drug name.
    pub generic_name: String,
    /// Dose in milligrams (`None` when the field was left blank).
    pub milligrams: Option<f64>,
    /// Administration route (empty string when left blank).
    pub route: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Composed read models
// ─────────────────────────────────────────────────────────────────────────────

/// An episode with every association resolved to display text.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EpisodeDetail {
    /// The episode record.
    pub episode: Episode,
    /// Attack type name, if one is set.
    pub attack_type: Option<String>,
    /// Associated pain location names, ordered by name.
    pub pain_locations: Vec<String>,
    /// Associated symptom names, ordered by name.
    pub symptoms: Vec<String>,
    /// Associated trigger names, ordered by name.
    pub triggers: Vec<String>,
    /// Associated medication labels (dose included where recorded),
    /// ordered by generic name.
    pub medications: Vec<String>,
}

/// The complete option lists an episode form needs to render.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FormOptions {
    /// All attack types, ordered by name.
    pub attack_types: Vec<LookupItem>,
    /// All pain locations, ordered by name.
    pub pain_locations: Vec<LookupItem>,
    /// All symptoms, ordered by name.
    pub symptoms: Vec<LookupItem>,
    /// All triggers, ordered by name.
    pub triggers: Vec<LookupItem>,
    /// All medications, ordered by generic name.
    pub medications: Vec<Medication>,
}

/// The association IDs currently attached to an episode.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SelectedIds {
    /// Attached pain location IDs.
    pub pain_location_ids: Vec<i64>,
    /// Attached symptom IDs.
    pub symptom_ids: Vec<i64>,
    /// Attached trigger IDs.
    pub trigger_ids: Vec<i64>,
    /// Attached medication IDs.
    pub medication_ids: Vec<i64>,
}

/// Everything the edit form needs: the raw episode, the full option lists,
/// and which options are currently attached.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EpisodeEditView {
    /// The episode being edited.
    pub episode: Episode,
    /// Full reference lists for the form's selects.
    pub options: FormOptions,
    /// Currently attached association IDs.
    pub selected: SelectedIds,
}

// ─────────────────────────────────────────────────────────────────────────────
// Datetime form helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Parse a `datetime-local` form value.
///
/// Accepts minute precision (`2024-03-01T08:30`) and second precision
/// (`2024-03-01T08:30:00`).
pub fn parse_datetime_input(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, DATETIME_INPUT_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, DATETIME_INPUT_FORMAT_SECONDS))
        .map_err(|_| TrackerError::InvalidInput(format!("invalid datetime: {value}")))
}

/// Render a timestamp as a `datetime-local` input value (minute precision).
pub fn format_datetime_input(value: &NaiveDateTime) -> String {
    value.format(DATETIME_INPUT_FORMAT).to_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
