//! Typed decoding of the HTML form payloads.
//!
//! The browser sends every field as a string. These types hold the raw
//! values and convert them into the storage input types, turning anything
//! unparseable into `InvalidInput` (which surfaces as a 400).

use serde::Deserialize;

use aura_core::constants::DEFAULT_USER_ID;
use aura_core::{
    EpisodeInput, LookupInput, MedicationInput, Result, TrackerError, parse_datetime_input,
};

/// Episode create/update form.
///
/// Multi-select fields arrive as repeated keys (`symptoms=1&symptoms=2`),
/// which `axum-extra`'s `Form` collects into vectors. A select with nothing
/// chosen sends no key at all, hence `#[serde(default)]` everywhere.
#[derive(Clone, Debug, Deserialize)]
pub struct EpisodeForm {
    /// Owner override; absent means the single-user default.
    #[serde(default)]
    pub user_id: Option<String>,

    /// `datetime-local` value, minute precision.
    #[serde(default)]
    pub start_datetime: Option<String>,

    /// Optional end, same format as the start.
    #[serde(default)]
    pub end_datetime: Option<String>,

    /// Pain intensity, 1 to 10.
    #[serde(default)]
    pub intensity: Option<String>,

    /// Selected attack type id; empty string means none.
    #[serde(default)]
    pub attack_type_id: Option<String>,

    /// Checkbox: present with value `on` when ticked, absent otherwise.
    #[serde(default)]
    pub had_menses: Option<String>,

    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,

    /// Selected pain location ids.
    #[serde(default)]
    pub pain_locations: Vec<i64>,

    /// Selected symptom ids.
    #[serde(default)]
    pub symptoms: Vec<i64>,

    /// Selected trigger ids.
    #[serde(default)]
    pub triggers: Vec<i64>,

    /// Selected medication ids.
    #[serde(default)]
    pub medications: Vec<i64>,
}

impl EpisodeForm {
    /// Convert raw form strings into an [`EpisodeInput`].
    pub fn into_input(self) -> Result<EpisodeInput> {
        let user_id =
            parse_optional_id("user_id", self.user_id.as_deref())?.unwrap_or(DEFAULT_USER_ID);

        let Some(raw_start) = non_empty(self.start_datetime.as_deref()) else {
            return Err(TrackerError::InvalidInput(
                "start time is required".to_string(),
            ));
        };
        let start_time = parse_datetime_input(raw_start)?;

        let end_time = non_empty(self.end_datetime.as_deref())
            .map(parse_datetime_input)
            .transpose()?;

        let Some(raw_intensity) = non_empty(self.intensity.as_deref()) else {
            return Err(TrackerError::InvalidInput(
                "intensity is required".to_string(),
            ));
        };
        let intensity = raw_intensity.parse().map_err(|_| {
            TrackerError::InvalidInput(format!("invalid intensity: {raw_intensity}"))
        })?;

        Ok(EpisodeInput {
            user_id,
            start_time,
            end_time,
            intensity,
            attack_type_id: parse_optional_id("attack_type_id", self.attack_type_id.as_deref())?,
            had_menses: self.had_menses.as_deref() == Some("on"),
            notes: self.notes.unwrap_or_default(),
            pain_location_ids: self.pain_locations,
            symptom_ids: self.symptoms,
            trigger_ids: self.triggers,
            medication_ids: self.medications,
        })
    }
}

/// Name form shared by the four reference lookup kinds.
#[derive(Clone, Debug, Deserialize)]
pub struct LookupForm {
    /// Display name; required, stored trimmed.
    #[serde(default)]
    pub name: Option<String>,
}

impl LookupForm {
    /// Convert into a [`LookupInput`], rejecting blank names.
    pub fn into_input(self) -> Result<LookupInput> {
        non_empty(self.name.as_deref())
            .map(|name| LookupInput {
                name: name.to_string(),
            })
            .ok_or_else(|| TrackerError::InvalidInput("name is required".to_string()))
    }
}

/// Medication create/update form.
#[derive(Clone, Debug, Deserialize)]
pub struct MedicationForm {
    /// Generic drug name; required.
    #[serde(default)]
    pub generic_name: Option<String>,

    /// Dose in milligrams; empty means unrecorded.
    #[serde(default)]
    pub milligrams: Option<String>,

    /// Route of administration (oral, nasal, ...); defaults to empty.
    #[serde(default)]
    pub route: Option<String>,
}

impl MedicationForm {
    /// Convert into a [`MedicationInput`].
    pub fn into_input(self) -> Result<MedicationInput> {
        let generic_name = non_empty(self.generic_name.as_deref())
            .ok_or_else(|| TrackerError::InvalidInput("generic name is required".to_string()))?
            .to_string();

        let milligrams = non_empty(self.milligrams.as_deref())
            .map(|raw| {
                raw.parse::<f64>()
                    .ok()
                    .filter(|parsed| parsed.is_finite())
                    .ok_or_else(|| TrackerError::InvalidInput(format!("invalid milligrams: {raw}")))
            })
            .transpose()?;

        Ok(MedicationInput {
            generic_name,
            milligrams,
            route: self
                .route
                .map_or_else(String::new, |route| route.trim().to_string()),
        })
    }
}

/// Treat empty and whitespace-only strings as absent.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|trimmed| !trimmed.is_empty())
}

fn parse_optional_id(field: &str, value: Option<&str>) -> Result<Option<i64>> {
    non_empty(value)
        .map(|raw| {
            raw.parse()
                .map_err(|_| TrackerError::InvalidInput(format!("invalid {field}: {raw}")))
        })
        .transpose()
}
