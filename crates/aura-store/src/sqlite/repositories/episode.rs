//! Episode repository — the episode row and its association links.
//!
//! Episodes carry four many-to-many association sets (pain locations,
//! symptoms, triggers, medications). The junction mechanics are identical
//! across all four, so they share one [`Relation`]-parameterized helper set
//! instead of four copies of the same SQL.
//!
//! Inputs arrive pre-validated; cross-field checks happen in the store
//! facade before any SQL runs.

use chrono::NaiveDateTime;
use rusqlite::{Connection, OptionalExtension, params};

use aura_core::errors::Result;
use aura_core::types::{Episode, EpisodeInput, Medication};

/// One of the four episode association sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relation {
    /// Links into `pain_locations`.
    PainLocations,
    /// Links into `symptoms`.
    Symptoms,
    /// Links into `triggers`.
    Triggers,
    /// Links into `medications`.
    Medications,
}

impl Relation {
    /// Every association set, in the order the episode form renders them.
    pub const ALL: [Relation; 4] = [
        Relation::PainLocations,
        Relation::Symptoms,
        Relation::Triggers,
        Relation::Medications,
    ];

    /// Junction table name.
    fn table(self) -> &'static str {
        match self {
            Relation::PainLocations => "episode_pain_locations",
            Relation::Symptoms => "episode_symptoms",
            Relation::Triggers => "episode_triggers",
            Relation::Medications => "episode_medications",
        }
    }

    /// Reference-side column in the junction table.
    fn column(self) -> &'static str {
        match self {
            Relation::PainLocations => "pain_location_id",
            Relation::Symptoms => "symptom_id",
            Relation::Triggers => "trigger_id",
            Relation::Medications => "medication_id",
        }
    }

    /// Referenced table.
    fn ref_table(self) -> &'static str {
        match self {
            Relation::PainLocations => "pain_locations",
            Relation::Symptoms => "symptoms",
            Relation::Triggers => "triggers",
            Relation::Medications => "medications",
        }
    }
}

/// Episode repository — stateless, every method takes `&Connection`.
pub struct EpisodeRepo;

impl EpisodeRepo {
    /// Insert the episode row. Association links are written separately.
    ///
    /// Sets `created_at` to the current UTC time; the column never changes
    /// afterwards.
    pub fn insert(conn: &Connection, input: &EpisodeInput) -> Result<Episode> {
        let created_at = chrono::Utc::now().naive_utc();
        let _ = conn.execute(
            "INSERT INTO episodes (user_id, start_time, end_time, intensity, attack_type_id,
             had_menses, notes, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                input.user_id,
                input.start_time,
                input.end_time,
                input.intensity,
                input.attack_type_id,
                input.had_menses,
                input.notes,
                created_at,
            ],
        )?;

        Ok(Episode {
            id: conn.last_insert_rowid(),
            user_id: input.user_id,
            start_time: input.start_time,
            end_time: input.end_time,
            intensity: input.intensity,
            attack_type_id: input.attack_type_id,
            had_menses: input.had_menses,
            notes: input.notes.clone(),
            created_at,
        })
    }

    /// Get an episode by ID.
    pub fn get(conn: &Connection, id: i64) -> Result<Option<Episode>> {
        let row = conn
            .query_row(
                "SELECT * FROM episodes WHERE id = ?1",
                params![id],
                Self::map_row,
            )
            .optional()?;
        Ok(row)
    }

    /// List episodes, newest start time first.
    pub fn list(conn: &Connection, limit: i64) -> Result<Vec<Episode>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM episodes ORDER BY start_time DESC, id DESC LIMIT ?1",
        )?;
        let rows = stmt
            .query_map(params![limit], Self::map_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Overwrite every mutable column of the episode row.
    ///
    /// `created_at` is deliberately not in the SET list. Returns false when
    /// no row matched.
    pub fn update_row(conn: &Connection, id: i64, input: &EpisodeInput) -> Result<bool> {
        let changed = conn.execute(
            "UPDATE episodes SET user_id = ?1, start_time = ?2, end_time = ?3, intensity = ?4,
             attack_type_id = ?5, had_menses = ?6, notes = ?7
             WHERE id = ?8",
            params![
                input.user_id,
                input.start_time,
                input.end_time,
                input.intensity,
                input.attack_type_id,
                input.had_menses,
                input.notes,
                id,
            ],
        )?;
        Ok(changed > 0)
    }

    /// Delete an episode. Association links go with it via `ON DELETE
    /// CASCADE`. Returns false when no row matched.
    pub fn delete(conn: &Connection, id: i64) -> Result<bool> {
        let changed = conn.execute("DELETE FROM episodes WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    /// Check if an episode exists.
    pub fn exists(conn: &Connection, id: i64) -> Result<bool> {
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM episodes WHERE id = ?1)",
            params![id],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// Total number of episodes.
    pub fn count(conn: &Connection) -> Result<i64> {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM episodes", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Number of episodes whose start time is at or after the cutoff.
    pub fn count_started_since(conn: &Connection, since: &NaiveDateTime) -> Result<i64> {
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM episodes WHERE start_time >= ?1",
            params![since],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Mean intensity across all episodes, rounded to one decimal.
    /// Returns `None` when no episodes exist.
    pub fn mean_intensity(conn: &Connection) -> Result<Option<f64>> {
        let mean: Option<f64> = conn.query_row(
            "SELECT ROUND(AVG(intensity), 1) FROM episodes",
            [],
            |row| row.get(0),
        )?;
        Ok(mean)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Association links
    // ─────────────────────────────────────────────────────────────────────────

    /// Link the given reference IDs to an episode.
    ///
    /// IDs must exist in the referenced table; foreign keys reject the rest.
    pub fn add_links(
        conn: &Connection,
        rel: Relation,
        episode_id: i64,
        ids: &[i64],
    ) -> Result<()> {
        let mut stmt = conn.prepare(&format!(
            "INSERT INTO {} (episode_id, {}) VALUES (?1, ?2)",
            rel.table(),
            rel.column()
        ))?;
        for id in ids {
            let _ = stmt.execute(params![episode_id, id])?;
        }
        Ok(())
    }

    /// Remove every link of one association set from an episode.
    pub fn clear_links(conn: &Connection, rel: Relation, episode_id: i64) -> Result<()> {
        let _ = conn.execute(
            &format!("DELETE FROM {} WHERE episode_id = ?1", rel.table()),
            params![episode_id],
        )?;
        Ok(())
    }

    /// Linked reference IDs, ascending.
    pub fn linked_ids(conn: &Connection, rel: Relation, episode_id: i64) -> Result<Vec<i64>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {col} FROM {} WHERE episode_id = ?1 ORDER BY {col}",
            rel.table(),
            col = rel.column()
        ))?;
        let rows = stmt
            .query_map(params![episode_id], |row| row.get(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Linked reference rows resolved to display strings, ordered by name.
    ///
    /// Medications render through [`Medication::display_label`] so the dose
    /// shows up; the other three sets are plain names.
    pub fn linked_labels(
        conn: &Connection,
        rel: Relation,
        episode_id: i64,
    ) -> Result<Vec<String>> {
        if rel == Relation::Medications {
            let mut stmt = conn.prepare(
                "SELECT m.id, m.generic_name, m.milligrams, m.route
                 FROM medications m
                 JOIN episode_medications j ON j.medication_id = m.id
                 WHERE j.episode_id = ?1
                 ORDER BY m.generic_name",
            )?;
            let meds = stmt
                .query_map(params![episode_id], |row| {
                    Ok(Medication {
                        id: row.get("id")?,
                        generic_name: row.get("generic_name")?,
                        milligrams: row.get("milligrams")?,
                        route: row.get("route")?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            return Ok(meds.iter().map(Medication::display_label).collect());
        }

        let mut stmt = conn.prepare(&format!(
            "SELECT r.name FROM {} r JOIN {} j ON j.{} = r.id
             WHERE j.episode_id = ?1 ORDER BY r.name",
            rel.ref_table(),
            rel.table(),
            rel.column()
        ))?;
        let rows = stmt
            .query_map(params![episode_id], |row| row.get(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Episode> {
        Ok(Episode {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            start_time: row.get("start_time")?,
            end_time: row.get("end_time")?,
            intensity: row.get("intensity")?,
            attack_type_id: row.get("attack_type_id")?,
            had_menses: row.get("had_menses")?,
            notes: row.get("notes")?,
            created_at: row.get("created_at")?,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
