//! High-level transactional `TrackerStore` API.
//!
//! Composes repository operations into the episode-centric methods the HTTP
//! layer calls. Every multi-statement write runs inside a single `SQLite`
//! transaction — callers never observe an episode row without its
//! association links or vice versa.

use chrono::Datelike;
use rusqlite::Connection;

use aura_core::constants::{EPISODE_LIST_LIMIT, ROW_PREVIEW_LIMIT};
use aura_core::errors::{Result, TrackerError};
use aura_core::types::{
    Episode, EpisodeDetail, EpisodeEditView, EpisodeInput, EpisodeStats, FormOptions, LookupInput,
    LookupItem, Medication, MedicationInput, SelectedIds,
};

use crate::browse::{self, ColumnInfo, TablePreview};
use crate::sqlite::connection::{ConnectionPool, PooledConnection};
use crate::sqlite::repositories::episode::{EpisodeRepo, Relation};
use crate::sqlite::repositories::lookup::{LookupKind, LookupRepo};
use crate::sqlite::repositories::medication::MedicationRepo;

/// High-level tracker store wrapping a connection pool and all repositories.
pub struct TrackerStore {
    pool: ConnectionPool,
}

impl TrackerStore {
    /// Create a new `TrackerStore` with the given connection pool.
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    /// Get a connection from the pool.
    fn conn(&self) -> Result<PooledConnection> {
        Ok(self.pool.get()?)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Episodes
    // ─────────────────────────────────────────────────────────────────────

    /// List episodes, newest start time first, capped at the listing limit.
    pub fn list_episodes(&self) -> Result<Vec<Episode>> {
        let conn = self.conn()?;
        EpisodeRepo::list(&conn, EPISODE_LIST_LIMIT)
    }

    /// An episode with every association resolved to display text.
    pub fn episode_detail(&self, id: i64) -> Result<EpisodeDetail> {
        let conn = self.conn()?;
        let episode = EpisodeRepo::get(&conn, id)?.ok_or(TrackerError::EpisodeNotFound(id))?;

        let attack_type = match episode.attack_type_id {
            Some(attack_type_id) => {
                LookupRepo::get(&conn, LookupKind::AttackType, attack_type_id)?
                    .map(|item| item.name)
            }
            None => None,
        };

        Ok(EpisodeDetail {
            attack_type,
            pain_locations: EpisodeRepo::linked_labels(&conn, Relation::PainLocations, id)?,
            symptoms: EpisodeRepo::linked_labels(&conn, Relation::Symptoms, id)?,
            triggers: EpisodeRepo::linked_labels(&conn, Relation::Triggers, id)?,
            medications: EpisodeRepo::linked_labels(&conn, Relation::Medications, id)?,
            episode,
        })
    }

    /// Everything the edit form needs: raw fields, full option lists, and
    /// the currently attached IDs.
    pub fn episode_edit_view(&self, id: i64) -> Result<EpisodeEditView> {
        let conn = self.conn()?;
        let episode = EpisodeRepo::get(&conn, id)?.ok_or(TrackerError::EpisodeNotFound(id))?;
        let options = Self::load_form_options(&conn)?;
        let selected = SelectedIds {
            pain_location_ids: EpisodeRepo::linked_ids(&conn, Relation::PainLocations, id)?,
            symptom_ids: EpisodeRepo::linked_ids(&conn, Relation::Symptoms, id)?,
            trigger_ids: EpisodeRepo::linked_ids(&conn, Relation::Triggers, id)?,
            medication_ids: EpisodeRepo::linked_ids(&conn, Relation::Medications, id)?,
        };
        Ok(EpisodeEditView {
            episode,
            options,
            selected,
        })
    }

    /// The option lists the blank episode form needs.
    pub fn form_options(&self) -> Result<FormOptions> {
        let conn = self.conn()?;
        Self::load_form_options(&conn)
    }

    /// Create an episode with its association links.
    ///
    /// Atomic: the episode row and all four link sets commit together, so a
    /// failed link insert leaves no orphan row behind. Validation failures
    /// surface before any SQL runs.
    pub fn create_episode(&self, input: &EpisodeInput) -> Result<Episode> {
        input.validate()?;

        let conn = self.conn()?;
        let tx = conn.unchecked_transaction()?;

        // 1. Insert the episode row
        let episode = EpisodeRepo::insert(&tx, input)?;

        // 2. Write association links
        EpisodeRepo::add_links(
            &tx,
            Relation::PainLocations,
            episode.id,
            &input.pain_location_ids,
        )?;
        EpisodeRepo::add_links(&tx, Relation::Symptoms, episode.id, &input.symptom_ids)?;
        EpisodeRepo::add_links(&tx, Relation::Triggers, episode.id, &input.trigger_ids)?;
        EpisodeRepo::add_links(&tx, Relation::Medications, episode.id, &input.medication_ids)?;

        tx.commit()?;
        Ok(episode)
    }

    /// Replace an episode and all four association sets.
    ///
    /// Atomic: the row update and the link replacement commit together. The
    /// existence check runs inside the same transaction, so a concurrent
    /// delete cannot produce a half-updated episode.
    pub fn update_episode(&self, id: i64, input: &EpisodeInput) -> Result<()> {
        input.validate()?;

        let conn = self.conn()?;
        let tx = conn.unchecked_transaction()?;

        // 1. Overwrite the episode row (bails when the row is gone)
        if !EpisodeRepo::update_row(&tx, id, input)? {
            return Err(TrackerError::EpisodeNotFound(id));
        }

        // 2. Drop every existing link
        for rel in Relation::ALL {
            EpisodeRepo::clear_links(&tx, rel, id)?;
        }

        // 3. Write the submitted sets
        EpisodeRepo::add_links(&tx, Relation::PainLocations, id, &input.pain_location_ids)?;
        EpisodeRepo::add_links(&tx, Relation::Symptoms, id, &input.symptom_ids)?;
        EpisodeRepo::add_links(&tx, Relation::Triggers, id, &input.trigger_ids)?;
        EpisodeRepo::add_links(&tx, Relation::Medications, id, &input.medication_ids)?;

        tx.commit()?;
        Ok(())
    }

    /// Delete an episode. Association links cascade away with the row.
    ///
    /// Returns whether a row was actually deleted; deleting an unknown ID
    /// is not an error.
    pub fn delete_episode(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        EpisodeRepo::delete(&conn, id)
    }

    /// Aggregate counts for the home page.
    pub fn stats(&self) -> Result<EpisodeStats> {
        let conn = self.conn()?;
        let now = chrono::Local::now().naive_local();
        let month_start = now
            .date()
            .with_day(1)
            .unwrap_or_else(|| now.date())
            .and_hms_opt(0, 0, 0)
            .unwrap_or(now);

        Ok(EpisodeStats {
            total: EpisodeRepo::count(&conn)?,
            this_month: EpisodeRepo::count_started_since(&conn, &month_start)?,
            mean_intensity: EpisodeRepo::mean_intensity(&conn)?,
        })
    }

    fn load_form_options(conn: &Connection) -> Result<FormOptions> {
        Ok(FormOptions {
            attack_types: LookupRepo::list(conn, LookupKind::AttackType)?,
            pain_locations: LookupRepo::list(conn, LookupKind::PainLocation)?,
            symptoms: LookupRepo::list(conn, LookupKind::Symptom)?,
            triggers: LookupRepo::list(conn, LookupKind::Trigger)?,
            medications: MedicationRepo::list(conn)?,
        })
    }

    // ─────────────────────────────────────────────────────────────────────
    // Reference entities
    // ─────────────────────────────────────────────────────────────────────

    /// List all entries of a lookup kind, ordered by name.
    pub fn lookup_list(&self, kind: LookupKind) -> Result<Vec<LookupItem>> {
        let conn = self.conn()?;
        LookupRepo::list(&conn, kind)
    }

    /// Get a lookup entry or fail with the kind's entity name.
    pub fn lookup_get(&self, kind: LookupKind, id: i64) -> Result<LookupItem> {
        let conn = self.conn()?;
        LookupRepo::get(&conn, kind, id)?.ok_or(TrackerError::NotFound {
            entity: kind.entity(),
            id,
        })
    }

    /// Create a lookup entry.
    pub fn lookup_create(&self, kind: LookupKind, input: &LookupInput) -> Result<LookupItem> {
        let conn = self.conn()?;
        LookupRepo::create(&conn, kind, input)
    }

    /// Rename a lookup entry.
    pub fn lookup_update(&self, kind: LookupKind, id: i64, input: &LookupInput) -> Result<()> {
        let conn = self.conn()?;
        if !LookupRepo::update(&conn, kind, id, input)? {
            return Err(TrackerError::NotFound {
                entity: kind.entity(),
                id,
            });
        }
        Ok(())
    }

    /// Delete a lookup entry. Deleting an unknown ID is not an error.
    pub fn lookup_delete(&self, kind: LookupKind, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        LookupRepo::delete(&conn, kind, id)
    }

    /// List all medications, ordered by generic name.
    pub fn medication_list(&self) -> Result<Vec<Medication>> {
        let conn = self.conn()?;
        MedicationRepo::list(&conn)
    }

    /// Get a medication by ID.
    pub fn medication_get(&self, id: i64) -> Result<Medication> {
        let conn = self.conn()?;
        MedicationRepo::get(&conn, id)?.ok_or(TrackerError::NotFound {
            entity: "medication",
            id,
        })
    }

    /// Create a medication.
    pub fn medication_create(&self, input: &MedicationInput) -> Result<Medication> {
        let conn = self.conn()?;
        MedicationRepo::create(&conn, input)
    }

    /// Update a medication.
    pub fn medication_update(&self, id: i64, input: &MedicationInput) -> Result<()> {
        let conn = self.conn()?;
        if !MedicationRepo::update(&conn, id, input)? {
            return Err(TrackerError::NotFound {
                entity: "medication",
                id,
            });
        }
        Ok(())
    }

    /// Delete a medication. Deleting an unknown ID is not an error.
    pub fn medication_delete(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        MedicationRepo::delete(&conn, id)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Schema browser
    // ─────────────────────────────────────────────────────────────────────

    /// User table names, alphabetically.
    pub fn table_names(&self) -> Result<Vec<String>> {
        let conn = self.conn()?;
        browse::list_tables(&conn)
    }

    /// Column metadata for an allow-listed table.
    pub fn table_columns(&self, table: &str) -> Result<Vec<ColumnInfo>> {
        let conn = self.conn()?;
        browse::table_columns(&conn, table)
    }

    /// Bounded row preview for an allow-listed table.
    pub fn table_preview(&self, table: &str) -> Result<TablePreview> {
        let conn = self.conn()?;
        browse::table_preview(&conn, table, ROW_PREVIEW_LIMIT)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
#[allow(unused_results)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::NaiveDateTime;

    use aura_core::types::parse_datetime_input;

    use super::*;
    use crate::sqlite::connection::{ConnectionConfig, new_in_memory};
    use crate::sqlite::migrations::run_migrations;

    // pool_size 1 keeps every checkout on the same in-memory database.
    fn setup() -> TrackerStore {
        let config = ConnectionConfig {
            pool_size: 1,
            ..Default::default()
        };
        let pool = new_in_memory(&config).unwrap();
        run_migrations(&pool.get().unwrap()).unwrap();
        TrackerStore::new(pool)
    }

    fn dt(s: &str) -> NaiveDateTime {
        parse_datetime_input(s).unwrap()
    }

    fn blank_input(start: &str) -> EpisodeInput {
        EpisodeInput {
            user_id: 1,
            start_time: dt(start),
            end_time: None,
            intensity: 6,
            attack_type_id: None,
            had_menses: false,
            notes: String::new(),
            pain_location_ids: vec![],
            symptom_ids: vec![],
            trigger_ids: vec![],
            medication_ids: vec![],
        }
    }

    struct Refs {
        migraine: i64,
        nausea: i64,
        photophobia: i64,
        aura: i64,
        stress: i64,
        left_temple: i64,
        sumatriptan: i64,
    }

    fn seed_refs(store: &TrackerStore) -> Refs {
        let lk = |kind, name: &str| {
            store
                .lookup_create(kind, &LookupInput { name: name.into() })
                .unwrap()
                .id
        };
        Refs {
            migraine: lk(LookupKind::AttackType, "Migraine with aura"),
            nausea: lk(LookupKind::Symptom, "Nausea"),
            photophobia: lk(LookupKind::Symptom, "Photophobia"),
            aura: lk(LookupKind::Symptom, "Aura"),
            stress: lk(LookupKind::Trigger, "Stress"),
            left_temple: lk(LookupKind::PainLocation, "Left temple"),
            sumatriptan: store
                .medication_create(&MedicationInput {
                    generic_name: "Sumatriptan".into(),
                    milligrams: Some(50.0),
                    route: "oral".into(),
                })
                .unwrap()
                .id,
        }
    }

    #[test]
    fn create_episode_then_detail() {
        let store = setup();
        let refs = seed_refs(&store);

        let mut input = blank_input("2024-03-01T08:30");
        input.end_time = Some(dt("2024-03-01T12:00"));
        input.intensity = 8;
        input.attack_type_id = Some(refs.migraine);
        input.notes = "started at work".into();
        input.pain_location_ids = vec![refs.left_temple];
        input.symptom_ids = vec![refs.photophobia, refs.nausea];
        input.trigger_ids = vec![refs.stress];
        input.medication_ids = vec![refs.sumatriptan];

        let episode = store.create_episode(&input).unwrap();
        let detail = store.episode_detail(episode.id).unwrap();

        assert_eq!(detail.episode.intensity, 8);
        assert_eq!(detail.attack_type.as_deref(), Some("Migraine with aura"));
        assert_eq!(detail.pain_locations, vec!["Left temple"]);
        // Labels come back ordered by name, not insertion order.
        assert_eq!(detail.symptoms, vec!["Nausea", "Photophobia"]);
        assert_eq!(detail.triggers, vec!["Stress"]);
        assert_eq!(detail.medications, vec!["Sumatriptan (50mg)"]);
    }

    #[test]
    fn detail_of_minimal_episode_is_bare() {
        let store = setup();

        let mut input = blank_input("2024-01-01T10:00");
        input.end_time = Some(dt("2024-01-01T11:00"));
        input.intensity = 7;

        let episode = store.create_episode(&input).unwrap();
        let detail = store.episode_detail(episode.id).unwrap();

        assert_eq!(detail.attack_type, None);
        assert!(detail.pain_locations.is_empty());
        assert!(detail.symptoms.is_empty());
        assert!(detail.triggers.is_empty());
        assert!(detail.medications.is_empty());
    }

    #[test]
    fn invalid_create_persists_nothing() {
        let store = setup();

        let mut input = blank_input("2024-03-01T08:30");
        input.end_time = Some(dt("2024-03-01T08:00"));

        let err = store.create_episode(&input).unwrap_err();
        assert_matches!(err, TrackerError::InvalidInput(_));
        assert!(store.list_episodes().unwrap().is_empty());
        assert_eq!(store.stats().unwrap().total, 0);
    }

    #[test]
    fn failed_link_rolls_back_episode_row() {
        let store = setup();

        let mut input = blank_input("2024-03-01T08:30");
        input.symptom_ids = vec![999];

        assert!(store.create_episode(&input).is_err());
        // The transaction must take the episode row down with the bad link.
        assert!(store.list_episodes().unwrap().is_empty());
    }

    #[test]
    fn listing_caps_at_one_hundred() {
        let store = setup();
        let base = dt("2024-01-01T00:00");

        for i in 0..150 {
            let mut input = blank_input("2024-01-01T00:00");
            input.start_time = base + chrono::Duration::minutes(i);
            store.create_episode(&input).unwrap();
        }

        let episodes = store.list_episodes().unwrap();
        assert_eq!(episodes.len(), 100);
        // Newest first: the final insert leads the page.
        assert_eq!(
            episodes[0].start_time,
            base + chrono::Duration::minutes(149)
        );
    }

    #[test]
    fn update_replaces_association_sets() {
        let store = setup();
        let refs = seed_refs(&store);

        let mut input = blank_input("2024-03-01T08:30");
        input.symptom_ids = vec![refs.nausea, refs.photophobia];
        let episode = store.create_episode(&input).unwrap();

        input.symptom_ids = vec![refs.photophobia, refs.aura];
        store.update_episode(episode.id, &input).unwrap();

        let view = store.episode_edit_view(episode.id).unwrap();
        let mut expected = vec![refs.photophobia, refs.aura];
        expected.sort_unstable();
        assert_eq!(view.selected.symptom_ids, expected);
    }

    #[test]
    fn update_with_empty_set_clears_links() {
        let store = setup();
        let refs = seed_refs(&store);

        let mut input = blank_input("2024-03-01T08:30");
        input.symptom_ids = vec![refs.nausea];
        let episode = store.create_episode(&input).unwrap();

        input.symptom_ids = vec![];
        store.update_episode(episode.id, &input).unwrap();

        let view = store.episode_edit_view(episode.id).unwrap();
        assert!(view.selected.symptom_ids.is_empty());
    }

    #[test]
    fn update_missing_episode_fails() {
        let store = setup();
        let err = store
            .update_episode(42, &blank_input("2024-03-01T08:30"))
            .unwrap_err();
        assert_matches!(err, TrackerError::EpisodeNotFound(42));
    }

    #[test]
    fn invalid_update_leaves_episode_untouched() {
        let store = setup();
        let episode = store.create_episode(&blank_input("2024-03-01T08:30")).unwrap();

        let mut input = blank_input("2024-03-01T10:00");
        input.end_time = Some(dt("2024-03-01T09:00"));
        assert!(store.update_episode(episode.id, &input).is_err());

        let detail = store.episode_detail(episode.id).unwrap();
        assert_eq!(detail.episode.start_time, dt("2024-03-01T08:30"));
        assert!(detail.episode.end_time.is_none());
    }

    #[test]
    fn delete_episode_is_idempotent() {
        let store = setup();
        let episode = store.create_episode(&blank_input("2024-03-01T08:30")).unwrap();

        assert!(store.delete_episode(episode.id).unwrap());
        assert!(!store.delete_episode(episode.id).unwrap());
        assert_matches!(
            store.episode_detail(episode.id).unwrap_err(),
            TrackerError::EpisodeNotFound(_)
        );
    }

    #[test]
    fn edit_view_carries_options_and_selection() {
        let store = setup();
        let refs = seed_refs(&store);

        let mut input = blank_input("2024-03-01T08:30");
        input.attack_type_id = Some(refs.migraine);
        input.trigger_ids = vec![refs.stress];
        let episode = store.create_episode(&input).unwrap();

        let view = store.episode_edit_view(episode.id).unwrap();
        assert_eq!(view.episode.attack_type_id, Some(refs.migraine));
        assert_eq!(view.options.symptoms.len(), 3);
        assert_eq!(view.options.medications.len(), 1);
        assert_eq!(view.selected.trigger_ids, vec![refs.stress]);
        assert!(view.selected.medication_ids.is_empty());
    }

    #[test]
    fn form_options_are_name_ordered() {
        let store = setup();
        seed_refs(&store);

        let options = store.form_options().unwrap();
        let names: Vec<&str> = options.symptoms.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Aura", "Nausea", "Photophobia"]);
    }

    #[test]
    fn lookup_get_missing_names_the_entity() {
        let store = setup();
        let err = store.lookup_get(LookupKind::Trigger, 99).unwrap_err();
        assert_matches!(err, TrackerError::NotFound { entity: "trigger", id: 99 });
    }

    #[test]
    fn lookup_update_missing_fails() {
        let store = setup();
        let err = store
            .lookup_update(
                LookupKind::Symptom,
                99,
                &LookupInput { name: "Tinnitus".into() },
            )
            .unwrap_err();
        assert_matches!(err, TrackerError::NotFound { entity: "symptom", .. });
    }

    #[test]
    fn medication_round_trip() {
        let store = setup();
        let created = store
            .medication_create(&MedicationInput {
                generic_name: "Rizatriptan".into(),
                milligrams: Some(10.0),
                route: "oral".into(),
            })
            .unwrap();

        store
            .medication_update(
                created.id,
                &MedicationInput {
                    generic_name: "Rizatriptan".into(),
                    milligrams: Some(5.0),
                    route: "sublingual".into(),
                },
            )
            .unwrap();

        let found = store.medication_get(created.id).unwrap();
        assert_eq!(found.milligrams, Some(5.0));
        assert_eq!(found.route, "sublingual");

        assert!(store.medication_delete(created.id).unwrap());
        assert_matches!(
            store.medication_get(created.id).unwrap_err(),
            TrackerError::NotFound { entity: "medication", .. }
        );
    }

    #[test]
    fn stats_split_current_month() {
        let store = setup();
        let stats = store.stats().unwrap();
        assert_eq!(stats.total, 0);
        assert_eq!(stats.this_month, 0);
        assert!(stats.mean_intensity.is_none());

        let mut old = blank_input("2020-01-01T00:00");
        old.intensity = 4;
        store.create_episode(&old).unwrap();

        let mut recent = blank_input("2020-01-01T00:00");
        recent.start_time = chrono::Local::now().naive_local();
        recent.intensity = 7;
        store.create_episode(&recent).unwrap();

        let stats = store.stats().unwrap();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.this_month, 1);
        assert_eq!(stats.mean_intensity, Some(5.5));
    }

    #[test]
    fn table_browser_round_trip() {
        let store = setup();
        store.create_episode(&blank_input("2024-03-01T08:30")).unwrap();

        let names = store.table_names().unwrap();
        assert!(names.contains(&"episodes".to_string()));

        let columns = store.table_columns("episodes").unwrap();
        assert!(columns.iter().any(|c| c.name == "intensity"));

        let preview = store.table_preview("episodes").unwrap();
        assert_eq!(preview.rows.len(), 1);

        assert_matches!(
            store.table_preview("passwords").unwrap_err(),
            TrackerError::UnknownTable(_)
        );
    }
}
