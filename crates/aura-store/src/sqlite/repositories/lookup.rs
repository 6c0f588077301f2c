//! Lookup repository — the four name-only reference tables.
//!
//! Attack types, symptoms, triggers, and pain locations all share one shape
//! (id + name), so a single repository serves all four. [`LookupKind`] is a
//! closed enum: table names reach SQL only through it, never from request
//! input.

use rusqlite::{Connection, OptionalExtension, params};

use aura_core::errors::Result;
use aura_core::types::{LookupInput, LookupItem};

/// The four name-only reference tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LookupKind {
    /// The `attack_types` table.
    AttackType,
    /// The `symptoms` table.
    Symptom,
    /// The `triggers` table.
    Trigger,
    /// The `pain_locations` table.
    PainLocation,
}

impl LookupKind {
    /// Every kind, in the order the navigation lists them.
    pub const ALL: [LookupKind; 4] = [
        LookupKind::Symptom,
        LookupKind::Trigger,
        LookupKind::PainLocation,
        LookupKind::AttackType,
    ];

    /// Backing table name. Doubles as the URL path segment.
    pub fn table(self) -> &'static str {
        match self {
            LookupKind::AttackType => "attack_types",
            LookupKind::Symptom => "symptoms",
            LookupKind::Trigger => "triggers",
            LookupKind::PainLocation => "pain_locations",
        }
    }

    /// Singular entity name for error messages and page titles.
    pub fn entity(self) -> &'static str {
        match self {
            LookupKind::AttackType => "attack type",
            LookupKind::Symptom => "symptom",
            LookupKind::Trigger => "trigger",
            LookupKind::PainLocation => "pain location",
        }
    }
}

/// Lookup repository — stateless, every method takes `&Connection`.
pub struct LookupRepo;

impl LookupRepo {
    /// List all entries of a kind, ordered by name.
    pub fn list(conn: &Connection, kind: LookupKind) -> Result<Vec<LookupItem>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT id, name FROM {} ORDER BY name",
            kind.table()
        ))?;
        let rows = stmt
            .query_map([], Self::map_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Get an entry by ID.
    pub fn get(conn: &Connection, kind: LookupKind, id: i64) -> Result<Option<LookupItem>> {
        let row = conn
            .query_row(
                &format!("SELECT id, name FROM {} WHERE id = ?1", kind.table()),
                params![id],
                Self::map_row,
            )
            .optional()?;
        Ok(row)
    }

    /// Create a new entry.
    pub fn create(conn: &Connection, kind: LookupKind, input: &LookupInput) -> Result<LookupItem> {
        let _ = conn.execute(
            &format!("INSERT INTO {} (name) VALUES (?1)", kind.table()),
            params![input.name],
        )?;
        Ok(LookupItem {
            id: conn.last_insert_rowid(),
            name: input.name.clone(),
        })
    }

    /// Rename an entry. Returns false when no row matched.
    pub fn update(
        conn: &Connection,
        kind: LookupKind,
        id: i64,
        input: &LookupInput,
    ) -> Result<bool> {
        let changed = conn.execute(
            &format!("UPDATE {} SET name = ?1 WHERE id = ?2", kind.table()),
            params![input.name, id],
        )?;
        Ok(changed > 0)
    }

    /// Delete an entry. Returns false when no row matched.
    pub fn delete(conn: &Connection, kind: LookupKind, id: i64) -> Result<bool> {
        let changed = conn.execute(
            &format!("DELETE FROM {} WHERE id = ?1", kind.table()),
            params![id],
        )?;
        Ok(changed > 0)
    }

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<LookupItem> {
        Ok(LookupItem {
            id: row.get("id")?,
            name: row.get("name")?,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
