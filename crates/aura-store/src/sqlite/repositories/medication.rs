//! Medication repository.
//!
//! Medications carry an optional dose and an administration route, so they
//! get their own table instead of the shared lookup shape.

use rusqlite::{Connection, OptionalExtension, params};

use aura_core::errors::Result;
use aura_core::types::{Medication, MedicationInput};

/// Medication repository — stateless, every method takes `&Connection`.
pub struct MedicationRepo;

impl MedicationRepo {
    /// List all medications, ordered by generic name.
    pub fn list(conn: &Connection) -> Result<Vec<Medication>> {
        let mut stmt = conn.prepare(
            "SELECT id, generic_name, milligrams, route FROM medications ORDER BY generic_name",
        )?;
        let rows = stmt
            .query_map([], Self::map_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Get a medication by ID.
    pub fn get(conn: &Connection, id: i64) -> Result<Option<Medication>> {
        let row = conn
            .query_row(
                "SELECT id, generic_name, milligrams, route FROM medications WHERE id = ?1",
                params![id],
                Self::map_row,
            )
            .optional()?;
        Ok(row)
    }

    /// Create a new medication.
    pub fn create(conn: &Connection, input: &MedicationInput) -> Result<Medication> {
        let _ = conn.execute(
            "INSERT INTO medications (generic_name, milligrams, route) VALUES (?1, ?2, ?3)",
            params![input.generic_name, input.milligrams, input.route],
        )?;
        Ok(Medication {
            id: conn.last_insert_rowid(),
            generic_name: input.generic_name.clone(),
            milligrams: input.milligrams,
            route: input.route.clone(),
        })
    }

    /// Update a medication. Returns false when no row matched.
    pub fn update(conn: &Connection, id: i64, input: &MedicationInput) -> Result<bool> {
        let changed = conn.execute(
            "UPDATE medications SET generic_name = ?1, milligrams = ?2, route = ?3 WHERE id = ?4",
            params![input.generic_name, input.milligrams, input.route, id],
        )?;
        Ok(changed > 0)
    }

    /// Delete a medication. Returns false when no row matched.
    pub fn delete(conn: &Connection, id: i64) -> Result<bool> {
        let changed = conn.execute("DELETE FROM medications WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Medication> {
        Ok(Medication {
            id: row.get("id")?,
            generic_name: row.get("generic_name")?,
            milligrams: row.get("milligrams")?,
            route: row.get("route")?,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
