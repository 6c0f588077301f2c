//! Allow-listed raw table inspection for the schema browser pages.
//!
//! The browser exposes table names, column metadata, and bounded row
//! previews. Identifiers reach SQL only after [`ensure_table`] maps them
//! onto a static allow-list; arbitrary request strings never end up inside
//! a statement.

use rusqlite::Connection;
use rusqlite::types::ValueRef;

use aura_core::errors::{Result, TrackerError};

/// Every table the browser may touch.
const KNOWN_TABLES: [&str; 11] = [
    "attack_types",
    "episode_medications",
    "episode_pain_locations",
    "episode_symptoms",
    "episode_triggers",
    "episodes",
    "medications",
    "pain_locations",
    "schema_version",
    "symptoms",
    "triggers",
];

/// Column metadata from `PRAGMA table_info`.
#[derive(Clone, Debug)]
pub struct ColumnInfo {
    /// Column name.
    pub name: String,
    /// Declared SQL type, e.g. `INTEGER`.
    pub declared_type: String,
    /// Whether the column is `NOT NULL`.
    pub not_null: bool,
    /// Whether the column participates in the primary key.
    pub is_primary_key: bool,
}

/// A bounded slice of raw rows with the column ordering used to render them.
#[derive(Clone, Debug)]
pub struct TablePreview {
    /// Column names, in table order.
    pub columns: Vec<String>,
    /// Stringified rows. Nulls render as empty strings.
    pub rows: Vec<Vec<String>>,
}

/// Map a requested table name onto the allow-list.
///
/// Returns the static canonical name so downstream SQL never interpolates
/// request input.
pub fn ensure_table(name: &str) -> Result<&'static str> {
    KNOWN_TABLES
        .iter()
        .find(|known| **known == name)
        .copied()
        .ok_or_else(|| TrackerError::UnknownTable(name.to_string()))
}

/// List user tables in the database, alphabetically.
pub fn list_tables(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master
         WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
         ORDER BY name",
    )?;
    let rows = stmt
        .query_map([], |row| row.get(0))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Column metadata for an allow-listed table.
pub fn table_columns(conn: &Connection, table: &str) -> Result<Vec<ColumnInfo>> {
    let table = ensure_table(table)?;
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table})"))?;
    let rows = stmt
        .query_map([], |row| {
            Ok(ColumnInfo {
                name: row.get("name")?,
                declared_type: row.get("type")?,
                not_null: row.get("notnull")?,
                is_primary_key: row.get::<_, i64>("pk")? > 0,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// First `limit` rows of an allow-listed table, stringified for display.
pub fn table_preview(conn: &Connection, table: &str, limit: i64) -> Result<TablePreview> {
    let table = ensure_table(table)?;
    let mut stmt = conn.prepare(&format!("SELECT * FROM {table} LIMIT {limit}"))?;
    let columns: Vec<String> = stmt
        .column_names()
        .iter()
        .map(|name| (*name).to_string())
        .collect();
    let column_count = columns.len();
    let rows = stmt
        .query_map([], |row| {
            let mut values = Vec::with_capacity(column_count);
            for idx in 0..column_count {
                values.push(render_value(row.get_ref(idx)?));
            }
            Ok(values)
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(TablePreview { columns, rows })
}

fn render_value(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(r) => r.to_string(),
        ValueRef::Text(t) => String::from_utf8_lossy(t).into_owned(),
        ValueRef::Blob(b) => format!("<{} byte blob>", b.len()),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
