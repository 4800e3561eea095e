#![forbid(unsafe_code)]

mod sql;

use super::super::StoreError;
use super::time::now_ms;
use rusqlite::{Connection, OptionalExtension, params};

pub(in crate::store) const SCHEMA_VERSION: &str = "checklist-v1";

const SEED_REFERENCE_TYPES: &[(&str, &str)] = &[("URL", "URL"), ("API", "API endpoint")];

pub(in crate::store) fn install_schema(conn: &Connection, modifier: &str) -> Result<(), StoreError> {
    preflight_gate(conn)?;
    conn.execute_batch(&sql::full_schema_sql())?;

    conn.execute(
        "INSERT OR IGNORE INTO meta(key, value) VALUES (?1, ?2)",
        params!["schema_version", SCHEMA_VERSION],
    )?;

    let now_ms = now_ms();
    for (name, description) in SEED_REFERENCE_TYPES {
        conn.execute(
            "INSERT OR IGNORE INTO reference_types(name, description, created_at_ms, updated_at_ms, modified_by) \
             VALUES (?1, ?2, ?3, ?3, ?4)",
            params![name, description, now_ms, modifier],
        )?;
    }
    Ok(())
}

fn preflight_gate(conn: &Connection) -> Result<(), StoreError> {
    let has_meta = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='meta'",
            [],
            |row| row.get::<_, i64>(0),
        )
        .optional()?
        .is_some();
    if !has_meta {
        return Ok(());
    }

    let version = conn
        .query_row(
            "SELECT value FROM meta WHERE key='schema_version'",
            [],
            |row| row.get::<_, String>(0),
        )
        .optional()?;

    match version {
        Some(v) if v == SCHEMA_VERSION => Ok(()),
        Some(_) => Err(StoreError::InvalidInput(
            "RESET_REQUIRED: schema version mismatch",
        )),
        None => Ok(()),
    }
}
