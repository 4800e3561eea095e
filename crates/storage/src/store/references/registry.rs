#![forbid(unsafe_code)]

use super::*;
use chk_core::names::{auto_reference_type_description, canonical_reference_type};
use rusqlite::{OptionalExtension, Transaction, params};
use serde_json::json;

impl SqliteStore {
    /// Resolves a reference type by name, creating it on first use. Names
    /// are case-insensitive; `"url"`, `" Url "` and `"URL"` share one id.
    pub fn reference_type_get_or_create(&mut self, name: &str) -> Result<i64, StoreError> {
        let canonical = canonical_reference_type(name)?;

        let stamp = Stamp::now(&self.config.modifier);
        let tx = begin_write(&mut self.conn)?;
        let id = reference_type_id_tx(&tx, &canonical, stamp)?;
        tx.commit()?;
        Ok(id)
    }

    pub fn reference_types_list(&self) -> Result<Vec<ReferenceTypeRow>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, description, created_at_ms, updated_at_ms \
             FROM reference_types ORDER BY name ASC",
        )?;
        let rows = stmt.query_map([], reference_type_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

/// Get-or-create on an already canonical name. `INSERT OR IGNORE` against
/// the UNIQUE name lets a writer that lost the race fall through to the
/// select instead of failing.
pub(in crate::store) fn reference_type_id_tx(
    tx: &Transaction<'_>,
    canonical: &str,
    stamp: Stamp<'_>,
) -> Result<i64, StoreError> {
    if let Some(id) = reference_type_lookup_tx(tx, canonical)? {
        return Ok(id);
    }

    let inserted = tx.execute(
        r#"
        INSERT OR IGNORE INTO reference_types(name, description, created_at_ms, updated_at_ms, modified_by)
        VALUES (?1, ?2, ?3, ?3, ?4)
        "#,
        params![
            canonical,
            auto_reference_type_description(canonical),
            stamp.now_ms,
            stamp.by
        ],
    )?;

    let id = reference_type_lookup_tx(tx, canonical)?
        .ok_or(StoreError::InvalidInput("reference type vanished during insert"))?;
    if inserted > 0 {
        insert_event_tx(
            tx,
            stamp,
            "reference_type",
            id,
            "reference_type_created",
            json!({ "name": canonical }),
        )?;
        tracing::info!(reference_type = canonical, id, "reference type created");
    }
    Ok(id)
}

fn reference_type_lookup_tx(tx: &Transaction<'_>, canonical: &str) -> Result<Option<i64>, StoreError> {
    Ok(tx
        .query_row(
            "SELECT id FROM reference_types WHERE name=?1",
            params![canonical],
            |row| row.get::<_, i64>(0),
        )
        .optional()?)
}
