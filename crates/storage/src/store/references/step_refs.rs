#![forbid(unsafe_code)]

use super::*;
use chk_core::ids::record_id;
use chk_core::names::canonical_reference_type;
use rusqlite::{OptionalExtension, Transaction, params};
use serde_json::json;

const REFERENCE_SELECT: &str = "SELECT r.id, r.step_id, r.url, r.reference_type_id, t.name, \
     r.created_at_ms, r.updated_at_ms \
     FROM step_references r JOIN reference_types t ON t.id = r.reference_type_id";

impl SqliteStore {
    /// Attaches a reference to a step, resolving (or creating) its type in
    /// the same transaction.
    pub fn reference_add(
        &mut self,
        step_id: i64,
        url: &str,
        reference_type: &str,
    ) -> Result<ReferenceRow, StoreError> {
        let step_id = record_id("step_id", step_id)?;
        let url = required_text(url, "reference url must not be empty")?;
        let canonical = canonical_reference_type(reference_type)?;

        let stamp = Stamp::now(&self.config.modifier);
        let tx = begin_write(&mut self.conn)?;
        let reference = insert_reference_tx(&tx, step_id, &url, &canonical, stamp)?;
        tx.commit()?;
        Ok(reference)
    }

    pub fn reference_update(
        &mut self,
        request: ReferenceUpdateRequest,
    ) -> Result<ReferenceRow, StoreError> {
        let reference_id = record_id("reference_id", request.reference_id)?;
        let url = request
            .url
            .as_deref()
            .map(|value| required_text(value, "reference url must not be empty"))
            .transpose()?;
        let canonical = request
            .reference_type
            .as_deref()
            .map(canonical_reference_type)
            .transpose()?;

        let stamp = Stamp::now(&self.config.modifier);
        let tx = begin_write(&mut self.conn)?;
        let stored = reference_row_tx(&tx, reference_id)?
            .ok_or(StoreError::UnknownReference(reference_id))?;

        let next_url = url.unwrap_or_else(|| stored.url.clone());
        let next_type_id = match canonical {
            Some(name) => reference_type_id_tx(&tx, &name, stamp)?,
            None => stored.reference_type_id,
        };

        let mut changes = Changes::default();
        changes.track("url", &stored.url, &next_url);
        changes.track("reference_type_id", &stored.reference_type_id, &next_type_id);
        if changes.is_empty() {
            tx.commit()?;
            return Ok(stored);
        }

        tx.execute(
            "UPDATE step_references SET url=?2, reference_type_id=?3, updated_at_ms=?4, modified_by=?5 \
             WHERE id=?1",
            params![reference_id, next_url, next_type_id, stamp.now_ms, stamp.by],
        )?;
        insert_event_tx(
            &tx,
            stamp,
            "step",
            stored.step_id,
            "reference_updated",
            json!({ "reference_id": reference_id, "changed": changes.columns() }),
        )?;
        let updated = reference_row_tx(&tx, reference_id)?
            .ok_or(StoreError::UnknownReference(reference_id))?;
        tx.commit()?;
        Ok(updated)
    }

    /// Removes one reference. The reference must belong to `step_id`.
    pub fn reference_delete(&mut self, step_id: i64, reference_id: i64) -> Result<(), StoreError> {
        let step_id = record_id("step_id", step_id)?;
        let reference_id = record_id("reference_id", reference_id)?;

        let stamp = Stamp::now(&self.config.modifier);
        let tx = begin_write(&mut self.conn)?;
        let deleted = tx.execute(
            "DELETE FROM step_references WHERE id=?1 AND step_id=?2",
            params![reference_id, step_id],
        )?;
        if deleted == 0 {
            return Err(StoreError::UnknownReference(reference_id));
        }
        insert_event_tx(
            &tx,
            stamp,
            "step",
            step_id,
            "reference_deleted",
            json!({ "reference_id": reference_id }),
        )?;
        tx.commit()?;
        Ok(())
    }

    pub fn references_list(&self, step_id: i64) -> Result<Vec<ReferenceRow>, StoreError> {
        let step_id = record_id("step_id", step_id)?;
        let tx = self.read_tx()?;
        step_row_tx(&tx, step_id)?;
        references_for_step_tx(&tx, step_id)
    }
}

pub(in crate::store) fn insert_reference_tx(
    tx: &Transaction<'_>,
    step_id: i64,
    url: &str,
    canonical_type: &str,
    stamp: Stamp<'_>,
) -> Result<ReferenceRow, StoreError> {
    step_row_tx(tx, step_id)?;
    let type_id = reference_type_id_tx(tx, canonical_type, stamp)?;

    tx.execute(
        r#"
        INSERT INTO step_references(step_id, url, reference_type_id, created_at_ms, updated_at_ms, modified_by)
        VALUES (?1, ?2, ?3, ?4, ?4, ?5)
        "#,
        params![step_id, url, type_id, stamp.now_ms, stamp.by],
    )?;
    let reference_id = tx.last_insert_rowid();

    insert_event_tx(
        tx,
        stamp,
        "step",
        step_id,
        "reference_added",
        json!({ "reference_id": reference_id, "reference_type": canonical_type }),
    )?;
    reference_row_tx(tx, reference_id)?.ok_or(StoreError::UnknownReference(reference_id))
}

fn reference_row_tx(
    tx: &Transaction<'_>,
    reference_id: i64,
) -> Result<Option<ReferenceRow>, StoreError> {
    Ok(tx
        .query_row(
            &format!("{REFERENCE_SELECT} WHERE r.id=?1"),
            params![reference_id],
            reference_from_row,
        )
        .optional()?)
}

pub(in crate::store) fn references_for_step_tx(
    tx: &Transaction<'_>,
    step_id: i64,
) -> Result<Vec<ReferenceRow>, StoreError> {
    let mut stmt = tx.prepare(&format!(
        "{REFERENCE_SELECT} WHERE r.step_id=?1 ORDER BY r.id ASC"
    ))?;
    let rows = stmt.query_map(params![step_id], reference_from_row)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}
