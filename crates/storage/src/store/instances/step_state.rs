#![forbid(unsafe_code)]

use super::*;
use chk_core::ids::record_id;
use rusqlite::params;
use serde_json::json;

impl SqliteStore {
    /// Sets the status of one step of an instance. The instance's own
    /// status is left as stored; call `instance_apply_status` to refresh it.
    pub fn instance_step_status_set(
        &mut self,
        instance_id: i64,
        step_id: i64,
        status: Status,
    ) -> Result<StepStateRow, StoreError> {
        let instance_id = record_id("instance_id", instance_id)?;
        let step_id = record_id("step_id", step_id)?;

        let stamp = Stamp::now(&self.config.modifier);
        let tx = begin_write(&mut self.conn)?;
        instance_row_tx(&tx, instance_id)?;
        let stored = step_state_tx(&tx, instance_id, step_id)?;
        if stored.status == status {
            return Ok(stored);
        }

        tx.execute(
            "UPDATE instance_steps SET status=?2, updated_at_ms=?3, modified_by=?4 WHERE id=?1",
            params![stored.id, status.as_str(), stamp.now_ms, stamp.by],
        )?;
        insert_event_tx(
            &tx,
            stamp,
            "instance",
            instance_id,
            "step_status_set",
            json!({ "step_id": step_id, "from": stored.status, "to": status }),
        )?;
        let updated = step_state_tx(&tx, instance_id, step_id)?;
        tx.commit()?;

        tracing::debug!(instance_id, step_id, status = %status, "step status set");
        Ok(updated)
    }

    /// Sets the note of one step of an instance. A blank note clears it.
    pub fn instance_step_note_set(
        &mut self,
        instance_id: i64,
        step_id: i64,
        note: &str,
    ) -> Result<StepStateRow, StoreError> {
        let instance_id = record_id("instance_id", instance_id)?;
        let step_id = record_id("step_id", step_id)?;
        let note = optional_text(Some(note));

        let stamp = Stamp::now(&self.config.modifier);
        let tx = begin_write(&mut self.conn)?;
        instance_row_tx(&tx, instance_id)?;
        let stored = step_state_tx(&tx, instance_id, step_id)?;
        if stored.note == note {
            return Ok(stored);
        }

        tx.execute(
            "UPDATE instance_steps SET note=?2, updated_at_ms=?3, modified_by=?4 WHERE id=?1",
            params![stored.id, note, stamp.now_ms, stamp.by],
        )?;
        insert_event_tx(
            &tx,
            stamp,
            "instance",
            instance_id,
            "step_note_set",
            json!({ "step_id": step_id, "cleared": note.is_none() }),
        )?;
        let updated = step_state_tx(&tx, instance_id, step_id)?;
        tx.commit()?;
        Ok(updated)
    }
}
