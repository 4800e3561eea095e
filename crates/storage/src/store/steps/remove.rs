#![forbid(unsafe_code)]

use super::*;
use chk_core::ids::record_id;
use chk_core::ordering::plan_remove;
use rusqlite::params;
use serde_json::json;

impl SqliteStore {
    /// Deletes a step with its references and closes the gap it leaves.
    /// Instance states pointing at the step are left alone; they surface as
    /// orphans on the next audit.
    pub fn step_remove(&mut self, template_id: i64, step_id: i64) -> Result<(), StoreError> {
        let template_id = record_id("template_id", template_id)?;
        let step_id = record_id("step_id", step_id)?;

        let stamp = Stamp::now(&self.config.modifier);
        let tx = begin_write(&mut self.conn)?;
        ensure_template_exists_tx(&tx, template_id)?;
        let step = template_step_tx(&tx, template_id, step_id)?;
        let count = step_count_tx(&tx, template_id)?;

        let references = tx.execute(
            "DELETE FROM step_references WHERE step_id=?1",
            params![step_id],
        )?;
        tx.execute("DELETE FROM steps WHERE id=?1", params![step_id])?;

        let shifted = match plan_remove(count, step.order_index) {
            Some(shift) => apply_shift_tx(&tx, template_id, shift, stamp)?,
            None => 0,
        };

        insert_event_tx(
            &tx,
            stamp,
            "template",
            template_id,
            "step_removed",
            json!({
                "step_id": step_id,
                "position": step.order_index,
                "references": references,
                "shifted": shifted,
            }),
        )?;
        tx.commit()?;

        tracing::debug!(
            template_id,
            step_id,
            position = step.order_index,
            shifted,
            "step removed"
        );
        Ok(())
    }
}
