#![forbid(unsafe_code)]

use super::*;
use chk_core::ids::record_id;
use rusqlite::params;
use serde_json::json;

impl SqliteStore {
    /// Changes a step's text and/or position. A new position goes through
    /// the same shifting as `step_move`, starting from the stored index.
    pub fn step_update(&mut self, request: StepUpdateRequest) -> Result<StepRow, StoreError> {
        let step_id = record_id("step_id", request.step_id)?;
        let text = request
            .text
            .as_deref()
            .map(|value| required_text(value, "step text must not be empty"))
            .transpose()?;

        let stamp = Stamp::now(&self.config.modifier);
        let tx = begin_write(&mut self.conn)?;
        let mut step = step_row_tx(&tx, step_id)?;

        if let Some(text) = text {
            let mut changes = Changes::default();
            if changes.track("text", &step.text, &text) {
                tx.execute(
                    "UPDATE steps SET text=?2, updated_at_ms=?3, modified_by=?4 WHERE id=?1",
                    params![step_id, text, stamp.now_ms, stamp.by],
                )?;
                insert_event_tx(
                    &tx,
                    stamp,
                    "template",
                    step.template_id,
                    "step_updated",
                    json!({ "step_id": step_id, "changed": changes.columns() }),
                )?;
                step = step_row_tx(&tx, step_id)?;
            }
        }

        if let Some(order_index) = request.order_index {
            let current = step.order_index;
            step = move_step_tx(&tx, &step, current, order_index, stamp)?;
        }

        tx.commit()?;
        Ok(step)
    }
}
