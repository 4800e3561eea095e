#![forbid(unsafe_code)]

use super::*;
use chk_core::ids::record_id;
use chk_core::ordering::{PARKING_INDEX, plan_move};
use rusqlite::Transaction;
use serde_json::json;

impl SqliteStore {
    /// Moves a step from `from` to `to`. `from` must match the step's stored
    /// index, which rejects moves computed from a stale view of the template.
    pub fn step_move(
        &mut self,
        template_id: i64,
        step_id: i64,
        from: i64,
        to: i64,
    ) -> Result<StepRow, StoreError> {
        let template_id = record_id("template_id", template_id)?;
        let step_id = record_id("step_id", step_id)?;

        let stamp = Stamp::now(&self.config.modifier);
        let tx = begin_write(&mut self.conn)?;
        ensure_template_exists_tx(&tx, template_id)?;
        let step = template_step_tx(&tx, template_id, step_id)?;
        let step = move_step_tx(&tx, &step, from, to, stamp)?;
        tx.commit()?;
        Ok(step)
    }
}

pub(in crate::store) fn move_step_tx(
    tx: &Transaction<'_>,
    step: &StepRow,
    from: i64,
    to: i64,
    stamp: Stamp<'_>,
) -> Result<StepRow, StoreError> {
    let count = step_count_tx(tx, step.template_id)?;
    let Some(plan) = plan_move(count, step.order_index, from, to)? else {
        return Ok(step.clone());
    };

    // Park the moving step outside 1..=N so the block can slide into its slot.
    set_order_index_tx(tx, step.id, PARKING_INDEX, stamp)?;
    let shifted = apply_shift_tx(tx, step.template_id, plan.shift, stamp)?;
    set_order_index_tx(tx, step.id, plan.to, stamp)?;

    insert_event_tx(
        tx,
        stamp,
        "template",
        step.template_id,
        "step_moved",
        json!({ "step_id": step.id, "from": plan.from, "to": plan.to, "shifted": shifted }),
    )?;

    tracing::debug!(
        template_id = step.template_id,
        step_id = step.id,
        from = plan.from,
        to = plan.to,
        shifted,
        "step moved"
    );
    step_row_tx(tx, step.id)
}
