#![forbid(unsafe_code)]

use super::*;
use chk_core::ids::record_id;
use chk_core::ordering::plan_insert;
use rusqlite::{Transaction, params};
use serde_json::json;

impl SqliteStore {
    /// Inserts a step. `position: None` appends; `Some(p)` requires
    /// `1 <= p <= N + 1` and pushes the steps at `p..=N` down by one.
    pub fn step_insert(
        &mut self,
        template_id: i64,
        text: &str,
        position: Option<i64>,
    ) -> Result<StepRow, StoreError> {
        let template_id = record_id("template_id", template_id)?;
        let text = required_text(text, "step text must not be empty")?;

        let stamp = Stamp::now(&self.config.modifier);
        let tx = begin_write(&mut self.conn)?;
        let step = insert_step_tx(&tx, template_id, &text, position, stamp)?;
        tx.commit()?;
        Ok(step)
    }
}

pub(in crate::store) fn insert_step_tx(
    tx: &Transaction<'_>,
    template_id: i64,
    text: &str,
    position: Option<i64>,
    stamp: Stamp<'_>,
) -> Result<StepRow, StoreError> {
    ensure_template_exists_tx(tx, template_id)?;

    let count = step_count_tx(tx, template_id)?;
    let plan = plan_insert(count, position)?;
    let shifted = match plan.shift {
        Some(shift) => apply_shift_tx(tx, template_id, shift, stamp)?,
        None => 0,
    };

    tx.execute(
        r#"
        INSERT INTO steps(template_id, text, order_index, created_at_ms, updated_at_ms, modified_by)
        VALUES (?1, ?2, ?3, ?4, ?4, ?5)
        "#,
        params![template_id, text, plan.position, stamp.now_ms, stamp.by],
    )?;
    let step_id = tx.last_insert_rowid();

    insert_event_tx(
        tx,
        stamp,
        "template",
        template_id,
        "step_inserted",
        json!({ "step_id": step_id, "position": plan.position, "shifted": shifted }),
    )?;

    tracing::debug!(
        template_id,
        step_id,
        position = plan.position,
        shifted,
        "step inserted"
    );
    step_row_tx(tx, step_id)
}
