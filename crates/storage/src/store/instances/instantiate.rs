#![forbid(unsafe_code)]

use super::*;
use chk_core::ids::record_id;
use rusqlite::params;
use serde_json::json;

impl SqliteStore {
    /// Creates an instance holding one `Not Started` state per template
    /// step, in step order. The states are a snapshot: later template edits
    /// never reach them, only an audit does.
    pub fn instantiate(&mut self, request: InstanceCreateRequest) -> Result<InstanceRow, StoreError> {
        let template_id = record_id("template_id", request.template_id)?;
        let name = required_text(&request.name, "instance name must not be empty")?;
        let description = optional_text(request.description.as_deref());
        let target_date = match request.target_date.as_deref() {
            Some(value) => target_date_value(value, self.config.max_target_days)?,
            None => None,
        };

        let stamp = Stamp::now(&self.config.modifier);
        let tx = begin_write(&mut self.conn)?;
        ensure_template_exists_tx(&tx, template_id)?;
        let steps = template_steps_tx(&tx, template_id)?;

        tx.execute(
            r#"
            INSERT INTO instances(template_id, name, description, status, target_date, created_at_ms, updated_at_ms, modified_by)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6, ?7)
            "#,
            params![
                template_id,
                name,
                description,
                Status::NotStarted.as_str(),
                target_date,
                stamp.now_ms,
                stamp.by
            ],
        )?;
        let instance_id = tx.last_insert_rowid();

        for step in steps.iter() {
            insert_step_state_tx(&tx, instance_id, step.id, stamp)?;
        }

        insert_event_tx(
            &tx,
            stamp,
            "instance",
            instance_id,
            "instance_created",
            json!({ "template_id": template_id, "steps": steps.len() }),
        )?;
        let instance = instance_row_tx(&tx, instance_id)?;
        tx.commit()?;

        tracing::debug!(instance_id, template_id, steps = steps.len(), "instance created");
        Ok(instance)
    }
}

pub(super) fn insert_step_state_tx(
    tx: &rusqlite::Transaction<'_>,
    instance_id: i64,
    step_id: i64,
    stamp: Stamp<'_>,
) -> Result<i64, StoreError> {
    tx.execute(
        r#"
        INSERT INTO instance_steps(instance_id, step_id, status, note, created_at_ms, updated_at_ms, modified_by)
        VALUES (?1, ?2, ?3, NULL, ?4, ?4, ?5)
        "#,
        params![
            instance_id,
            step_id,
            Status::NotStarted.as_str(),
            stamp.now_ms,
            stamp.by
        ],
    )?;
    Ok(tx.last_insert_rowid())
}
