#![forbid(unsafe_code)]

use super::*;
use chk_core::ids::record_id;
use rusqlite::params;
use serde_json::json;

impl SqliteStore {
    pub fn instance_update(
        &mut self,
        request: InstanceUpdateRequest,
    ) -> Result<InstanceRow, StoreError> {
        let instance_id = record_id("instance_id", request.instance_id)?;
        let name = request
            .name
            .as_deref()
            .map(|value| required_text(value, "instance name must not be empty"))
            .transpose()?;
        let target_date = request
            .target_date
            .as_deref()
            .map(|value| target_date_value(value, self.config.max_target_days))
            .transpose()?;

        let stamp = Stamp::now(&self.config.modifier);
        let tx = begin_write(&mut self.conn)?;
        let stored = instance_row_tx(&tx, instance_id)?;

        let next_name = name.unwrap_or_else(|| stored.name.clone());
        let next_description = match request.description.as_deref() {
            Some(value) => optional_text(Some(value)),
            None => stored.description.clone(),
        };
        let next_target_date = match target_date {
            Some(value) => value,
            None => stored.target_date.clone(),
        };

        let mut changes = Changes::default();
        changes.track("name", &stored.name, &next_name);
        changes.track("description", &stored.description, &next_description);
        changes.track("target_date", &stored.target_date, &next_target_date);
        if changes.is_empty() {
            return Ok(stored);
        }

        tx.execute(
            "UPDATE instances SET name=?2, description=?3, target_date=?4, updated_at_ms=?5, modified_by=?6 \
             WHERE id=?1",
            params![
                instance_id,
                next_name,
                next_description,
                next_target_date,
                stamp.now_ms,
                stamp.by
            ],
        )?;
        insert_event_tx(
            &tx,
            stamp,
            "instance",
            instance_id,
            "instance_updated",
            json!({ "changed": changes.columns() }),
        )?;
        let updated = instance_row_tx(&tx, instance_id)?;
        tx.commit()?;

        tracing::debug!(instance_id, changed = ?changes.columns(), "instance updated");
        Ok(updated)
    }
}
