#![forbid(unsafe_code)]

use super::*;
use chk_core::ids::record_id;
use rusqlite::params;
use serde_json::json;

impl SqliteStore {
    /// Deletes an instance and its step states.
    pub fn instance_delete(&mut self, instance_id: i64) -> Result<(), StoreError> {
        let instance_id = record_id("instance_id", instance_id)?;

        let stamp = Stamp::now(&self.config.modifier);
        let tx = begin_write(&mut self.conn)?;
        let instance = instance_row_tx(&tx, instance_id)?;

        let states = tx.execute(
            "DELETE FROM instance_steps WHERE instance_id=?1",
            params![instance_id],
        )?;
        tx.execute("DELETE FROM instances WHERE id=?1", params![instance_id])?;

        insert_event_tx(
            &tx,
            stamp,
            "instance",
            instance_id,
            "instance_deleted",
            json!({ "template_id": instance.template_id, "states": states }),
        )?;
        tx.commit()?;

        tracing::debug!(instance_id, states, "instance deleted");
        Ok(())
    }
}
