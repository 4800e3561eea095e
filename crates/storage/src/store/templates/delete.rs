#![forbid(unsafe_code)]

use super::*;
use chk_core::ids::record_id;
use rusqlite::params;
use serde_json::json;

impl SqliteStore {
    /// Deletes the template after its references and steps. Instances keep
    /// their (now dangling) template id; auditing them reports every state as
    /// orphaned.
    pub fn template_delete(&mut self, template_id: i64) -> Result<(), StoreError> {
        let template_id = record_id("template_id", template_id)?;

        let stamp = Stamp::now(&self.config.modifier);
        let tx = begin_write(&mut self.conn)?;
        ensure_template_exists_tx(&tx, template_id)?;

        let references = tx.execute(
            "DELETE FROM step_references WHERE step_id IN (SELECT id FROM steps WHERE template_id=?1)",
            params![template_id],
        )?;
        let steps = tx.execute(
            "DELETE FROM steps WHERE template_id=?1",
            params![template_id],
        )?;
        tx.execute("DELETE FROM templates WHERE id=?1", params![template_id])?;

        insert_event_tx(
            &tx,
            stamp,
            "template",
            template_id,
            "template_deleted",
            json!({ "steps": steps, "references": references }),
        )?;
        tx.commit()?;

        tracing::debug!(template_id, steps, references, "template deleted");
        Ok(())
    }
}
