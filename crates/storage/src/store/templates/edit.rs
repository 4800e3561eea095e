#![forbid(unsafe_code)]

use super::*;
use chk_core::ids::record_id;
use rusqlite::params;
use serde_json::json;

impl SqliteStore {
    /// Writes only when a field actually changes; an update that restates
    /// the stored values leaves `updated_at_ms` untouched.
    pub fn template_update(
        &mut self,
        request: TemplateUpdateRequest,
    ) -> Result<TemplateRow, StoreError> {
        let template_id = record_id("template_id", request.template_id)?;
        let title = request
            .title
            .as_deref()
            .map(|value| required_text(value, "title must not be empty"))
            .transpose()?;
        let description = request
            .description
            .as_deref()
            .map(|value| required_text(value, "description must not be empty"))
            .transpose()?;

        let stamp = Stamp::now(&self.config.modifier);
        let tx = begin_write(&mut self.conn)?;
        let stored = template_row_tx(&tx, template_id)?;

        let next_title = title.unwrap_or_else(|| stored.title.clone());
        let next_description = description.unwrap_or_else(|| stored.description.clone());
        let next_long = match request.long_description.as_deref() {
            Some(value) => optional_text(Some(value)),
            None => stored.long_description.clone(),
        };

        let mut changes = Changes::default();
        changes.track("title", &stored.title, &next_title);
        changes.track("description", &stored.description, &next_description);
        changes.track("long_description", &stored.long_description, &next_long);
        if changes.is_empty() {
            return Ok(stored);
        }

        tx.execute(
            r#"
            UPDATE templates
            SET title=?2, description=?3, long_description=?4, updated_at_ms=?5, modified_by=?6
            WHERE id=?1
            "#,
            params![
                template_id,
                next_title,
                next_description,
                next_long,
                stamp.now_ms,
                stamp.by
            ],
        )?;
        insert_event_tx(
            &tx,
            stamp,
            "template",
            template_id,
            "template_updated",
            json!({ "changed": changes.columns() }),
        )?;
        let template = template_row_tx(&tx, template_id)?;
        tx.commit()?;

        tracing::debug!(template_id, changed = ?changes.columns(), "template updated");
        Ok(template)
    }
}
