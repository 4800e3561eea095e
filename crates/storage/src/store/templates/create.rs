#![forbid(unsafe_code)]

use super::*;
use rusqlite::params;
use serde_json::json;

impl SqliteStore {
    pub fn template_create(
        &mut self,
        request: TemplateCreateRequest,
    ) -> Result<TemplateRow, StoreError> {
        let title = required_text(&request.title, "title must not be empty")?;
        let description = required_text(&request.description, "description must not be empty")?;
        let long_description = optional_text(request.long_description.as_deref());

        let stamp = Stamp::now(&self.config.modifier);
        let tx = begin_write(&mut self.conn)?;
        tx.execute(
            r#"
            INSERT INTO templates(title, description, long_description, created_at_ms, updated_at_ms, modified_by)
            VALUES (?1, ?2, ?3, ?4, ?4, ?5)
            "#,
            params![title, description, long_description, stamp.now_ms, stamp.by],
        )?;
        let template_id = tx.last_insert_rowid();
        insert_event_tx(
            &tx,
            stamp,
            "template",
            template_id,
            "template_created",
            json!({ "title": title }),
        )?;
        let template = template_row_tx(&tx, template_id)?;
        tx.commit()?;

        tracing::debug!(template_id, "template created");
        Ok(template)
    }
}
