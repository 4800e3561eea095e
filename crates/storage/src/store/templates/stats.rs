#![forbid(unsafe_code)]

use super::*;
use chk_core::ids::record_id;
use rusqlite::params;

impl SqliteStore {
    pub fn template_stats(&self, template_id: i64) -> Result<TemplateStats, StoreError> {
        let template_id = record_id("template_id", template_id)?;
        let tx = self.read_tx()?;
        let template = template_row_tx(&tx, template_id)?;

        let step_count = step_count_tx(&tx, template_id)?;
        let (active, completed) = tx.query_row(
            r#"
            SELECT
              COALESCE(SUM(CASE WHEN status <> 'Completed' THEN 1 ELSE 0 END), 0),
              COALESCE(SUM(CASE WHEN status = 'Completed' THEN 1 ELSE 0 END), 0)
            FROM instances
            WHERE template_id=?1
            "#,
            params![template_id],
            |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)),
        )?;

        Ok(TemplateStats {
            template_id,
            title: template.title,
            step_count: to_count(step_count),
            active_instances: to_count(active),
            completed_instances: to_count(completed),
            updated_at_ms: template.updated_at_ms,
        })
    }
}

fn to_count(value: i64) -> usize {
    usize::try_from(value).unwrap_or(0)
}
