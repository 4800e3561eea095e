#![forbid(unsafe_code)]

use super::*;
use chk_core::ids::record_id;
use chk_core::ordering::is_dense;

impl SqliteStore {
    pub fn template_get(&self, template_id: i64) -> Result<TemplateRow, StoreError> {
        let template_id = record_id("template_id", template_id)?;
        let tx = self.read_tx()?;
        template_row_tx(&tx, template_id)
    }

    pub fn templates_list(&self) -> Result<Vec<TemplateRow>, StoreError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {TEMPLATE_COLUMNS} FROM templates ORDER BY id ASC"
        ))?;
        let rows = stmt.query_map([], template_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Steps of a template in display order.
    pub fn template_steps(&self, template_id: i64) -> Result<Vec<StepRow>, StoreError> {
        let template_id = record_id("template_id", template_id)?;
        let tx = self.read_tx()?;
        ensure_template_exists_tx(&tx, template_id)?;
        template_steps_tx(&tx, template_id)
    }

    /// Whether the template's indices are exactly `1..=N`.
    pub fn template_order_is_dense(&self, template_id: i64) -> Result<bool, StoreError> {
        let template_id = record_id("template_id", template_id)?;
        let tx = self.read_tx()?;
        ensure_template_exists_tx(&tx, template_id)?;
        Ok(is_dense(&order_indices_tx(&tx, template_id)?))
    }
}
