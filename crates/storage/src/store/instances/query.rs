#![forbid(unsafe_code)]

use super::*;
use chk_core::ids::record_id;
use rusqlite::params;

impl SqliteStore {
    /// Instances whose stored status is not Completed, newest first.
    pub fn instances_active(&self, template_id: Option<i64>) -> Result<Vec<InstanceRow>, StoreError> {
        self.instances_where("status <> ?1", Status::Completed, template_id)
    }

    /// Instances with the given stored status, newest first.
    pub fn instances_by_status(
        &self,
        status: Status,
        template_id: Option<i64>,
    ) -> Result<Vec<InstanceRow>, StoreError> {
        self.instances_where("status = ?1", status, template_id)
    }

    /// Unfinished steps of an instance that still exist in its template,
    /// in template order.
    pub fn instance_incomplete_steps(
        &self,
        instance_id: i64,
    ) -> Result<Vec<IncompleteStep>, StoreError> {
        let instance_id = record_id("instance_id", instance_id)?;
        let tx = self.read_tx()?;
        instance_row_tx(&tx, instance_id)?;

        let mut stmt = tx.prepare(
            r#"
            SELECT st.step_id, s.text, s.order_index, st.status, st.note
            FROM instance_steps st
            JOIN steps s ON s.id = st.step_id
            WHERE st.instance_id=?1 AND st.status <> ?2
            ORDER BY s.order_index ASC, st.id ASC
            "#,
        )?;
        let rows = stmt.query_map(
            params![instance_id, Status::Completed.as_str()],
            |row| {
                Ok(IncompleteStep {
                    step_id: row.get(0)?,
                    text: row.get(1)?,
                    order_index: row.get(2)?,
                    status: status_column(row, 3)?,
                    note: row.get(4)?,
                })
            },
        )?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// `predicate` is a fixed fragment over `status` bound to `?1`.
    fn instances_where(
        &self,
        predicate: &'static str,
        status: Status,
        template_id: Option<i64>,
    ) -> Result<Vec<InstanceRow>, StoreError> {
        let tx = self.read_tx()?;
        let rows = match template_id {
            Some(template_id) => {
                let template_id = record_id("template_id", template_id)?;
                ensure_template_exists_tx(&tx, template_id)?;
                let mut stmt = tx.prepare(&format!(
                    "SELECT {INSTANCE_COLUMNS} FROM instances \
                     WHERE {predicate} AND template_id=?2 \
                     ORDER BY created_at_ms DESC, id DESC"
                ))?;
                let rows = stmt.query_map(params![status.as_str(), template_id], instance_from_row)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
            None => {
                let mut stmt = tx.prepare(&format!(
                    "SELECT {INSTANCE_COLUMNS} FROM instances \
                     WHERE {predicate} \
                     ORDER BY created_at_ms DESC, id DESC"
                ))?;
                let rows = stmt.query_map(params![status.as_str()], instance_from_row)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
        };
        Ok(rows)
    }
}
