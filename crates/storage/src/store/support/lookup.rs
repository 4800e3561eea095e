#![forbid(unsafe_code)]

use super::super::{InstanceRow, StepRow, StepStateRow, StoreError, TemplateRow};
use super::rows::*;
use rusqlite::{OptionalExtension, Transaction, params};

pub(in crate::store) fn template_row_tx(
    tx: &Transaction<'_>,
    template_id: i64,
) -> Result<TemplateRow, StoreError> {
    tx.query_row(
        &format!("SELECT {TEMPLATE_COLUMNS} FROM templates WHERE id=?1"),
        params![template_id],
        template_from_row,
    )
    .optional()?
    .ok_or(StoreError::UnknownTemplate(template_id))
}

pub(in crate::store) fn template_exists_tx(
    tx: &Transaction<'_>,
    template_id: i64,
) -> Result<bool, StoreError> {
    Ok(tx
        .query_row(
            "SELECT 1 FROM templates WHERE id=?1",
            params![template_id],
            |row| row.get::<_, i64>(0),
        )
        .optional()?
        .is_some())
}

pub(in crate::store) fn ensure_template_exists_tx(
    tx: &Transaction<'_>,
    template_id: i64,
) -> Result<(), StoreError> {
    if template_exists_tx(tx, template_id)? {
        Ok(())
    } else {
        Err(StoreError::UnknownTemplate(template_id))
    }
}

pub(in crate::store) fn step_row_tx(
    tx: &Transaction<'_>,
    step_id: i64,
) -> Result<StepRow, StoreError> {
    tx.query_row(
        &format!("SELECT {STEP_COLUMNS} FROM steps WHERE id=?1"),
        params![step_id],
        step_from_row,
    )
    .optional()?
    .ok_or(StoreError::UnknownStep(step_id))
}

/// Loads a step and checks that it belongs to `template_id`.
pub(in crate::store) fn template_step_tx(
    tx: &Transaction<'_>,
    template_id: i64,
    step_id: i64,
) -> Result<StepRow, StoreError> {
    let step = step_row_tx(tx, step_id)?;
    if step.template_id != template_id {
        return Err(StoreError::StepNotInTemplate {
            template_id,
            step_id,
        });
    }
    Ok(step)
}

pub(in crate::store) fn step_count_tx(
    tx: &Transaction<'_>,
    template_id: i64,
) -> Result<i64, StoreError> {
    Ok(tx.query_row(
        "SELECT COUNT(1) FROM steps WHERE template_id=?1",
        params![template_id],
        |row| row.get::<_, i64>(0),
    )?)
}

pub(in crate::store) fn template_steps_tx(
    tx: &Transaction<'_>,
    template_id: i64,
) -> Result<Vec<StepRow>, StoreError> {
    let mut stmt = tx.prepare(&format!(
        "SELECT {STEP_COLUMNS} FROM steps WHERE template_id=?1 ORDER BY order_index ASC"
    ))?;
    let rows = stmt.query_map(params![template_id], step_from_row)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

pub(in crate::store) fn instance_row_tx(
    tx: &Transaction<'_>,
    instance_id: i64,
) -> Result<InstanceRow, StoreError> {
    tx.query_row(
        &format!("SELECT {INSTANCE_COLUMNS} FROM instances WHERE id=?1"),
        params![instance_id],
        instance_from_row,
    )
    .optional()?
    .ok_or(StoreError::UnknownInstance(instance_id))
}

/// States of one instance in creation order.
pub(in crate::store) fn step_states_tx(
    tx: &Transaction<'_>,
    instance_id: i64,
) -> Result<Vec<StepStateRow>, StoreError> {
    let mut stmt = tx.prepare(&format!(
        "SELECT {STEP_STATE_COLUMNS} FROM instance_steps WHERE instance_id=?1 ORDER BY id ASC"
    ))?;
    let rows = stmt.query_map(params![instance_id], step_state_from_row)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

pub(in crate::store) fn step_state_tx(
    tx: &Transaction<'_>,
    instance_id: i64,
    step_id: i64,
) -> Result<StepStateRow, StoreError> {
    tx.query_row(
        &format!(
            "SELECT {STEP_STATE_COLUMNS} FROM instance_steps \
             WHERE instance_id=?1 AND step_id=?2 ORDER BY id ASC LIMIT 1"
        ),
        params![instance_id, step_id],
        step_state_from_row,
    )
    .optional()?
    .ok_or(StoreError::StepNotInInstance {
        instance_id,
        step_id,
    })
}
