#![forbid(unsafe_code)]

use super::super::{
    EventRow, InstanceRow, ReferenceRow, ReferenceTypeRow, StepRow, StepStateRow, TemplateRow,
};
use chk_core::Status;
use rusqlite::Row;
use rusqlite::types::Type;

pub(in crate::store) const TEMPLATE_COLUMNS: &str =
    "id, title, description, long_description, created_at_ms, updated_at_ms, modified_by";

pub(in crate::store) const STEP_COLUMNS: &str =
    "id, template_id, text, order_index, created_at_ms, updated_at_ms, modified_by";

pub(in crate::store) const INSTANCE_COLUMNS: &str = "id, template_id, name, description, status, target_date, created_at_ms, updated_at_ms, modified_by";

pub(in crate::store) const STEP_STATE_COLUMNS: &str =
    "id, instance_id, step_id, status, note, created_at_ms, updated_at_ms";

pub(in crate::store) fn status_column(row: &Row<'_>, index: usize) -> rusqlite::Result<Status> {
    let raw = row.get::<_, String>(index)?;
    Status::parse(&raw)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(err)))
}

pub(in crate::store) fn template_from_row(row: &Row<'_>) -> rusqlite::Result<TemplateRow> {
    Ok(TemplateRow {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        long_description: row.get(3)?,
        created_at_ms: row.get(4)?,
        updated_at_ms: row.get(5)?,
        modified_by: row.get(6)?,
    })
}

pub(in crate::store) fn step_from_row(row: &Row<'_>) -> rusqlite::Result<StepRow> {
    Ok(StepRow {
        id: row.get(0)?,
        template_id: row.get(1)?,
        text: row.get(2)?,
        order_index: row.get(3)?,
        created_at_ms: row.get(4)?,
        updated_at_ms: row.get(5)?,
        modified_by: row.get(6)?,
    })
}

pub(in crate::store) fn instance_from_row(row: &Row<'_>) -> rusqlite::Result<InstanceRow> {
    Ok(InstanceRow {
        id: row.get(0)?,
        template_id: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        status: status_column(row, 4)?,
        target_date: row.get(5)?,
        created_at_ms: row.get(6)?,
        updated_at_ms: row.get(7)?,
        modified_by: row.get(8)?,
    })
}

pub(in crate::store) fn step_state_from_row(row: &Row<'_>) -> rusqlite::Result<StepStateRow> {
    Ok(StepStateRow {
        id: row.get(0)?,
        instance_id: row.get(1)?,
        step_id: row.get(2)?,
        status: status_column(row, 3)?,
        note: row.get(4)?,
        created_at_ms: row.get(5)?,
        updated_at_ms: row.get(6)?,
    })
}

pub(in crate::store) fn reference_type_from_row(
    row: &Row<'_>,
) -> rusqlite::Result<ReferenceTypeRow> {
    Ok(ReferenceTypeRow {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        created_at_ms: row.get(3)?,
        updated_at_ms: row.get(4)?,
    })
}

/// Expects `r.id, r.step_id, r.url, r.reference_type_id, t.name, r.created_at_ms, r.updated_at_ms`.
pub(in crate::store) fn reference_from_row(row: &Row<'_>) -> rusqlite::Result<ReferenceRow> {
    Ok(ReferenceRow {
        id: row.get(0)?,
        step_id: row.get(1)?,
        url: row.get(2)?,
        reference_type_id: row.get(3)?,
        reference_type: row.get(4)?,
        created_at_ms: row.get(5)?,
        updated_at_ms: row.get(6)?,
    })
}

pub(in crate::store) fn event_from_row(row: &Row<'_>) -> rusqlite::Result<EventRow> {
    Ok(EventRow {
        seq: row.get(0)?,
        ts_ms: row.get(1)?,
        entity_kind: row.get(2)?,
        entity_id: row.get(3)?,
        event_type: row.get(4)?,
        payload_json: row.get(5)?,
        modified_by: row.get(6)?,
    })
}
