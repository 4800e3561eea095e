#![forbid(unsafe_code)]

use super::super::StoreError;
use super::time::Stamp;
use rusqlite::{Transaction, params};
use serde_json::Value;

pub(in crate::store) fn insert_event_tx(
    tx: &Transaction<'_>,
    stamp: Stamp<'_>,
    entity_kind: &str,
    entity_id: i64,
    event_type: &str,
    payload: Value,
) -> Result<i64, StoreError> {
    tx.execute(
        r#"
        INSERT INTO events(ts_ms, entity_kind, entity_id, type, payload_json, modified_by)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
        params![
            stamp.now_ms,
            entity_kind,
            entity_id,
            event_type,
            payload.to_string(),
            stamp.by
        ],
    )?;
    Ok(tx.last_insert_rowid())
}
