#![forbid(unsafe_code)]

use super::*;
use chk_core::ids::record_id;
use rusqlite::params;

const DEFAULT_EVENTS_LIMIT: usize = 50;
const MAX_EVENTS_LIMIT: usize = 500;

impl SqliteStore {
    /// Journal entries for one entity, newest first. `limit = 0` falls back
    /// to the default page size.
    pub fn events_list(
        &self,
        entity_kind: &str,
        entity_id: i64,
        limit: usize,
    ) -> Result<Vec<EventRow>, StoreError> {
        let entity_kind = required_text(entity_kind, "entity_kind must not be empty")?;
        let entity_id = record_id("entity_id", entity_id)?;
        let limit = match limit {
            0 => DEFAULT_EVENTS_LIMIT,
            n => n.min(MAX_EVENTS_LIMIT),
        };

        let mut stmt = self.conn.prepare(
            "SELECT seq, ts_ms, entity_kind, entity_id, type, payload_json, modified_by \
             FROM events WHERE entity_kind=?1 AND entity_id=?2 \
             ORDER BY seq DESC LIMIT ?3",
        )?;
        let rows = stmt.query_map(
            params![entity_kind, entity_id, limit as i64],
            event_from_row,
        )?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}
