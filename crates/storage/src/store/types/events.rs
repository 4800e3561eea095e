#![forbid(unsafe_code)]

use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EventRow {
    pub seq: i64,
    pub ts_ms: i64,
    pub entity_kind: String,
    pub entity_id: i64,
    pub event_type: String,
    pub payload_json: String,
    pub modified_by: String,
}

impl EventRow {
    pub fn event_id(&self) -> String {
        format!("evt_{:016}", self.seq)
    }
}
