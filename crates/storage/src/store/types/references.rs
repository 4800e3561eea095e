#![forbid(unsafe_code)]

use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReferenceTypeRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReferenceRow {
    pub id: i64,
    pub step_id: i64,
    pub url: String,
    pub reference_type_id: i64,
    pub reference_type: String,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}
