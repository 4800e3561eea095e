#![forbid(unsafe_code)]

use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TemplateRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub long_description: Option<String>,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
    pub modified_by: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StepRow {
    pub id: i64,
    pub template_id: i64,
    pub text: String,
    pub order_index: i64,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
    pub modified_by: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TemplateStats {
    pub template_id: i64,
    pub title: String,
    pub step_count: usize,
    pub active_instances: usize,
    pub completed_instances: usize,
    pub updated_at_ms: i64,
}
