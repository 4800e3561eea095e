#![forbid(unsafe_code)]

use super::references::ReferenceRow;
use chk_core::{Rollup, Status};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InstanceRow {
    pub id: i64,
    /// Weak reference: the template may have been deleted since.
    pub template_id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Stored status. Only `instance_apply_status` and audit repairs write it,
    /// so it can lag behind the step states.
    pub status: Status,
    pub target_date: Option<String>,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
    pub modified_by: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StepStateRow {
    pub id: i64,
    pub instance_id: i64,
    /// Weak reference into the template's steps.
    pub step_id: i64,
    pub status: Status,
    pub note: Option<String>,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct IncompleteStep {
    pub step_id: i64,
    pub text: String,
    pub order_index: i64,
    pub status: Status,
    pub note: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct StatusApplied {
    pub instance_id: i64,
    pub previous: Status,
    pub current: Status,
    pub changed: bool,
}

/// Read-only overview of unfinished work, built from stored statuses.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InstanceSummary {
    pub active_count: usize,
    /// Active instances whose target date is overdue or falls within the
    /// requested number of days, soonest first.
    pub due_soon: Vec<InstanceRow>,
    /// Stored statuses of the active instances.
    pub by_status: BTreeMap<Status, usize>,
    /// Mean rollup percentage over the active instances; 0 when none.
    pub completion_rate: f64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InstanceStepDetail {
    pub state: StepStateRow,
    /// `None` when the step no longer exists in the template.
    pub text: Option<String>,
    pub order_index: Option<i64>,
    pub references: Vec<ReferenceRow>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InstanceDetails {
    pub instance: InstanceRow,
    pub rollup: Rollup,
    /// Live steps in template order, then orphaned states in creation order.
    pub steps: Vec<InstanceStepDetail>,
}
