#![forbid(unsafe_code)]

use serde::Serialize;

/// Drift between an instance and the current steps of its template.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    pub instance_id: i64,
    pub template_id: i64,
    /// The instance points at a template id that no longer exists.
    pub template_missing: bool,
    /// Template step ids with no state in the instance, in template order.
    pub missing_steps: Vec<i64>,
    /// Ids of states whose step is no longer part of the template.
    pub orphaned_states: Vec<i64>,
    /// Every state is Completed but the stored status says otherwise.
    pub stale_status: bool,
    pub fixed: bool,
}

impl AuditReport {
    pub fn has_drift(&self) -> bool {
        !self.missing_steps.is_empty() || !self.orphaned_states.is_empty() || self.stale_status
    }
}
