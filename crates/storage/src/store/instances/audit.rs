#![forbid(unsafe_code)]

use super::instantiate::insert_step_state_tx;
use super::status::persist_status_tx;
use super::*;
use chk_core::ids::record_id;
use rusqlite::{Transaction, params};
use serde_json::json;
use std::collections::HashSet;

impl SqliteStore {
    /// Compares an instance with the current steps of its template.
    ///
    /// With `fix`, missing states are created as `Not Started` in template
    /// order, orphaned states are deleted, and a stale status is set to
    /// Completed. Without `fix` nothing is written.
    pub fn audit(&mut self, instance_id: i64, fix: bool) -> Result<AuditReport, StoreError> {
        let instance_id = record_id("instance_id", instance_id)?;

        let stamp = Stamp::now(&self.config.modifier);
        let tx = if fix {
            begin_write(&mut self.conn)?
        } else {
            self.conn.unchecked_transaction()?
        };
        let report = audit_tx(&tx, instance_id, fix, stamp)?;
        if report.fixed {
            tx.commit()?;
        }
        Ok(report)
    }

    /// Audits every instance in id order, each in its own transaction.
    pub fn audit_all(&mut self, fix: bool) -> Result<Vec<AuditReport>, StoreError> {
        let ids = {
            let mut stmt = self.conn.prepare("SELECT id FROM instances ORDER BY id ASC")?;
            let rows = stmt.query_map([], |row| row.get::<_, i64>(0))?;
            rows.collect::<Result<Vec<_>, _>>()?
        };

        let mut reports = Vec::with_capacity(ids.len());
        for instance_id in ids {
            match self.audit(instance_id, fix) {
                Ok(report) => reports.push(report),
                // Deleted by another writer since the id scan.
                Err(StoreError::UnknownInstance(_)) => continue,
                Err(err) => return Err(err),
            }
        }
        Ok(reports)
    }
}

fn audit_tx(
    tx: &Transaction<'_>,
    instance_id: i64,
    fix: bool,
    stamp: Stamp<'_>,
) -> Result<AuditReport, StoreError> {
    let instance = instance_row_tx(tx, instance_id)?;
    let template_missing = !template_exists_tx(tx, instance.template_id)?;
    let steps = if template_missing {
        Vec::new()
    } else {
        template_steps_tx(tx, instance.template_id)?
    };
    let states = step_states_tx(tx, instance_id)?;

    let tracked: HashSet<i64> = states.iter().map(|state| state.step_id).collect();
    let live: HashSet<i64> = steps.iter().map(|step| step.id).collect();

    let missing_steps: Vec<i64> = steps
        .iter()
        .map(|step| step.id)
        .filter(|step_id| !tracked.contains(step_id))
        .collect();
    let orphaned_states: Vec<i64> = states
        .iter()
        .filter(|state| !live.contains(&state.step_id))
        .map(|state| state.id)
        .collect();
    let stale_status = !states.is_empty()
        && states.iter().all(|state| state.status == Status::Completed)
        && instance.status != Status::Completed;

    let mut report = AuditReport {
        instance_id,
        template_id: instance.template_id,
        template_missing,
        missing_steps,
        orphaned_states,
        stale_status,
        fixed: false,
    };
    if !report.has_drift() {
        return Ok(report);
    }

    tracing::warn!(
        instance_id,
        template_id = instance.template_id,
        template_missing,
        missing = report.missing_steps.len(),
        orphaned = report.orphaned_states.len(),
        stale_status,
        "instance drifted from its template"
    );
    if !fix {
        return Ok(report);
    }

    for step_id in report.missing_steps.iter() {
        insert_step_state_tx(tx, instance_id, *step_id, stamp)?;
    }
    for state_id in report.orphaned_states.iter() {
        tx.execute("DELETE FROM instance_steps WHERE id=?1", params![state_id])?;
    }
    // A stale status is set to Completed even when missing states were added
    // in the same pass; `instance_apply_status` re-derives it afterwards.
    let status = report.stale_status.then_some(Status::Completed);
    if let Some(status) = status {
        persist_status_tx(tx, &instance, status, stamp)?;
    }

    insert_event_tx(
        tx,
        stamp,
        "instance",
        instance_id,
        "audit_repaired",
        json!({
            "missing_steps": report.missing_steps,
            "orphaned_states": report.orphaned_states,
            "status": status,
        }),
    )?;
    report.fixed = true;

    tracing::info!(
        instance_id,
        added = report.missing_steps.len(),
        removed = report.orphaned_states.len(),
        status = ?status,
        "instance repaired"
    );
    Ok(report)
}
