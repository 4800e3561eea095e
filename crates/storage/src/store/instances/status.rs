#![forbid(unsafe_code)]

use super::*;
use chk_core::ids::record_id;
use rusqlite::{Transaction, params};
use serde_json::json;

impl SqliteStore {
    /// Progress of an instance as of now. Nothing is written.
    pub fn instance_rollup(&self, instance_id: i64) -> Result<Rollup, StoreError> {
        let instance_id = record_id("instance_id", instance_id)?;
        let tx = self.read_tx()?;
        instance_row_tx(&tx, instance_id)?;
        rollup_tx(&tx, instance_id)
    }

    /// Recomputes the rollup and stores the derived status on the instance.
    pub fn instance_apply_status(&mut self, instance_id: i64) -> Result<StatusApplied, StoreError> {
        let instance_id = record_id("instance_id", instance_id)?;

        let stamp = Stamp::now(&self.config.modifier);
        let tx = begin_write(&mut self.conn)?;
        let instance = instance_row_tx(&tx, instance_id)?;
        let current = rollup_tx(&tx, instance_id)?.derive_status();
        let changed = persist_status_tx(&tx, &instance, current, stamp)?;
        if changed {
            insert_event_tx(
                &tx,
                stamp,
                "instance",
                instance_id,
                "instance_status_applied",
                json!({ "from": instance.status, "to": current }),
            )?;
        }
        tx.commit()?;

        if changed {
            tracing::info!(
                instance_id,
                from = %instance.status,
                to = %current,
                "instance status applied"
            );
        }
        Ok(StatusApplied {
            instance_id,
            previous: instance.status,
            current,
            changed,
        })
    }
}

pub(super) fn rollup_tx(tx: &Transaction<'_>, instance_id: i64) -> Result<Rollup, StoreError> {
    let states = step_states_tx(tx, instance_id)?;
    Ok(Rollup::from_statuses(states.iter().map(|state| state.status)))
}

/// Writes `status` if it differs from the stored one. Returns whether a
/// row changed.
pub(super) fn persist_status_tx(
    tx: &Transaction<'_>,
    instance: &InstanceRow,
    status: Status,
    stamp: Stamp<'_>,
) -> Result<bool, StoreError> {
    if instance.status == status {
        return Ok(false);
    }
    tx.execute(
        "UPDATE instances SET status=?2, updated_at_ms=?3, modified_by=?4 WHERE id=?1",
        params![instance.id, status.as_str(), stamp.now_ms, stamp.by],
    )?;
    Ok(true)
}
