#![forbid(unsafe_code)]

use super::*;
use chk_core::ids::record_id;

impl SqliteStore {
    pub fn instance_get(&self, instance_id: i64) -> Result<InstanceRow, StoreError> {
        let instance_id = record_id("instance_id", instance_id)?;
        let tx = self.read_tx()?;
        instance_row_tx(&tx, instance_id)
    }

    /// States of an instance in creation order, orphans included.
    pub fn instance_steps(&self, instance_id: i64) -> Result<Vec<StepStateRow>, StoreError> {
        let instance_id = record_id("instance_id", instance_id)?;
        let tx = self.read_tx()?;
        instance_row_tx(&tx, instance_id)?;
        step_states_tx(&tx, instance_id)
    }

    pub fn instance_step_get(
        &self,
        instance_id: i64,
        step_id: i64,
    ) -> Result<StepStateRow, StoreError> {
        let instance_id = record_id("instance_id", instance_id)?;
        let step_id = record_id("step_id", step_id)?;
        let tx = self.read_tx()?;
        instance_row_tx(&tx, instance_id)?;
        step_state_tx(&tx, instance_id, step_id)
    }
}
