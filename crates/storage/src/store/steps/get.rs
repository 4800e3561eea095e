#![forbid(unsafe_code)]

use super::*;
use chk_core::ids::record_id;

impl SqliteStore {
    pub fn step_get(&self, step_id: i64) -> Result<StepRow, StoreError> {
        let step_id = record_id("step_id", step_id)?;
        let tx = self.read_tx()?;
        step_row_tx(&tx, step_id)
    }
}
