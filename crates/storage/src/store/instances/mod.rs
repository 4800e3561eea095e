#![forbid(unsafe_code)]

//! Checklist instances: creation from a template snapshot, per-step state,
//! progress rollup, and reconciliation against later template edits.

use super::*;

mod audit;
mod delete;
mod edit;
mod get;
mod instantiate;
mod query;
mod status;
mod step_state;
mod summary;

use chk_core::dates::{today_utc, validate_target_date};

/// Blank clears the date; anything else must parse and fall inside the
/// configured window.
fn target_date_value(value: &str, max_days: u32) -> Result<Option<String>, StoreError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(validate_target_date(value, today_utc(), max_days)?))
}
