#![forbid(unsafe_code)]

//! Dense ordering of a template's steps.
//!
//! Each operation validates against the template's current step count, asks
//! `chk_core::ordering` for a plan, then rewrites the affected block row by
//! row inside one write transaction. A failure anywhere rolls the whole
//! reorder back, so readers only ever see indices `1..=N`.

use super::*;

mod edit;
mod get;
mod insert;
mod remove;
mod reorder;

pub(in crate::store) use insert::insert_step_tx;
pub(in crate::store) use reorder::move_step_tx;
