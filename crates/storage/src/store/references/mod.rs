#![forbid(unsafe_code)]

use super::*;

mod registry;
mod step_refs;

pub(in crate::store) use registry::reference_type_id_tx;
pub(in crate::store) use step_refs::{insert_reference_tx, references_for_step_tx};
