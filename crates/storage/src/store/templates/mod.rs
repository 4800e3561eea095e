#![forbid(unsafe_code)]

use super::*;

mod create;
mod delete;
mod edit;
mod get;
mod stats;
