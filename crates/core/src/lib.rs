#![forbid(unsafe_code)]

pub mod dates;
pub mod ids;
pub mod model;
pub mod names;
pub mod ordering;
pub mod rollup;

pub use model::{Status, StatusError};
pub use rollup::Rollup;
