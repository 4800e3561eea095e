#![forbid(unsafe_code)]

mod audit;
mod events;
mod instances;
mod references;
mod templates;

pub use audit::*;
pub use events::*;
pub use instances::*;
pub use references::*;
pub use templates::*;
