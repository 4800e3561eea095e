#![forbid(unsafe_code)]

mod events;
mod lookup;
mod rows;
mod schema;
mod shift;
mod text;
mod time;
mod touch;

pub(super) use events::*;
pub(super) use lookup::*;
pub(super) use rows::*;
pub(super) use schema::install_schema;
pub(super) use shift::*;
pub(super) use text::*;
pub(super) use self::time::Stamp;
pub(super) use touch::*;
