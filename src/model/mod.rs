mod common;
mod counters;
mod event;
mod player;
mod team;

#[cfg(test)]
pub(crate) mod fixtures;

pub use common::*;
pub use counters::*;
pub use event::*;
pub use player::*;
pub use team::*;
