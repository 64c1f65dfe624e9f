//! Domain models for the diet planner.

mod catalog;
mod condition;
mod plan;
mod profile;

pub use catalog::*;
pub use condition::*;
pub use plan::*;
pub use profile::*;
