//! Core data models for the tracker.

mod ids;
mod match_record;
mod project;
mod stats;

pub use ids::*;
pub use match_record::*;
pub use project::*;
pub use stats::*;
