//! Public types for message counters
pub use crate::api::state::Stats;
