//! Learning Path Backend
//!
//! Student Accelerator backend that turns a student's track, skill level and
//! weekly availability into a week-by-week learning path:
//! - Budget-driven course aggregation with id-based dedup
//! - Greedy weekly packing with themed week titles
//! - Next-course suggestions and track completion
//! - Student onboarding records and curriculum listing

pub mod api;
pub mod config;
pub mod planner;

pub use api::*;
pub use config::*;
pub use planner::*;
