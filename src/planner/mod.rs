//! Planner Module - Core of the Learning Path Backend
//!
//! Turns a student's goals and weekly availability into a week-by-week plan
//! drawn from the course catalog.
//!
//! Architecture:
//! - Tracks: Static stack / continuation course tables per track
//! - Catalog: SQLite-backed curriculum items, ordered by sequence number
//! - Aggregator: Budget-driven course collection with id-based dedup
//! - Packer: Greedy first-fit packing into weekly modules
//! - Advisor: Next-course suggestion and track completion
//! - Student: Persisted student profile / goals / availability

pub mod advisor;
pub mod aggregator;
pub mod catalog;
pub mod generator;
pub mod packer;
pub mod student;
pub mod themes;
pub mod tracks;
pub mod types;

pub use advisor::*;
pub use aggregator::*;
pub use catalog::*;
pub use generator::*;
pub use packer::*;
pub use student::*;
pub use themes::*;
pub use tracks::*;
pub use types::*;
