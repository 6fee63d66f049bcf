//! Pre-flight drone deconfliction.
//!
//! Builds time-stamped missions, interpolates a drone's position at any
//! instant, and scans a primary mission against other scheduled missions
//! for losses of separation.

pub mod conflict;
pub mod error;
pub mod models;
pub mod rules;
pub mod spatial;

pub use conflict::{
    check_for_conflicts, ConflictChecker, ConflictRecord, ConflictType, DeconflictionReport,
    DeconflictionStatus,
};
pub use error::MissionError;
pub use models::{Coordinate, Mission, TimeWindow, Waypoint, TIME_EPSILON};
pub use rules::SeparationRules;
pub use spatial::{calculate_distance, position_at_time, Separation};
