//! Construction errors for missions.
//!
//! Only building a mission can fail. Queries against a built mission
//! report "no position" as `None` rather than as an error.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MissionError {
    #[error("mission for {drone_id} must have at least one waypoint")]
    EmptyMission { drone_id: String },

    #[error("primary mission for {drone_id} must have at least one waypoint coordinate")]
    EmptyCoordinates { drone_id: String },

    #[error("mission end time ({end}) must not be before start time ({start})")]
    InvalidTimeWindow { start: f64, end: f64 },

    #[error("waypoint {index} of mission {drone_id} has a non-finite coordinate or timestamp")]
    NonFiniteWaypoint { drone_id: String, index: usize },
}
