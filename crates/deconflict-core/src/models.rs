//! Core data models for trajectory deconfliction.
//!
//! A [`Mission`] is an ordered, non-empty list of [`Waypoint`]s owned by one
//! drone. Altitude is optional per waypoint; a mission is treated as 3D as
//! soon as any of its waypoints carries one.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::error::MissionError;

/// Tolerance used for all time comparisons (seconds).
pub const TIME_EPSILON: f64 = 1e-6;

/// A single point in space and time along a drone's planned path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub x: f64,
    pub y: f64,
    /// Altitude in meters, `None` for a 2D-only point
    #[serde(default)]
    pub z: Option<f64>,
    #[serde(alias = "t")]
    pub timestamp: f64,
}

impl Waypoint {
    /// Create a 2D waypoint.
    pub fn new(x: f64, y: f64, timestamp: f64) -> Self {
        Self {
            x,
            y,
            z: None,
            timestamp,
        }
    }

    /// Set the altitude.
    pub fn with_altitude(mut self, z: f64) -> Self {
        self.z = Some(z);
        self
    }

    pub fn is_3d(&self) -> bool {
        self.z.is_some()
    }

    /// Spatial part of the waypoint.
    pub fn position(&self) -> Coordinate {
        Coordinate {
            x: self.x,
            y: self.y,
            z: self.z,
        }
    }

    /// Same location, re-stamped to `timestamp`.
    pub fn at_time(&self, timestamp: f64) -> Self {
        Self { timestamp, ..*self }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.timestamp.is_finite()
            && self.z.map_or(true, f64::is_finite)
    }
}

impl fmt::Display for Waypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.z {
            Some(z) => write!(
                f,
                "Waypoint(x={:.2}, y={:.2}, z={:.2}, t={:.2})",
                self.x, self.y, z, self.timestamp
            ),
            None => write!(
                f,
                "Waypoint(x={:.2}, y={:.2}, t={:.2})",
                self.x, self.y, self.timestamp
            ),
        }
    }
}

/// A spatial position without a timestamp.
///
/// Deserializes from `[x, y]`, `[x, y, z]` or `{"x": .., "y": .., "z": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "CoordinateRepr")]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CoordinateRepr {
    Planar([f64; 2]),
    Spatial([f64; 3]),
    Named {
        x: f64,
        y: f64,
        #[serde(default)]
        z: Option<f64>,
    },
}

impl From<CoordinateRepr> for Coordinate {
    fn from(repr: CoordinateRepr) -> Self {
        match repr {
            CoordinateRepr::Planar([x, y]) => Self { x, y, z: None },
            CoordinateRepr::Spatial([x, y, z]) => Self { x, y, z: Some(z) },
            CoordinateRepr::Named { x, y, z } => Self { x, y, z },
        }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y, z: None }
    }
}

impl From<(f64, f64, f64)> for Coordinate {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self { x, y, z: Some(z) }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.z {
            Some(z) => write!(f, "(x={:.2}, y={:.2}, z={:.2})", self.x, self.y, z),
            None => write!(f, "(x={:.2}, y={:.2})", self.x, self.y),
        }
    }
}

/// Closed time interval in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: f64,
    pub end: f64,
}

impl TimeWindow {
    /// Create a window, rejecting non-finite bounds and `end < start`.
    pub fn new(start: f64, end: f64) -> Result<Self, MissionError> {
        if !start.is_finite() || !end.is_finite() || end < start {
            return Err(MissionError::InvalidTimeWindow { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    pub fn is_instant(&self) -> bool {
        self.start == self.end
    }
}

/// A drone's planned mission: waypoints sorted ascending by timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct Mission {
    drone_id: String,
    waypoints: Vec<Waypoint>,
    /// Overall window for missions built from coordinates
    declared_window: Option<TimeWindow>,
}

impl Mission {
    /// Build a mission from timestamped waypoints.
    ///
    /// Waypoints are re-sorted by timestamp (stable, so equal timestamps keep
    /// their input order).
    pub fn new(
        drone_id: impl Into<String>,
        waypoints: Vec<Waypoint>,
    ) -> Result<Self, MissionError> {
        let drone_id = drone_id.into();
        if waypoints.is_empty() {
            return Err(MissionError::EmptyMission { drone_id });
        }
        if let Some(index) = waypoints.iter().position(|wp| !wp.is_finite()) {
            return Err(MissionError::NonFiniteWaypoint { drone_id, index });
        }

        let mut waypoints = waypoints;
        sort_by_timestamp(&mut waypoints);

        Ok(Self {
            drone_id,
            waypoints,
            declared_window: None,
        })
    }

    /// Build a primary mission from spatial coordinates and an overall window.
    ///
    /// A single coordinate makes the drone stationary for the whole window
    /// (one waypoint when the window is an instant, two otherwise). With more
    /// coordinates the window is split evenly across the segments and the
    /// last waypoint lands exactly on `end_time`.
    pub fn from_coordinates<I, C>(
        drone_id: impl Into<String>,
        coords: I,
        start_time: f64,
        end_time: f64,
    ) -> Result<Self, MissionError>
    where
        I: IntoIterator<Item = C>,
        C: Into<Coordinate>,
    {
        let drone_id = drone_id.into();
        let coords: Vec<Coordinate> = coords.into_iter().map(Into::into).collect();
        if coords.is_empty() {
            return Err(MissionError::EmptyCoordinates { drone_id });
        }
        let window = TimeWindow::new(start_time, end_time)?;

        let mut waypoints = Vec::with_capacity(coords.len().max(2));
        if let [coord] = coords.as_slice() {
            waypoints.push(waypoint_at(coord, window.start));
            if !window.is_instant() {
                waypoints.push(waypoint_at(coord, window.end));
            }
        } else {
            let last = coords.len() - 1;
            let time_per_segment = window.duration() / last as f64;
            for (i, coord) in coords.iter().enumerate() {
                let timestamp = if i == last {
                    window.end
                } else {
                    window.start + i as f64 * time_per_segment
                };
                let waypoint = waypoint_at(coord, timestamp);
                if waypoints.last() == Some(&waypoint) {
                    continue;
                }
                waypoints.push(waypoint);
            }
        }

        let mut mission = Self::new(drone_id, waypoints)?;
        if let Some(last) = mission.waypoints.last_mut() {
            if last.timestamp > window.end + TIME_EPSILON {
                last.timestamp = window.end;
                sort_by_timestamp(&mut mission.waypoints);
            }
        }
        mission.declared_window = Some(window);
        Ok(mission)
    }

    pub fn drone_id(&self) -> &str {
        &self.drone_id
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Timestamp of the first waypoint.
    pub fn start_time(&self) -> f64 {
        self.waypoints.first().map_or(0.0, |wp| wp.timestamp)
    }

    /// Timestamp of the last waypoint.
    pub fn end_time(&self) -> f64 {
        self.waypoints.last().map_or(0.0, |wp| wp.timestamp)
    }

    /// True if any waypoint carries an altitude.
    pub fn is_3d(&self) -> bool {
        self.waypoints.iter().any(Waypoint::is_3d)
    }

    /// Window a scan of this mission covers: the declared overall window when
    /// the mission was built from coordinates, the waypoint span otherwise.
    pub fn scan_window(&self) -> TimeWindow {
        self.declared_window.unwrap_or(TimeWindow {
            start: self.start_time(),
            end: self.end_time(),
        })
    }

    /// Interpolated position at time `t`, `None` when the drone is not flying.
    pub fn position_at_time(&self, t: f64) -> Option<Waypoint> {
        crate::spatial::position_at_time(self, t)
    }
}

impl fmt::Display for Mission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mission(id='{}', waypoints_count={}, start_t={:.2}, end_t={:.2}, is_3d={})",
            self.drone_id,
            self.waypoints.len(),
            self.start_time(),
            self.end_time(),
            self.is_3d()
        )
    }
}

fn waypoint_at(coord: &Coordinate, timestamp: f64) -> Waypoint {
    Waypoint {
        x: coord.x,
        y: coord.y,
        z: coord.z,
        timestamp,
    }
}

fn sort_by_timestamp(waypoints: &mut [Waypoint]) {
    waypoints.sort_by(|a, b| {
        a.timestamp
            .partial_cmp(&b.timestamp)
            .unwrap_or(Ordering::Equal)
    });
}
