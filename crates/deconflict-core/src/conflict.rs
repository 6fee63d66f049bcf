//! Conflict detection module.
//!
//! Samples the primary mission at fixed time steps across its scan window
//! and compares it with every other scheduled mission active at the same
//! instant. Every unsafe sample is reported on its own; adjacent detections
//! are not merged.
//!
//! Sampling is discrete: a loss of separation that begins and ends strictly
//! between two samples is not reported. Lower `time_step_s` to tighten this.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{Coordinate, Mission, Waypoint, TIME_EPSILON};
use crate::rules::SeparationRules;
use crate::spatial::{calculate_distance, Separation};

/// Kind of separation loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConflictType {
    /// At least one drone has no altitude and the pair is inside the 2D buffer
    #[serde(rename = "2D proximity")]
    Proximity2d,
    /// Both drones have altitude and the pair is inside the 3D buffer
    #[serde(rename = "3D proximity")]
    Proximity3d,
    /// Outside the 3D buffer, but horizontally close with too little altitude difference
    #[serde(rename = "Insufficient vertical separation")]
    InsufficientVerticalSeparation,
}

impl ConflictType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictType::Proximity2d => "2D proximity",
            ConflictType::Proximity3d => "3D proximity",
            ConflictType::InsufficientVerticalSeparation => "Insufficient vertical separation",
        }
    }
}

impl fmt::Display for ConflictType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One unsafe-proximity sample between the primary and another drone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictRecord {
    pub time: f64,
    pub primary_drone_id: String,
    pub primary_pos: Coordinate,
    pub conflicting_drone_id: String,
    pub other_pos: Coordinate,
    pub distance_2d: f64,
    pub distance_3d: Option<f64>,
    #[serde(rename = "type")]
    pub conflict_type: ConflictType,
}

/// Overall outcome of a deconfliction query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeconflictionStatus {
    #[serde(rename = "clear")]
    Clear,
    #[serde(rename = "conflict detected")]
    ConflictDetected,
}

impl fmt::Display for DeconflictionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeconflictionStatus::Clear => f.write_str("clear"),
            DeconflictionStatus::ConflictDetected => f.write_str("conflict detected"),
        }
    }
}

/// Result of checking one primary mission against a schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeconflictionReport {
    pub primary_drone_id: String,
    pub status: DeconflictionStatus,
    pub rules: SeparationRules,
    pub conflicts: Vec<ConflictRecord>,
    pub checked_at: DateTime<Utc>,
}

impl DeconflictionReport {
    pub fn is_clear(&self) -> bool {
        self.status == DeconflictionStatus::Clear
    }

    /// Distinct conflicting drone ids in order of first detection.
    pub fn conflicting_drones(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = Vec::new();
        for conflict in &self.conflicts {
            if !ids.contains(&conflict.conflicting_drone_id.as_str()) {
                ids.push(&conflict.conflicting_drone_id);
            }
        }
        ids
    }
}

/// Pre-flight conflict checker.
#[derive(Debug, Clone, Default)]
pub struct ConflictChecker {
    pub rules: SeparationRules,
}

impl ConflictChecker {
    pub fn new(rules: SeparationRules) -> Self {
        Self { rules }
    }

    /// Check the primary mission against all other schedules.
    pub fn check(&self, primary: &Mission, others: &[Mission]) -> Vec<ConflictRecord> {
        check_for_conflicts(primary, others, &self.rules)
    }

    /// Check and summarise into a [`DeconflictionReport`].
    pub fn query(&self, primary: &Mission, others: &[Mission]) -> DeconflictionReport {
        let conflicts = self.check(primary, others);
        let status = if conflicts.is_empty() {
            DeconflictionStatus::Clear
        } else {
            DeconflictionStatus::ConflictDetected
        };

        DeconflictionReport {
            primary_drone_id: primary.drone_id().to_string(),
            status,
            rules: self.rules,
            conflicts,
            checked_at: Utc::now(),
        }
    }
}

/// Scan the primary mission's window for separation losses.
///
/// Records are ordered by sample time, then by the order of `others`.
/// Missions sharing the primary's drone id are skipped.
pub fn check_for_conflicts(
    primary: &Mission,
    others: &[Mission],
    rules: &SeparationRules,
) -> Vec<ConflictRecord> {
    let window = primary.scan_window();
    let step = rules.effective_time_step();
    tracing::debug!(
        primary = primary.drone_id(),
        start = window.start,
        end = window.end,
        step,
        others = others.len(),
        "Scanning for conflicts"
    );

    let mut conflicts = Vec::new();
    for t in SampleTimes::new(window.start, window.end, step) {
        let Some(primary_wp) = primary.position_at_time(t) else {
            continue;
        };

        for other in others {
            if other.drone_id() == primary.drone_id() {
                continue;
            }
            let Some(other_wp) = other.position_at_time(t) else {
                continue;
            };

            let separation = calculate_distance(&primary_wp, &other_wp);
            let Some(conflict_type) = classify(&primary_wp, &other_wp, &separation, rules) else {
                continue;
            };

            tracing::trace!(
                time = t,
                other = other.drone_id(),
                distance_2d = separation.horizontal_m,
                kind = conflict_type.as_str(),
                "Conflict sample"
            );
            conflicts.push(ConflictRecord {
                time: t,
                primary_drone_id: primary.drone_id().to_string(),
                primary_pos: primary_wp.position(),
                conflicting_drone_id: other.drone_id().to_string(),
                other_pos: other_wp.position(),
                distance_2d: separation.horizontal_m,
                distance_3d: separation.full_3d_m,
                conflict_type,
            });
        }
    }

    tracing::debug!(
        primary = primary.drone_id(),
        conflicts = conflicts.len(),
        "Scan complete"
    );
    conflicts
}

/// Decide whether a sampled pair is in conflict. First matching rule wins.
///
/// When both points carry altitude, a pair that is horizontally inside the
/// 2D buffer but clears both the 3D buffer and the vertical threshold is
/// *not* reported; the plain 2D rule only applies when altitude is missing.
pub fn classify(
    primary: &Waypoint,
    other: &Waypoint,
    separation: &Separation,
    rules: &SeparationRules,
) -> Option<ConflictType> {
    match (separation.full_3d_m, primary.z, other.z) {
        (Some(distance_3d), Some(z1), Some(z2)) => {
            if distance_3d < rules.safety_buffer_3d_m {
                Some(ConflictType::Proximity3d)
            } else if separation.horizontal_m < rules.safety_buffer_2d_m
                && (z1 - z2).abs() < rules.vertical_separation_m
            {
                Some(ConflictType::InsufficientVerticalSeparation)
            } else {
                None
            }
        }
        _ => (separation.horizontal_m < rules.safety_buffer_2d_m)
            .then_some(ConflictType::Proximity2d),
    }
}

/// Sample instants from `start` to `end` inclusive.
///
/// Times are computed as `start + i * step` so error does not accumulate,
/// and the final sample is snapped exactly onto `end`. An instantaneous
/// window yields a single sample.
#[derive(Debug, Clone)]
struct SampleTimes {
    start: f64,
    end: f64,
    step: f64,
    index: u64,
    done: bool,
}

impl SampleTimes {
    fn new(start: f64, end: f64, step: f64) -> Self {
        Self {
            start,
            end,
            step,
            index: 0,
            done: false,
        }
    }
}

impl Iterator for SampleTimes {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.done {
            return None;
        }
        let t = self.start + self.index as f64 * self.step;
        self.index += 1;
        if t >= self.end - TIME_EPSILON {
            self.done = true;
            return Some(if self.index == 1 { self.start } else { self.end });
        }
        Some(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn primary_straight_2d() -> Mission {
        Mission::from_coordinates("P_Straight2D", [(0.0, 0.0), (100.0, 0.0)], 0.0, 10.0).unwrap()
    }

    fn primary_straight_3d() -> Mission {
        Mission::from_coordinates("P_Straight3D", [(0.0, 0.0, 10.0), (100.0, 0.0, 10.0)], 0.0, 10.0)
            .unwrap()
    }

    #[test]
    fn sample_times_include_window_end() {
        let times: Vec<f64> = SampleTimes::new(0.0, 2.0, 0.5).collect();
        assert_eq!(times, vec![0.0, 0.5, 1.0, 1.5, 2.0]);

        let times: Vec<f64> = SampleTimes::new(0.0, 1.2, 0.5).collect();
        assert_eq!(times, vec![0.0, 0.5, 1.0, 1.2]);

        let times: Vec<f64> = SampleTimes::new(0.0, 1.0, 0.1).collect();
        assert_eq!(times.len(), 11);
        assert_eq!(times.last().copied(), Some(1.0));
    }

    #[test]
    fn instant_window_samples_once() {
        let times: Vec<f64> = SampleTimes::new(4.0, 4.0, 0.5).collect();
        assert_eq!(times, vec![4.0]);
    }

    #[test]
    fn self_comparison_is_skipped() {
        let primary = primary_straight_2d();
        let twin = primary_straight_2d();
        let conflicts = check_for_conflicts(&primary, &[twin], &SeparationRules::default());
        assert!(conflicts.is_empty());
    }

    #[test]
    fn same_path_later_in_time_is_clear() {
        let late = Mission::new(
            "OtherLate",
            vec![Waypoint::new(0.0, 0.0, 20.0), Waypoint::new(100.0, 0.0, 30.0)],
        )
        .unwrap();
        let rules = SeparationRules::default().with_safety_buffer_2d(10.0);
        assert!(check_for_conflicts(&primary_straight_2d(), &[late], &rules).is_empty());
    }

    #[test]
    fn crossing_paths_conflict_at_intersection() {
        let primary =
            Mission::from_coordinates("PX_Cross", [(0.0, 50.0), (100.0, 50.0)], 0.0, 10.0).unwrap();
        let other = Mission::new(
            "OY_Cross",
            vec![Waypoint::new(50.0, 0.0, 0.0), Waypoint::new(50.0, 100.0, 10.0)],
        )
        .unwrap();
        let rules = SeparationRules::default()
            .with_safety_buffer_2d(5.0)
            .with_time_step(0.1);

        let conflicts = check_for_conflicts(&primary, &[other], &rules);
        assert!(conflicts.iter().any(|c| {
            (c.time - 5.0).abs() < 0.1
                && (c.primary_pos.x - 50.0).abs() < 1.0
                && (c.primary_pos.y - 50.0).abs() < 1.0
        }));
        assert!(conflicts
            .iter()
            .all(|c| c.conflict_type == ConflictType::Proximity2d));
    }

    #[test]
    fn mixed_dimension_pair_uses_2d_rule() {
        let other = Mission::new(
            "Flat",
            vec![Waypoint::new(50.0, 3.0, 0.0), Waypoint::new(50.0, 3.0, 10.0)],
        )
        .unwrap();
        let conflicts =
            check_for_conflicts(&primary_straight_3d(), &[other], &SeparationRules::default());
        assert!(!conflicts.is_empty());
        assert!(conflicts.iter().all(|c| {
            c.conflict_type == ConflictType::Proximity2d
                && c.distance_3d.is_none()
                && c.other_pos.z.is_none()
                && c.primary_pos.z == Some(10.0)
        }));
    }

    #[test]
    fn vertically_separated_3d_pair_is_not_reported() {
        // Horizontally inside the 2D buffer, but 40m apart in altitude.
        let above = Mission::new(
            "Above",
            vec![
                Waypoint::new(0.0, 2.0, 0.0).with_altitude(50.0),
                Waypoint::new(100.0, 2.0, 10.0).with_altitude(50.0),
            ],
        )
        .unwrap();
        let conflicts =
            check_for_conflicts(&primary_straight_3d(), &[above], &SeparationRules::default());
        assert!(conflicts.is_empty());
    }

    #[test]
    fn records_are_ordered_by_time_then_schedule_order() {
        let make = |id: &str| {
            Mission::new(
                id,
                vec![Waypoint::new(0.0, 1.0, 0.0), Waypoint::new(100.0, 1.0, 10.0)],
            )
            .unwrap()
        };
        let others = [make("B"), make("A")];
        let rules = SeparationRules::default().with_time_step(2.5);

        let conflicts = check_for_conflicts(&primary_straight_2d(), &others, &rules);
        let order: Vec<(f64, &str)> = conflicts
            .iter()
            .map(|c| (c.time, c.conflicting_drone_id.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                (0.0, "B"),
                (0.0, "A"),
                (2.5, "B"),
                (2.5, "A"),
                (5.0, "B"),
                (5.0, "A"),
                (7.5, "B"),
                (7.5, "A"),
                (10.0, "B"),
                (10.0, "A"),
            ]
        );
    }

    #[test]
    fn zero_time_step_still_terminates() {
        let rules = SeparationRules::default().with_time_step(0.0);
        let conflicts = check_for_conflicts(&primary_straight_2d(), &[], &rules);
        assert!(conflicts.is_empty());
    }

    #[test]
    fn instantaneous_primary_is_checked_once() {
        let primary = Mission::from_coordinates("P_Instant", [(5.0, 5.0)], 3.0, 3.0).unwrap();
        let other = Mission::new(
            "Hover",
            vec![Waypoint::new(5.0, 6.0, 0.0), Waypoint::new(5.0, 6.0, 10.0)],
        )
        .unwrap();
        let conflicts = check_for_conflicts(&primary, &[other], &SeparationRules::default());
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].time, 3.0);
    }

    #[test]
    fn query_reports_status_and_conflicting_drones() {
        let checker = ConflictChecker::default();
        let head_on = Mission::new(
            "HeadOn",
            vec![Waypoint::new(100.0, 0.0, 0.0), Waypoint::new(0.0, 0.0, 10.0)],
        )
        .unwrap();
        let far = Mission::new(
            "Far",
            vec![Waypoint::new(0.0, 100.0, 0.0), Waypoint::new(100.0, 100.0, 10.0)],
        )
        .unwrap();

        let report = checker.query(&primary_straight_2d(), &[far.clone(), head_on]);
        assert_eq!(report.status, DeconflictionStatus::ConflictDetected);
        assert_eq!(report.conflicting_drones(), vec!["HeadOn"]);

        let report = checker.query(&primary_straight_2d(), &[far]);
        assert!(report.is_clear());
        assert!(report.conflicts.is_empty());
    }

    #[test]
    fn conflict_record_serializes_with_type_labels() {
        let record = ConflictRecord {
            time: 5.0,
            primary_drone_id: "P".to_string(),
            primary_pos: Coordinate::from((50.0, 0.0)),
            conflicting_drone_id: "O".to_string(),
            other_pos: Coordinate::from((50.0, 0.0, 12.0)),
            distance_2d: 0.0,
            distance_3d: None,
            conflict_type: ConflictType::InsufficientVerticalSeparation,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "Insufficient vertical separation");
        assert!(json["primary_pos"]["z"].is_null());
        assert_eq!(json["other_pos"]["z"], 12.0);
        assert!(json["distance_3d"].is_null());
        assert_eq!(
            serde_json::to_value(DeconflictionStatus::ConflictDetected).unwrap(),
            "conflict detected"
        );
    }
}
