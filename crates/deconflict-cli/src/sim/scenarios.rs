//! Pre-defined deconfliction scenarios.

use clap::ValueEnum;
use deconflict_core::{Mission, MissionError, Waypoint};

use super::Scenario;

/// Built-in scenarios selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScenarioKind {
    /// 2D primary, schedules far away or later in time
    Clear2d,
    /// 2D primary against head-on and crossing traffic
    Conflict2d,
    /// Climbing 3D primary, schedules far away or later in time
    Clear3d,
    /// Shallow-climb 3D primary against head-on and crossing traffic
    Conflict3d,
    /// Primary flies through a hovering drone
    StationaryConflict,
    /// Hovering primary with traffic passing through
    StationaryPrimary,
}

impl ScenarioKind {
    pub fn build(self) -> Result<Scenario, MissionError> {
        match self {
            ScenarioKind::Clear2d => create_clear_2d_scenario(),
            ScenarioKind::Conflict2d => create_conflict_2d_scenario(),
            ScenarioKind::Clear3d => create_clear_3d_scenario(),
            ScenarioKind::Conflict3d => create_conflict_3d_scenario(),
            ScenarioKind::StationaryConflict => create_stationary_conflict_scenario(),
            ScenarioKind::StationaryPrimary => create_stationary_primary_scenario(),
        }
    }
}

/// Every built-in scenario, in declaration order.
pub fn builtin_scenarios() -> Result<Vec<Scenario>, MissionError> {
    ScenarioKind::value_variants()
        .iter()
        .map(|kind| kind.build())
        .collect()
}

/// Schedules that stay clear of a primary crossing (0,0)-(100,100) in t=0..10.
///
/// - DroneB_Safe: parallel track 150m away
/// - DroneC_Late: crosses the area long after the primary has left
pub fn sample_schedules_no_conflict() -> Result<Vec<Mission>, MissionError> {
    Ok(vec![
        Mission::new(
            "DroneB_Safe",
            vec![
                Waypoint::new(0.0, 150.0, 0.0).with_altitude(10.0),
                Waypoint::new(100.0, 150.0, 10.0).with_altitude(10.0),
            ],
        )?,
        Mission::new(
            "DroneC_Late",
            vec![
                Waypoint::new(50.0, 0.0, 20.0).with_altitude(20.0),
                Waypoint::new(50.0, 100.0, 30.0).with_altitude(20.0),
            ],
        )?,
    ])
}

/// Schedules that cut across typical primary tracks.
///
/// - DroneX_HeadOn: 2D, flies y=50 east to west
/// - DroneY_Crossing3D: diagonal climb starting at t=2
/// - DroneZ_SamePath3D: diagonal, one second behind and higher
pub fn sample_schedules_with_conflict() -> Result<Vec<Mission>, MissionError> {
    Ok(vec![
        Mission::new(
            "DroneX_HeadOn",
            vec![Waypoint::new(100.0, 50.0, 0.0), Waypoint::new(0.0, 50.0, 10.0)],
        )?,
        Mission::new(
            "DroneY_Crossing3D",
            vec![
                Waypoint::new(0.0, 0.0, 2.0).with_altitude(10.0),
                Waypoint::new(100.0, 100.0, 12.0).with_altitude(12.0),
            ],
        )?,
        Mission::new(
            "DroneZ_SamePath3D",
            vec![
                Waypoint::new(0.0, 0.0, 1.0).with_altitude(15.0),
                Waypoint::new(100.0, 100.0, 11.0).with_altitude(25.0),
            ],
        )?,
    ])
}

/// A drone hovering at (50, 50, 10) for t=0..10.
pub fn stationary_conflict_schedule() -> Result<Vec<Mission>, MissionError> {
    Ok(vec![Mission::new(
        "DroneS_Stationary",
        vec![
            Waypoint::new(50.0, 50.0, 0.0).with_altitude(10.0),
            Waypoint::new(50.0, 50.0, 10.0).with_altitude(10.0),
        ],
    )?])
}

pub fn create_clear_2d_scenario() -> Result<Scenario, MissionError> {
    Ok(Scenario {
        name: "2D Clear Flight".to_string(),
        primary: Mission::from_coordinates(
            "Primary2D_Clear",
            [(0.0, 0.0), (100.0, 100.0)],
            0.0,
            10.0,
        )?,
        others: sample_schedules_no_conflict()?,
        rules: None,
    })
}

pub fn create_conflict_2d_scenario() -> Result<Scenario, MissionError> {
    Ok(Scenario {
        name: "2D Conflict Flight".to_string(),
        primary: Mission::from_coordinates(
            "Primary2D_Conflict",
            [(0.0, 50.0), (100.0, 50.0)],
            0.0,
            10.0,
        )?,
        others: sample_schedules_with_conflict()?,
        rules: None,
    })
}

pub fn create_clear_3d_scenario() -> Result<Scenario, MissionError> {
    Ok(Scenario {
        name: "3D Clear Flight".to_string(),
        primary: Mission::from_coordinates(
            "Primary3D_Clear",
            [(0.0, 0.0, 10.0), (100.0, 100.0, 25.0)],
            0.0,
            10.0,
        )?,
        others: sample_schedules_no_conflict()?,
        rules: None,
    })
}

pub fn create_conflict_3d_scenario() -> Result<Scenario, MissionError> {
    Ok(Scenario {
        name: "3D Conflict Flight".to_string(),
        primary: Mission::from_coordinates(
            "Primary3D_Conflict",
            [(0.0, 0.0, 10.0), (100.0, 100.0, 15.0)],
            0.0,
            10.0,
        )?,
        others: sample_schedules_with_conflict()?,
        rules: None,
    })
}

pub fn create_stationary_conflict_scenario() -> Result<Scenario, MissionError> {
    Ok(Scenario {
        name: "Stationary Conflict".to_string(),
        primary: Mission::from_coordinates(
            "Primary_Vs_Stationary",
            [(0.0, 50.0, 10.0), (100.0, 50.0, 10.0)],
            0.0,
            10.0,
        )?,
        others: stationary_conflict_schedule()?,
        rules: None,
    })
}

pub fn create_stationary_primary_scenario() -> Result<Scenario, MissionError> {
    Ok(Scenario {
        name: "Single Point Primary (Stationary)".to_string(),
        primary: Mission::from_coordinates("Primary_Stationary", [(50.0, 50.0, 10.0)], 0.0, 10.0)?,
        others: sample_schedules_with_conflict()?,
        rules: None,
    })
}
