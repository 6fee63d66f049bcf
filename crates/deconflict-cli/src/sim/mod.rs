//! Scenario sources: built-in sample schedules and JSON scenario files.

pub mod file;
pub mod scenarios;

use deconflict_core::{Mission, SeparationRules};

pub use file::{load_scenario, ScenarioFile};
pub use scenarios::{
    builtin_scenarios, create_clear_2d_scenario, create_clear_3d_scenario,
    create_conflict_2d_scenario, create_conflict_3d_scenario, create_stationary_conflict_scenario,
    create_stationary_primary_scenario, ScenarioKind,
};

/// A named primary mission plus the schedules it must be checked against.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub primary: Mission,
    pub others: Vec<Mission>,
    /// Thresholds shipped with the scenario, if any
    pub rules: Option<SeparationRules>,
}
