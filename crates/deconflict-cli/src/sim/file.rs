//! JSON scenario files.
//!
//! ```json
//! {
//!   "name": "Depot crossing",
//!   "primary": {
//!     "drone_id": "Alpha",
//!     "coords": [[0, 0, 10], [100, 100, 15]],
//!     "start_time": 0,
//!     "end_time": 10
//!   },
//!   "others": [
//!     { "drone_id": "Bravo", "waypoints": [
//!         { "x": 100, "y": 0, "timestamp": 0 },
//!         { "x": 0, "y": 100, "z": 12, "timestamp": 10 }
//!     ] }
//!   ],
//!   "rules": { "safety_buffer_2d_m": 8.0 }
//! }
//! ```

use anyhow::{Context, Result};
use deconflict_core::{Coordinate, Mission, MissionError, SeparationRules, Waypoint};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::Scenario;

fn default_primary_id() -> String {
    "PrimaryDrone".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioFile {
    #[serde(default)]
    pub name: Option<String>,
    pub primary: PrimaryEntry,
    #[serde(default)]
    pub others: Vec<ScheduleEntry>,
    #[serde(default)]
    pub rules: Option<SeparationRules>,
}

/// Primary mission given as coordinates plus an overall time window.
#[derive(Debug, Clone, Deserialize)]
pub struct PrimaryEntry {
    #[serde(default = "default_primary_id")]
    pub drone_id: String,
    pub coords: Vec<Coordinate>,
    pub start_time: f64,
    pub end_time: f64,
}

/// Another drone's schedule given as timestamped waypoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleEntry {
    pub drone_id: String,
    pub waypoints: Vec<Waypoint>,
}

impl ScenarioFile {
    pub fn into_scenario(self, fallback_name: &str) -> Result<Scenario, MissionError> {
        let primary = Mission::from_coordinates(
            self.primary.drone_id,
            self.primary.coords,
            self.primary.start_time,
            self.primary.end_time,
        )?;
        let others = self
            .others
            .into_iter()
            .map(|entry| Mission::new(entry.drone_id, entry.waypoints))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Scenario {
            name: self.name.unwrap_or_else(|| fallback_name.to_string()),
            primary,
            others,
            rules: self.rules,
        })
    }
}

/// Read and validate a scenario file.
pub fn load_scenario(path: &Path) -> Result<Scenario> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read scenario file {}", path.display()))?;
    let file: ScenarioFile = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse scenario file {}", path.display()))?;

    let fallback_name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "scenario".to_string());
    let scenario = file
        .into_scenario(&fallback_name)
        .with_context(|| format!("invalid mission in {}", path.display()))?;

    tracing::info!(
        scenario = %scenario.name,
        others = scenario.others.len(),
        "Loaded scenario file"
    );
    Ok(scenario)
}
