//! Separation thresholds and sampling resolution for conflict checks.

use serde::{Deserialize, Serialize};

/// Default horizontal safety buffer (meters).
pub const MINIMUM_DISTANCE_THRESHOLD_2D: f64 = 10.0;
/// Default full 3D safety buffer (meters).
pub const MINIMUM_DISTANCE_THRESHOLD_3D: f64 = 15.0;
/// Default minimum altitude difference when horizontally close (meters).
pub const VERTICAL_SEPARATION_THRESHOLD: f64 = 5.0;
/// Default sampling step (seconds).
pub const TIME_STEP_RESOLUTION: f64 = 0.5;

/// Configuration for a deconfliction scan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeparationRules {
    /// Minimum horizontal separation in meters
    pub safety_buffer_2d_m: f64,
    /// Minimum 3D separation in meters, used when both drones carry altitude
    pub safety_buffer_3d_m: f64,
    /// Minimum altitude difference in meters when horizontally inside the 2D buffer
    pub vertical_separation_m: f64,
    /// Sampling step in seconds
    pub time_step_s: f64,
}

impl Default for SeparationRules {
    fn default() -> Self {
        Self {
            safety_buffer_2d_m: MINIMUM_DISTANCE_THRESHOLD_2D,
            safety_buffer_3d_m: MINIMUM_DISTANCE_THRESHOLD_3D,
            vertical_separation_m: VERTICAL_SEPARATION_THRESHOLD,
            time_step_s: TIME_STEP_RESOLUTION,
        }
    }
}

impl SeparationRules {
    pub fn with_safety_buffer_2d(mut self, meters: f64) -> Self {
        self.safety_buffer_2d_m = meters;
        self
    }

    pub fn with_safety_buffer_3d(mut self, meters: f64) -> Self {
        self.safety_buffer_3d_m = meters;
        self
    }

    pub fn with_vertical_separation(mut self, meters: f64) -> Self {
        self.vertical_separation_m = meters;
        self
    }

    pub fn with_time_step(mut self, seconds: f64) -> Self {
        self.time_step_s = seconds;
        self
    }

    /// Sampling step actually used by a scan.
    ///
    /// A zero, negative or non-finite step would never advance the scan, so
    /// it is replaced by [`TIME_STEP_RESOLUTION`].
    pub fn effective_time_step(&self) -> f64 {
        if self.time_step_s.is_finite() && self.time_step_s > 0.0 {
            self.time_step_s
        } else {
            tracing::warn!(
                time_step_s = self.time_step_s,
                fallback_s = TIME_STEP_RESOLUTION,
                "Invalid time step, using default"
            );
            TIME_STEP_RESOLUTION
        }
    }
}
