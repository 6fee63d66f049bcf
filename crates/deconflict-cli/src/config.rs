//! Runner configuration from environment.

use std::env;

use deconflict_core::SeparationRules;

#[derive(Debug, Clone)]
pub struct Config {
    pub rules: SeparationRules,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset or unparsable values keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str, default: f64| {
            lookup(key)
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(default)
        };
        let defaults = SeparationRules::default();

        Self {
            rules: SeparationRules {
                safety_buffer_2d_m: read("DECONFLICT_SAFETY_2D", defaults.safety_buffer_2d_m),
                safety_buffer_3d_m: read("DECONFLICT_SAFETY_3D", defaults.safety_buffer_3d_m),
                vertical_separation_m: read(
                    "DECONFLICT_VERTICAL_SEP",
                    defaults.vertical_separation_m,
                ),
                time_step_s: read("DECONFLICT_TIME_STEP", defaults.time_step_s),
            },
        }
    }
}
