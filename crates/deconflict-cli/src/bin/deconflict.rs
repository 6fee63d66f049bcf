//! Pre-flight deconfliction runner.
//!
//! Checks a primary mission against other drones' schedules and prints the
//! conflicts found. Runs every built-in scenario unless one is selected.
//!
//! Usage:
//!   cargo run -p deconflict-cli --bin deconflict -- --scenario conflict-2d
//!   cargo run -p deconflict-cli --bin deconflict -- --file mission.json --json

use anyhow::Result;
use clap::Parser;
use deconflict_cli::report::{to_json, write_report};
use deconflict_cli::sim::{builtin_scenarios, load_scenario, ScenarioKind};
use deconflict_cli::{Config, Scenario};
use deconflict_core::{ConflictChecker, SeparationRules};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Pre-flight drone trajectory deconfliction
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Built-in scenario to run (default: all)
    #[arg(long, value_enum, conflicts_with = "file")]
    scenario: Option<ScenarioKind>,

    /// JSON scenario file to run instead of the built-ins
    #[arg(long)]
    file: Option<PathBuf>,

    /// Horizontal safety buffer in meters
    #[arg(long)]
    safety_2d: Option<f64>,

    /// 3D safety buffer in meters
    #[arg(long)]
    safety_3d: Option<f64>,

    /// Minimum vertical separation in meters
    #[arg(long)]
    vertical_sep: Option<f64>,

    /// Sampling step in seconds
    #[arg(long)]
    time_step: Option<f64>,

    /// Print reports as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

impl Args {
    fn apply_overrides(&self, mut rules: SeparationRules) -> SeparationRules {
        if let Some(v) = self.safety_2d {
            rules = rules.with_safety_buffer_2d(v);
        }
        if let Some(v) = self.safety_3d {
            rules = rules.with_safety_buffer_3d(v);
        }
        if let Some(v) = self.vertical_sep {
            rules = rules.with_vertical_separation(v);
        }
        if let Some(v) = self.time_step {
            rules = rules.with_time_step(v);
        }
        rules
    }
}

fn main() -> Result<()> {
    // Logs go to stderr so JSON output stays clean
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("deconflict=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let config = Config::from_env();

    let scenarios: Vec<Scenario> = match (&args.file, args.scenario) {
        (Some(path), _) => vec![load_scenario(path)?],
        (None, Some(kind)) => vec![kind.build()?],
        (None, None) => builtin_scenarios()?,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    for scenario in &scenarios {
        // Precedence: command line > scenario file > environment
        let rules = args.apply_overrides(scenario.rules.unwrap_or(config.rules));
        let checker = ConflictChecker::new(rules);

        tracing::info!(scenario = %scenario.name, "Running scenario");
        tracing::info!("Primary mission: {}", scenario.primary);
        for other in &scenario.others {
            tracing::debug!("Other schedule: {}", other);
        }

        let report = checker.query(&scenario.primary, &scenario.others);
        if report.is_clear() {
            tracing::info!(scenario = %scenario.name, "Clear");
        } else {
            tracing::warn!(
                scenario = %scenario.name,
                "Detected {} conflict(s)",
                report.conflicts.len()
            );
        }

        if args.json {
            writeln!(out, "{}", to_json(&report)?)?;
        } else {
            write_report(&mut out, &scenario.name, &report)?;
            writeln!(out)?;
        }
    }

    Ok(())
}
