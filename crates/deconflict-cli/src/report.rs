//! Human-readable and JSON rendering of deconfliction reports.

use std::io::{self, Write};

use deconflict_core::{ConflictRecord, DeconflictionReport};

/// Write the per-sample conflict listing.
pub fn write_conflict_details<W: Write>(out: &mut W, conflicts: &[ConflictRecord]) -> io::Result<()> {
    if conflicts.is_empty() {
        return writeln!(out, "No conflicts detected.");
    }

    writeln!(out)?;
    writeln!(out, "Conflict Details:")?;
    for (i, c) in conflicts.iter().enumerate() {
        let distance_3d = c
            .distance_3d
            .map(|d| format!("{d:.2}m"))
            .unwrap_or_else(|| "N/A".to_string());

        writeln!(out, "  Conflict {}:", i + 1)?;
        writeln!(out, "    Time: {:.2}s", c.time)?;
        writeln!(out, "    Type: {}", c.conflict_type)?;
        writeln!(out, "    Primary ({}) Pos: {}", c.primary_drone_id, c.primary_pos)?;
        writeln!(out, "    Other ({}) Pos: {}", c.conflicting_drone_id, c.other_pos)?;
        writeln!(
            out,
            "    Distance (2D): {:.2}m, Distance (3D): {}",
            c.distance_2d, distance_3d
        )?;
    }
    writeln!(out, "{}", "-".repeat(30))
}

/// Write the status line followed by conflict details when not clear.
pub fn write_report<W: Write>(
    out: &mut W,
    scenario_name: &str,
    report: &DeconflictionReport,
) -> io::Result<()> {
    writeln!(
        out,
        "Deconfliction Status for '{}': {}",
        scenario_name,
        report.status.to_string().to_uppercase()
    )?;
    if report.is_clear() {
        return Ok(());
    }
    writeln!(
        out,
        "Conflicting drones: {}",
        report.conflicting_drones().join(", ")
    )?;
    write_conflict_details(out, &report.conflicts)
}

/// Serialize a report as pretty JSON.
pub fn to_json(report: &DeconflictionReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
