//! Position interpolation and separation math on planar (x, y, z) coordinates.

use serde::{Deserialize, Serialize};

use crate::models::{Mission, Waypoint, TIME_EPSILON};

/// Horizontal and, when both points carry altitude, full 3D distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Separation {
    pub horizontal_m: f64,
    pub full_3d_m: Option<f64>,
}

/// Calculate the drone's position at time `t`.
///
/// Returns `None` when `t` falls outside the mission (with [`TIME_EPSILON`]
/// tolerance). Queries at or beyond the first/last waypoint are clamped to
/// that waypoint. Altitude is interpolated when both segment endpoints have
/// one, held constant when only one does, and absent otherwise.
pub fn position_at_time(mission: &Mission, t: f64) -> Option<Waypoint> {
    let waypoints = mission.waypoints();
    let first = waypoints.first()?;
    let last = waypoints.last()?;

    if t < first.timestamp - TIME_EPSILON || t > last.timestamp + TIME_EPSILON {
        return None;
    }

    if let [only] = waypoints {
        let window = mission.scan_window();
        let at_waypoint = (t - only.timestamp).abs() < TIME_EPSILON;
        let at_declared_instant =
            window.is_instant() && (t - window.start).abs() < TIME_EPSILON;
        return (at_waypoint || at_declared_instant).then(|| only.at_time(t));
    }

    if t <= first.timestamp + TIME_EPSILON {
        return Some(first.at_time(t));
    }
    if t >= last.timestamp - TIME_EPSILON {
        return Some(last.at_time(t));
    }

    let (prev, next) = waypoints.windows(2).find_map(|pair| match pair {
        [a, b] if a.timestamp - TIME_EPSILON <= t && t <= b.timestamp + TIME_EPSILON => {
            Some((a, b))
        }
        _ => None,
    })?;

    let span = next.timestamp - prev.timestamp;
    if span.abs() < TIME_EPSILON || (t - prev.timestamp).abs() < TIME_EPSILON {
        return Some(prev.at_time(t));
    }
    if (t - next.timestamp).abs() < TIME_EPSILON {
        return Some(next.at_time(t));
    }

    let fraction = (t - prev.timestamp) / span;
    let z = match (prev.z, next.z) {
        (Some(z0), Some(z1)) => Some(lerp(z0, z1, fraction)),
        // Hold the known altitude rather than descending toward an assumed ground level
        (Some(z), None) | (None, Some(z)) => Some(z),
        (None, None) => None,
    };

    Some(Waypoint {
        x: lerp(prev.x, next.x, fraction),
        y: lerp(prev.y, next.y, fraction),
        z,
        timestamp: t,
    })
}

/// Distance between two sampled positions.
///
/// The 3D component is present only if *both* points carry altitude.
pub fn calculate_distance(a: &Waypoint, b: &Waypoint) -> Separation {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let full_3d_m = vertical_separation(a, b).map(|dz| (dx * dx + dy * dy + dz * dz).sqrt());

    Separation {
        horizontal_m: dx.hypot(dy),
        full_3d_m,
    }
}

/// Absolute altitude difference, if both points carry altitude.
pub fn vertical_separation(a: &Waypoint, b: &Waypoint) -> Option<f64> {
    match (a.z, b.z) {
        (Some(za), Some(zb)) => Some((za - zb).abs()),
        _ => None,
    }
}

fn lerp(from: f64, to: f64, fraction: f64) -> f64 {
    from + fraction * (to - from)
}
