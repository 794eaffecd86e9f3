use glam::DVec2;

use crate::perception::ObstacleSense;

/// Obstacles whose edge is closer than this push back.
pub const AVOIDANCE_THRESHOLD: f64 = 50.0;
pub const AVOIDANCE_STRENGTH: f64 = 1.5;

/// Push away from the nearest obstacle, growing linearly from zero at the
/// threshold to `AVOIDANCE_STRENGTH` at contact.
#[must_use]
pub fn avoidance(obstacle: &ObstacleSense) -> DVec2 {
    if obstacle.distance >= AVOIDANCE_THRESHOLD {
        return DVec2::ZERO;
    }
    let falloff = 1.0 - obstacle.distance / AVOIDANCE_THRESHOLD;
    -obstacle.direction * AVOIDANCE_STRENGTH * falloff
}

/// Adds avoidance to `goal` and renormalises.
///
/// Returns `None` when the two cancel exactly, leaving the caller to pick a
/// fallback heading.
#[must_use]
pub fn steer(goal: DVec2, obstacle: &ObstacleSense) -> Option<DVec2> {
    (goal + avoidance(obstacle)).try_normalize()
}
