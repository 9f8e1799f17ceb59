//! Angle math shared by the arc state machine and hit-testing.
//!
//! All angles are radians in screen space (`atan2(dy, dx)` with y pointing
//! down), so positive rotation reads clockwise on screen.

#[cfg(test)]
#[path = "angle_test.rs"]
mod angle_test;

use std::f64::consts::{PI, TAU};

use crate::consts::FULL_CIRCLE_EPS;

/// Map any angle into `(-π, π]`.
///
/// `-π` folds to `+π` so every direction has one representative. Non-finite
/// input maps to `0.0`.
#[must_use]
pub fn normalize_angle(theta: f64) -> f64 {
    if !theta.is_finite() {
        return 0.0;
    }
    // rem_euclid can round up to exactly TAU for tiny negative input; the
    // subtraction below folds that back to 0.
    let wrapped = theta.rem_euclid(TAU);
    if wrapped > PI { wrapped - TAU } else { wrapped }
}

/// Shortest signed rotation taking `from` to `to`, in `(-π, π]`.
///
/// Summing these deltas is the only seam-safe way to accumulate a sweep;
/// plain `to - from` jumps by 2π when the pointer crosses the `-π/π` seam.
#[must_use]
pub fn shortest_signed_delta(from: f64, to: f64) -> f64 {
    normalize_angle(to - from)
}

/// Whether a signed net rotation amounts to a complete turn, within
/// [`FULL_CIRCLE_EPS`] of 2π.
#[must_use]
pub fn covers_full_turn(net_angle: f64) -> bool {
    net_angle.abs() >= TAU - FULL_CIRCLE_EPS
}
