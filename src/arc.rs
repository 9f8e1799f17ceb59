//! Compass arc state machine.
//!
//! A [`CompassArc`] walks through four phases: nothing planted (`Idle`), a
//! center (`CenterSet`), a center plus a radius point (`RadiusSet`), and a live
//! sweep (`Drawing`). Each [`Phase`] variant carries exactly the fields that
//! are valid in that phase, so a radius without a center or a sweep without a
//! radius cannot be represented.
//!
//! While drawing, every pointer update adds the shortest signed delta from the
//! previous pointer angle to two accumulators: `net_angle` (signed, direction
//! aware, unbounded) and `accumulated_abs` (path length, never decreasing).
//! A sweep counts as a full circle only when the net rotation reaches 2π and
//! the pointer is back near the start angle; path length alone is fooled by
//! back-and-forth motion.

#[cfg(test)]
#[path = "arc_test.rs"]
mod arc_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::angle::{self, shortest_signed_delta};
use crate::consts::{ARC_MIN_RADIUS, FULL_CIRCLE_EPS};
use crate::point::Point;
use crate::snapshot::ArcSnapshot;

/// Error returned by [`CompassArc`] transitions and snapshot decoding.
#[derive(Debug, thiserror::Error)]
pub enum ArcError {
    /// The operation is not allowed from the current state.
    #[error("cannot {operation} while arc is {state}")]
    InvalidTransition { operation: &'static str, state: ArcState },
    /// `set_radius_at_angle` was given a radius at or below the minimum.
    #[error("radius {radius} must be greater than {min}")]
    RadiusTooSmall { radius: f64, min: f64 },
    /// A snapshot names a state whose required points are missing.
    #[error("invalid arc snapshot: {0}")]
    InvalidSnapshot(String),
    /// The snapshot JSON could not be parsed.
    #[error("malformed arc JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Lifecycle state of a compass arc, in order of progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArcState {
    /// Nothing planted yet.
    Idle,
    /// Center planted; waiting for a radius.
    CenterSet,
    /// Center and radius fixed; waiting for the sweep to start.
    RadiusSet,
    /// Sweep in progress.
    Drawing,
}

impl fmt::Display for ArcState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "IDLE",
            Self::CenterSet => "CENTER_SET",
            Self::RadiusSet => "RADIUS_SET",
            Self::Drawing => "DRAWING",
        };
        f.write_str(name)
    }
}

/// Angle bookkeeping for a live sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sweep {
    pub center: Point,
    /// Fixes both the radius and the start angle.
    pub radius_point: Point,
    /// Live sweep endpoint.
    pub current_point: Point,
    /// Pointer angle seen on the previous update.
    pub last_angle: f64,
    /// Signed cumulative rotation in the `atan2` sense of the screen axes.
    pub net_angle: f64,
    /// Sum of absolute angular steps.
    pub accumulated_abs: f64,
}

impl Sweep {
    /// A fresh sweep sitting on the radius point with zeroed accumulators.
    #[must_use]
    pub fn start(center: Point, radius_point: Point) -> Self {
        Self {
            center,
            radius_point,
            current_point: radius_point,
            last_angle: center.angle_to(radius_point),
            net_angle: 0.0,
            accumulated_abs: 0.0,
        }
    }
}

/// Per-state data of a [`CompassArc`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Phase {
    #[default]
    Idle,
    CenterSet {
        center: Point,
    },
    RadiusSet {
        center: Point,
        radius_point: Point,
    },
    Drawing(Sweep),
}

/// One compass operation: center, radius and sweep.
///
/// Mutated only through its transition methods. A failed transition leaves
/// the arc untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(into = "ArcSnapshot", try_from = "ArcSnapshot")]
pub struct CompassArc {
    phase: Phase,
    preview: Option<Point>,
}

impl CompassArc {
    /// Create an empty arc in the `Idle` state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble an arc from its parts. Used when restoring a snapshot.
    #[must_use]
    pub fn from_parts(phase: Phase, preview: Option<Point>) -> Self {
        Self { phase, preview }
    }

    // --- Transitions ---

    /// Plant the center. Allowed from any state; drops any radius and sweep.
    pub fn set_center(&mut self, center: Point) {
        self.phase = Phase::CenterSet { center };
    }

    /// Fix the radius through `point`. Requires `CenterSet`.
    ///
    /// # Errors
    ///
    /// Returns [`ArcError::InvalidTransition`] outside `CenterSet`.
    pub fn set_radius(&mut self, point: Point) -> Result<(), ArcError> {
        let center = self.require_center_set("set radius")?;
        self.phase = Phase::RadiusSet { center, radius_point: point };
        Ok(())
    }

    /// Fix the radius at `radius` along angle 0 from the center. Requires `CenterSet`.
    ///
    /// # Errors
    ///
    /// Same as [`CompassArc::set_radius_at_angle`].
    pub fn set_radius_distance(&mut self, radius: f64) -> Result<(), ArcError> {
        self.set_radius_at_angle(0.0, radius, false)
    }

    /// Place the radius point at `center + radius·(cos θ, sin θ)`.
    ///
    /// Enters `Drawing` directly when `start_immediately`, otherwise `RadiusSet`.
    ///
    /// # Errors
    ///
    /// Returns [`ArcError::RadiusTooSmall`] when `radius <= ARC_MIN_RADIUS` (or
    /// NaN), checked before the state, and [`ArcError::InvalidTransition`]
    /// outside `CenterSet`.
    pub fn set_radius_at_angle(&mut self, theta: f64, radius: f64, start_immediately: bool) -> Result<(), ArcError> {
        if radius.is_nan() || radius <= ARC_MIN_RADIUS {
            return Err(ArcError::RadiusTooSmall { radius, min: ARC_MIN_RADIUS });
        }
        let center = self.require_center_set("set radius")?;
        let radius_point = center.polar_offset(theta, radius);
        self.phase = if start_immediately {
            Phase::Drawing(Sweep::start(center, radius_point))
        } else {
            Phase::RadiusSet { center, radius_point }
        };
        Ok(())
    }

    /// Fix the radius through `point` and start the sweep in one step.
    ///
    /// A click on the center itself yields a zero radius; that is legal but the
    /// start angle is then meaningless.
    ///
    /// # Errors
    ///
    /// Returns [`ArcError::InvalidTransition`] outside `CenterSet`.
    pub fn set_radius_and_start_drawing(&mut self, point: Point) -> Result<(), ArcError> {
        let center = self.require_center_set("set radius")?;
        let radius = center.distance_to(point);
        let radius_point = if radius <= 0.0 {
            center
        } else {
            center.polar_offset(center.angle_to(point), radius)
        };
        self.phase = Phase::Drawing(Sweep::start(center, radius_point));
        Ok(())
    }

    /// Start sweeping from the radius point. Requires `RadiusSet`.
    ///
    /// # Errors
    ///
    /// Returns [`ArcError::InvalidTransition`] outside `RadiusSet`.
    pub fn start_drawing(&mut self) -> Result<(), ArcError> {
        let Phase::RadiusSet { center, radius_point } = self.phase else {
            return Err(self.invalid("start drawing"));
        };
        self.phase = Phase::Drawing(Sweep::start(center, radius_point));
        Ok(())
    }

    /// Move the sweep endpoint to `point`, accumulating the angle swept since the last update.
    ///
    /// # Errors
    ///
    /// Returns [`ArcError::InvalidTransition`] outside `Drawing`.
    pub fn update_drawing(&mut self, point: Point) -> Result<(), ArcError> {
        let state = self.state();
        let Phase::Drawing(sweep) = &mut self.phase else {
            return Err(ArcError::InvalidTransition { operation: "update drawing", state });
        };
        let current_angle = sweep.center.angle_to(point);
        let delta = shortest_signed_delta(sweep.last_angle, current_angle);
        sweep.net_angle += delta;
        sweep.accumulated_abs += delta.abs();
        sweep.last_angle = current_angle;
        sweep.current_point = point;
        Ok(())
    }

    /// Return every field to its `Idle` default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Record the pointer position for the preview line drawn while `CenterSet`.
    pub fn set_preview(&mut self, point: Point) {
        self.preview = Some(point);
    }

    pub fn clear_preview(&mut self) {
        self.preview = None;
    }

    // --- Queries ---

    #[must_use]
    pub fn state(&self) -> ArcState {
        match self.phase {
            Phase::Idle => ArcState::Idle,
            Phase::CenterSet { .. } => ArcState::CenterSet,
            Phase::RadiusSet { .. } => ArcState::RadiusSet,
            Phase::Drawing(_) => ArcState::Drawing,
        }
    }

    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// The live sweep, if drawing.
    #[must_use]
    pub fn sweep(&self) -> Option<&Sweep> {
        match &self.phase {
            Phase::Drawing(sweep) => Some(sweep),
            _ => None,
        }
    }

    #[must_use]
    pub fn center_point(&self) -> Option<Point> {
        match self.phase {
            Phase::Idle => None,
            Phase::CenterSet { center } | Phase::RadiusSet { center, .. } => Some(center),
            Phase::Drawing(sweep) => Some(sweep.center),
        }
    }

    #[must_use]
    pub fn radius_point(&self) -> Option<Point> {
        match self.phase {
            Phase::Idle | Phase::CenterSet { .. } => None,
            Phase::RadiusSet { radius_point, .. } => Some(radius_point),
            Phase::Drawing(sweep) => Some(sweep.radius_point),
        }
    }

    #[must_use]
    pub fn current_point(&self) -> Option<Point> {
        self.sweep().map(|s| s.current_point)
    }

    #[must_use]
    pub fn preview_point(&self) -> Option<Point> {
        self.preview
    }

    /// Pointer angle from the previous update; `None` unless drawing.
    #[must_use]
    pub fn last_angle(&self) -> Option<f64> {
        self.sweep().map(|s| s.last_angle)
    }

    /// Signed cumulative rotation; `0.0` unless drawing.
    #[must_use]
    pub fn net_angle(&self) -> f64 {
        self.sweep().map_or(0.0, |s| s.net_angle)
    }

    /// Total angular distance traveled (absolute path length); `0.0` unless drawing.
    #[must_use]
    pub fn total_angle(&self) -> f64 {
        self.sweep().map_or(0.0, |s| s.accumulated_abs)
    }

    /// Distance from center to radius point; `0.0` when either is unset.
    #[must_use]
    pub fn radius(&self) -> f64 {
        match (self.center_point(), self.radius_point()) {
            (Some(center), Some(radius_point)) => center.distance_to(radius_point),
            _ => 0.0,
        }
    }

    /// Angle of center → radius point.
    #[must_use]
    pub fn start_angle(&self) -> Option<f64> {
        Some(self.center_point()?.angle_to(self.radius_point()?))
    }

    /// Angle of center → current point.
    #[must_use]
    pub fn end_angle(&self) -> Option<f64> {
        let sweep = self.sweep()?;
        Some(sweep.center.angle_to(sweep.current_point))
    }

    /// Point on the circle at the start angle (the radius point).
    #[must_use]
    pub fn start_point(&self) -> Option<Point> {
        self.radius_point()
    }

    /// Point on the circle at `start_angle + net_angle`. Unlike
    /// [`CompassArc::current_point`] this sits exactly on the circle.
    #[must_use]
    pub fn end_point(&self) -> Option<Point> {
        let sweep = self.sweep()?;
        let start = sweep.center.angle_to(sweep.radius_point);
        Some(sweep.center.polar_offset(start + sweep.net_angle, self.radius()))
    }

    /// Whether the sweep has closed into a full circle.
    ///
    /// Requires both a net rotation of at least `2π - ε` and the pointer back
    /// within `ε` of the start angle. Always `false` outside `Drawing`.
    #[must_use]
    pub fn is_full_circle(&self) -> bool {
        let Some(sweep) = self.sweep() else {
            return false;
        };
        let start = sweep.center.angle_to(sweep.radius_point);
        let current = sweep.center.angle_to(sweep.current_point);
        angle::covers_full_turn(sweep.net_angle) && shortest_signed_delta(start, current).abs() <= FULL_CIRCLE_EPS
    }

    /// A frozen copy for handing off to a shape list. The preview is dropped.
    #[must_use]
    pub fn completed(&self) -> Self {
        Self { phase: self.phase, preview: None }
    }

    // --- Helpers ---

    fn require_center_set(&self, operation: &'static str) -> Result<Point, ArcError> {
        match self.phase {
            Phase::CenterSet { center } => Ok(center),
            _ => Err(self.invalid(operation)),
        }
    }

    fn invalid(&self, operation: &'static str) -> ArcError {
        ArcError::InvalidTransition { operation, state: self.state() }
    }
}
