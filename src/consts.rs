//! Shared numeric constants for the compass crate.

// ── Angles ──────────────────────────────────────────────────────

/// Full-circle epsilon in radians (~2.9°).
///
/// Used both for "net rotation is close enough to 2π" and "the pointer is
/// close enough back to the start angle".
pub const FULL_CIRCLE_EPS: f64 = 0.05;

/// Swept path length (radians) below which a drawing is considered degenerate:
/// it is not rendered as an arc and a release does not commit it.
pub const MIN_SWEEP_ANGLE: f64 = 0.01;

// ── Radius ──────────────────────────────────────────────────────

/// Smallest radius accepted by `CompassArc::set_radius_at_angle`.
pub const ARC_MIN_RADIUS: f64 = 0.001;

/// Lower clamp bound for the preferred radius.
pub const PREFERRED_RADIUS_MIN: f64 = 1.0;

/// Upper clamp bound for the preferred radius.
pub const PREFERRED_RADIUS_MAX: f64 = 10_000.0;

/// Preferred radius when nothing has been stored yet.
pub const DEFAULT_PREFERRED_RADIUS: f64 = 100.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space pick slop in pixels for lines and arcs.
pub const HIT_TOLERANCE_PX: f64 = 8.0;

// ── Rendering ───────────────────────────────────────────────────

/// Stroke color for committed shapes.
pub const SHAPE_STROKE: &str = "#1F1A17";

/// Stroke color for the selected shape.
pub const SELECTED_STROKE: &str = "#5B9BD5";

/// Stroke color for construction guides (center, radius arm, preview).
pub const GUIDE_STROKE: &str = "#888888";

/// Stroke weight for shapes.
pub const SHAPE_STROKE_WEIGHT: f64 = 2.0;

/// Stroke weight for guides.
pub const GUIDE_STROKE_WEIGHT: f64 = 1.0;

/// Stroke weight of the center marker point.
pub const CENTER_MARKER_WEIGHT: f64 = 6.0;
