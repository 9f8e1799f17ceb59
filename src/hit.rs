//! Hit-testing: distances and closest points on lines and compass arcs.
//!
//! Everything here is a pure function of its inputs. The swept-range test
//! [`angle_in_swept_range`] is the single place that decides whether a
//! direction lies on a partial arc; both the distance and the closest-point
//! queries go through it so selection and drawing agree on what the arc covers.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::angle::{covers_full_turn, shortest_signed_delta};
use crate::arc::{ArcState, CompassArc};
use crate::point::Point;

/// Anything that can answer "how far is this point from me".
pub trait Hittable {
    /// Distance from `p` to the shape, or `None` if the shape has no geometry yet.
    fn distance_to(&self, p: Point) -> Option<f64>;

    /// The point on the shape nearest to `p`, or `None` if the shape has no geometry yet.
    fn closest_point(&self, p: Point) -> Option<Point>;
}

/// A straight segment between two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub first: Point,
    pub second: Point,
}

impl LineSegment {
    #[must_use]
    pub fn new(first: Point, second: Point) -> Self {
        Self { first, second }
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.first.distance_to(self.second)
    }
}

impl Hittable for LineSegment {
    fn distance_to(&self, p: Point) -> Option<f64> {
        Some(distance_to_segment(p, self.first, self.second))
    }

    fn closest_point(&self, p: Point) -> Option<Point> {
        Some(closest_point_on_segment(p, self.first, self.second))
    }
}

impl Hittable for CompassArc {
    fn distance_to(&self, p: Point) -> Option<f64> {
        distance_to_arc(p, self)
    }

    fn closest_point(&self, p: Point) -> Option<Point> {
        closest_point_on_arc(p, self)
    }
}

/// A drawable shape in the host's element list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Element {
    Line(LineSegment),
    Arc(CompassArc),
}

impl Hittable for Element {
    fn distance_to(&self, p: Point) -> Option<f64> {
        match self {
            Self::Line(line) => line.distance_to(p),
            Self::Arc(arc) => arc.distance_to(p),
        }
    }

    fn closest_point(&self, p: Point) -> Option<Point> {
        match self {
            Self::Line(line) => line.closest_point(p),
            Self::Arc(arc) => arc.closest_point(p),
        }
    }
}

/// Result of a closest-element scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestElement {
    /// Position of the element in the scanned slice.
    pub index: usize,
    /// Distance from the query point to that element.
    pub distance: f64,
}

// =============================================================
// Segments
// =============================================================

fn segment_parameter(p: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq <= 0.0 {
        return 0.0;
    }
    (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0)
}

/// The point on segment `a–b` nearest to `p`. A degenerate segment yields `a`.
#[must_use]
pub fn closest_point_on_segment(p: Point, a: Point, b: Point) -> Point {
    let t = segment_parameter(p, a, b);
    Point::new(a.x + t * (b.x - a.x), a.y + t * (b.y - a.y))
}

/// Distance from `p` to segment `a–b`.
///
/// The projection onto the line is clamped to the segment, so points beyond
/// either end measure to that endpoint rather than to the infinite line.
#[must_use]
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    p.distance_to(closest_point_on_segment(p, a, b))
}

// =============================================================
// Arcs
// =============================================================

/// Whether direction `angle` lies on the arc swept `net_angle` radians from `start_angle`.
///
/// Direction aware: a positive sweep covers `[start, start + net]`, a negative
/// one `[start + net, start]`. A sweep within ε of a full turn covers every angle.
#[must_use]
pub fn angle_in_swept_range(angle: f64, start_angle: f64, net_angle: f64) -> bool {
    if covers_full_turn(net_angle) {
        return true;
    }
    let delta = shortest_signed_delta(start_angle, angle);
    if net_angle >= 0.0 {
        let forward = if delta < 0.0 { delta + TAU } else { delta };
        forward <= net_angle
    } else {
        let backward = if delta > 0.0 { delta - TAU } else { delta };
        backward >= net_angle
    }
}

/// Circle parameters of an arc that has a radius.
struct ArcGeometry {
    center: Point,
    radius: f64,
    start_angle: f64,
    net_angle: f64,
    /// The whole circle counts: radius-only arcs and closed sweeps.
    whole: bool,
}

impl ArcGeometry {
    fn of(arc: &CompassArc) -> Option<Self> {
        let center = arc.center_point()?;
        let start_angle = arc.start_angle()?;
        let whole = arc.state() == ArcState::RadiusSet || arc.is_full_circle();
        Some(Self { center, radius: arc.radius(), start_angle, net_angle: arc.net_angle(), whole })
    }

    fn covers(&self, p: Point) -> bool {
        self.whole || angle_in_swept_range(self.center.angle_to(p), self.start_angle, self.net_angle)
    }

    fn endpoints(&self) -> (Point, Point) {
        (
            self.center.polar_offset(self.start_angle, self.radius),
            self.center.polar_offset(self.start_angle + self.net_angle, self.radius),
        )
    }

    fn nearer_endpoint(&self, p: Point) -> Point {
        let (start, end) = self.endpoints();
        if p.distance_to(end) < p.distance_to(start) { end } else { start }
    }
}

/// Distance from `p` to the arc, or `None` when the arc has no radius yet.
///
/// Radius-only arcs and closed circles measure to the whole circle. Otherwise
/// points whose direction lies inside the swept range measure radially, and
/// the rest measure to the nearer arc endpoint.
#[must_use]
pub fn distance_to_arc(p: Point, arc: &CompassArc) -> Option<f64> {
    let geo = ArcGeometry::of(arc)?;
    if geo.covers(p) {
        return Some((geo.center.distance_to(p) - geo.radius).abs());
    }
    let (start, end) = geo.endpoints();
    Some(p.distance_to(start).min(p.distance_to(end)))
}

/// The point on the arc nearest to `p`, or `None` when the arc has no radius yet.
///
/// Mirrors [`distance_to_arc`]: radial projection inside the swept range,
/// nearer endpoint outside it. A query at the center projects to the start point.
#[must_use]
pub fn closest_point_on_arc(p: Point, arc: &CompassArc) -> Option<Point> {
    let geo = ArcGeometry::of(arc)?;
    if !geo.covers(p) {
        return Some(geo.nearer_endpoint(p));
    }
    if p == geo.center {
        return Some(geo.endpoints().0);
    }
    Some(geo.center.polar_offset(geo.center.angle_to(p), geo.radius))
}

// =============================================================
// Element scan
// =============================================================

/// Linear scan for the element nearest to `p`.
///
/// Ties keep the earliest element. Elements without geometry are skipped.
#[must_use]
pub fn find_closest_element<T: Hittable>(p: Point, elements: &[T]) -> Option<ClosestElement> {
    let mut best: Option<ClosestElement> = None;
    for (index, element) in elements.iter().enumerate() {
        let Some(distance) = element.distance_to(p) else {
            continue;
        };
        if distance.is_nan() {
            continue;
        }
        if best.is_none_or(|b| distance < b.distance) {
            best = Some(ClosestElement { index, distance });
        }
    }
    best
}

/// Like [`find_closest_element`] but only reports a hit within `tolerance`.
#[must_use]
pub fn pick_element<T: Hittable>(p: Point, elements: &[T], tolerance: f64) -> Option<ClosestElement> {
    find_closest_element(p, elements).filter(|hit| hit.distance <= tolerance)
}
