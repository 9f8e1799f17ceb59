//! Rendering: issues drawing calls for arcs and lines against a [`RenderSink`].
//!
//! This module never touches a graphics API. The host implements
//! [`RenderSink`] over whatever it draws with (a 2D canvas context, an SVG
//! writer, a test recorder) and passes it in. Drawing reads state only.
//!
//! Every call that emits a primitive is wrapped in exactly one `push`/`pop`
//! pair, and an arc without a center emits nothing at all.

#[cfg(test)]
#[path = "render_test.rs"]
pub(crate) mod render_test;

use crate::arc::{CompassArc, Phase};
use crate::consts::{
    CENTER_MARKER_WEIGHT, GUIDE_STROKE, GUIDE_STROKE_WEIGHT, MIN_SWEEP_ANGLE, SELECTED_STROKE, SHAPE_STROKE,
    SHAPE_STROKE_WEIGHT,
};
use crate::hit::{Element, LineSegment};
use crate::point::Point;

/// Drawing capability supplied by the host.
///
/// Angles are radians in screen space; `arc` draws from `start` to `stop` in
/// increasing angle. `circle` and `arc` take diameters, not radii.
pub trait RenderSink {
    /// Save the current drawing style.
    fn push(&mut self);
    /// Restore the style saved by the matching `push`.
    fn pop(&mut self);
    fn stroke(&mut self, color: &str);
    fn stroke_weight(&mut self, weight: f64);
    fn no_fill(&mut self);
    fn point(&mut self, x: f64, y: f64);
    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64);
    fn circle(&mut self, x: f64, y: f64, diameter: f64);
    fn arc(&mut self, x: f64, y: f64, width: f64, height: f64, start: f64, stop: f64);
}

/// The curve an arc currently traces.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Curve {
    Circle { center: Point, diameter: f64 },
    Arc { center: Point, diameter: f64, start: f64, stop: f64 },
}

impl Curve {
    fn of(arc: &CompassArc) -> Option<Self> {
        let center = arc.center_point()?;
        let diameter = arc.radius() * 2.0;
        match arc.phase() {
            Phase::Idle | Phase::CenterSet { .. } => None,
            Phase::RadiusSet { .. } => Some(Self::Circle { center, diameter }),
            Phase::Drawing(sweep) => {
                if arc.is_full_circle() {
                    return Some(Self::Circle { center, diameter });
                }
                if sweep.accumulated_abs < MIN_SWEEP_ANGLE {
                    return None;
                }
                let start = center.angle_to(sweep.radius_point);
                let end = start + sweep.net_angle;
                let (start, stop) = if sweep.net_angle >= 0.0 { (start, end) } else { (end, start) };
                Some(Self::Arc { center, diameter, start, stop })
            }
        }
    }

    fn draw(self, sink: &mut impl RenderSink) {
        match self {
            Self::Circle { center, diameter } => sink.circle(center.x, center.y, diameter),
            Self::Arc { center, diameter, start, stop } => {
                sink.arc(center.x, center.y, diameter, diameter, start, stop);
            }
        }
    }
}

impl CompassArc {
    /// Draw the arc under construction: center marker, construction guides
    /// (preview line, radius arm) and the swept curve.
    pub fn draw(&self, sink: &mut impl RenderSink) {
        let Some(center) = self.center_point() else {
            return;
        };

        sink.push();
        sink.no_fill();

        sink.stroke(GUIDE_STROKE);
        sink.stroke_weight(CENTER_MARKER_WEIGHT);
        sink.point(center.x, center.y);

        sink.stroke_weight(GUIDE_STROKE_WEIGHT);
        match self.phase() {
            Phase::Idle => {}
            Phase::CenterSet { .. } => {
                if let Some(preview) = self.preview_point() {
                    sink.line(center.x, center.y, preview.x, preview.y);
                }
            }
            Phase::RadiusSet { radius_point, .. } => {
                sink.line(center.x, center.y, radius_point.x, radius_point.y);
            }
            Phase::Drawing(sweep) => {
                sink.line(center.x, center.y, sweep.current_point.x, sweep.current_point.y);
            }
        }

        if let Some(curve) = Curve::of(self) {
            sink.stroke(SHAPE_STROKE);
            sink.stroke_weight(SHAPE_STROKE_WEIGHT);
            curve.draw(sink);
        }

        sink.pop();
    }

    /// Draw only the traced curve, as a finished shape.
    pub fn draw_completed(&self, sink: &mut impl RenderSink, color: &str) {
        let Some(curve) = Curve::of(self) else {
            return;
        };
        sink.push();
        sink.no_fill();
        sink.stroke(color);
        sink.stroke_weight(SHAPE_STROKE_WEIGHT);
        curve.draw(sink);
        sink.pop();
    }
}

impl LineSegment {
    pub fn draw(&self, sink: &mut impl RenderSink, color: &str) {
        sink.push();
        sink.stroke(color);
        sink.stroke_weight(SHAPE_STROKE_WEIGHT);
        sink.line(self.first.x, self.first.y, self.second.x, self.second.y);
        sink.pop();
    }
}

impl Element {
    /// Draw a committed element, highlighted when `selected`.
    pub fn draw(&self, sink: &mut impl RenderSink, selected: bool) {
        let color = if selected { SELECTED_STROKE } else { SHAPE_STROKE };
        match self {
            Self::Line(line) => line.draw(sink, color),
            Self::Arc(arc) => arc.draw_completed(sink, color),
        }
    }
}
