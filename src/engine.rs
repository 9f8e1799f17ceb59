//! Engine: the host-side application state around a live [`CompassArc`].
//!
//! `EngineCore` owns the arc under construction, the list of committed
//! elements, the selection and the preferred radius. The host forwards pointer
//! and key events, applies the returned [`Action`]s, and calls
//! [`EngineCore::render`] with its own [`RenderSink`].

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use serde::Serialize;

use crate::arc::{ArcError, ArcState, CompassArc, Phase};
use crate::config::CompassConfig;
use crate::consts::{ARC_MIN_RADIUS, GUIDE_STROKE, MIN_SWEEP_ANGLE};
use crate::hit::{Element, LineSegment, pick_element};
use crate::input::{Button, InputState, Key, Modifiers, Tool, UiState};
use crate::point::Point;
use crate::radius::RadiusState;
use crate::render::RenderSink;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Action {
    ElementCreated(Element),
    ElementDeleted(usize),
    SelectionChanged(Option<usize>),
    RenderNeeded,
}

/// Core engine state. Holds no graphics handle, so it runs anywhere.
pub struct EngineCore {
    pub arc: CompassArc,
    pub elements: Vec<Element>,
    pub ui: UiState,
    pub input: InputState,
    pub radius: RadiusState,
    pub config: CompassConfig,
    /// Last pointer position seen, for the line preview.
    pub pointer: Option<Point>,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            arc: CompassArc::new(),
            elements: Vec::new(),
            ui: UiState::default(),
            input: InputState::default(),
            radius: RadiusState::default(),
            config: CompassConfig::default(),
            pointer: None,
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from configuration; the preferred radius is hydrated from the
    /// configured radius file when there is one.
    #[must_use]
    pub fn with_config(config: CompassConfig) -> Self {
        let radius = RadiusState::from_config(&config);
        Self { radius, config, ..Self::default() }
    }

    /// Replace the radius collaborator.
    #[must_use]
    pub fn with_radius_state(mut self, radius: RadiusState) -> Self {
        self.radius = radius;
        self
    }

    // --- Data inputs ---

    /// Replace the element list, e.g. from a saved drawing. Clears the selection.
    pub fn load_elements(&mut self, elements: Vec<Element>) {
        self.elements = elements;
        self.ui.selected = None;
    }

    // --- Tool ---

    /// Set the active tool. Any gesture in progress, including a live arc, is abandoned.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        if self.ui.tool == tool {
            return Vec::new();
        }
        tracing::debug!(from = ?self.ui.tool, to = ?tool, "tool changed");
        self.ui.tool = tool;
        self.arc.reset();
        self.input = InputState::Idle;
        vec![Action::RenderNeeded]
    }

    // --- Input events ---

    /// # Errors
    ///
    /// Propagates [`ArcError`] from the live arc, e.g. a Shift-click when the
    /// preferred radius is below the arc's minimum.
    pub fn on_pointer_down(&mut self, pt: Point, button: Button, modifiers: Modifiers) -> Result<Vec<Action>, ArcError> {
        self.pointer = Some(pt);
        if button != Button::Primary {
            return Ok(Vec::new());
        }
        match self.ui.tool {
            Tool::Compass => self.compass_down(pt, modifiers),
            Tool::Line => {
                self.input = InputState::DrawingLine { start: pt };
                Ok(vec![Action::RenderNeeded])
            }
            Tool::Select => Ok(self.select_at(pt)),
        }
    }

    /// # Errors
    ///
    /// Propagates [`ArcError`] from the live arc.
    pub fn on_pointer_move(&mut self, pt: Point, _modifiers: Modifiers) -> Result<Vec<Action>, ArcError> {
        self.pointer = Some(pt);
        match self.ui.tool {
            Tool::Compass => self.compass_move(pt),
            Tool::Line => Ok(match self.input {
                InputState::DrawingLine { .. } => vec![Action::RenderNeeded],
                InputState::Idle => Vec::new(),
            }),
            Tool::Select => Ok(Vec::new()),
        }
    }

    /// # Errors
    ///
    /// Propagates [`ArcError`] from the live arc.
    pub fn on_pointer_up(&mut self, pt: Point, button: Button, _modifiers: Modifiers) -> Result<Vec<Action>, ArcError> {
        self.pointer = Some(pt);
        if button != Button::Primary {
            return Ok(Vec::new());
        }
        match self.ui.tool {
            Tool::Compass => self.compass_up(),
            Tool::Line => Ok(self.line_up(pt)),
            Tool::Select => Ok(Vec::new()),
        }
    }

    /// # Errors
    ///
    /// Propagates [`ArcError`] from the radius shortcut.
    pub fn on_key_down(&mut self, key: &Key, _modifiers: Modifiers) -> Result<Vec<Action>, ArcError> {
        if key.is_escape() {
            self.arc.reset();
            self.input = InputState::Idle;
            return Ok(vec![Action::RenderNeeded]);
        }
        if key.is_delete() {
            return Ok(self.delete_selected());
        }
        if key.is_radius_shortcut() && self.ui.tool == Tool::Compass && self.arc.state() == ArcState::CenterSet {
            self.arc.set_radius_distance(self.radius.current_radius())?;
            self.arc.clear_preview();
            return Ok(vec![Action::RenderNeeded]);
        }
        Ok(Vec::new())
    }

    // --- Render ---

    /// Draw committed elements, then any gesture in progress.
    pub fn render(&self, sink: &mut impl RenderSink) {
        for (index, element) in self.elements.iter().enumerate() {
            element.draw(sink, self.ui.selected == Some(index));
        }
        if let (InputState::DrawingLine { start }, Some(pointer)) = (self.input, self.pointer) {
            LineSegment::new(start, pointer).draw(sink, GUIDE_STROKE);
        }
        self.arc.draw(sink);
    }

    // --- Queries ---

    #[must_use]
    pub fn tool(&self) -> Tool {
        self.ui.tool
    }

    /// Index of the selected element, if any.
    #[must_use]
    pub fn selection(&self) -> Option<usize> {
        self.ui.selected
    }

    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    #[must_use]
    pub fn arc(&self) -> &CompassArc {
        &self.arc
    }

    #[must_use]
    pub fn preferred_radius(&self) -> f64 {
        self.radius.current_radius()
    }

    // --- Compass tool ---

    fn compass_down(&mut self, pt: Point, modifiers: Modifiers) -> Result<Vec<Action>, ArcError> {
        match *self.arc.phase() {
            Phase::Idle => self.arc.set_center(pt),
            Phase::CenterSet { center } => {
                if modifiers.shift {
                    self.arc.set_radius_at_angle(center.angle_to(pt), self.radius.current_radius(), true)?;
                } else {
                    self.arc.set_radius_and_start_drawing(pt)?;
                }
                self.arc.clear_preview();
            }
            Phase::RadiusSet { .. } => self.arc.start_drawing()?,
            Phase::Drawing(_) => return Ok(Vec::new()),
        }
        Ok(vec![Action::RenderNeeded])
    }

    fn compass_move(&mut self, pt: Point) -> Result<Vec<Action>, ArcError> {
        match self.arc.state() {
            ArcState::CenterSet => {
                self.arc.set_preview(pt);
                Ok(vec![Action::RenderNeeded])
            }
            ArcState::Drawing => {
                self.arc.update_drawing(pt)?;
                if self.arc.is_full_circle() {
                    return Ok(self.commit_arc());
                }
                Ok(vec![Action::RenderNeeded])
            }
            ArcState::Idle | ArcState::RadiusSet => Ok(Vec::new()),
        }
    }

    fn compass_up(&mut self) -> Result<Vec<Action>, ArcError> {
        let Some(sweep) = self.arc.sweep().copied() else {
            return Ok(Vec::new());
        };
        if self.arc.radius() <= ARC_MIN_RADIUS {
            self.arc.reset();
        } else if self.arc.total_angle() >= MIN_SWEEP_ANGLE {
            return Ok(self.commit_arc());
        } else {
            // Too short to keep: back to RadiusSet so the next press sweeps again.
            self.arc.set_center(sweep.center);
            self.arc.set_radius(sweep.radius_point)?;
            self.arc.clear_preview();
        }
        Ok(vec![Action::RenderNeeded])
    }

    fn commit_arc(&mut self) -> Vec<Action> {
        let arc = self.arc.completed();
        self.arc.reset();
        if arc.radius() <= ARC_MIN_RADIUS {
            return vec![Action::RenderNeeded];
        }
        self.radius.set_current_radius(arc.radius());
        tracing::debug!(
            radius = arc.radius(),
            net_angle = arc.net_angle(),
            full_circle = arc.is_full_circle(),
            "arc committed"
        );
        let element = Element::Arc(arc);
        self.elements.push(element.clone());
        vec![Action::ElementCreated(element), Action::RenderNeeded]
    }

    // --- Line tool ---

    fn line_up(&mut self, pt: Point) -> Vec<Action> {
        let InputState::DrawingLine { start } = std::mem::take(&mut self.input) else {
            return Vec::new();
        };
        let line = LineSegment::new(start, pt);
        if line.length() <= 0.0 {
            return vec![Action::RenderNeeded];
        }
        tracing::debug!(length = line.length(), "line committed");
        let element = Element::Line(line);
        self.elements.push(element.clone());
        vec![Action::ElementCreated(element), Action::RenderNeeded]
    }

    // --- Selection ---

    fn select_at(&mut self, pt: Point) -> Vec<Action> {
        let hit = pick_element(pt, &self.elements, self.config.hit_tolerance).map(|h| h.index);
        if hit == self.ui.selected {
            return Vec::new();
        }
        self.ui.selected = hit;
        vec![Action::SelectionChanged(hit), Action::RenderNeeded]
    }

    fn delete_selected(&mut self) -> Vec<Action> {
        let Some(index) = self.ui.selected.take() else {
            return Vec::new();
        };
        if index >= self.elements.len() {
            return vec![Action::SelectionChanged(None)];
        }
        self.elements.remove(index);
        tracing::debug!(index, remaining = self.elements.len(), "element deleted");
        vec![Action::ElementDeleted(index), Action::SelectionChanged(None), Action::RenderNeeded]
    }
}
