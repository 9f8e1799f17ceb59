//! Input model: tools, modifier keys, mouse buttons, and the line gesture state.
//!
//! `Tool` and `Modifiers` capture the user's intent at the time of a pointer
//! event. The compass tool's gesture lives in the arc's own state machine;
//! `InputState` only tracks gestures of the other tools between pointer-down
//! and pointer-up.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::str::FromStr;

use crate::point::Point;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Compass: center, radius, sweep (default).
    #[default]
    Compass,
    /// Straight line segment by drag.
    Line,
    /// Pick a committed element.
    Select,
}

impl Tool {
    /// Whether this tool creates elements.
    #[must_use]
    pub fn is_drawing(self) -> bool {
        matches!(self, Self::Compass | Self::Line)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown tool: {0:?}")]
pub struct UnknownTool(pub String);

impl FromStr for Tool {
    type Err = UnknownTool;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "compass" => Ok(Self::Compass),
            "line" => Ok(Self::Line),
            "select" => Ok(Self::Select),
            _ => Err(UnknownTool(s.to_owned())),
        }
    }
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key is held. With the compass tool, places the radius at the
    /// preferred distance.
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    #[must_use]
    pub fn shift() -> Self {
        Self { shift: true, ..Self::default() }
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key, named as the browser reports it (`"Escape"`, `"Delete"`, `"r"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn is_escape(&self) -> bool {
        self.0 == "Escape"
    }

    #[must_use]
    pub fn is_delete(&self) -> bool {
        matches!(self.0.as_str(), "Delete" | "Backspace")
    }

    /// The radius shortcut, either case.
    #[must_use]
    pub fn is_radius_shortcut(&self) -> bool {
        self.0.eq_ignore_ascii_case("r")
    }
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Currently active tool.
    pub tool: Tool,
    /// Index of the selected element, if any.
    pub selected: Option<usize>,
}

/// Gesture being tracked between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum InputState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Dragging out a line from `start`.
    DrawingLine { start: Point },
}
