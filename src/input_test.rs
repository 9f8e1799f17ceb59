use super::*;

// =============================================================
// Tool
// =============================================================

#[test]
fn tool_default_is_compass() {
    assert_eq!(Tool::default(), Tool::Compass);
}

#[test]
fn tool_is_drawing() {
    assert!(Tool::Compass.is_drawing());
    assert!(Tool::Line.is_drawing());
    assert!(!Tool::Select.is_drawing());
}

#[test]
fn tool_parses_names_case_insensitively() {
    assert_eq!("compass".parse::<Tool>(), Ok(Tool::Compass));
    assert_eq!("Line".parse::<Tool>(), Ok(Tool::Line));
    assert_eq!("SELECT".parse::<Tool>(), Ok(Tool::Select));
}

#[test]
fn tool_rejects_unknown_name() {
    let err = "lasso".parse::<Tool>().unwrap_err();
    assert_eq!(err, UnknownTool("lasso".to_owned()));
    assert_eq!(err.to_string(), "unknown tool: \"lasso\"");
}

// =============================================================
// Modifiers
// =============================================================

#[test]
fn modifiers_default_all_false() {
    let m = Modifiers::default();
    assert!(!m.shift);
    assert!(!m.ctrl);
    assert!(!m.alt);
    assert!(!m.meta);
}

#[test]
fn modifiers_shift_sets_only_shift() {
    let m = Modifiers::shift();
    assert!(m.shift);
    assert_eq!(m, Modifiers { shift: true, ..Modifiers::default() });
}

// =============================================================
// Key
// =============================================================

#[test]
fn key_classification() {
    assert!(Key::new("Escape").is_escape());
    assert!(!Key::new("Esc").is_escape());
    assert!(Key::new("Delete").is_delete());
    assert!(Key::new("Backspace").is_delete());
    assert!(!Key::new("d").is_delete());
    assert!(Key::new("r").is_radius_shortcut());
    assert!(Key::new("R").is_radius_shortcut());
    assert!(!Key::new("Enter").is_radius_shortcut());
}

// =============================================================
// UiState / InputState
// =============================================================

#[test]
fn ui_state_default() {
    let ui = UiState::default();
    assert_eq!(ui.tool, Tool::Compass);
    assert!(ui.selected.is_none());
}

#[test]
fn input_state_default_is_idle() {
    assert_eq!(InputState::default(), InputState::Idle);
}

#[test]
fn input_state_carries_line_anchor() {
    let state = InputState::DrawingLine { start: Point::new(3.0, 4.0) };
    let InputState::DrawingLine { start } = state else {
        panic!("expected DrawingLine");
    };
    assert_eq!(start, Point::new(3.0, 4.0));
}
