#![allow(clippy::float_cmp)]

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};
use std::rc::Rc;

use super::*;
use crate::consts::{SELECTED_STROKE, SHAPE_STROKE};
use crate::radius::{MemoryRadiusStore, RadiusStore};
use crate::render::render_test::{Call, RecordingSink};

// =============================================================
// Helpers
// =============================================================

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn no_modifiers() -> Modifiers {
    Modifiers::default()
}

fn down(core: &mut EngineCore, x: f64, y: f64) -> Vec<Action> {
    core.on_pointer_down(pt(x, y), Button::Primary, no_modifiers()).unwrap()
}

fn shift_down(core: &mut EngineCore, x: f64, y: f64) -> Vec<Action> {
    core.on_pointer_down(pt(x, y), Button::Primary, Modifiers::shift()).unwrap()
}

fn mv(core: &mut EngineCore, x: f64, y: f64) -> Vec<Action> {
    core.on_pointer_move(pt(x, y), no_modifiers()).unwrap()
}

fn up(core: &mut EngineCore, x: f64, y: f64) -> Vec<Action> {
    core.on_pointer_up(pt(x, y), Button::Primary, no_modifiers()).unwrap()
}

fn key(core: &mut EngineCore, name: &str) -> Vec<Action> {
    core.on_key_down(&Key::new(name), no_modifiers()).unwrap()
}

fn has_render_needed(actions: &[Action]) -> bool {
    actions.iter().any(|a| matches!(a, Action::RenderNeeded))
}

fn created(actions: &[Action]) -> Option<&Element> {
    actions.iter().find_map(|a| match a {
        Action::ElementCreated(e) => Some(e),
        _ => None,
    })
}

/// Center at the origin, radius point at (50, 0), drawing.
fn start_sweep(core: &mut EngineCore) {
    down(core, 0.0, 0.0);
    down(core, 50.0, 0.0);
    assert_eq!(core.arc().state(), ArcState::Drawing);
}

fn engine_with_line() -> EngineCore {
    let mut core = EngineCore::new();
    core.load_elements(vec![Element::Line(LineSegment::new(pt(0.0, 0.0), pt(100.0, 0.0)))]);
    core
}

// =============================================================
// Construction
// =============================================================

#[test]
fn new_engine_defaults() {
    let core = EngineCore::new();
    assert_eq!(core.tool(), Tool::Compass);
    assert!(core.selection().is_none());
    assert!(core.elements().is_empty());
    assert_eq!(core.arc().state(), ArcState::Idle);
    assert_eq!(core.preferred_radius(), 100.0);
}

#[test]
fn with_config_hydrates_preferred_radius_from_file() {
    let path = std::env::temp_dir().join(format!("compass-engine-{}.json", std::process::id()));
    std::fs::write(&path, r#"{"radius": 33.0}"#).unwrap();
    let config = CompassConfig { radius_file: Some(path.clone()), ..CompassConfig::default() };
    let core = EngineCore::with_config(config);
    assert_eq!(core.preferred_radius(), 33.0);
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn load_elements_clears_selection() {
    let mut core = engine_with_line();
    core.ui.selected = Some(0);
    core.load_elements(Vec::new());
    assert!(core.selection().is_none());
}

// =============================================================
// Compass tool
// =============================================================

#[test]
fn first_press_sets_center() {
    let mut core = EngineCore::new();
    let actions = down(&mut core, 10.0, 20.0);
    assert!(has_render_needed(&actions));
    assert_eq!(core.arc().state(), ArcState::CenterSet);
    assert_eq!(core.arc().center_point(), Some(pt(10.0, 20.0)));
}

#[test]
fn move_while_center_set_updates_preview() {
    let mut core = EngineCore::new();
    down(&mut core, 0.0, 0.0);
    let actions = mv(&mut core, 30.0, 0.0);
    assert!(has_render_needed(&actions));
    assert_eq!(core.arc().preview_point(), Some(pt(30.0, 0.0)));
}

#[test]
fn move_while_idle_does_nothing() {
    let mut core = EngineCore::new();
    assert!(mv(&mut core, 30.0, 0.0).is_empty());
}

#[test]
fn second_press_starts_drawing_and_drops_preview() {
    let mut core = EngineCore::new();
    down(&mut core, 0.0, 0.0);
    mv(&mut core, 40.0, 0.0);
    down(&mut core, 50.0, 0.0);
    assert_eq!(core.arc().state(), ArcState::Drawing);
    assert_eq!(core.arc().radius(), 50.0);
    assert!(core.arc().preview_point().is_none());
}

#[test]
fn release_after_sweep_commits_arc() {
    let mut core = EngineCore::new();
    start_sweep(&mut core);
    mv(&mut core, 35.0, 35.0);
    mv(&mut core, 0.0, 50.0);
    let actions = up(&mut core, 0.0, 50.0);

    let Some(Element::Arc(arc)) = created(&actions) else {
        panic!("expected an arc element, got {actions:?}");
    };
    assert!((arc.net_angle() - FRAC_PI_2).abs() < 1e-9);
    assert!(arc.preview_point().is_none());
    assert_eq!(core.elements().len(), 1);
    assert_eq!(core.elements()[0], Element::Arc(arc.clone()));
    assert_eq!(core.arc().state(), ArcState::Idle);
    assert_eq!(core.preferred_radius(), 50.0);
}

#[test]
fn full_circle_commits_on_move() {
    let mut core = EngineCore::new();
    start_sweep(&mut core);
    let mut last = Vec::new();
    for i in 1..=8 {
        let p = pt(0.0, 0.0).polar_offset(FRAC_PI_4 * f64::from(i), 50.0);
        last = mv(&mut core, p.x, p.y);
    }
    let Some(Element::Arc(arc)) = created(&last) else {
        panic!("expected auto-commit, got {last:?}");
    };
    assert!(arc.is_full_circle());
    assert_eq!(core.arc().state(), ArcState::Idle);
    assert_eq!(core.elements().len(), 1);

    // The release that follows has nothing left to commit.
    assert!(up(&mut core, 50.0, 0.0).is_empty());
    assert_eq!(core.elements().len(), 1);
}

#[test]
fn short_release_rewinds_to_radius_set() {
    let mut core = EngineCore::new();
    start_sweep(&mut core);
    let actions = up(&mut core, 50.0, 0.0);
    assert!(created(&actions).is_none());
    assert!(core.elements().is_empty());
    assert_eq!(core.arc().state(), ArcState::RadiusSet);
    assert_eq!(core.arc().radius_point(), Some(pt(50.0, 0.0)));

    // Pressing again sweeps from the same radius.
    down(&mut core, 10.0, 10.0);
    assert_eq!(core.arc().state(), ArcState::Drawing);
    assert_eq!(core.arc().radius(), 50.0);
}

#[test]
fn press_during_drawing_is_ignored() {
    let mut core = EngineCore::new();
    start_sweep(&mut core);
    mv(&mut core, 0.0, 50.0);
    assert!(down(&mut core, 200.0, 200.0).is_empty());
    assert!((core.arc().net_angle() - FRAC_PI_2).abs() < 1e-9);
}

#[test]
fn zero_radius_release_resets() {
    let mut core = EngineCore::new();
    down(&mut core, 5.0, 5.0);
    down(&mut core, 5.0, 5.0);
    assert_eq!(core.arc().state(), ArcState::Drawing);
    mv(&mut core, 5.0, 50.0);
    up(&mut core, 5.0, 50.0);
    assert_eq!(core.arc().state(), ArcState::Idle);
    assert!(core.elements().is_empty());
}

#[test]
fn zero_radius_full_turn_is_not_committed() {
    let mut core = EngineCore::new();
    down(&mut core, 0.0, 0.0);
    up(&mut core, 0.0, 0.0);
    down(&mut core, 0.0, 0.0);
    let mut actions = Vec::new();
    for i in 1..=8 {
        let p = pt(0.0, 0.0).polar_offset(FRAC_PI_4 * f64::from(i), 50.0);
        actions.extend(mv(&mut core, p.x, p.y));
    }
    assert!(created(&actions).is_none());
    assert!(core.elements().is_empty());
    assert_eq!(core.arc().state(), ArcState::Idle);
    assert_eq!(core.preferred_radius(), 100.0);
}

#[test]
fn shift_press_uses_preferred_radius() {
    let mut core = EngineCore::new().with_radius_state(RadiusState::new(40.0, 1.0, 1000.0));
    down(&mut core, 0.0, 0.0);
    shift_down(&mut core, 0.0, 10.0);
    assert_eq!(core.arc().state(), ArcState::Drawing);
    assert!((core.arc().radius() - 40.0).abs() < 1e-9);
    let rp = core.arc().radius_point().unwrap();
    assert!(rp.x.abs() < 1e-9);
    assert!((rp.y - 40.0).abs() < 1e-9);
}

#[test]
fn shift_press_with_tiny_preferred_radius_errors() {
    let mut core = EngineCore::new().with_radius_state(RadiusState::new(0.0, 0.0, 10.0));
    down(&mut core, 0.0, 0.0);
    let err = core.on_pointer_down(pt(5.0, 0.0), Button::Primary, Modifiers::shift()).unwrap_err();
    assert!(matches!(err, ArcError::RadiusTooSmall { .. }));
    assert_eq!(core.arc().state(), ArcState::CenterSet);
}

#[test]
fn commit_writes_preferred_radius_through() {
    let store = Rc::new(MemoryRadiusStore::new());
    let radius = RadiusState::default().with_store(Box::new(Rc::clone(&store)));
    let mut core = EngineCore::new().with_radius_state(radius);
    start_sweep(&mut core);
    mv(&mut core, 0.0, 50.0);
    up(&mut core, 0.0, 50.0);
    assert_eq!(store.load_radius(), Some(50.0));
}

#[test]
fn secondary_button_is_ignored() {
    let mut core = EngineCore::new();
    let actions = core.on_pointer_down(pt(1.0, 1.0), Button::Secondary, no_modifiers()).unwrap();
    assert!(actions.is_empty());
    assert_eq!(core.arc().state(), ArcState::Idle);
}

// =============================================================
// Keys
// =============================================================

#[test]
fn escape_resets_live_arc() {
    let mut core = EngineCore::new();
    start_sweep(&mut core);
    let actions = key(&mut core, "Escape");
    assert!(has_render_needed(&actions));
    assert_eq!(core.arc().state(), ArcState::Idle);
}

#[test]
fn escape_abandons_line_gesture() {
    let mut core = EngineCore::new();
    core.set_tool(Tool::Line);
    down(&mut core, 0.0, 0.0);
    key(&mut core, "Escape");
    assert_eq!(core.input, InputState::Idle);
    assert!(up(&mut core, 50.0, 0.0).is_empty());
    assert!(core.elements().is_empty());
}

#[test]
fn radius_key_applies_preferred_radius() {
    let mut core = EngineCore::new().with_radius_state(RadiusState::new(25.0, 1.0, 100.0));
    down(&mut core, 10.0, 10.0);
    let actions = key(&mut core, "r");
    assert!(has_render_needed(&actions));
    assert_eq!(core.arc().state(), ArcState::RadiusSet);
    assert_eq!(core.arc().radius_point(), Some(pt(35.0, 10.0)));
}

#[test]
fn radius_key_outside_center_set_is_ignored() {
    let mut core = EngineCore::new();
    assert!(key(&mut core, "r").is_empty());
    start_sweep(&mut core);
    assert!(key(&mut core, "R").is_empty());
    assert_eq!(core.arc().state(), ArcState::Drawing);
}

#[test]
fn delete_removes_selected_element() {
    let mut core = engine_with_line();
    core.set_tool(Tool::Select);
    down(&mut core, 50.0, 3.0);
    let actions = key(&mut core, "Delete");
    assert_eq!(
        actions,
        vec![Action::ElementDeleted(0), Action::SelectionChanged(None), Action::RenderNeeded]
    );
    assert!(core.elements().is_empty());
    assert!(core.selection().is_none());
}

#[test]
fn backspace_without_selection_does_nothing() {
    let mut core = engine_with_line();
    assert!(key(&mut core, "Backspace").is_empty());
    assert_eq!(core.elements().len(), 1);
}

#[test]
fn unknown_key_does_nothing() {
    let mut core = EngineCore::new();
    assert!(key(&mut core, "F5").is_empty());
}

// =============================================================
// Line tool
// =============================================================

#[test]
fn line_drag_commits_segment() {
    let mut core = EngineCore::new();
    core.set_tool(Tool::Line);
    down(&mut core, 0.0, 0.0);
    assert!(has_render_needed(&mv(&mut core, 20.0, 0.0)));
    let actions = up(&mut core, 30.0, 40.0);
    assert_eq!(created(&actions), Some(&Element::Line(LineSegment::new(pt(0.0, 0.0), pt(30.0, 40.0)))));
    assert_eq!(core.elements().len(), 1);
    assert_eq!(core.input, InputState::Idle);
}

#[test]
fn zero_length_line_is_not_committed() {
    let mut core = EngineCore::new();
    core.set_tool(Tool::Line);
    down(&mut core, 5.0, 5.0);
    let actions = up(&mut core, 5.0, 5.0);
    assert!(created(&actions).is_none());
    assert!(core.elements().is_empty());
}

#[test]
fn line_move_without_gesture_does_nothing() {
    let mut core = EngineCore::new();
    core.set_tool(Tool::Line);
    assert!(mv(&mut core, 5.0, 5.0).is_empty());
}

// =============================================================
// Select tool
// =============================================================

#[test]
fn select_picks_within_tolerance() {
    let mut core = engine_with_line();
    core.set_tool(Tool::Select);
    let actions = down(&mut core, 50.0, 6.0);
    assert_eq!(actions, vec![Action::SelectionChanged(Some(0)), Action::RenderNeeded]);
    assert_eq!(core.selection(), Some(0));

    // Same pick again changes nothing.
    assert!(down(&mut core, 60.0, 2.0).is_empty());

    let actions = down(&mut core, 50.0, 40.0);
    assert_eq!(actions, vec![Action::SelectionChanged(None), Action::RenderNeeded]);
}

#[test]
fn select_honors_configured_tolerance() {
    let config = CompassConfig { hit_tolerance: 2.0, ..CompassConfig::default() };
    let mut core = EngineCore::with_config(config);
    core.load_elements(vec![Element::Line(LineSegment::new(pt(0.0, 0.0), pt(100.0, 0.0)))]);
    core.set_tool(Tool::Select);
    assert!(down(&mut core, 50.0, 6.0).is_empty());
    assert!(core.selection().is_none());
}

#[test]
fn select_picks_committed_arc() {
    let mut core = EngineCore::new();
    start_sweep(&mut core);
    mv(&mut core, 0.0, 50.0);
    up(&mut core, 0.0, 50.0);
    core.set_tool(Tool::Select);
    let p = pt(0.0, 0.0).polar_offset(FRAC_PI_4, 53.0);
    down(&mut core, p.x, p.y);
    assert_eq!(core.selection(), Some(0));
}

// =============================================================
// Tool switching
// =============================================================

#[test]
fn set_tool_abandons_live_arc() {
    let mut core = EngineCore::new();
    start_sweep(&mut core);
    let actions = core.set_tool(Tool::Line);
    assert!(has_render_needed(&actions));
    assert_eq!(core.arc().state(), ArcState::Idle);
    assert_eq!(core.tool(), Tool::Line);
}

#[test]
fn set_same_tool_is_noop() {
    let mut core = EngineCore::new();
    down(&mut core, 1.0, 1.0);
    assert!(core.set_tool(Tool::Compass).is_empty());
    assert_eq!(core.arc().state(), ArcState::CenterSet);
}

// =============================================================
// Render
// =============================================================

#[test]
fn render_empty_engine_emits_nothing() {
    let mut sink = RecordingSink::default();
    EngineCore::new().render(&mut sink);
    assert!(sink.calls.is_empty());
}

#[test]
fn render_highlights_selected_element() {
    let mut core = engine_with_line();
    core.elements.push(Element::Line(LineSegment::new(pt(0.0, 50.0), pt(100.0, 50.0))));
    core.ui.selected = Some(1);
    let mut sink = RecordingSink::default();
    core.render(&mut sink);
    let strokes: Vec<_> = sink.calls.iter().filter(|c| matches!(c, Call::Stroke(_))).collect();
    assert_eq!(strokes, vec![&Call::Stroke(SHAPE_STROKE.to_owned()), &Call::Stroke(SELECTED_STROKE.to_owned())]);
}

#[test]
fn render_draws_elements_before_live_arc() {
    let mut core = engine_with_line();
    down(&mut core, 10.0, 10.0);
    let mut sink = RecordingSink::default();
    core.render(&mut sink);
    let prims = sink.primitives();
    assert_eq!(prims.first(), Some(&&Call::Line(0.0, 0.0, 100.0, 0.0)));
    assert_eq!(prims.last(), Some(&&Call::Point(10.0, 10.0)));
    assert_eq!(sink.count(|c| *c == Call::Push), sink.count(|c| *c == Call::Pop));
}

#[test]
fn render_shows_line_preview() {
    let mut core = EngineCore::new();
    core.set_tool(Tool::Line);
    down(&mut core, 0.0, 0.0);
    mv(&mut core, 20.0, 5.0);
    let mut sink = RecordingSink::default();
    core.render(&mut sink);
    assert!(sink.calls.contains(&Call::Line(0.0, 0.0, 20.0, 5.0)));
    assert!(sink.calls.contains(&Call::Stroke(GUIDE_STROKE.to_owned())));
}

// =============================================================
// Action wire shape
// =============================================================

#[test]
fn actions_serialize_adjacently_tagged() {
    let value = serde_json::to_value(Action::SelectionChanged(Some(2))).unwrap();
    assert_eq!(value, serde_json::json!({ "type": "selection_changed", "data": 2 }));
    let value = serde_json::to_value(Action::RenderNeeded).unwrap();
    assert_eq!(value, serde_json::json!({ "type": "render_needed" }));
    let value = serde_json::to_value(Action::ElementDeleted(0)).unwrap();
    assert_eq!(value["type"], "element_deleted");
}
