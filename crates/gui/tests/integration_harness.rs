//! Integration tests for the guide tool driven through TestHarness.
//!
//! Pointer input goes through the real camera: world points are projected
//! to the 1200x800 harness viewport and clicked there.

use approx::assert_abs_diff_eq;
use glam::Vec3;

use caisson_gui_lib::fixtures;
use caisson_gui_lib::guides::features::Axis;
use caisson_gui_lib::guides::{AnchorKind, EventOutcome, GuideRecord, ToolKey};
use caisson_gui_lib::harness::TestHarness;
use caisson_gui_lib::state::{AppSettings, Units};

/// Front-bottom-right corner of the 600x720x560 box at the origin
const CORNER: Vec3 = Vec3::new(300.0, 0.0, 280.0);
/// Middle of the front-right vertical edge of that box
const EDGE_MID: Vec3 = Vec3::new(300.0, 360.0, 280.0);

fn cabinet_harness() -> TestHarness {
    let mut h = TestHarness::new();
    h.load_scene(fixtures::single_cabinet_scene());
    h
}

fn expect_point(outcome: EventOutcome) -> caisson_gui_lib::guides::GuidePoint {
    match outcome {
        EventOutcome::Finalized(GuideRecord::Point(p)) => p,
        other => panic!("expected a finalized guide point, got {other:?}"),
    }
}

fn expect_line(outcome: EventOutcome) -> caisson_gui_lib::guides::Guide {
    match outcome {
        EventOutcome::Finalized(GuideRecord::Line(g)) => g,
        other => panic!("expected a finalized guide line, got {other:?}"),
    }
}

// ── Picking priority ──────────────────────────────────────────

#[test]
fn test_corner_wins_over_incident_edges() {
    let mut h = cabinet_harness();
    assert_eq!(h.click_world(CORNER), EventOutcome::Anchored(AnchorKind::Corner));
}

#[test]
fn test_edge_pick_between_corners() {
    let mut h = cabinet_harness();
    assert_eq!(h.click_world(EDGE_MID), EventOutcome::Anchored(AnchorKind::Edge));
    let origin = h.preview().unwrap().anchor.origin();
    assert!(origin.distance(EDGE_MID) < 0.5);
}

#[test]
fn test_axis_pick_in_empty_scene() {
    let mut h = TestHarness::new();
    assert_eq!(
        h.click_world(Vec3::new(-800.0, 0.0, 0.0)),
        EventOutcome::Anchored(AnchorKind::Axis)
    );
}

#[test]
fn test_click_on_nothing_stays_idle() {
    let mut h = cabinet_harness();
    assert_eq!(h.click(glam::Vec2::new(5.0, 5.0)), EventOutcome::Ignored);
    assert!(h.is_idle());
    assert_eq!(h.transient_count(), 0);
}

// ── Typed distances ───────────────────────────────────────────

#[test]
fn test_corner_typed_distance_creates_point() {
    let mut h = cabinet_harness();
    h.click_world(CORNER);
    let p = expect_point(h.type_distance("250"));

    assert_abs_diff_eq!(p.position.x, 550.0, epsilon = 1e-3);
    assert_abs_diff_eq!(p.position.y, 0.0, epsilon = 1e-3);
    assert_abs_diff_eq!(p.position.z, 280.0, epsilon = 1e-3);
    assert_eq!(p.distance, 250.0);
    assert_eq!(p.snapped_axis, Some(Axis::X));
    assert_eq!(h.points().len(), 1);
    assert!(h.is_idle());
}

#[test]
fn test_vertical_edge_lock_z_drag_then_type() {
    let mut h = cabinet_harness();
    h.click_world(EDGE_MID);
    assert_eq!(h.lock_axis(Some(Axis::Z)), EventOutcome::LockChanged(Some(Axis::Z)));

    assert_eq!(h.hover_world(EDGE_MID + Vec3::new(0.0, 0.0, 150.0)), EventOutcome::PreviewUpdated);
    let preview = h.preview().unwrap();
    assert_eq!(preview.snapped_axis, Some(Axis::Z));
    assert!(preview.displacement.z > 0.0);

    let g = expect_line(h.type_distance("120"));
    assert_eq!(g.distance, 120.0);
    assert_eq!(g.snapped_axis, Some(Axis::Z));
    assert_abs_diff_eq!(g.offset.x, 0.0, epsilon = 1e-4);
    assert_abs_diff_eq!(g.offset.y, 0.0, epsilon = 1e-4);
    assert_abs_diff_eq!(g.offset.z, 120.0, epsilon = 1e-4);
}

#[test]
fn test_vertical_edge_lock_x_typed_offset() {
    let mut h = cabinet_harness();
    h.click_world(EDGE_MID);
    h.lock_axis(Some(Axis::X));
    let g = expect_line(h.type_distance("500"));

    assert_eq!(g.anchor, AnchorKind::Edge);
    assert_abs_diff_eq!(g.offset.x, 500.0, epsilon = 1e-4);
    // Parallel to the edge, extended 500 past both of its ends
    let along = g.direction();
    assert_abs_diff_eq!(along.y, 1.0, epsilon = 1e-5);
    assert_abs_diff_eq!(g.start_point.x, 800.0, epsilon = 1e-3);
    assert_abs_diff_eq!(g.start_point.y, -500.0, epsilon = 1e-3);
    assert_abs_diff_eq!(g.end_point.y, 1220.0, epsilon = 1e-3);
    assert_abs_diff_eq!(g.end_point.z, 280.0, epsilon = 1e-3);
}

#[test]
fn test_lock_along_edge_is_refused() {
    let mut h = cabinet_harness();
    h.click_world(EDGE_MID);
    assert_eq!(h.lock_axis(Some(Axis::Y)), EventOutcome::Ignored);
    assert_eq!(h.locked_axis(), None);
}

#[test]
fn test_axis_anchor_guide() {
    let mut h = TestHarness::new();
    h.click_world(Vec3::new(-800.0, 0.0, 0.0));
    let g = expect_line(h.type_distance("300"));
    assert_eq!(g.anchor, AnchorKind::Axis);
    assert_eq!(g.snapped_axis, Some(Axis::Z));
    assert_abs_diff_eq!(g.start_point.x, -1500.0, epsilon = 1e-3);
    assert_abs_diff_eq!(g.end_point.x, 1500.0, epsilon = 1e-3);
    assert_abs_diff_eq!(g.start_point.z, 300.0, epsilon = 1e-3);
}

#[test]
fn test_formula_uses_box_dimensions() {
    let mut h = cabinet_harness();
    h.click_world(CORNER);
    let p = expect_point(h.type_distance("w/2"));
    assert_eq!(p.distance, 300.0);
}

#[test]
fn test_negative_typed_distance_flips() {
    let mut h = cabinet_harness();
    h.click_world(CORNER);
    let p = expect_point(h.type_distance("-40"));
    assert_abs_diff_eq!(p.offset.x, -40.0, epsilon = 1e-4);
    assert_eq!(p.distance, 40.0);
}

#[test]
fn test_typed_distance_in_display_units() {
    let mut settings = AppSettings::default();
    settings.units = Units::Centimeters;
    let mut h = TestHarness::with_settings(settings);
    h.load_scene(fixtures::single_cabinet_scene());
    h.click_world(CORNER);
    let p = expect_point(h.type_distance("25"));
    assert_abs_diff_eq!(p.distance, 250.0, epsilon = 1e-3);
}

#[test]
fn test_invalid_typed_text_is_ignored() {
    let mut h = cabinet_harness();
    h.click_world(CORNER);
    for text in ["", "abc", "0", "1/0", "2 +"] {
        assert_eq!(h.type_distance(text), EventOutcome::Ignored, "input {text:?}");
    }
    assert!(!h.is_idle());
    assert!(h.preview().is_some());
    assert_eq!(h.guide_count(), 0);
}

#[test]
fn test_typed_distance_when_idle_is_ignored() {
    let mut h = cabinet_harness();
    assert_eq!(h.type_distance("100"), EventOutcome::Ignored);
    assert_eq!(h.guide_count(), 0);
}

// ── Dragging ──────────────────────────────────────────────────

#[test]
fn test_edge_drag_snaps_to_x_and_click_finalizes() {
    let mut h = cabinet_harness();
    h.click_world(EDGE_MID);

    // A point on the camera-facing plane through the anchor whose
    // horizontal part runs exactly along +X
    let f = h.camera.forward();
    let target = EDGE_MID + Vec3::new(100.0, -100.0 * f.x / f.y, 0.0);
    assert_eq!(h.hover_world(target), EventOutcome::PreviewUpdated);
    assert_eq!(h.preview().unwrap().snapped_axis, Some(Axis::X));

    let g = expect_line(h.click_world(target));
    assert_eq!(g.snapped_axis, Some(Axis::X));
    assert_abs_diff_eq!(g.offset.x, 100.0, epsilon = 0.5);
    assert_abs_diff_eq!(g.offset.y, 0.0, epsilon = 1e-3);
    assert_abs_diff_eq!(g.offset.z, 0.0, epsilon = 1e-3);
}

#[test]
fn test_edge_drag_stays_perpendicular() {
    let mut h = cabinet_harness();
    h.click_world(EDGE_MID);
    h.hover_world(EDGE_MID + Vec3::new(150.0, 0.0, 0.0));
    let preview = h.preview().unwrap();
    assert_eq!(preview.displacement.y, 0.0);
    assert!(preview.distance > 1.0);

    let g = expect_line(h.click_world(EDGE_MID + Vec3::new(150.0, 0.0, 0.0)));
    assert_abs_diff_eq!(g.direction().y, 1.0, epsilon = 1e-5);
    assert_eq!(g.offset.y, 0.0);
}

#[test]
fn test_lock_change_retracks_last_pointer() {
    let mut h = cabinet_harness();
    h.click_world(CORNER);
    h.hover_world(CORNER + Vec3::new(200.0, 0.0, 0.0));
    assert_ne!(h.preview().unwrap().snapped_axis, Some(Axis::Y));

    assert_eq!(h.lock_axis(Some(Axis::Y)), EventOutcome::LockChanged(Some(Axis::Y)));
    let preview = h.preview().unwrap();
    assert_eq!(preview.snapped_axis, Some(Axis::Y));
    assert_eq!(preview.displacement.x, 0.0);
    assert_eq!(preview.displacement.z, 0.0);
}

#[test]
fn test_corner_lock_y_drag_and_click() {
    let mut h = cabinet_harness();
    h.click_world(CORNER);
    h.lock_axis(Some(Axis::Y));
    h.hover_world(CORNER + Vec3::new(0.0, 200.0, 0.0));
    let p = expect_point(h.click_world(CORNER + Vec3::new(0.0, 200.0, 0.0)));
    assert_eq!(p.snapped_axis, Some(Axis::Y));
    assert!(p.position.y > 0.0);
    assert_abs_diff_eq!(p.position.x, 300.0, epsilon = 1e-3);
    assert_abs_diff_eq!(p.position.z, 280.0, epsilon = 1e-3);
}

#[test]
fn test_drag_across_locked_axis_does_not_finalize() {
    let mut h = cabinet_harness();
    // Front view: the drag plane is parallel to XY
    h.camera.yaw = 0.0;
    h.camera.pitch = 0.0;

    assert_eq!(h.click_world(CORNER), EventOutcome::Anchored(AnchorKind::Corner));
    h.lock_axis(Some(Axis::X));
    let above = CORNER + Vec3::new(0.0, 200.0, 0.0);
    assert_eq!(h.hover_world(above), EventOutcome::Ignored);
    assert_eq!(h.click_world(above), EventOutcome::Ignored);
    assert_eq!(h.guide_count(), 0);
    assert!(!h.is_idle());
}

#[test]
fn test_second_click_without_drag_is_ignored() {
    let mut h = cabinet_harness();
    h.click_world(CORNER);
    assert_eq!(h.click_world(CORNER), EventOutcome::Ignored);
    assert!(!h.is_idle());
    assert_eq!(h.guide_count(), 0);
}

// ── Cancel, delete, enable ────────────────────────────────────

#[test]
fn test_escape_cancels_and_clears_preview() {
    let mut h = cabinet_harness();
    h.click_world(CORNER);
    h.hover_world(CORNER + Vec3::new(200.0, 0.0, 0.0));
    assert!(h.transient_count() > 0);

    assert_eq!(h.press(ToolKey::Escape), EventOutcome::Cancelled);
    assert!(h.is_idle());
    assert_eq!(h.transient_count(), 0);
    assert_eq!(h.guide_count(), 0);
    // Nothing left to cancel
    assert_eq!(h.press(ToolKey::Escape), EventOutcome::Ignored);
}

#[test]
fn test_delete_key_pops_points_first() {
    let mut h = cabinet_harness();
    h.click_world(EDGE_MID);
    h.type_distance("100");
    h.click_world(CORNER);
    h.type_distance("100");
    assert_eq!(h.guides().len(), 1);
    assert_eq!(h.points().len(), 1);

    assert!(matches!(h.press(ToolKey::Delete), EventOutcome::Deleted(GuideRecord::Point(_))));
    assert!(matches!(h.press(ToolKey::Backspace), EventOutcome::Deleted(GuideRecord::Line(_))));
    assert_eq!(h.press(ToolKey::Delete), EventOutcome::Ignored);
    assert_eq!(h.guide_count(), 0);
}

#[test]
fn test_store_grows_by_one_per_finalize() {
    let mut h = cabinet_harness();
    for (i, text) in ["100", "200", "w", "d/2"].into_iter().enumerate() {
        h.click_world(CORNER);
        h.type_distance(text);
        assert_eq!(h.guide_count(), i + 1);
    }
    assert_eq!(h.clear_guides(), 4);
    assert!(!h.delete_last_guide());
}

#[test]
fn test_disable_cancels_and_disposes() {
    let mut h = cabinet_harness();
    h.click_world(CORNER);
    h.hover_world(CORNER + Vec3::new(200.0, 0.0, 0.0));
    assert!(h.transient_count() > 0);

    h.set_enabled(false);
    assert!(h.is_idle());
    assert_eq!(h.transient_count(), 0);
    assert_eq!(h.click_world(CORNER), EventOutcome::Ignored);
    assert_eq!(h.press(ToolKey::Escape), EventOutcome::Ignored);

    // Disabling twice is harmless, and re-enabling starts fresh
    h.set_enabled(false);
    h.set_enabled(true);
    assert_eq!(h.click_world(CORNER), EventOutcome::Anchored(AnchorKind::Corner));
}

#[test]
fn test_hover_reports_only_changes() {
    let mut h = cabinet_harness();
    assert!(matches!(h.hover_world(CORNER), EventOutcome::HoverChanged(Some(_))));
    assert_eq!(h.hover_world(CORNER), EventOutcome::Ignored);
    assert!(matches!(h.hover_world(EDGE_MID), EventOutcome::HoverChanged(Some(_))));
    assert_eq!(h.transient_count(), 1);
    assert_eq!(h.hover(glam::Vec2::new(5.0, 5.0)), EventOutcome::HoverChanged(None));
    assert_eq!(h.transient_count(), 0);
}

#[test]
fn test_hidden_boxes_are_not_pickable() {
    let mut h = cabinet_harness();
    h.scene.boxes[0].visible = false;
    assert_eq!(h.click_world(CORNER), EventOutcome::Ignored);
}

#[test]
fn test_kitchen_run_guides() {
    let mut h = TestHarness::new();
    h.load_scene(fixtures::kitchen_run_scene(2));
    // Front-bottom-right corner of the second base cabinet
    assert_eq!(
        h.click_world(Vec3::new(900.0, 0.0, 280.0)),
        EventOutcome::Anchored(AnchorKind::Corner)
    );
    let p = expect_point(h.type_distance("w/4"));
    assert_eq!(p.distance, 150.0);

    let json = h.export_guides_json();
    assert_eq!(json["points"].as_array().unwrap().len(), 1);
}
