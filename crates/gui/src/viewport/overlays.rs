//! Viewport painting: boxes, world axes, guides and transient feedback

use egui::{Color32, Painter, Pos2, Shape, Stroke};
use glam::Vec3;

use crate::guides::features::{axis_segment, Axis, BoxProvider};
use crate::guides::TransientPrimitive;
use crate::state::{AppSettings, AppState};

use super::camera::ArcBallCamera;

const DASH: f32 = 8.0;
const GAP: f32 = 5.0;

pub fn rgb(c: [u8; 3]) -> Color32 {
    Color32::from_rgb(c[0], c[1], c[2])
}

pub fn axis_color(axis: Axis) -> Color32 {
    match axis {
        Axis::X => Color32::from_rgb(220, 70, 70),
        Axis::Y => Color32::from_rgb(70, 200, 70),
        Axis::Z => Color32::from_rgb(70, 110, 220),
    }
}

fn guide_color(axis: Option<Axis>, settings: &AppSettings) -> Color32 {
    axis.map(axis_color)
        .unwrap_or_else(|| rgb(settings.viewport.guide_color))
}

/// Screen segment for a world segment; None when either end is behind the camera
fn screen_segment(
    camera: &ArcBallCamera,
    rect: egui::Rect,
    a: Vec3,
    b: Vec3,
) -> Option<[Pos2; 2]> {
    Some([camera.project(a, rect)?, camera.project(b, rect)?])
}

fn line(painter: &Painter, camera: &ArcBallCamera, rect: egui::Rect, a: Vec3, b: Vec3, stroke: Stroke) {
    if let Some(seg) = screen_segment(camera, rect, a, b) {
        painter.line_segment(seg, stroke);
    }
}

fn dashed(painter: &Painter, camera: &ArcBallCamera, rect: egui::Rect, a: Vec3, b: Vec3, stroke: Stroke) {
    if let Some(seg) = screen_segment(camera, rect, a, b) {
        painter.extend(Shape::dashed_line(&seg, stroke, DASH, GAP));
    }
}

/// World axes with optional labels at their positive ends
pub fn draw_world_axes(painter: &Painter, rect: egui::Rect, camera: &ArcBallCamera, settings: &AppSettings) {
    let length = settings.guides.axis_length;
    for axis in Axis::ALL {
        let (start, end) = axis_segment(axis, length);
        let color = axis_color(axis).gamma_multiply(0.6);
        line(painter, camera, rect, start, end, Stroke::new(1.0, color));

        if settings.axes.show_labels {
            if let Some(screen) = camera.project(end, rect) {
                if rect.contains(screen) {
                    painter.text(
                        screen,
                        egui::Align2::LEFT_BOTTOM,
                        axis.label(),
                        egui::FontId::monospace(12.0),
                        axis_color(axis),
                    );
                }
            }
        }
    }
}

/// Wireframe of every visible box
pub fn draw_boxes(painter: &Painter, rect: egui::Rect, camera: &ArcBallCamera, state: &AppState) {
    let stroke = Stroke::new(1.5, rgb(state.settings.viewport.box_color));
    for b in state.scene.list_boxes() {
        for edge in b.edges() {
            line(painter, camera, rect, edge.start, edge.end, stroke);
        }
    }
}

/// Finalized guide lines and points
pub fn draw_guides(painter: &Painter, rect: egui::Rect, camera: &ArcBallCamera, state: &AppState) {
    let store = state.guides.store();
    for guide in store.guides() {
        let color = guide_color(guide.snapped_axis, &state.settings).gamma_multiply(0.8);
        dashed(painter, camera, rect, guide.start_point, guide.end_point, Stroke::new(1.0, color));
    }
    for point in store.points() {
        if let Some(screen) = camera.project(point.position, rect) {
            let color = guide_color(point.snapped_axis, &state.settings);
            painter.circle_stroke(screen, 4.0, Stroke::new(1.5, color));
            painter.line_segment(
                [screen - egui::vec2(6.0, 0.0), screen + egui::vec2(6.0, 0.0)],
                Stroke::new(1.0, color),
            );
            painter.line_segment(
                [screen - egui::vec2(0.0, 6.0), screen + egui::vec2(0.0, 6.0)],
                Stroke::new(1.0, color),
            );
        }
    }
}

/// Hover highlights and the live guide preview
pub fn draw_transients(painter: &Painter, rect: egui::Rect, camera: &ArcBallCamera, state: &AppState) {
    let highlight = rgb(state.settings.viewport.highlight_color);

    for primitive in state.transients.iter() {
        match *primitive {
            TransientPrimitive::CornerMarker { position } => {
                if let Some(screen) = camera.project(position, rect) {
                    painter.circle_filled(screen, 5.0, highlight);
                }
            }
            TransientPrimitive::EdgeHighlight { start, end } => {
                line(painter, camera, rect, start, end, Stroke::new(3.0, highlight));
            }
            TransientPrimitive::AxisHighlight { axis, start, end } => {
                line(painter, camera, rect, start, end, Stroke::new(3.0, axis_color(axis)));
            }
            TransientPrimitive::PreviewLine { start, end, axis } => {
                let color = guide_color(axis, &state.settings);
                dashed(painter, camera, rect, start, end, Stroke::new(1.5, color));
            }
            TransientPrimitive::PreviewPoint { position, axis } => {
                if let Some(screen) = camera.project(position, rect) {
                    painter.circle_stroke(screen, 5.0, Stroke::new(2.0, guide_color(axis, &state.settings)));
                }
            }
            TransientPrimitive::OffsetLeader { from, to, axis } => {
                let color = guide_color(axis, &state.settings).gamma_multiply(0.7);
                dashed(painter, camera, rect, from, to, Stroke::new(1.0, color));
            }
            TransientPrimitive::DistanceLabel { position, distance } => {
                if let Some(screen) = camera.project(position, rect) {
                    let text = state.settings.format_length(distance);
                    let font = egui::FontId::proportional(state.settings.dimensions.font_size);
                    let galley = painter.layout_no_wrap(text, font, Color32::WHITE);
                    let bg = egui::Rect::from_center_size(screen, galley.size() + egui::vec2(8.0, 4.0));
                    painter.rect_filled(bg, 3.0, Color32::from_rgba_premultiplied(0, 0, 0, 170));
                    painter.galley(bg.min + egui::vec2(4.0, 2.0), galley, Color32::WHITE);
                }
            }
        }
    }
}
