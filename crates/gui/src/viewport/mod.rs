//! 3D viewport panel: camera navigation, guide tool input and painting

pub use caisson_gui_lib::viewport::camera;
mod overlays;

use egui::Ui;
use glam::Vec2;

use crate::guides::{EventOutcome, ToolContext, ToolEvent};
use crate::state::AppState;
use camera::ArcBallCamera;

/// 3D viewport panel
pub struct ViewportPanel {
    camera: ArcBallCamera,
    /// Viewport rectangle of the last frame
    rect: egui::Rect,
    /// Last pointer position forwarded to the guide tool
    last_pointer: Option<egui::Pos2>,
    /// Outcome of the last event that did something, shown in the status bar
    last_outcome: Option<EventOutcome>,
}

impl ViewportPanel {
    pub fn new() -> Self {
        Self {
            camera: ArcBallCamera::new(),
            rect: egui::Rect::NOTHING,
            last_pointer: None,
            last_outcome: None,
        }
    }

    pub fn reset_camera(&mut self) {
        self.camera = ArcBallCamera::new();
    }

    pub fn last_outcome(&self) -> Option<&EventOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn show(&mut self, ui: &mut Ui, state: &mut AppState) {
        let (rect, response) = ui.allocate_exact_size(
            ui.available_size(),
            egui::Sense::click_and_drag(),
        );
        self.rect = rect;

        // ── Camera controls ─────────────────────────────
        let orbiting = response.dragged_by(egui::PointerButton::Secondary)
            || (response.dragged_by(egui::PointerButton::Primary) && ui.input(|i| i.modifiers.alt));
        if orbiting {
            let delta = response.drag_delta();
            self.camera.rotate(delta.x * 0.5, delta.y * 0.5);
        }
        if response.dragged_by(egui::PointerButton::Middle) {
            let delta = response.drag_delta();
            self.camera.pan(-delta.x, delta.y);
        }

        let scroll = ui.input(|i| i.smooth_scroll_delta.y);
        if response.hovered() && scroll.abs() > 0.1 {
            self.camera.zoom(scroll * 0.002);
        }

        // ── Guide tool input ─────────────────────────────
        if !orbiting {
            self.forward_pointer(ui, &response, state);
        }

        if !ui.is_rect_visible(rect) {
            return;
        }

        self.draw_overlays(ui, rect, state);
    }

    fn forward_pointer(
        &mut self,
        ui: &Ui,
        response: &egui::Response,
        state: &mut AppState,
    ) {
        let hover = response.hover_pos();
        if let Some(pos) = hover {
            if self.last_pointer != Some(pos) {
                self.last_pointer = Some(pos);
                self.dispatch(ToolEvent::PointerMove(Vec2::new(pos.x, pos.y)), state);
            }
        }

        let pressed = ui.input(|i| {
            i.pointer.button_pressed(egui::PointerButton::Primary) && !i.modifiers.alt
        });
        if pressed {
            if let Some(pos) = hover {
                self.dispatch(ToolEvent::PointerDown(Vec2::new(pos.x, pos.y)), state);
            }
        }
    }

    /// Route one event to the guide tool with the current camera
    pub fn dispatch(&mut self, event: ToolEvent, state: &mut AppState) {
        let view = self.camera.view(self.rect);
        let mut ctx = ToolContext {
            boxes: &state.scene,
            projector: &view,
            surface: &mut state.transients,
        };
        let outcome = state.guides.handle(event, &mut ctx);
        if outcome != EventOutcome::Ignored {
            self.last_outcome = Some(outcome);
        }
    }

    fn draw_overlays(&self, ui: &mut Ui, rect: egui::Rect, state: &AppState) {
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, overlays::rgb(state.settings.viewport.background_color));

        if state.settings.axes.visible {
            overlays::draw_world_axes(&painter, rect, &self.camera, &state.settings);
        }
        overlays::draw_boxes(&painter, rect, &self.camera, state);
        overlays::draw_guides(&painter, rect, &self.camera, state);
        overlays::draw_transients(&painter, rect, &self.camera, state);

        if state.scene.boxes.is_empty() {
            painter.text(
                egui::pos2(rect.center().x, rect.bottom() - 20.0),
                egui::Align2::CENTER_BOTTOM,
                "Right drag: orbit · Middle drag: pan · Scroll: zoom",
                egui::FontId::proportional(11.0),
                egui::Color32::from_rgb(100, 100, 110),
            );
        }
    }
}
