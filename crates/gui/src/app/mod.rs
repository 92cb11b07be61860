//! Main application module

mod keyboard;
mod menus;

use eframe::egui;

use crate::state::AppState;
use crate::ui::{status_bar, toolbar};
use crate::viewport::ViewportPanel;

/// Main application
pub struct CaissonApp {
    state: AppState,
    viewport: ViewportPanel,
    /// Last applied font size (to detect changes)
    last_font_size: f32,
}

impl CaissonApp {
    pub fn new(cc: &eframe::CreationContext<'_>, initial_scene: Option<shared::CabinetScene>) -> Self {
        let mut state = AppState::default();
        if let Some(scene) = initial_scene {
            state.scene = scene;
        }
        state.set_guide_tool(true);

        apply_style(&cc.egui_ctx, state.settings.ui.font_size);

        let last_font_size = state.settings.ui.font_size;

        Self {
            state,
            viewport: ViewportPanel::new(),
            last_font_size,
        }
    }
}

/// Dark theme with every text style scaled from the body font size
fn apply_style(ctx: &egui::Context, font_size: f32) {
    let mut style = (*ctx.style()).clone();
    style.visuals = egui::Visuals::dark();
    style.visuals.panel_fill = egui::Color32::from_rgb(30, 30, 34);
    style.visuals.window_fill = egui::Color32::from_rgb(35, 35, 40);
    style.spacing.item_spacing = egui::vec2(6.0, 4.0);

    let scaled = [
        (egui::TextStyle::Body, 1.0),
        (egui::TextStyle::Button, 1.0),
        (egui::TextStyle::Small, 0.85),
        (egui::TextStyle::Heading, 1.3),
    ];
    for (text_style, scale) in scaled {
        style
            .text_styles
            .insert(text_style, egui::FontId::proportional(font_size * scale));
    }
    style
        .text_styles
        .insert(egui::TextStyle::Monospace, egui::FontId::monospace(font_size));

    ctx.set_style(style);
}

impl eframe::App for CaissonApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply font size if changed
        if self.state.settings.ui.font_size != self.last_font_size {
            apply_style(ctx, self.state.settings.ui.font_size);
            self.last_font_size = self.state.settings.ui.font_size;
        }

        keyboard::handle_keyboard(ctx, &mut self.state, &mut self.viewport);

        // ── Menu bar ──────────────────────────────────────────
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                menus::file_menu(ui, &mut self.state);
                menus::edit_menu(ui, &mut self.state);
                menus::view_menu(ui, &mut self.state, &mut self.viewport);
                menus::create_menu(ui, &mut self.state);
                menus::settings_menu(ui, &mut self.state);
            });
        });

        // ── Settings window ──────────────────────────────────
        menus::settings_window(ctx, &mut self.state);

        // ── Toolbar ───────────────────────────────────────────
        if self.state.panels.toolbar {
            egui::TopBottomPanel::top("toolbar")
                .frame(
                    egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 4)),
                )
                .show(ctx, |ui| {
                    toolbar::show(ui, &mut self.state);
                });
        }

        // ── Status bar with distance entry ───────────────────
        if self.state.panels.status_bar {
            let commit = egui::TopBottomPanel::bottom("status_bar")
                .exact_height(26.0)
                .frame(
                    egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 2)),
                )
                .show(ctx, |ui| {
                    status_bar::show(ui, &mut self.state, self.viewport.last_outcome())
                })
                .inner;
            if let Some(event) = commit {
                self.viewport.dispatch(event, &mut self.state);
            }
        }

        // ── Central panel: 3D viewport ───────────────────────
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.viewport.show(ui, &mut self.state);
            });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.state.guides.dispose(&mut self.state.transients);
        self.state.settings.save();
    }
}
