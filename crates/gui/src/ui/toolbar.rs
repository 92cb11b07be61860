//! Toolbar actions and UI

use egui::Ui;
use shared::CabinetBox;

use crate::fixtures;
use crate::state::AppState;

// ── Public actions (callable from menus and shortcuts too) ───

pub fn action_add_base_cabinet(state: &mut AppState) {
    let id = next_id(state, "base");
    let x = next_free_x(state);
    add_cabinet(state, fixtures::base_cabinet_at(&id, [x, 0.0, 0.0]));
}

pub fn action_add_wall_cabinet(state: &mut AppState) {
    let id = next_id(state, "wall");
    let x = next_free_x(state);
    add_cabinet(state, fixtures::wall_cabinet(&id, x));
}

pub fn action_add_tall_cabinet(state: &mut AppState) {
    let id = next_id(state, "tall");
    let x = next_free_x(state);
    add_cabinet(state, fixtures::tall_cabinet(&id, x));
}

pub fn action_toggle_guide_tool(state: &mut AppState) {
    let enabled = !state.guides.is_enabled();
    state.set_guide_tool(enabled);
    tracing::info!("Guide tool {}", if enabled { "on" } else { "off" });
}

pub fn action_delete_last_guide(state: &mut AppState) {
    if state.guides.delete_last_guide().is_none() {
        tracing::debug!("No guide to delete");
    }
}

pub fn action_clear_guides(state: &mut AppState) {
    state.guides.clear_all_guides();
}

// ── Toolbar UI ───────────────────────────────────────────────

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.menu_button("Cabinets", |ui| {
            if ui.button("Base cabinet").on_hover_text("600 x 720 x 560").clicked() {
                action_add_base_cabinet(state);
                ui.close_menu();
            }
            if ui.button("Wall cabinet").on_hover_text("600 x 720 x 320").clicked() {
                action_add_wall_cabinet(state);
                ui.close_menu();
            }
            if ui.button("Tall cabinet").on_hover_text("600 x 2100 x 560").clicked() {
                action_add_tall_cabinet(state);
                ui.close_menu();
            }
        });

        ui.separator();

        let enabled = state.guides.is_enabled();
        if ui
            .selectable_label(enabled, "Guides")
            .on_hover_text("Anchor guides on box corners, box edges or world axes (G)")
            .clicked()
        {
            action_toggle_guide_tool(state);
        }

        let has_guides = state.guides.guide_count() > 0;
        if ui
            .add_enabled(has_guides, egui::Button::new("Undo guide"))
            .on_hover_text("Remove the last guide (Delete)")
            .clicked()
        {
            action_delete_last_guide(state);
        }
        if ui
            .add_enabled(has_guides, egui::Button::new("Clear guides"))
            .clicked()
        {
            action_clear_guides(state);
        }
    });
}

// ── Helpers ──────────────────────────────────────────────────

fn add_cabinet(state: &mut AppState, cabinet: CabinetBox) {
    let id = state.scene.add_box(cabinet);
    tracing::info!("Added cabinet {id}");
}

fn next_id(state: &AppState, prefix: &str) -> String {
    let n = state
        .scene
        .boxes
        .iter()
        .filter(|b| b.id.starts_with(prefix))
        .count();
    format!("{prefix}{}", n + 1)
}

/// Footprint center X just right of every existing box
fn next_free_x(state: &AppState) -> f64 {
    state
        .scene
        .boxes
        .iter()
        .map(|b| b.max_corner()[0])
        .fold(None, |acc: Option<f64>, x| Some(acc.map_or(x, |a| a.max(x))))
        .map_or(0.0, |right| right + 300.0)
}
