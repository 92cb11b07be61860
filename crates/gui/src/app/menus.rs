//! Application menu bar and settings window

use eframe::egui;

use crate::state::{AppState, Units};
use crate::ui::toolbar;
use crate::viewport::ViewportPanel;

/// Show the file menu
pub fn file_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button("File", |ui| {
        if ui.button("New").clicked() {
            state.scene = shared::CabinetScene::default();
            state.guides.clear_all_guides();
            ui.close_menu();
        }
        if ui.button("Open scene…").clicked() {
            ui.close_menu();
            if let Some(path) = rfd::FileDialog::new()
                .set_title("Open cabinet scene")
                .add_filter("JSON", &["json"])
                .pick_file()
            {
                match std::fs::read_to_string(&path) {
                    Ok(json) => match shared::CabinetScene::from_json(&json) {
                        Ok(scene) => {
                            tracing::info!(
                                "Loaded scene from {} ({} boxes)",
                                path.display(),
                                scene.boxes.len()
                            );
                            state.scene = scene;
                        }
                        Err(e) => tracing::error!("Failed to parse scene: {e}"),
                    },
                    Err(e) => tracing::error!("Failed to read file: {e}"),
                }
            }
        }
        if ui.button("Save scene…").clicked() {
            ui.close_menu();
            if let Some(path) = rfd::FileDialog::new()
                .set_title("Save cabinet scene")
                .add_filter("JSON", &["json"])
                .set_file_name("scene.json")
                .save_file()
            {
                if let Err(e) = std::fs::write(&path, state.scene.to_json()) {
                    tracing::error!("Failed to write scene: {e}");
                } else {
                    tracing::info!("Saved scene to {}", path.display());
                }
            }
        }
        ui.separator();
        if ui.button("Export guides…").clicked() {
            ui.close_menu();
            export_guides(state);
        }
        ui.separator();
        if ui.button("Quit").clicked() {
            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

fn export_guides(state: &AppState) {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Export guides")
        .add_filter("JSON", &["json"])
        .set_file_name("guides.json")
        .save_file()
    else {
        return;
    };
    match serde_json::to_string_pretty(&state.guides.store().to_json()) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&path, json) {
                tracing::error!("Failed to write guides: {e}");
            } else {
                tracing::info!("Exported {} guides to {}", state.guides.guide_count(), path.display());
            }
        }
        Err(e) => tracing::error!("Failed to serialize guides: {e}"),
    }
}

/// Show the edit menu
pub fn edit_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button("Edit", |ui| {
        let has_guides = state.guides.guide_count() > 0;
        if ui
            .add_enabled(has_guides, egui::Button::new("Delete last guide"))
            .clicked()
        {
            toolbar::action_delete_last_guide(state);
            ui.close_menu();
        }
        if ui
            .add_enabled(has_guides, egui::Button::new("Clear all guides"))
            .clicked()
        {
            toolbar::action_clear_guides(state);
            ui.close_menu();
        }
    });
}

/// Show the view menu
pub fn view_menu(ui: &mut egui::Ui, state: &mut AppState, viewport: &mut ViewportPanel) {
    ui.menu_button("View", |ui| {
        ui.checkbox(&mut state.panels.toolbar, "Toolbar");
        ui.checkbox(&mut state.panels.status_bar, "Status bar");
        ui.checkbox(&mut state.settings.axes.visible, "World axes");
        ui.separator();
        if ui.button("Reset camera").clicked() {
            viewport.reset_camera();
            ui.close_menu();
        }
    });
}

/// Show the create menu
pub fn create_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button("Create", |ui| {
        if ui.button("Base cabinet").clicked() {
            toolbar::action_add_base_cabinet(state);
            ui.close_menu();
        }
        if ui.button("Wall cabinet").clicked() {
            toolbar::action_add_wall_cabinet(state);
            ui.close_menu();
        }
        if ui.button("Tall cabinet").clicked() {
            toolbar::action_add_tall_cabinet(state);
            ui.close_menu();
        }
    });
}

/// Show the settings menu
pub fn settings_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button("Settings", |ui| {
        if ui.button("Preferences…").clicked() {
            state.show_settings_window = true;
            ui.close_menu();
        }
    });
}

/// Settings window
pub fn settings_window(ctx: &egui::Context, state: &mut AppState) {
    let mut open = state.show_settings_window;
    egui::Window::new("Settings")
        .open(&mut open)
        .resizable(true)
        .default_width(400.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                show_general_settings(ui, state);
                show_guide_settings(ui, state);
                show_dimension_settings(ui, state);
                show_axes_settings(ui, state);
                show_viewport_settings(ui, state);
                show_ui_settings(ui, state);
                show_settings_buttons(ui, state);
            });
        });
    state.show_settings_window = open;
}

fn show_general_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("General");
    ui.horizontal(|ui| {
        ui.label("Units");
        egui::ComboBox::from_id_salt("units_combo")
            .selected_text(state.settings.units.display_name())
            .show_ui(ui, |ui| {
                for units in Units::all() {
                    ui.selectable_value(&mut state.settings.units, *units, units.display_name());
                }
            });
    });
    ui.add_space(10.0);
}

fn show_guide_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Guides");
    let guides = &mut state.settings.guides;

    let rows: [(&str, &mut f32, f32, std::ops::RangeInclusive<f32>, &str); 6] = [
        ("Corner pick radius", &mut guides.corner_radius_px, 1.0, 5.0..=100.0, " px"),
        ("Edge pick radius", &mut guides.edge_radius, 1.0, 1.0..=500.0, " mm"),
        ("Axis pick radius", &mut guides.axis_radius, 1.0, 1.0..=500.0, " mm"),
        ("Axis length", &mut guides.axis_length, 10.0, 100.0..=50_000.0, " mm"),
        ("Axis snap angle", &mut guides.inference_angle_deg, 0.5, 0.0..=45.0, "°"),
        ("Guide extension", &mut guides.guide_extension, 10.0, 0.0..=5000.0, " mm"),
    ];
    for (label, value, speed, range, suffix) in rows {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).speed(speed).range(range).suffix(suffix));
        });
    }
    ui.checkbox(&mut guides.show_distance_label, "Show distance label");
    ui.add_space(10.0);
}

fn show_axes_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Axes");
    ui.checkbox(&mut state.settings.axes.visible, "Visible");
    ui.checkbox(&mut state.settings.axes.show_labels, "Labels");
    ui.add_space(10.0);
}

fn color_row(ui: &mut egui::Ui, label: &str, rgb: &mut [u8; 3]) {
    ui.horizontal(|ui| {
        ui.label(label);
        let mut color = egui::Color32::from_rgb(rgb[0], rgb[1], rgb[2]);
        if ui.color_edit_button_srgba(&mut color).changed() {
            *rgb = [color.r(), color.g(), color.b()];
        }
    });
}

fn show_viewport_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Viewport");
    let viewport = &mut state.settings.viewport;
    color_row(ui, "Background", &mut viewport.background_color);
    color_row(ui, "Boxes", &mut viewport.box_color);
    color_row(ui, "Highlight", &mut viewport.highlight_color);
    color_row(ui, "Free guides", &mut viewport.guide_color);
    ui.add_space(10.0);
}

fn show_ui_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Interface");
    ui.horizontal(|ui| {
        ui.label("Font size");
        ui.add(
            egui::DragValue::new(&mut state.settings.ui.font_size)
                .speed(0.5)
                .range(8.0..=24.0)
                .suffix(" pt"),
        );
    });
    ui.add_space(10.0);
}

fn show_dimension_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Distance labels");

    ui.horizontal(|ui| {
        ui.label("Font size");
        ui.add(
            egui::DragValue::new(&mut state.settings.dimensions.font_size)
                .speed(0.5)
                .range(8.0..=32.0)
                .suffix(" pt"),
        );
    });

    ui.horizontal(|ui| {
        ui.label("Precision");
        ui.add(
            egui::DragValue::new(&mut state.settings.dimensions.precision)
                .speed(1.0)
                .range(0..=6),
        );
    });

    ui.checkbox(&mut state.settings.dimensions.show_units, "Show units");
    ui.add_space(10.0);
}

fn show_settings_buttons(ui: &mut egui::Ui, state: &mut AppState) {
    ui.separator();
    ui.horizontal(|ui| {
        if ui.button("Apply").clicked() {
            state.apply_settings();
        }
        if ui.button("Reset").clicked() {
            state.settings = crate::state::settings::AppSettings::default();
            state.apply_settings();
        }
        if ui.button("Close").clicked() {
            state.show_settings_window = false;
        }
    });
}
