use egui::Ui;

use crate::guides::{AnchorKind, EventOutcome, Stage, ToolEvent};
use crate::state::AppState;

/// Status bar with the guide tool hint and the numeric distance entry.
/// Returns the event to dispatch when the user commits a typed distance.
pub fn show(ui: &mut Ui, state: &mut AppState, last_outcome: Option<&EventOutcome>) -> Option<ToolEvent> {
    let mut commit = None;

    ui.horizontal(|ui| {
        ui.weak(format!("Boxes: {}", state.scene.boxes.len()));
        ui.separator();
        ui.weak(format!("Guides: {}", state.guides.guide_count()));
        ui.separator();

        if !state.guides.is_enabled() {
            ui.weak("Ready");
        } else {
            let stage = state.guides.builder().stage();
            let hint = match stage {
                None => "Click a corner, an edge or an axis to start a guide",
                Some(Stage::Anchored) => "Move to set the direction, or type a distance",
                Some(Stage::Previewing) => "Click to place · ←↑→ lock axis · ↓ unlock · Esc cancel",
            };
            ui.colored_label(egui::Color32::YELLOW, hint);

            if let Some(preview) = state.guides.preview() {
                ui.separator();
                let anchor = match preview.anchor.kind() {
                    AnchorKind::Corner => "corner",
                    AnchorKind::Edge => "edge",
                    AnchorKind::Axis => "axis",
                };
                let axis = state
                    .guides
                    .locked_axis()
                    .map(|a| format!(" [{} locked]", a.label()))
                    .unwrap_or_default();
                ui.label(format!(
                    "{anchor}: {}{axis}",
                    state.settings.format_length(preview.distance)
                ));

                commit = distance_entry(ui, state);
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.weak("Caisson v0.1");
            if let Some(EventOutcome::Finalized(record)) = last_outcome {
                ui.separator();
                ui.weak(format!(
                    "Last guide: {}",
                    state.settings.format_length(record.distance())
                ));
            }
        });
    });

    commit
}

/// Text field for typed distances; Enter commits
fn distance_entry(ui: &mut Ui, state: &mut AppState) -> Option<ToolEvent> {
    let units = state.settings.units.abbrev();
    let entry = state.guides.numeric_entry_mut();

    let response = ui.add(
        egui::TextEdit::singleline(&mut entry.text)
            .hint_text(format!("distance ({units})"))
            .desired_width(110.0),
    );
    if entry.take_focus_request() {
        response.request_focus();
    }

    let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
    if submitted && !entry.text.trim().is_empty() {
        Some(ToolEvent::CommitText(entry.text.clone()))
    } else {
        None
    }
}
