//! Keyboard shortcut handling

use eframe::egui;

use crate::guides::{ToolEvent, ToolKey};
use crate::state::AppState;
use crate::ui::toolbar;
use crate::viewport::ViewportPanel;

/// Map a pressed key to a guide tool key
fn tool_key(key: egui::Key) -> Option<ToolKey> {
    match key {
        egui::Key::Escape => Some(ToolKey::Escape),
        egui::Key::Delete => Some(ToolKey::Delete),
        egui::Key::Backspace => Some(ToolKey::Backspace),
        egui::Key::ArrowRight => Some(ToolKey::ArrowRight),
        egui::Key::ArrowUp => Some(ToolKey::ArrowUp),
        egui::Key::ArrowLeft => Some(ToolKey::ArrowLeft),
        egui::Key::ArrowDown => Some(ToolKey::ArrowDown),
        _ => None,
    }
}

/// Handle keyboard shortcuts for the application
pub fn handle_keyboard(
    ctx: &egui::Context,
    state: &mut AppState,
    viewport: &mut ViewportPanel,
) {
    // While the distance field has focus, only Escape and the axis keys reach the tool
    let text_focused = ctx.memory(|m| m.focused().is_some());

    let keys: Vec<ToolKey> = ctx.input(|i| {
        i.events
            .iter()
            .filter_map(|e| match e {
                egui::Event::Key {
                    key,
                    pressed: true,
                    repeat: false,
                    modifiers,
                    ..
                } if !modifiers.command => tool_key(*key),
                _ => None,
            })
            .filter(|k| !text_focused || !matches!(k, ToolKey::Delete | ToolKey::Backspace))
            .collect()
    });

    for key in keys {
        viewport.dispatch(ToolEvent::Key(key), state);
    }

    if text_focused {
        return;
    }

    ctx.input(|i| {
        // G: toggle the guide tool
        if i.key_pressed(egui::Key::G) && !i.modifiers.command {
            toolbar::action_toggle_guide_tool(state);
        }
        // Ctrl+Shift+Delete: clear all guides
        if i.modifiers.command && i.modifiers.shift && i.key_pressed(egui::Key::Delete) {
            toolbar::action_clear_guides(state);
        }
        // Home: reset camera
        if i.key_pressed(egui::Key::Home) {
            viewport.reset_camera();
        }
    });
}
