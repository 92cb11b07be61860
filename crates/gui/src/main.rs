mod app;
mod ui;
mod viewport;

// Re-export library modules so that `crate::guides`, `crate::state`, etc.
// resolve to the lib crate types everywhere in the binary.
pub use caisson_gui_lib::fixtures;
pub use caisson_gui_lib::guides;
pub use caisson_gui_lib::state;

use app::CaissonApp;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "caisson_gui=info,caisson_gui_lib=info".into()),
        )
        .init();

    // Parse --scene <path> argument
    let initial_scene = parse_scene_arg();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Caisson cabinet designer")
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "caisson-gui",
        native_options,
        Box::new(move |cc| Ok(Box::new(CaissonApp::new(cc, initial_scene)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}

fn parse_scene_arg() -> Option<shared::CabinetScene> {
    let args: Vec<String> = std::env::args().collect();
    let pos = args.iter().position(|a| a == "--scene")?;
    let Some(path) = args.get(pos + 1) else {
        tracing::error!("--scene needs a path");
        return None;
    };
    match std::fs::read_to_string(path) {
        Ok(json) => match shared::CabinetScene::from_json(&json) {
            Ok(scene) => {
                tracing::info!("Loaded scene from {path} ({} boxes)", scene.boxes.len());
                Some(scene)
            }
            Err(e) => {
                tracing::error!("Failed to parse scene JSON from {path}: {e}");
                None
            }
        },
        Err(e) => {
            tracing::error!("Failed to read scene file {path}: {e}");
            None
        }
    }
}
