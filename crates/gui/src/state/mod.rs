pub mod settings;

use shared::CabinetScene;

use crate::guides::{GuideTool, RetainedSurface};
pub use settings::{AppSettings, DimensionSettings, GuideSettings, Units};

/// Panel visibility flags
pub struct PanelVisibility {
    pub toolbar: bool,
    pub status_bar: bool,
}

impl Default for PanelVisibility {
    fn default() -> Self {
        Self {
            toolbar: true,
            status_bar: true,
        }
    }
}

/// Combined application state
pub struct AppState {
    pub scene: CabinetScene,
    pub settings: AppSettings,
    /// Construction guide tool
    pub guides: GuideTool,
    /// Hover highlights and guide previews drawn over the scene
    pub transients: RetainedSurface,
    pub panels: PanelVisibility,
    /// Show settings window
    pub show_settings_window: bool,
}

impl AppState {
    pub fn new(settings: AppSettings, scene: CabinetScene) -> Self {
        let guides = GuideTool::new(settings.guides.clone(), settings.units);
        Self {
            scene,
            settings,
            guides,
            transients: RetainedSurface::new(),
            panels: PanelVisibility::default(),
            show_settings_window: false,
        }
    }

    /// Toggle the guide tool, releasing its transients when switched off
    pub fn set_guide_tool(&mut self, enabled: bool) {
        self.guides.set_enabled(enabled, &mut self.transients);
    }

    /// Push edited settings into the tool and persist them
    pub fn apply_settings(&mut self) {
        self.guides.apply_settings(&self.settings.guides, self.settings.units);
        self.settings.save();
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppSettings::load(), CabinetScene::default())
    }
}
