//! Application settings

use serde::{Deserialize, Serialize};

/// Unit system for display and typed distances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Units {
    #[default]
    Millimeters,
    Centimeters,
    Meters,
    Inches,
}

impl Units {
    /// Get the abbreviation for this unit
    pub fn abbrev(&self) -> &'static str {
        match self {
            Units::Millimeters => "mm",
            Units::Centimeters => "cm",
            Units::Meters => "m",
            Units::Inches => "in",
        }
    }

    /// Get the display name for this unit
    pub fn display_name(&self) -> &'static str {
        match self {
            Units::Millimeters => "Millimeters",
            Units::Centimeters => "Centimeters",
            Units::Meters => "Meters",
            Units::Inches => "Inches",
        }
    }

    /// Conversion factor to base units (millimeters)
    pub fn to_mm(&self) -> f64 {
        match self {
            Units::Millimeters => 1.0,
            Units::Centimeters => 10.0,
            Units::Meters => 1000.0,
            Units::Inches => 25.4,
        }
    }

    /// All available units
    pub fn all() -> &'static [Units] {
        &[Units::Millimeters, Units::Centimeters, Units::Meters, Units::Inches]
    }
}

/// Construction guide tool tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideSettings {
    /// Corner pick radius in screen pixels
    pub corner_radius_px: f32,
    /// Edge pick radius in world units
    pub edge_radius: f32,
    /// World axis pick radius in world units
    pub axis_radius: f32,
    /// Length of the pickable world axis segments (centered at the origin)
    pub axis_length: f32,
    /// Maximum angle (degrees) for snapping a drag to a world axis
    pub inference_angle_deg: f32,
    /// Drags shorter than this have no direction yet
    pub min_displacement: f32,
    /// How far edge guides run past each end of their edge
    pub guide_extension: f32,
    /// Draw the offset distance next to the preview
    pub show_distance_label: bool,
}

impl Default for GuideSettings {
    fn default() -> Self {
        Self {
            corner_radius_px: 25.0,
            edge_radius: 30.0,
            axis_radius: 50.0,
            axis_length: 3000.0,
            inference_angle_deg: 5.0,
            min_displacement: 1.0,
            guide_extension: 500.0,
            show_distance_label: true,
        }
    }
}

/// Axis display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AxisSettings {
    /// Show axes
    pub visible: bool,
    /// Show axis labels (X, Y, Z)
    pub show_labels: bool,
}

impl Default for AxisSettings {
    fn default() -> Self {
        Self {
            visible: true,
            show_labels: true,
        }
    }
}

/// Viewport settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportSettings {
    /// Background color RGB
    pub background_color: [u8; 3],
    /// Box wireframe color RGB
    pub box_color: [u8; 3],
    /// Hover highlight color RGB
    pub highlight_color: [u8; 3],
    /// Finalized guide color RGB
    pub guide_color: [u8; 3],
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            background_color: [30, 30, 35],
            box_color: [200, 200, 210],
            highlight_color: [0, 220, 255],
            guide_color: [240, 170, 60],
        }
    }
}

/// UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    /// Font size in points
    pub font_size: f32,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            font_size: 14.0,
        }
    }
}

/// Dimension display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionSettings {
    /// Font size for dimension values
    pub font_size: f32,
    /// Number of decimal places for dimension values
    pub precision: usize,
    /// Show dimension units suffix
    pub show_units: bool,
}

impl Default for DimensionSettings {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            precision: 1,
            show_units: true,
        }
    }
}

/// All application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[derive(Default)]
pub struct AppSettings {
    /// Display units
    pub units: Units,
    /// Guide tool settings
    #[serde(default)]
    pub guides: GuideSettings,
    /// Axis settings
    pub axes: AxisSettings,
    /// Viewport settings
    pub viewport: ViewportSettings,
    /// UI settings
    pub ui: UiSettings,
    /// Dimension display settings
    #[serde(default)]
    pub dimensions: DimensionSettings,
}

impl AppSettings {
    /// Load settings from file, or return default if not found
    pub fn load() -> Self {
        if let Some(dirs) = directories::ProjectDirs::from("com", "caisson", "caisson") {
            let config_path = dirs.config_dir().join("settings.json");
            if let Ok(json) = std::fs::read_to_string(&config_path) {
                match serde_json::from_str(&json) {
                    Ok(settings) => return settings,
                    Err(e) => {
                        tracing::warn!("Ignoring invalid settings file {}: {e}", config_path.display())
                    }
                }
            }
        }
        Self::default()
    }

    /// Save settings to file
    pub fn save(&self) {
        if let Some(dirs) = directories::ProjectDirs::from("com", "caisson", "caisson") {
            let config_dir = dirs.config_dir();
            if std::fs::create_dir_all(config_dir).is_ok() {
                let config_path = config_dir.join("settings.json");
                if let Ok(json) = serde_json::to_string_pretty(self) {
                    if let Err(e) = std::fs::write(&config_path, json) {
                        tracing::warn!("Failed to save settings to {}: {e}", config_path.display());
                    }
                }
            }
        }
    }

    /// Format a length given in millimeters in the display units
    pub fn format_length(&self, mm: f32) -> String {
        let value = mm as f64 / self.units.to_mm();
        let precision = self.dimensions.precision;
        if self.dimensions.show_units {
            format!("{value:.precision$} {}", self.units.abbrev())
        } else {
            format!("{value:.precision$}")
        }
    }
}
