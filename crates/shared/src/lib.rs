use serde::{Deserialize, Serialize};

pub mod parameters;

pub use parameters::{evaluate_distance, DistanceInputError, DistanceVariables};

pub type BoxId = String;

fn default_true() -> bool {
    true
}

fn default_version() -> String {
    "1".to_string()
}

/// A cabinet carcass ("caisson") as owned by the cabinet manager.
///
/// `position` is the center of the box footprint at floor level, so the box
/// spans `position.y ..= position.y + height` vertically. All lengths are
/// millimeters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CabinetBox {
    pub id: BoxId,
    #[serde(default)]
    pub name: String,
    pub position: [f64; 3],
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    /// Hidden boxes are skipped by picking and drawing
    #[serde(default = "default_true")]
    pub visible: bool,
}

impl CabinetBox {
    pub fn new(id: impl Into<String>, width: f64, height: f64, depth: f64) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            position: [0.0; 3],
            width,
            height,
            depth,
            visible: true,
        }
    }

    /// Same box moved to `position`
    pub fn at(mut self, position: [f64; 3]) -> Self {
        self.position = position;
        self
    }

    /// Minimum corner (x-, floor, z-)
    pub fn min_corner(&self) -> [f64; 3] {
        [
            self.position[0] - self.width / 2.0,
            self.position[1],
            self.position[2] - self.depth / 2.0,
        ]
    }

    /// Maximum corner (x+, top, z+)
    pub fn max_corner(&self) -> [f64; 3] {
        [
            self.position[0] + self.width / 2.0,
            self.position[1] + self.height,
            self.position[2] + self.depth / 2.0,
        ]
    }
}

/// Snapshot of the boxes in the designer, in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CabinetScene {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub boxes: Vec<CabinetBox>,
}

impl Default for CabinetScene {
    fn default() -> Self {
        Self {
            version: default_version(),
            boxes: Vec::new(),
        }
    }
}

impl CabinetScene {
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("JSON parse error: {e}"))
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    pub fn find(&self, id: &str) -> Option<&CabinetBox> {
        self.boxes.iter().find(|b| b.id == id)
    }

    pub fn visible_boxes(&self) -> impl Iterator<Item = &CabinetBox> {
        self.boxes.iter().filter(|b| b.visible)
    }

    /// Add a box, returning its id. Empty ids get a sequential one.
    pub fn add_box(&mut self, mut cabinet: CabinetBox) -> BoxId {
        if cabinet.id.is_empty() {
            cabinet.id = format!("box{}", self.boxes.len() + 1);
        }
        let id = cabinet.id.clone();
        self.boxes.push(cabinet);
        id
    }

    pub fn remove_box(&mut self, id: &str) -> bool {
        let before = self.boxes.len();
        self.boxes.retain(|b| b.id != id);
        self.boxes.len() != before
    }
}
