//! Corners, edges and world axes derived from cabinet boxes.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use shared::{CabinetBox, CabinetScene, DistanceVariables};

/// World axis
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Positive unit direction
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }

    /// Corner-index bit mask that varies along this axis
    fn corner_bit(self) -> usize {
        match self {
            Axis::X => 1,
            Axis::Y => 2,
            Axis::Z => 4,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Horizontal,
    Vertical,
}

/// A box edge, running from its negative end to its positive end along `axis`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub start: Vec3,
    pub end: Vec3,
    pub axis: Axis,
}

impl Edge {
    pub fn kind(&self) -> EdgeKind {
        match self.axis {
            Axis::Y => EdgeKind::Vertical,
            Axis::X | Axis::Z => EdgeKind::Horizontal,
        }
    }

    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    pub fn direction(&self) -> Vec3 {
        (self.end - self.start).normalize_or_zero()
    }

    pub fn midpoint(&self) -> Vec3 {
        (self.start + self.end) * 0.5
    }
}

/// Box geometry in viewport space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxGeometry {
    /// Footprint center at floor level
    pub position: Vec3,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl BoxGeometry {
    pub fn new(position: Vec3, width: f32, height: f32, depth: f32) -> Self {
        Self {
            position,
            width,
            height,
            depth,
        }
    }

    pub fn from_cabinet(cabinet: &CabinetBox) -> Self {
        Self {
            position: Vec3::new(
                cabinet.position[0] as f32,
                cabinet.position[1] as f32,
                cabinet.position[2] as f32,
            ),
            width: cabinet.width as f32,
            height: cabinet.height as f32,
            depth: cabinet.depth as f32,
        }
    }

    /// Corner `index`: bit 0 selects +X, bit 1 the top, bit 2 +Z.
    pub fn corner(&self, index: usize) -> Vec3 {
        let hx = self.width / 2.0;
        let hz = self.depth / 2.0;
        let x = if index & 1 != 0 { hx } else { -hx };
        let y = if index & 2 != 0 { self.height } else { 0.0 };
        let z = if index & 4 != 0 { hz } else { -hz };
        self.position + Vec3::new(x, y, z)
    }

    pub fn corners(&self) -> [Vec3; 8] {
        std::array::from_fn(|i| self.corner(i))
    }

    /// The 12 edges, four per axis, in X, Y, Z order
    pub fn edges(&self) -> [Edge; 12] {
        let mut edges = [Edge {
            start: Vec3::ZERO,
            end: Vec3::ZERO,
            axis: Axis::X,
        }; 12];
        let mut n = 0;
        for axis in Axis::ALL {
            let bit = axis.corner_bit();
            for i in (0..8).filter(|i| i & bit == 0) {
                edges[n] = Edge {
                    start: self.corner(i),
                    end: self.corner(i | bit),
                    axis,
                };
                n += 1;
            }
        }
        edges
    }

    pub fn distance_variables(&self) -> DistanceVariables {
        DistanceVariables {
            width: Some(self.width as f64),
            height: Some(self.height as f64),
            depth: Some(self.depth as f64),
        }
    }
}

/// Source of the boxes guides can be anchored to.
/// Queried for a fresh snapshot on every hit test.
pub trait BoxProvider {
    fn list_boxes(&self) -> Vec<BoxGeometry>;
}

impl BoxProvider for CabinetScene {
    fn list_boxes(&self) -> Vec<BoxGeometry> {
        self.visible_boxes().map(BoxGeometry::from_cabinet).collect()
    }
}

impl BoxProvider for Vec<BoxGeometry> {
    fn list_boxes(&self) -> Vec<BoxGeometry> {
        self.clone()
    }
}

/// World axis as a finite segment centered at the origin
pub fn axis_segment(axis: Axis, length: f32) -> (Vec3, Vec3) {
    let half = axis.unit() * (length / 2.0);
    (-half, half)
}
