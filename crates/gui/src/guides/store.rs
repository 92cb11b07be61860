//! Finalized guides and guide points.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::builder::AnchorKind;
use super::features::Axis;

/// A construction line, parallel to the edge or axis it was spawned from
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Guide {
    pub id: Uuid,
    pub anchor: AnchorKind,
    pub start_point: Vec3,
    pub end_point: Vec3,
    /// Perpendicular offset from the generating edge or axis
    pub offset: Vec3,
    pub distance: f32,
    pub snapped_axis: Option<Axis>,
}

impl Guide {
    pub fn new(
        anchor: AnchorKind,
        start_point: Vec3,
        end_point: Vec3,
        offset: Vec3,
        snapped_axis: Option<Axis>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            anchor,
            start_point,
            end_point,
            offset,
            distance: offset.length(),
            snapped_axis,
        }
    }

    pub fn direction(&self) -> Vec3 {
        (self.end_point - self.start_point).normalize_or_zero()
    }
}

/// A construction point offset from a box corner
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GuidePoint {
    pub id: Uuid,
    pub position: Vec3,
    pub offset: Vec3,
    pub distance: f32,
    pub snapped_axis: Option<Axis>,
}

impl GuidePoint {
    pub fn new(position: Vec3, offset: Vec3, snapped_axis: Option<Axis>) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            offset,
            distance: offset.length(),
            snapped_axis,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GuideRecord {
    Line(Guide),
    Point(GuidePoint),
}

impl GuideRecord {
    pub fn distance(&self) -> f32 {
        match self {
            GuideRecord::Line(g) => g.distance,
            GuideRecord::Point(p) => p.distance,
        }
    }

    /// Same record with its stored distance replaced
    pub fn with_distance(mut self, distance: f32) -> Self {
        match &mut self {
            GuideRecord::Line(g) => g.distance = distance,
            GuideRecord::Point(p) => p.distance = distance,
        }
        self
    }

    pub fn snapped_axis(&self) -> Option<Axis> {
        match self {
            GuideRecord::Line(g) => g.snapped_axis,
            GuideRecord::Point(p) => p.snapped_axis,
        }
    }
}

/// Append-only guide collections with pop-last deletion
#[derive(Clone, Debug, Default)]
pub struct GuideStore {
    guides: Vec<Guide>,
    points: Vec<GuidePoint>,
    /// Bumped on every mutation
    version: u64,
}

impl GuideStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: GuideRecord) {
        match record {
            GuideRecord::Line(g) => self.guides.push(g),
            GuideRecord::Point(p) => self.points.push(p),
        }
        self.version += 1;
    }

    /// Remove the most recent point, or the most recent line if there are no points
    pub fn delete_last(&mut self) -> Option<GuideRecord> {
        let removed = match self.points.pop() {
            Some(p) => Some(GuideRecord::Point(p)),
            None => self.guides.pop().map(GuideRecord::Line),
        };
        if removed.is_some() {
            self.version += 1;
        }
        removed
    }

    /// Remove everything, returning how many guides were dropped
    pub fn clear(&mut self) -> usize {
        let count = self.len();
        self.guides.clear();
        self.points.clear();
        if count > 0 {
            self.version += 1;
        }
        count
    }

    pub fn len(&self) -> usize {
        self.guides.len() + self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn guides(&self) -> &[Guide] {
        &self.guides
    }

    pub fn points(&self) -> &[GuidePoint] {
        &self.points
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "guides": self.guides,
            "points": self.points,
        })
    }
}
