//! Transient feedback: hover highlights and the live guide preview.
//!
//! The tool only decides when primitives appear and disappear; drawing is
//! left to whatever implements [`RenderSurface`].

use std::collections::BTreeMap;

use glam::Vec3;

use super::builder::{Anchor, GuidePreview, GuideShape};
use super::features::{axis_segment, Axis};
use super::hit_test::Candidate;
use crate::state::settings::GuideSettings;

pub type TransientId = u64;

#[derive(Clone, Debug, PartialEq)]
pub enum TransientPrimitive {
    CornerMarker { position: Vec3 },
    EdgeHighlight { start: Vec3, end: Vec3 },
    AxisHighlight { axis: Axis, start: Vec3, end: Vec3 },
    /// Dashed line for a guide being placed
    PreviewLine { start: Vec3, end: Vec3, axis: Option<Axis> },
    PreviewPoint { position: Vec3, axis: Option<Axis> },
    /// Dashed connector from the anchor to the offset target
    OffsetLeader { from: Vec3, to: Vec3, axis: Option<Axis> },
    /// Offset in millimeters
    DistanceLabel { position: Vec3, distance: f32 },
}

/// Scene surface owning transient draw primitives
pub trait RenderSurface {
    fn add_transient(&mut self, primitive: TransientPrimitive) -> TransientId;
    fn remove_transient(&mut self, id: TransientId);
}

/// Retained set of transients, drawn every frame by the viewport
#[derive(Debug, Default)]
pub struct RetainedSurface {
    next_id: TransientId,
    items: BTreeMap<TransientId, TransientPrimitive>,
}

impl RetainedSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TransientPrimitive> {
        self.items.values()
    }
}

impl RenderSurface for RetainedSurface {
    fn add_transient(&mut self, primitive: TransientPrimitive) -> TransientId {
        self.next_id += 1;
        self.items.insert(self.next_id, primitive);
        self.next_id
    }

    fn remove_transient(&mut self, id: TransientId) {
        self.items.remove(&id);
    }
}

/// Primitives for hovering `candidate`
pub fn highlight_primitives(candidate: &Candidate, settings: &GuideSettings) -> Vec<TransientPrimitive> {
    match *candidate {
        Candidate::Corner { position, .. } => vec![TransientPrimitive::CornerMarker { position }],
        Candidate::Edge { edge, .. } => vec![TransientPrimitive::EdgeHighlight {
            start: edge.start,
            end: edge.end,
        }],
        Candidate::Axis { axis, .. } => {
            let (start, end) = axis_segment(axis, settings.axis_length);
            vec![TransientPrimitive::AxisHighlight { axis, start, end }]
        }
    }
}

/// Primitives for a guide under construction: the anchor, the guide shape,
/// and once dragged, the offset leader with its distance label
pub fn preview_primitives(preview: &GuidePreview, settings: &GuideSettings) -> Vec<TransientPrimitive> {
    let mut out = Vec::with_capacity(4);
    let axis = preview.snapped_axis;

    out.push(match preview.anchor {
        Anchor::Corner { point } => TransientPrimitive::CornerMarker { position: point },
        Anchor::Edge { start, end, .. } => TransientPrimitive::EdgeHighlight { start, end },
        Anchor::Axis { axis, .. } => {
            let (start, end) = axis_segment(axis, settings.axis_length);
            TransientPrimitive::AxisHighlight { axis, start, end }
        }
    });

    out.push(match preview.shape(settings) {
        GuideShape::Line { start, end } => TransientPrimitive::PreviewLine { start, end, axis },
        GuideShape::Point { position } => TransientPrimitive::PreviewPoint { position, axis },
    });

    if preview.distance > 0.0 {
        let from = preview.anchor.origin();
        let to = preview.target();
        out.push(TransientPrimitive::OffsetLeader { from, to, axis });
        if settings.show_distance_label {
            out.push(TransientPrimitive::DistanceLabel {
                position: (from + to) * 0.5,
                distance: preview.distance,
            });
        }
    }

    out
}

/// Tracks which transients the guide tool currently owns on the surface
#[derive(Debug, Default)]
pub struct PreviewRenderer {
    highlight: Vec<TransientId>,
    preview: Vec<TransientId>,
}

impl PreviewRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_highlight(
        &mut self,
        surface: &mut dyn RenderSurface,
        candidate: &Candidate,
        settings: &GuideSettings,
    ) {
        self.clear_highlight(surface);
        self.highlight = highlight_primitives(candidate, settings)
            .into_iter()
            .map(|p| surface.add_transient(p))
            .collect();
    }

    pub fn clear_highlight(&mut self, surface: &mut dyn RenderSurface) {
        for id in self.highlight.drain(..) {
            surface.remove_transient(id);
        }
    }

    /// Replace the preview visuals with ones for `preview`
    pub fn show_preview(
        &mut self,
        surface: &mut dyn RenderSurface,
        preview: &GuidePreview,
        settings: &GuideSettings,
    ) {
        self.clear_preview(surface);
        self.preview = preview_primitives(preview, settings)
            .into_iter()
            .map(|p| surface.add_transient(p))
            .collect();
    }

    pub fn clear_preview(&mut self, surface: &mut dyn RenderSurface) {
        for id in self.preview.drain(..) {
            surface.remove_transient(id);
        }
    }

    /// Remove every transient this renderer added
    pub fn dispose(&mut self, surface: &mut dyn RenderSurface) {
        self.clear_highlight(surface);
        self.clear_preview(surface);
    }

    /// Number of transients currently owned
    pub fn live_count(&self) -> usize {
        self.highlight.len() + self.preview.len()
    }
}
