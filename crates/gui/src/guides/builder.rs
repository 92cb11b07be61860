//! Guide construction state machine.
//!
//! `Idle` until an anchor is picked, then `Anchored` until the pointer has
//! dragged a meaningful distance, then `Previewing`. A second click or a
//! typed distance finalizes; cancel drops the construction. Both return to
//! `Idle`.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use shared::DistanceVariables;

use super::features::{axis_segment, Axis};
use super::hit_test::Candidate;
use super::inference::{default_direction_for, resolve_axis};
use super::store::{Guide, GuidePoint, GuideRecord};
use crate::state::settings::GuideSettings;
use crate::viewport::picking::{ray_plane, Ray};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorKind {
    Corner,
    Edge,
    Axis,
}

/// What a guide under construction is attached to
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Anchor {
    /// Point guides start from a box corner
    Corner { point: Vec3 },
    /// Line guides parallel to a box edge; `pick` is where the edge was clicked
    Edge {
        start: Vec3,
        end: Vec3,
        axis: Axis,
        pick: Vec3,
    },
    /// Line guides parallel to a world axis
    Axis { axis: Axis, pick: Vec3 },
}

impl Anchor {
    pub fn from_candidate(candidate: &Candidate) -> Self {
        match *candidate {
            Candidate::Corner { position, .. } => Anchor::Corner { point: position },
            Candidate::Edge { edge, point, .. } => Anchor::Edge {
                start: edge.start,
                end: edge.end,
                axis: edge.axis,
                pick: point,
            },
            Candidate::Axis { axis, point, .. } => Anchor::Axis { axis, pick: point },
        }
    }

    pub fn kind(&self) -> AnchorKind {
        match self {
            Anchor::Corner { .. } => AnchorKind::Corner,
            Anchor::Edge { .. } => AnchorKind::Edge,
            Anchor::Axis { .. } => AnchorKind::Axis,
        }
    }

    /// Point the drag plane passes through
    pub fn origin(&self) -> Vec3 {
        match *self {
            Anchor::Corner { point } => point,
            Anchor::Edge { pick, .. } | Anchor::Axis { pick, .. } => pick,
        }
    }

    /// Axis the anchor runs along; None for corners
    pub fn orientation(&self) -> Option<Axis> {
        match *self {
            Anchor::Corner { .. } => None,
            Anchor::Edge { axis, .. } | Anchor::Axis { axis, .. } => Some(axis),
        }
    }

    /// Direction a line guide must stay parallel to
    pub fn direction(&self) -> Option<Vec3> {
        match *self {
            Anchor::Corner { .. } => None,
            Anchor::Edge { start, end, .. } => Some((end - start).normalize_or_zero()),
            Anchor::Axis { axis, .. } => Some(axis.unit()),
        }
    }
}

/// Live state of the guide being built
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GuidePreview {
    pub anchor: Anchor,
    /// Offset from the anchor, already axis-constrained
    pub displacement: Vec3,
    pub snapped_axis: Option<Axis>,
    /// Length of `displacement`, or exactly the typed value once one is committed
    pub distance: f32,
}

/// Geometry a preview would finalize into
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GuideShape {
    Line { start: Vec3, end: Vec3 },
    Point { position: Vec3 },
}

impl GuidePreview {
    fn new(anchor: Anchor) -> Self {
        Self {
            anchor,
            displacement: Vec3::ZERO,
            snapped_axis: None,
            distance: 0.0,
        }
    }

    fn set_displacement(&mut self, displacement: Vec3, axis: Option<Axis>) {
        self.displacement = displacement;
        self.snapped_axis = axis;
        self.distance = displacement.length();
    }

    /// Where the anchored feature ends up after the offset
    pub fn target(&self) -> Vec3 {
        self.anchor.origin() + self.displacement
    }

    pub fn shape(&self, settings: &GuideSettings) -> GuideShape {
        let d = self.displacement;
        match self.anchor {
            Anchor::Corner { point } => GuideShape::Point { position: point + d },
            Anchor::Edge { start, end, .. } => {
                let ext = (end - start).normalize_or_zero() * settings.guide_extension;
                GuideShape::Line {
                    start: start - ext + d,
                    end: end + ext + d,
                }
            }
            Anchor::Axis { axis, .. } => {
                let (start, end) = axis_segment(axis, settings.axis_length);
                GuideShape::Line {
                    start: start + d,
                    end: end + d,
                }
            }
        }
    }

    fn into_record(self, settings: &GuideSettings) -> GuideRecord {
        let record = match self.shape(settings) {
            GuideShape::Point { position } => GuideRecord::Point(GuidePoint::new(
                position,
                self.displacement,
                self.snapped_axis,
            )),
            GuideShape::Line { start, end } => GuideRecord::Line(Guide::new(
                self.anchor.kind(),
                start,
                end,
                self.displacement,
                self.snapped_axis,
            )),
        };
        record.with_distance(self.distance)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Anchor chosen, no meaningful drag yet
    Anchored,
    Previewing,
}

#[derive(Clone, Debug)]
struct Construction {
    preview: GuidePreview,
    stage: Stage,
    locked_axis: Option<Axis>,
    /// Unit drag direction, zero until established
    move_direction: Vec3,
    variables: DistanceVariables,
}

#[derive(Clone, Debug, Default)]
enum Phase {
    #[default]
    Idle,
    Active(Construction),
}

/// Builds one guide at a time from an anchor, pointer drags, locks and typed distances
#[derive(Clone, Debug)]
pub struct GuideBuilder {
    settings: GuideSettings,
    phase: Phase,
}

impl GuideBuilder {
    pub fn new(settings: GuideSettings) -> Self {
        Self {
            settings,
            phase: Phase::Idle,
        }
    }

    pub fn settings(&self) -> &GuideSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: GuideSettings) {
        self.settings = settings;
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }

    pub fn stage(&self) -> Option<Stage> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Active(c) => Some(c.stage),
        }
    }

    pub fn preview(&self) -> Option<&GuidePreview> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Active(c) => Some(&c.preview),
        }
    }

    pub fn locked_axis(&self) -> Option<Axis> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Active(c) => c.locked_axis,
        }
    }

    pub fn move_direction(&self) -> Option<Vec3> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Active(c) => Some(c.move_direction),
        }
    }

    /// Variables for formulas typed against this anchor
    pub fn variables(&self) -> DistanceVariables {
        match &self.phase {
            Phase::Idle => DistanceVariables::default(),
            Phase::Active(c) => c.variables,
        }
    }

    /// Start a construction on `candidate`, discarding any current one
    pub fn anchor(&mut self, candidate: &Candidate, variables: DistanceVariables) -> AnchorKind {
        let anchor = Anchor::from_candidate(candidate);
        tracing::debug!("Guide anchored on {:?}", anchor.kind());
        self.phase = Phase::Active(Construction {
            preview: GuidePreview::new(anchor),
            stage: Stage::Anchored,
            locked_axis: None,
            move_direction: Vec3::ZERO,
            variables,
        });
        anchor.kind()
    }

    /// Recompute the preview from a pointer ray. Returns whether it changed.
    ///
    /// The ray is intersected with the camera-facing plane through the
    /// anchor. Line guides drop the component along their own direction.
    pub fn track(&mut self, ray: &Ray, view_direction: Vec3) -> bool {
        let threshold = self.settings.inference_angle_deg;
        let min_displacement = self.settings.min_displacement;
        let Phase::Active(c) = &mut self.phase else {
            return false;
        };

        let origin = c.preview.anchor.origin();
        let Some(hit) = ray_plane(ray, origin, view_direction) else {
            tracing::debug!("Pointer ray misses the drag plane, keeping last preview");
            return false;
        };

        let mut raw = hit - origin;
        if let Some(dir) = c.preview.anchor.direction() {
            raw -= dir * raw.dot(dir);
        }
        if raw.length() < min_displacement {
            return false;
        }

        let resolved = resolve_axis(raw, c.locked_axis, threshold);
        if resolved.displacement.length() < min_displacement {
            // Nothing left along the locked axis
            if c.stage == Stage::Previewing {
                c.preview.set_displacement(Vec3::ZERO, c.locked_axis);
                c.stage = Stage::Anchored;
                return true;
            }
            return false;
        }
        c.move_direction = resolved.direction;
        c.preview.set_displacement(resolved.displacement, resolved.axis);
        c.stage = Stage::Previewing;
        true
    }

    /// Lock (or with None, unlock) the drag axis. Returns whether the lock changed.
    ///
    /// Locking a line guide to the axis it runs along is refused since it can
    /// only move perpendicular to it.
    pub fn lock_axis(&mut self, axis: Option<Axis>) -> bool {
        let Phase::Active(c) = &mut self.phase else {
            return false;
        };
        if axis.is_some() && axis == c.preview.anchor.orientation() {
            tracing::debug!("Refusing lock along the anchor's own axis {:?}", axis);
            return false;
        }
        if c.locked_axis == axis {
            return false;
        }
        tracing::debug!("Axis lock {:?} -> {:?}", c.locked_axis, axis);
        c.locked_axis = axis;
        true
    }

    /// Finalize from the current preview. Only valid once previewing.
    pub fn finalize(&mut self) -> Option<GuideRecord> {
        match &self.phase {
            Phase::Active(c) if c.stage == Stage::Previewing => {}
            _ => return None,
        }
        let Phase::Active(c) = std::mem::take(&mut self.phase) else {
            return None;
        };
        Some(c.preview.into_record(&self.settings))
    }

    /// Finalize with a typed offset in millimeters.
    ///
    /// The offset runs along the current drag direction (the locked axis,
    /// or the default direction when nothing is established yet). Negative
    /// values flip it. Zero and non-finite values are ignored.
    pub fn commit_distance(&mut self, distance: f32) -> Option<GuideRecord> {
        if !distance.is_finite() || distance == 0.0 {
            tracing::debug!("Ignoring typed distance {distance}");
            return None;
        }
        let Phase::Active(c) = &mut self.phase else {
            return None;
        };

        let (direction, axis) = if let Some(lock) = c.locked_axis {
            let unit = lock.unit();
            let sign = if c.move_direction.dot(unit) < 0.0 { -1.0 } else { 1.0 };
            (unit * sign, Some(lock))
        } else if c.move_direction.length_squared() < 1e-12 {
            let (dir, axis) = default_direction_for(c.preview.anchor.orientation());
            (dir, Some(axis))
        } else {
            (c.move_direction, c.preview.snapped_axis)
        };

        c.preview.set_displacement(direction * distance, axis);
        // Keep the typed magnitude exactly
        c.preview.distance = distance.abs();
        c.stage = Stage::Previewing;
        self.finalize()
    }

    /// Drop the construction. Returns false if already idle.
    pub fn cancel(&mut self) -> bool {
        let was_active = !self.is_idle();
        self.phase = Phase::Idle;
        was_active
    }
}
