//! Construction guide tool.
//!
//! Anchor a guide on a box corner, a box edge or a world axis, then drag or
//! type its offset. Edge and axis guides are lines that can only move
//! perpendicular to what they were spawned from; corner guides are points.

pub mod builder;
pub mod features;
pub mod hit_test;
pub mod inference;
pub mod preview;
pub mod store;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use shared::{evaluate_distance, DistanceVariables};

use crate::state::settings::{GuideSettings, Units};
use crate::viewport::picking::Ray;
pub use builder::{Anchor, AnchorKind, GuideBuilder, GuidePreview, Stage};
pub use features::{Axis, BoxGeometry, BoxProvider};
pub use hit_test::{Candidate, CandidateKey, HitTester};
pub use preview::{PreviewRenderer, RenderSurface, RetainedSurface, TransientPrimitive};
pub use store::{Guide, GuidePoint, GuideRecord, GuideStore};

/// Camera collaborator used for picking
pub trait Projector {
    /// World ray under a screen position
    fn screen_to_ray(&self, pointer: Vec2) -> Ray;
    /// Screen position of a world point, None when behind the camera
    fn project(&self, point: Vec3) -> Option<Vec2>;
    /// Unit view direction, normal of the drag plane
    fn view_direction(&self) -> Vec3;
}

/// Collaborators the tool needs while handling one event
pub struct ToolContext<'a> {
    pub boxes: &'a dyn BoxProvider,
    pub projector: &'a dyn Projector,
    pub surface: &'a mut dyn RenderSurface,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKey {
    Escape,
    Delete,
    Backspace,
    ArrowRight,
    ArrowUp,
    ArrowLeft,
    ArrowDown,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ToolEvent {
    PointerMove(Vec2),
    PointerDown(Vec2),
    Key(ToolKey),
    /// Committed text of the numeric entry field, in display units
    CommitText(String),
    /// Committed distance in millimeters
    CommitDistance(f32),
}

/// What handling an event did
#[derive(Clone, Debug, PartialEq)]
pub enum EventOutcome {
    Ignored,
    HoverChanged(Option<CandidateKey>),
    Anchored(AnchorKind),
    PreviewUpdated,
    LockChanged(Option<Axis>),
    Finalized(GuideRecord),
    Cancelled,
    Deleted(GuideRecord),
}

/// Text of the numeric entry widget plus the tool's requests to it
#[derive(Clone, Debug, Default)]
pub struct NumericEntry {
    pub text: String,
    focus_requested: bool,
}

impl NumericEntry {
    fn reset(&mut self, focus: bool) {
        self.text.clear();
        self.focus_requested = focus;
    }

    /// Returns true once after the tool asked for focus
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }
}

/// Per-activation input state; exists only while the tool is enabled
#[derive(Debug, Default)]
struct InputSession {
    hovered: Option<CandidateKey>,
    last_pointer: Option<Vec2>,
}

/// The guide tool: hit testing, construction, storage and transient feedback
pub struct GuideTool {
    settings: GuideSettings,
    units: Units,
    hit_tester: HitTester,
    builder: GuideBuilder,
    store: GuideStore,
    renderer: PreviewRenderer,
    entry: NumericEntry,
    session: Option<InputSession>,
}

impl GuideTool {
    pub fn new(settings: GuideSettings, units: Units) -> Self {
        Self {
            hit_tester: HitTester::from_settings(&settings),
            builder: GuideBuilder::new(settings.clone()),
            settings,
            units,
            store: GuideStore::new(),
            renderer: PreviewRenderer::new(),
            entry: NumericEntry::default(),
            session: None,
        }
    }

    pub fn apply_settings(&mut self, settings: &GuideSettings, units: Units) {
        if *settings != self.settings {
            self.hit_tester = HitTester::from_settings(settings);
            self.builder.set_settings(settings.clone());
            self.settings = settings.clone();
        }
        self.units = units;
    }

    pub fn settings(&self) -> &GuideSettings {
        &self.settings
    }

    pub fn is_enabled(&self) -> bool {
        self.session.is_some()
    }

    /// Activate or deactivate input handling. Deactivating cancels any
    /// construction and removes all transients. Idempotent.
    pub fn set_enabled(&mut self, enabled: bool, surface: &mut dyn RenderSurface) {
        match (enabled, self.session.is_some()) {
            (true, false) => {
                tracing::debug!("Guide tool enabled");
                self.session = Some(InputSession::default());
            }
            (false, true) => {
                tracing::debug!("Guide tool disabled");
                self.builder.cancel();
                self.renderer.dispose(surface);
                self.entry.reset(false);
                self.session = None;
            }
            _ => {}
        }
    }

    pub fn guide_count(&self) -> usize {
        self.store.len()
    }

    pub fn store(&self) -> &GuideStore {
        &self.store
    }

    pub fn builder(&self) -> &GuideBuilder {
        &self.builder
    }

    pub fn preview(&self) -> Option<&GuidePreview> {
        self.builder.preview()
    }

    pub fn locked_axis(&self) -> Option<Axis> {
        self.builder.locked_axis()
    }

    pub fn numeric_entry(&self) -> &NumericEntry {
        &self.entry
    }

    pub fn numeric_entry_mut(&mut self) -> &mut NumericEntry {
        &mut self.entry
    }

    /// Transients currently owned on the render surface
    pub fn transient_count(&self) -> usize {
        self.renderer.live_count()
    }

    /// Pop the most recent guide point, else the most recent guide line
    pub fn delete_last_guide(&mut self) -> Option<GuideRecord> {
        let removed = self.store.delete_last();
        if let Some(record) = &removed {
            tracing::info!("Deleted guide ({} mm)", record.distance());
        }
        removed
    }

    pub fn clear_all_guides(&mut self) -> usize {
        let count = self.store.clear();
        if count > 0 {
            tracing::info!("Cleared {count} guides");
        }
        count
    }

    /// Release the input session, all transients and all guides
    pub fn dispose(&mut self, surface: &mut dyn RenderSurface) {
        self.set_enabled(false, surface);
        self.store.clear();
    }

    /// Dispatch one input event. Events are ignored while disabled.
    pub fn handle(&mut self, event: ToolEvent, ctx: &mut ToolContext<'_>) -> EventOutcome {
        if self.session.is_none() {
            return EventOutcome::Ignored;
        }
        match event {
            ToolEvent::PointerMove(pos) => self.pointer_move(pos, ctx),
            ToolEvent::PointerDown(pos) => self.pointer_down(pos, ctx),
            ToolEvent::Key(key) => self.key(key, ctx),
            ToolEvent::CommitText(text) => self.commit_text(&text, ctx),
            ToolEvent::CommitDistance(mm) => self.commit_distance(mm, ctx),
        }
    }

    fn pointer_move(&mut self, pos: Vec2, ctx: &mut ToolContext<'_>) -> EventOutcome {
        if let Some(session) = self.session.as_mut() {
            session.last_pointer = Some(pos);
        }

        if self.builder.is_idle() {
            return self.update_hover(pos, ctx);
        }

        let ray = ctx.projector.screen_to_ray(pos);
        if self.builder.track(&ray, ctx.projector.view_direction()) {
            self.refresh_preview(ctx);
            EventOutcome::PreviewUpdated
        } else {
            EventOutcome::Ignored
        }
    }

    fn update_hover(&mut self, pos: Vec2, ctx: &mut ToolContext<'_>) -> EventOutcome {
        let boxes = ctx.boxes.list_boxes();
        let candidate = self.hit_tester.pick(pos, ctx.projector, &boxes);
        let key = candidate.as_ref().map(Candidate::key);

        let Some(session) = self.session.as_mut() else {
            return EventOutcome::Ignored;
        };
        if session.hovered == key {
            return EventOutcome::Ignored;
        }
        session.hovered = key;

        match &candidate {
            Some(c) => self.renderer.show_highlight(ctx.surface, c, &self.settings),
            None => self.renderer.clear_highlight(ctx.surface),
        }
        EventOutcome::HoverChanged(key)
    }

    fn pointer_down(&mut self, pos: Vec2, ctx: &mut ToolContext<'_>) -> EventOutcome {
        if let Some(session) = self.session.as_mut() {
            session.last_pointer = Some(pos);
        }

        match self.builder.stage() {
            Some(Stage::Previewing) => match self.builder.finalize() {
                Some(record) => self.store_record(record, ctx),
                None => EventOutcome::Ignored,
            },
            // Second click before any drag
            Some(Stage::Anchored) => EventOutcome::Ignored,
            None => self.start_construction(pos, ctx),
        }
    }

    fn start_construction(&mut self, pos: Vec2, ctx: &mut ToolContext<'_>) -> EventOutcome {
        let boxes = ctx.boxes.list_boxes();
        let Some(candidate) = self.hit_tester.pick(pos, ctx.projector, &boxes) else {
            return EventOutcome::Ignored;
        };

        let variables = candidate
            .box_index()
            .and_then(|i| boxes.get(i))
            .map(BoxGeometry::distance_variables)
            .unwrap_or_default();

        self.renderer.dispose(ctx.surface);
        if let Some(session) = self.session.as_mut() {
            session.hovered = None;
        }

        let kind = self.builder.anchor(&candidate, variables);
        self.entry.reset(true);
        self.refresh_preview(ctx);
        EventOutcome::Anchored(kind)
    }

    fn key(&mut self, key: ToolKey, ctx: &mut ToolContext<'_>) -> EventOutcome {
        match key {
            ToolKey::Escape => {
                if self.builder.cancel() {
                    tracing::debug!("Guide creation cancelled");
                    self.renderer.clear_preview(ctx.surface);
                    self.entry.reset(false);
                    EventOutcome::Cancelled
                } else {
                    EventOutcome::Ignored
                }
            }
            ToolKey::Delete | ToolKey::Backspace => match self.delete_last_guide() {
                Some(record) => EventOutcome::Deleted(record),
                None => EventOutcome::Ignored,
            },
            ToolKey::ArrowRight => self.lock(Some(Axis::X), ctx),
            ToolKey::ArrowUp => self.lock(Some(Axis::Y), ctx),
            ToolKey::ArrowLeft => self.lock(Some(Axis::Z), ctx),
            ToolKey::ArrowDown => self.lock(None, ctx),
        }
    }

    fn lock(&mut self, axis: Option<Axis>, ctx: &mut ToolContext<'_>) -> EventOutcome {
        if !self.builder.lock_axis(axis) {
            return EventOutcome::Ignored;
        }

        // Re-run the drag under the new constraint
        let last_pointer = self.session.as_ref().and_then(|s| s.last_pointer);
        if let Some(pos) = last_pointer {
            let ray = ctx.projector.screen_to_ray(pos);
            if self.builder.track(&ray, ctx.projector.view_direction()) {
                self.refresh_preview(ctx);
            }
        }
        EventOutcome::LockChanged(axis)
    }

    fn commit_text(&mut self, text: &str, ctx: &mut ToolContext<'_>) -> EventOutcome {
        if self.builder.is_idle() {
            return EventOutcome::Ignored;
        }
        let variables: DistanceVariables = self.builder.variables();
        match evaluate_distance(text, &variables) {
            Ok(value) => {
                let mm = (value * self.units.to_mm()) as f32;
                self.commit_distance(mm, ctx)
            }
            Err(e) => {
                tracing::debug!("Ignoring typed distance {text:?}: {e}");
                EventOutcome::Ignored
            }
        }
    }

    fn commit_distance(&mut self, mm: f32, ctx: &mut ToolContext<'_>) -> EventOutcome {
        match self.builder.commit_distance(mm) {
            Some(record) => self.store_record(record, ctx),
            None => EventOutcome::Ignored,
        }
    }

    fn store_record(&mut self, record: GuideRecord, ctx: &mut ToolContext<'_>) -> EventOutcome {
        self.renderer.clear_preview(ctx.surface);
        self.entry.reset(false);
        tracing::info!(
            "Guide created: {} mm, axis {:?}",
            record.distance(),
            record.snapped_axis()
        );
        self.store.push(record.clone());
        EventOutcome::Finalized(record)
    }

    fn refresh_preview(&mut self, ctx: &mut ToolContext<'_>) {
        if let Some(preview) = self.builder.preview() {
            self.renderer.show_preview(ctx.surface, preview, &self.settings);
        }
    }
}
