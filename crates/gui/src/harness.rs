//! Headless test harness for driving the guide tool programmatically.
//!
//! Owns a cabinet scene, a camera bound to a fixed viewport rectangle and an
//! enabled guide tool. Pointer input can be given in screen coordinates or
//! as world points that get projected first.

use glam::{Vec2, Vec3};
use shared::{CabinetBox, CabinetScene};

use crate::guides::{
    EventOutcome, Guide, GuidePoint, GuidePreview, GuideStore, GuideTool, RetainedSurface,
    ToolContext, ToolEvent, ToolKey,
};
use crate::guides::features::Axis;
use crate::state::settings::AppSettings;
use crate::viewport::camera::ArcBallCamera;

/// Viewport size used by the harness
pub const VIEWPORT_SIZE: [f32; 2] = [1200.0, 800.0];

/// Headless test harness: scene, camera, guide tool and its render surface
pub struct TestHarness {
    pub scene: CabinetScene,
    pub camera: ArcBallCamera,
    pub rect: egui::Rect,
    pub settings: AppSettings,
    tool: GuideTool,
    surface: RetainedSurface,
}

impl TestHarness {
    /// Harness with default settings, an empty scene and the tool enabled.
    pub fn new() -> Self {
        Self::with_settings(AppSettings::default())
    }

    pub fn with_settings(settings: AppSettings) -> Self {
        let mut tool = GuideTool::new(settings.guides.clone(), settings.units);
        let mut surface = RetainedSurface::new();
        tool.set_enabled(true, &mut surface);
        Self {
            scene: CabinetScene::default(),
            camera: ArcBallCamera::new(),
            rect: egui::Rect::from_min_size(
                egui::Pos2::ZERO,
                egui::vec2(VIEWPORT_SIZE[0], VIEWPORT_SIZE[1]),
            ),
            settings,
            tool,
            surface,
        }
    }

    // ── Scene manipulation ────────────────────────────────────

    /// Add a box centered at the origin and return its ID
    pub fn add_box(&mut self, w: f64, h: f64, d: f64) -> String {
        self.add_box_at(w, h, d, [0.0; 3])
    }

    /// Add a box with its footprint centered at `pos` and return its ID
    pub fn add_box_at(&mut self, w: f64, h: f64, d: f64, pos: [f64; 3]) -> String {
        self.scene.add_box(CabinetBox::new("", w, h, d).at(pos))
    }

    /// Load a scene (replaces current). Guides are kept.
    pub fn load_scene(&mut self, scene: CabinetScene) {
        self.scene = scene;
    }

    /// Load a scene from JSON string
    pub fn load_scene_json(&mut self, json: &str) -> Result<(), String> {
        let scene = CabinetScene::from_json(json)?;
        self.load_scene(scene);
        Ok(())
    }

    pub fn box_count(&self) -> usize {
        self.scene.boxes.len()
    }

    // ── Input ─────────────────────────────────────────────────

    /// Screen position of a world point, None behind the camera
    pub fn screen_of(&self, world: Vec3) -> Option<Vec2> {
        self.camera
            .project(world, self.rect)
            .map(|p| Vec2::new(p.x, p.y))
    }

    /// Feed one event to the tool
    pub fn dispatch(&mut self, event: ToolEvent) -> EventOutcome {
        let view = self.camera.view(self.rect);
        let mut ctx = ToolContext {
            boxes: &self.scene,
            projector: &view,
            surface: &mut self.surface,
        };
        self.tool.handle(event, &mut ctx)
    }

    pub fn hover(&mut self, screen: Vec2) -> EventOutcome {
        self.dispatch(ToolEvent::PointerMove(screen))
    }

    pub fn click(&mut self, screen: Vec2) -> EventOutcome {
        self.dispatch(ToolEvent::PointerDown(screen))
    }

    /// Move the pointer over a world point
    pub fn hover_world(&mut self, world: Vec3) -> EventOutcome {
        match self.screen_of(world) {
            Some(screen) => self.hover(screen),
            None => EventOutcome::Ignored,
        }
    }

    /// Click on a world point
    pub fn click_world(&mut self, world: Vec3) -> EventOutcome {
        match self.screen_of(world) {
            Some(screen) => self.click(screen),
            None => EventOutcome::Ignored,
        }
    }

    pub fn press(&mut self, key: ToolKey) -> EventOutcome {
        self.dispatch(ToolEvent::Key(key))
    }

    /// Lock the drag axis the way the arrow keys do
    pub fn lock_axis(&mut self, axis: Option<Axis>) -> EventOutcome {
        let key = match axis {
            Some(Axis::X) => ToolKey::ArrowRight,
            Some(Axis::Y) => ToolKey::ArrowUp,
            Some(Axis::Z) => ToolKey::ArrowLeft,
            None => ToolKey::ArrowDown,
        };
        self.press(key)
    }

    /// Type a distance (expression, display units) and press Enter
    pub fn type_distance(&mut self, text: &str) -> EventOutcome {
        self.dispatch(ToolEvent::CommitText(text.to_string()))
    }

    /// Commit a distance in millimeters
    pub fn commit_distance(&mut self, mm: f32) -> EventOutcome {
        self.dispatch(ToolEvent::CommitDistance(mm))
    }

    // ── Tool control ──────────────────────────────────────────

    pub fn set_enabled(&mut self, enabled: bool) {
        self.tool.set_enabled(enabled, &mut self.surface);
    }

    pub fn is_enabled(&self) -> bool {
        self.tool.is_enabled()
    }

    pub fn delete_last_guide(&mut self) -> bool {
        self.tool.delete_last_guide().is_some()
    }

    pub fn clear_guides(&mut self) -> usize {
        self.tool.clear_all_guides()
    }

    // ── Inspection ────────────────────────────────────────────

    pub fn tool(&self) -> &GuideTool {
        &self.tool
    }

    pub fn store(&self) -> &GuideStore {
        self.tool.store()
    }

    pub fn guide_count(&self) -> usize {
        self.tool.guide_count()
    }

    pub fn guides(&self) -> &[Guide] {
        self.tool.store().guides()
    }

    pub fn points(&self) -> &[GuidePoint] {
        self.tool.store().points()
    }

    pub fn preview(&self) -> Option<&GuidePreview> {
        self.tool.preview()
    }

    pub fn locked_axis(&self) -> Option<Axis> {
        self.tool.locked_axis()
    }

    pub fn is_idle(&self) -> bool {
        self.tool.builder().is_idle()
    }

    /// Transients currently on the render surface
    pub fn transient_count(&self) -> usize {
        self.surface.len()
    }

    pub fn surface(&self) -> &RetainedSurface {
        &self.surface
    }

    /// Guides and points as JSON
    pub fn export_guides_json(&self) -> serde_json::Value {
        self.tool.store().to_json()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
