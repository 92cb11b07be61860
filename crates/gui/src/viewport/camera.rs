use glam::{Mat4, Vec2, Vec3, Vec4};

use super::picking::Ray;
use crate::guides::Projector;

/// Arc-ball camera for the cabinet viewport (world units are millimeters)
#[derive(Clone, Debug)]
pub struct ArcBallCamera {
    /// Horizontal rotation angle (radians)
    pub yaw: f32,
    /// Vertical rotation angle (radians)
    pub pitch: f32,
    /// Distance from target
    pub distance: f32,
    /// Camera target point
    pub target: Vec3,
    /// Vertical field of view (radians)
    pub fov: f32,
}

impl Default for ArcBallCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl ArcBallCamera {
    pub fn new() -> Self {
        Self {
            yaw: 0.6,
            pitch: 0.4,
            distance: 3000.0,
            target: Vec3::new(0.0, 360.0, 0.0),
            fov: 45.0_f32.to_radians(),
        }
    }

    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw += dx.to_radians();
        self.pitch = (self.pitch + dy.to_radians()).clamp(-1.5, 1.5);
    }

    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance * (1.0 - delta)).clamp(100.0, 20000.0);
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        let right = self.right_vector();
        let up = self.up_vector();
        // Scale so a pixel of drag moves roughly a pixel's worth of world
        let scale = self.distance * 0.001;
        self.target += (right * dx + up * dy) * scale;
    }

    /// Camera position in world space
    pub fn eye_position(&self) -> Vec3 {
        let cy = self.yaw.cos();
        let sy = self.yaw.sin();
        let cp = self.pitch.cos();
        let sp = self.pitch.sin();

        self.target
            + Vec3::new(
                self.distance * cp * sy,
                self.distance * sp,
                self.distance * cp * cy,
            )
    }

    /// Unit vector from the eye towards the target
    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye_position()).normalize_or_zero()
    }

    /// View matrix (world -> camera)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye_position(), self.target, Vec3::Y)
    }

    /// Projection matrix (camera -> clip)
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov, aspect, 1.0, 100_000.0)
    }

    /// Combined view-projection matrix
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    fn right_vector(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize_or_zero()
    }

    fn up_vector(&self) -> Vec3 {
        let right = self.right_vector();
        right.cross(self.forward()).normalize_or_zero()
    }

    /// Project a 3D point to screen coords inside `rect`.
    /// None for points behind the camera.
    pub fn project(&self, point: Vec3, rect: egui::Rect) -> Option<egui::Pos2> {
        let aspect = rect.width() / rect.height();
        let vp = self.view_projection(aspect);
        let p = vp * Vec4::new(point.x, point.y, point.z, 1.0);
        if p.w <= 0.0 {
            return None;
        }
        let ndc = p.truncate() / p.w;
        let screen_x = rect.center().x + ndc.x * rect.width() * 0.5;
        let screen_y = rect.center().y - ndc.y * rect.height() * 0.5;
        Some(egui::pos2(screen_x, screen_y))
    }

    /// Cast a ray from a screen position into the 3D scene
    pub fn screen_ray(&self, screen_pos: egui::Pos2, rect: egui::Rect) -> Ray {
        let aspect = rect.width() / rect.height();

        // Screen → NDC
        let ndc_x = (screen_pos.x - rect.center().x) / (rect.width() * 0.5);
        let ndc_y = -(screen_pos.y - rect.center().y) / (rect.height() * 0.5);

        let vp_inv = self.view_projection(aspect).inverse();

        let near_world = vp_inv * Vec4::new(ndc_x, ndc_y, -1.0, 1.0);
        let far_world = vp_inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);

        let near = near_world.truncate() / near_world.w;
        let far = far_world.truncate() / far_world.w;

        Ray::new(self.eye_position(), far - near)
    }

    /// Bind the camera to a viewport rectangle for picking
    pub fn view(&self, rect: egui::Rect) -> CameraView<'_> {
        CameraView { camera: self, rect }
    }
}

/// A camera seen through a concrete viewport rectangle
#[derive(Clone, Copy)]
pub struct CameraView<'a> {
    pub camera: &'a ArcBallCamera,
    pub rect: egui::Rect,
}

impl Projector for CameraView<'_> {
    fn screen_to_ray(&self, pointer: Vec2) -> Ray {
        self.camera.screen_ray(egui::pos2(pointer.x, pointer.y), self.rect)
    }

    fn project(&self, point: Vec3) -> Option<Vec2> {
        self.camera
            .project(point, self.rect)
            .map(|p| Vec2::new(p.x, p.y))
    }

    fn view_direction(&self) -> Vec3 {
        self.camera.forward()
    }
}
