use glam::Vec3;

/// Below this Gram determinant two lines are treated as parallel
const PARALLEL_EPSILON: f32 = 1e-6;

/// A ray in world space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at parameter `t` along the ray
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Closest-approach data between a pointer ray and a segment's supporting line
#[derive(Clone, Copy, Debug)]
pub struct LineProximity {
    /// Closest point on the segment's (unclamped) line
    pub point_on_segment: Vec3,
    /// Closest point on the ray's line
    pub point_on_ray: Vec3,
    /// Distance from the segment start to `point_on_segment`, in world units
    pub segment_param: f32,
    /// Distance from the ray origin to `point_on_ray`
    pub ray_param: f32,
    /// Line-to-line distance
    pub distance: f32,
}

impl LineProximity {
    /// Whether the closest point lies on the segment itself
    pub fn within_segment(&self, segment_length: f32) -> bool {
        (0.0..=segment_length).contains(&self.segment_param)
    }
}

/// Closest points between the ray line and the line through `seg_start..seg_end`.
///
/// Solves the 2x2 least-distance system of the two direction vectors. The
/// segment parameter is not clamped; callers reject hits outside
/// `[0, length]`. Returns None for near-parallel lines or a zero-length
/// segment.
pub fn closest_point_between_lines(
    ray_origin: Vec3,
    ray_dir: Vec3,
    seg_start: Vec3,
    seg_end: Vec3,
) -> Option<LineProximity> {
    let d1 = ray_dir.normalize_or_zero();
    let d2 = (seg_end - seg_start).normalize_or_zero();
    if d1 == Vec3::ZERO || d2 == Vec3::ZERO {
        return None;
    }

    let r = ray_origin - seg_start;
    let a = d1.dot(d1);
    let b = d1.dot(d2);
    let c = d2.dot(d2);
    let d = d1.dot(r);
    let e = d2.dot(r);

    let det = a * c - b * b;
    if det.abs() < PARALLEL_EPSILON {
        return None;
    }

    let ray_param = (b * e - c * d) / det;
    let segment_param = (a * e - b * d) / det;

    let point_on_ray = ray_origin + d1 * ray_param;
    let point_on_segment = seg_start + d2 * segment_param;

    Some(LineProximity {
        point_on_segment,
        point_on_ray,
        segment_param,
        ray_param,
        distance: point_on_ray.distance(point_on_segment),
    })
}

/// Angle between two vectors in degrees.
/// Zero-length input yields NaN, which never passes a `<` threshold test.
pub fn angle_between_deg(a: Vec3, b: Vec3) -> f32 {
    let denom = (a.length_squared() * b.length_squared()).sqrt();
    if denom == 0.0 {
        return f32::NAN;
    }
    (a.dot(b) / denom).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Intersect a ray with the plane through `point` with `normal`.
/// Returns None if the ray is parallel to the plane or the plane lies behind
/// the ray origin.
pub fn ray_plane(ray: &Ray, point: Vec3, normal: Vec3) -> Option<Vec3> {
    let denom = ray.direction.dot(normal);
    if denom.abs() < 1e-6 {
        return None;
    }

    let t = (point - ray.origin).dot(normal) / denom;
    if t < 0.0 {
        return None;
    }
    Some(ray.at(t))
}
