//! Axis inference for guide drags: manual locks and angular snapping.

use glam::Vec3;

use super::features::Axis;
use crate::viewport::picking::angle_between_deg;

/// A drag direction after locking/snapping
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisResolution {
    /// Unit direction; its sign follows the input displacement
    pub direction: Vec3,
    /// Axis the drag is constrained to, if any
    pub axis: Option<Axis>,
    /// The displacement after constraining (projected onto the axis when snapped)
    pub displacement: Vec3,
}

/// Constrain `displacement` to a world axis.
///
/// A locked axis always applies. Otherwise the displacement snaps to the
/// first of +X, -X, +Y, -Y, +Z, -Z within `threshold_deg`, or stays free.
/// Callers must not pass displacements shorter than the minimum drag.
pub fn resolve_axis(displacement: Vec3, locked: Option<Axis>, threshold_deg: f32) -> AxisResolution {
    if let Some(axis) = locked {
        return project_onto(displacement, axis);
    }

    for axis in Axis::ALL {
        let unit = axis.unit();
        if angle_between_deg(displacement, unit) < threshold_deg
            || angle_between_deg(displacement, -unit) < threshold_deg
        {
            return project_onto(displacement, axis);
        }
    }

    AxisResolution {
        direction: displacement.normalize_or_zero(),
        axis: None,
        displacement,
    }
}

fn project_onto(displacement: Vec3, axis: Axis) -> AxisResolution {
    let unit = axis.unit();
    let along = displacement.dot(unit);
    let sign = if along >= 0.0 { 1.0 } else { -1.0 };
    AxisResolution {
        direction: unit * sign,
        axis: Some(axis),
        displacement: unit * along,
    }
}

/// Direction used when a distance is typed before any drag.
///
/// `orientation` is the axis the anchor edge or world axis runs along, None
/// for corners. Vertical edges and corners go along +X, X edges along +Z,
/// Z edges along +X; world axes use the same table.
pub fn default_direction_for(orientation: Option<Axis>) -> (Vec3, Axis) {
    let axis = match orientation {
        None => Axis::X,
        Some(Axis::X) => Axis::Z,
        Some(Axis::Y) => Axis::X,
        Some(Axis::Z) => Axis::X,
    };
    (axis.unit(), axis)
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLD: f32 = 5.0;

    fn tilted(axis: Axis, other: Axis, degrees: f32, length: f32) -> Vec3 {
        let r = degrees.to_radians();
        (axis.unit() * r.cos() + other.unit() * r.sin()) * length
    }

    #[test]
    fn test_snaps_within_threshold_both_signs() {
        for (axis, other) in [(Axis::X, Axis::Y), (Axis::Y, Axis::Z), (Axis::Z, Axis::X)] {
            for degrees in [0.0, 2.0, 4.9] {
                let v = tilted(axis, other, degrees, 200.0);
                let r = resolve_axis(v, None, THRESHOLD);
                assert_eq!(r.axis, Some(axis));
                assert!(r.direction.abs_diff_eq(axis.unit(), 1e-6));

                let r = resolve_axis(-v, None, THRESHOLD);
                assert_eq!(r.axis, Some(axis));
                assert!(r.direction.abs_diff_eq(-axis.unit(), 1e-6));
            }
        }
    }

    #[test]
    fn test_free_outside_threshold() {
        let v = tilted(Axis::X, Axis::Z, 20.0, 100.0);
        let r = resolve_axis(v, None, THRESHOLD);
        assert_eq!(r.axis, None);
        assert_eq!(r.displacement, v);
        assert!(r.direction.abs_diff_eq(v.normalize(), 1e-6));
    }

    #[test]
    fn test_snapped_displacement_is_projected() {
        let v = tilted(Axis::Z, Axis::X, 3.0, 100.0);
        let r = resolve_axis(v, None, THRESHOLD);
        assert_eq!(r.displacement.x, 0.0);
        assert!((r.displacement.z - v.z).abs() < 1e-4);
    }

    #[test]
    fn test_lock_overrides_inference() {
        let samples = [
            Vec3::new(100.0, 0.0, 0.0),
            Vec3::new(-30.0, 80.0, 5.0),
            Vec3::new(1.0, -1.0, -400.0),
        ];
        for v in samples {
            for axis in Axis::ALL {
                let r = resolve_axis(v, Some(axis), THRESHOLD);
                assert_eq!(r.axis, Some(axis));
                assert!(r.direction.cross(axis.unit()).length() < 1e-6);
                assert!(r.displacement.abs_diff_eq(axis.unit() * v.dot(axis.unit()), 1e-4));
            }
        }
    }

    #[test]
    fn test_lock_preserves_sign() {
        let r = resolve_axis(Vec3::new(-50.0, 10.0, 0.0), Some(Axis::X), THRESHOLD);
        assert_eq!(r.direction, -Vec3::X);
        let r = resolve_axis(Vec3::new(0.0, 10.0, 0.0), Some(Axis::X), THRESHOLD);
        assert_eq!(r.direction, Vec3::X);
    }

    #[test]
    fn test_default_direction_table() {
        assert_eq!(default_direction_for(None), (Vec3::X, Axis::X));
        assert_eq!(default_direction_for(Some(Axis::Y)), (Vec3::X, Axis::X));
        assert_eq!(default_direction_for(Some(Axis::X)), (Vec3::Z, Axis::Z));
        assert_eq!(default_direction_for(Some(Axis::Z)), (Vec3::X, Axis::X));
        for axis in Axis::ALL {
            let (dir, _) = default_direction_for(Some(axis));
            assert_eq!(dir.dot(axis.unit()), 0.0);
        }
    }
}
