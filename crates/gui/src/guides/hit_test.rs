//! Candidate picking for guide anchors: corner > edge > world axis.

use glam::{Vec2, Vec3};

use super::features::{axis_segment, Axis, BoxGeometry, Edge};
use super::Projector;
use crate::state::settings::GuideSettings;
use crate::viewport::picking::{closest_point_between_lines, Ray};

/// A feature under the pointer that a guide can be anchored to
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Candidate {
    Corner {
        box_index: usize,
        corner_index: usize,
        position: Vec3,
        /// Pointer distance in screen pixels
        screen_distance: f32,
    },
    Edge {
        box_index: usize,
        edge_index: usize,
        edge: Edge,
        /// Closest point on the edge to the pointer ray
        point: Vec3,
        distance: f32,
    },
    Axis {
        axis: Axis,
        point: Vec3,
        distance: f32,
    },
}

/// Identity of a candidate, for detecting hover changes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CandidateKey {
    Corner(usize, usize),
    Edge(usize, usize),
    Axis(Axis),
}

impl Candidate {
    pub fn key(&self) -> CandidateKey {
        match *self {
            Candidate::Corner { box_index, corner_index, .. } => {
                CandidateKey::Corner(box_index, corner_index)
            }
            Candidate::Edge { box_index, edge_index, .. } => CandidateKey::Edge(box_index, edge_index),
            Candidate::Axis { axis, .. } => CandidateKey::Axis(axis),
        }
    }

    /// Box the feature belongs to (None for world axes)
    pub fn box_index(&self) -> Option<usize> {
        match *self {
            Candidate::Corner { box_index, .. } | Candidate::Edge { box_index, .. } => Some(box_index),
            Candidate::Axis { .. } => None,
        }
    }
}

/// Pick radii and axis extent used by [`HitTester::pick`]
#[derive(Clone, Copy, Debug)]
pub struct HitTester {
    pub corner_radius_px: f32,
    pub edge_radius: f32,
    pub axis_radius: f32,
    pub axis_length: f32,
}

impl HitTester {
    pub fn from_settings(settings: &GuideSettings) -> Self {
        Self {
            corner_radius_px: settings.corner_radius_px,
            edge_radius: settings.edge_radius,
            axis_radius: settings.axis_radius,
            axis_length: settings.axis_length,
        }
    }

    /// Nearest anchor candidate under the pointer. Corners win over edges,
    /// edges over world axes; within a category the closest hit wins.
    pub fn pick(
        &self,
        pointer: Vec2,
        projector: &dyn Projector,
        boxes: &[BoxGeometry],
    ) -> Option<Candidate> {
        if let Some(corner) = self.pick_corner(pointer, projector, boxes) {
            return Some(corner);
        }
        let ray = projector.screen_to_ray(pointer);
        self.pick_edge(&ray, boxes)
            .or_else(|| self.pick_axis(&ray))
    }

    /// Closest corner within the screen-space radius
    pub fn pick_corner(
        &self,
        pointer: Vec2,
        projector: &dyn Projector,
        boxes: &[BoxGeometry],
    ) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;
        let mut best_dist = self.corner_radius_px;

        for (box_index, b) in boxes.iter().enumerate() {
            for (corner_index, position) in b.corners().into_iter().enumerate() {
                let Some(screen) = projector.project(position) else { continue };
                let dist = screen.distance(pointer);
                if dist < best_dist {
                    best_dist = dist;
                    best = Some(Candidate::Corner {
                        box_index,
                        corner_index,
                        position,
                        screen_distance: dist,
                    });
                }
            }
        }

        best
    }

    /// Closest edge within the world-space radius
    pub fn pick_edge(&self, ray: &Ray, boxes: &[BoxGeometry]) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;
        let mut best_dist = self.edge_radius;

        for (box_index, b) in boxes.iter().enumerate() {
            for (edge_index, edge) in b.edges().into_iter().enumerate() {
                let Some(hit) = closest_point_between_lines(ray.origin, ray.direction, edge.start, edge.end)
                else {
                    continue;
                };
                if !hit.within_segment(edge.length()) {
                    continue;
                }
                if hit.distance < best_dist {
                    best_dist = hit.distance;
                    best = Some(Candidate::Edge {
                        box_index,
                        edge_index,
                        edge,
                        point: hit.point_on_segment,
                        distance: hit.distance,
                    });
                }
            }
        }

        best
    }

    /// Closest world axis within the (larger) axis radius
    pub fn pick_axis(&self, ray: &Ray) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;
        let mut best_dist = self.axis_radius;

        for axis in Axis::ALL {
            let (start, end) = axis_segment(axis, self.axis_length);
            let Some(hit) = closest_point_between_lines(ray.origin, ray.direction, start, end) else {
                continue;
            };
            if !hit.within_segment(self.axis_length) {
                continue;
            }
            if hit.distance < best_dist {
                best_dist = hit.distance;
                best = Some(Candidate::Axis {
                    axis,
                    point: hit.point_on_segment,
                    distance: hit.distance,
                });
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Orthographic projector looking down -Z; screen = world xy
    struct TopDown;

    impl Projector for TopDown {
        fn screen_to_ray(&self, pointer: Vec2) -> Ray {
            Ray::new(Vec3::new(pointer.x, pointer.y, 10_000.0), -Vec3::Z)
        }

        fn project(&self, point: Vec3) -> Option<Vec2> {
            Some(Vec2::new(point.x, point.y))
        }

        fn view_direction(&self) -> Vec3 {
            -Vec3::Z
        }
    }

    fn tester() -> HitTester {
        HitTester::from_settings(&GuideSettings::default())
    }

    fn cabinet_at(x: f32) -> BoxGeometry {
        BoxGeometry::new(Vec3::new(x, 0.0, 0.0), 600.0, 720.0, 560.0)
    }

    #[test]
    fn test_corner_wins_over_incident_edge() {
        let boxes = vec![cabinet_at(1000.0)];
        // Right-bottom corner of the box, also on its vertical and X edges
        let pointer = Vec2::new(1300.0 - 3.0, 2.0);
        let hit = tester().pick(pointer, &TopDown, &boxes).unwrap();
        match hit {
            Candidate::Corner { position, .. } => {
                assert_eq!(position.x, 1300.0);
                assert_eq!(position.y, 0.0);
            }
            other => panic!("expected corner, got {other:?}"),
        }
    }

    #[test]
    fn test_edge_hit_inside_segment() {
        let boxes = vec![cabinet_at(1000.0)];
        // Middle of the right vertical edges
        let hit = tester().pick(Vec2::new(1310.0, 360.0), &TopDown, &boxes);
        match hit {
            Some(Candidate::Edge { edge, distance, point, .. }) => {
                assert_eq!(edge.axis, Axis::Y);
                assert!((distance - 10.0).abs() < 1e-3);
                assert!((point.y - 360.0).abs() < 1e-3);
            }
            other => panic!("expected edge, got {other:?}"),
        }
    }

    #[test]
    fn test_edge_outside_radius_misses() {
        let boxes = vec![cabinet_at(1000.0)];
        assert!(tester().pick(Vec2::new(1345.0, 360.0), &TopDown, &boxes).is_none());
    }

    #[test]
    fn test_ray_beyond_edge_end_is_rejected() {
        let boxes = vec![cabinet_at(1000.0)];
        let ray = TopDown.screen_to_ray(Vec2::new(1300.0, 760.0));
        // Above the top of the vertical edge; the top X edge is not within radius either
        assert!(tester().pick_edge(&ray, &boxes).is_none());
    }

    #[test]
    fn test_axis_is_fallback() {
        let boxes = vec![cabinet_at(1000.0)];
        let hit = tester().pick(Vec2::new(-800.0, 40.0), &TopDown, &boxes);
        match hit {
            Some(Candidate::Axis { axis, distance, .. }) => {
                assert_eq!(axis, Axis::X);
                assert!((distance - 40.0).abs() < 1e-3);
            }
            other => panic!("expected axis, got {other:?}"),
        }
    }

    #[test]
    fn test_axis_beyond_its_length_is_rejected() {
        let hit = tester().pick(Vec2::new(-1600.0, 10.0), &TopDown, &[]);
        assert!(hit.is_none());
    }

    #[test]
    fn test_closest_box_wins() {
        let boxes = vec![cabinet_at(0.0), cabinet_at(620.0)];
        // Between the two boxes, nearer the second one's left edges
        let hit = tester().pick(Vec2::new(315.0, 360.0), &TopDown, &boxes).unwrap();
        assert_eq!(hit.box_index(), Some(1));
    }

    #[test]
    fn test_candidate_key_identity() {
        let boxes = vec![cabinet_at(1000.0)];
        let a = tester().pick(Vec2::new(1300.0, 0.0), &TopDown, &boxes).unwrap();
        let b = tester().pick(Vec2::new(1301.0, 1.0), &TopDown, &boxes).unwrap();
        assert_eq!(a.key(), b.key());
    }
}
