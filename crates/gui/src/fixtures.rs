//! Factory functions for creating test data.
//!
//! Standard kitchen carcass sizes (millimeters) and small scenes built from
//! them, used by tests and by the JSON command interface.

use shared::{CabinetBox, CabinetScene};

// ── Box factories ───────────────────────────────────────────────

/// 600 x 720 x 560 floor cabinet centered at the origin
pub fn base_cabinet(id: &str) -> CabinetBox {
    named(CabinetBox::new(id, 600.0, 720.0, 560.0), "Base cabinet")
}

/// Floor cabinet at a given footprint center
pub fn base_cabinet_at(id: &str, pos: [f64; 3]) -> CabinetBox {
    base_cabinet(id).at(pos)
}

/// 600 x 720 x 320 wall cabinet hung at the usual 1400 mm
pub fn wall_cabinet(id: &str, x: f64) -> CabinetBox {
    named(CabinetBox::new(id, 600.0, 720.0, 320.0), "Wall cabinet").at([x, 1400.0, -120.0])
}

/// 600 x 2100 x 560 tall cabinet
pub fn tall_cabinet(id: &str, x: f64) -> CabinetBox {
    named(CabinetBox::new(id, 600.0, 2100.0, 560.0), "Tall cabinet").at([x, 0.0, 0.0])
}

fn named(mut cabinet: CabinetBox, name: &str) -> CabinetBox {
    cabinet.name = name.to_string();
    cabinet
}

// ── Scene factories ─────────────────────────────────────────────

/// Scene with a single base cabinet at the origin
pub fn single_cabinet_scene() -> CabinetScene {
    scene_of(vec![base_cabinet("base1")])
}

/// A run of base cabinets along +X, with a wall cabinet over the first
/// and a tall cabinet closing the run
pub fn kitchen_run_scene(base_count: usize) -> CabinetScene {
    let mut boxes: Vec<CabinetBox> = (0..base_count)
        .map(|i| base_cabinet_at(&format!("base{}", i + 1), [i as f64 * 600.0, 0.0, 0.0]))
        .collect();
    boxes.push(wall_cabinet("wall1", 0.0));
    boxes.push(tall_cabinet("tall1", base_count as f64 * 600.0));
    scene_of(boxes)
}

/// Scene from an explicit list of boxes
pub fn scene_of(boxes: Vec<CabinetBox>) -> CabinetScene {
    let mut scene = CabinetScene::default();
    for b in boxes {
        scene.add_box(b);
    }
    scene
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_cabinet_scene() {
        let scene = single_cabinet_scene();
        assert_eq!(scene.boxes.len(), 1);
        assert_eq!(scene.boxes[0].min_corner(), [-300.0, 0.0, -280.0]);
    }

    #[test]
    fn test_kitchen_run_layout() {
        let scene = kitchen_run_scene(3);
        assert_eq!(scene.boxes.len(), 5);
        assert_eq!(scene.find("base3").unwrap().position[0], 1200.0);
        assert_eq!(scene.find("tall1").unwrap().position[0], 1800.0);
        // Adjacent base cabinets share a side
        let a = scene.find("base1").unwrap().max_corner()[0];
        let b = scene.find("base2").unwrap().min_corner()[0];
        assert_eq!(a, b);
    }

    #[test]
    fn test_wall_cabinet_hangs() {
        let wall = wall_cabinet("w", 0.0);
        assert_eq!(wall.min_corner()[1], 1400.0);
        assert_eq!(wall.name, "Wall cabinet");
    }
}
