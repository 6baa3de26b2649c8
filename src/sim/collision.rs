//! Axis-aligned bounding box collision
//!
//! Boxes are anchored at their bottom-left corner. Touching edges do not
//! count as overlap.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Bottom-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Overlap on both axes simultaneously
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a_min, a_max) = (self.min, self.max());
        let (b_min, b_max) = (other.min, other.max());
        a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
    }

    /// Flattened `[x, y, width, height]` for JS consumers
    pub fn to_array(&self) -> [f32; 4] {
        [self.min.x, self.min.y, self.size.x, self.size.y]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::sim::state::{Obstacle, Player};
    use proptest::prelude::*;

    fn obstacle(x: f32, height: f32) -> Obstacle {
        Obstacle {
            id: 0,
            x,
            width: 20.0,
            height,
        }
    }

    #[test]
    fn test_overlap_detected() {
        let a = Aabb::new(100.0, 0.0, 40.0, 40.0);
        let b = Aabb::new(120.0, 0.0, 20.0, 50.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let a = Aabb::new(100.0, 0.0, 40.0, 40.0);
        let right = Aabb::new(140.0, 0.0, 20.0, 50.0);
        let above = Aabb::new(100.0, 40.0, 40.0, 40.0);
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&above));
    }

    #[test]
    fn test_player_clears_obstacle_by_jumping() {
        let mut player = Player::new(&EngineConfig::default());
        let block = obstacle(110.0, 60.0);
        assert!(player.bounds().overlaps(&block.bounds()));

        player.y = 60.0;
        assert!(!player.bounds().overlaps(&block.bounds()));
        player.y = 59.0;
        assert!(player.bounds().overlaps(&block.bounds()));
    }

    #[test]
    fn test_obstacle_behind_player() {
        let player = Player::new(&EngineConfig::default());
        // right edge exactly at the player's left edge
        assert!(!player.bounds().overlaps(&obstacle(80.0, 40.0).bounds()));
        assert!(player.bounds().overlaps(&obstacle(81.0, 40.0).bounds()));
    }

    fn arb_box() -> impl Strategy<Value = Aabb> {
        (-500.0f32..500.0, -500.0f32..500.0, 1.0f32..200.0, 1.0f32..200.0)
            .prop_map(|(x, y, w, h)| Aabb::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(a in arb_box(), b in arb_box()) {
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn prop_clear_on_either_axis_suppresses(a in arb_box(), b in arb_box(), gap in 0.0f32..50.0) {
            // shove b fully right of a
            let right = Aabb { min: Vec2::new(a.max().x + gap, b.min.y), size: b.size };
            prop_assert!(!a.overlaps(&right));
            // shove b fully above a
            let above = Aabb { min: Vec2::new(b.min.x, a.max().y + gap), size: b.size };
            prop_assert!(!a.overlaps(&above));
        }

        #[test]
        fn prop_overlap_iff_both_axes(a in arb_box(), b in arb_box()) {
            let x_overlap = a.min.x < b.max().x && b.min.x < a.max().x;
            let y_overlap = a.min.y < b.max().y && b.min.y < a.max().y;
            prop_assert_eq!(a.overlaps(&b), x_overlap && y_overlap);
        }
    }
}
