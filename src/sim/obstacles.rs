//! Obstacle spawning, scrolling and retirement
//!
//! Obstacles live in spawn order. One authoritative `advance` call per tick
//! moves all of them by the same speed; nothing schedules itself.

use rand::Rng;

use super::collision::Aabb;
use super::state::Obstacle;
use crate::config::EngineConfig;

/// Result of advancing the field by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdvanceOutcome {
    /// Obstacles retired off the left edge (before any collision)
    pub cleared: u32,
    /// Id of the first obstacle found overlapping the player
    pub collision: Option<u32>,
}

/// Live obstacles for the current run
#[derive(Debug, Clone, Default)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    next_id: u32,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.next_id = 0;
    }

    /// Insert an obstacle as-is (scripted scenarios and tests)
    pub fn push(&mut self, x: f32, width: f32, height: f32) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.push(Obstacle {
            id,
            x,
            width,
            height,
        });
        id
    }

    /// Spawn at the right edge with a random height in `[min, playfield_height / 2]`
    pub fn spawn(&mut self, config: &EngineConfig, rng: &mut impl Rng) -> &Obstacle {
        let min = config.obstacle_min_height;
        let max = config.obstacle_max_height();
        let height = if max > min {
            rng.random_range(min..=max)
        } else {
            min
        };
        self.push(config.playfield_width, config.obstacle_width, height);
        &self.obstacles[self.obstacles.len() - 1]
    }

    /// Move every obstacle left by `speed`, test each against the player and
    /// retire the ones fully off screen.
    ///
    /// Processing stops at the first collision; obstacles after it keep
    /// their positions.
    pub fn advance(&mut self, speed: f32, player_box: &Aabb) -> AdvanceOutcome {
        let mut outcome = AdvanceOutcome::default();
        let mut i = 0;
        while i < self.obstacles.len() {
            let obstacle = &mut self.obstacles[i];
            obstacle.x -= speed;

            if player_box.overlaps(&obstacle.bounds()) {
                outcome.collision = Some(obstacle.id);
                break;
            }

            if obstacle.is_off_screen() {
                log::debug!("Obstacle {} cleared", obstacle.id);
                self.obstacles.remove(i);
                outcome.cleared += 1;
            } else {
                i += 1;
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn player_box() -> Aabb {
        Aabb::new(100.0, 0.0, 40.0, 40.0)
    }

    #[test]
    fn test_spawn_at_right_edge_within_height_range() {
        let config = EngineConfig::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut field = ObstacleField::new();
        for _ in 0..200 {
            let o = field.spawn(&config, &mut rng);
            assert_eq!(o.x, config.playfield_width);
            assert_eq!(o.width, config.obstacle_width);
            assert!(o.height >= config.obstacle_min_height);
            assert!(o.height <= config.obstacle_max_height());
        }
        let ids: Vec<u32> = field.obstacles().iter().map(|o| o.id).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]), "spawn order preserved");
    }

    #[test]
    fn test_uniform_speed() {
        let mut field = ObstacleField::new();
        field.push(500.0, 20.0, 40.0);
        field.push(700.0, 20.0, 90.0);
        let outcome = field.advance(4.0, &player_box());
        assert_eq!(outcome, AdvanceOutcome::default());
        let xs: Vec<f32> = field.obstacles().iter().map(|o| o.x).collect();
        assert_eq!(xs, vec![496.0, 696.0]);
    }

    #[test]
    fn test_retires_off_screen() {
        let mut field = ObstacleField::new();
        // right edge at 2.0; one 3-unit step puts it past the edge
        field.push(-18.0, 20.0, 40.0);
        field.push(-17.0 + 3.0, 20.0, 40.0);
        field.push(600.0, 20.0, 40.0);
        let outcome = field.advance(3.0, &player_box());
        assert_eq!(outcome.cleared, 1);
        assert_eq!(outcome.collision, None);
        assert_eq!(field.len(), 2);
        assert_eq!(field.obstacles()[0].id, 1);
    }

    #[test]
    fn test_exactly_at_edge_is_kept() {
        let mut field = ObstacleField::new();
        // right edge lands exactly on 0: not yet past it
        field.push(-17.0, 20.0, 40.0);
        assert_eq!(field.advance(3.0, &player_box()).cleared, 0);
        assert_eq!(field.advance(3.0, &player_box()).cleared, 1);
    }

    #[test]
    fn test_collision_stops_processing() {
        let mut field = ObstacleField::new();
        field.push(-18.0, 20.0, 40.0);
        field.push(125.0, 20.0, 40.0);
        field.push(600.0, 20.0, 40.0);
        let outcome = field.advance(3.0, &player_box());
        assert_eq!(outcome.cleared, 1);
        assert_eq!(outcome.collision, Some(1));
        // the obstacle behind the collision did not move
        assert_eq!(field.obstacles()[1].x, 600.0);
    }

    #[test]
    fn test_spawn_fixed_height_when_range_is_empty() {
        let config = EngineConfig {
            playfield_height: 60.0,
            player_height: 20.0,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(1);
        let mut field = ObstacleField::new();
        assert_eq!(field.spawn(&config, &mut rng).height, 30.0);
    }
}
