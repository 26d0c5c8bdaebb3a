//! Everything that lives on the playfield

use glam::Vec2;
use rand::Rng;

use super::collision::Aabb;
use super::layout::{SpawnPath, arena_walls, layout_bricks, spawn_ball};
use super::state::{Ball, Brick, GameEvent, Paddle};
use crate::tuning::Tuning;

/// Playfield contents, looked up by field rather than by name
#[derive(Debug, Clone)]
pub struct World {
    pub arena: Vec2,
    pub ball: Ball,
    pub paddle: Paddle,
    /// Remaining bricks (sorted by id)
    pub bricks: Vec<Brick>,
    pub walls: Vec<Aabb>,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    /// Bricks destroyed this round
    pub bricks_destroyed: u32,
}

impl World {
    /// Lay out a fresh level: walls, brick grid, paddle and a spawned ball
    pub fn new<R: Rng>(tuning: &Tuning, rng: &mut R) -> Self {
        let spawn_path = SpawnPath::new(tuning.spawn_path.clone());
        let ball = spawn_ball(rng, &spawn_path, tuning.ball_speed, tuning.ball_radius);
        let bricks = layout_bricks(&tuning.bricks, 1);

        log::info!(
            "Level ready: {} bricks ({}x{}), arena {}",
            bricks.len(),
            tuning.bricks.rows,
            tuning.bricks.columns,
            tuning.arena
        );

        Self {
            arena: tuning.arena,
            ball,
            paddle: Paddle::new(tuning.paddle_start, tuning.paddle_size),
            bricks,
            walls: arena_walls(tuning.arena, tuning.wall_thickness),
            events: Vec::new(),
            bricks_destroyed: 0,
        }
    }

    /// Remove a brick from play. Returns false if it was already gone.
    pub fn destroy_brick(&mut self, id: u32) -> bool {
        let Ok(index) = self.bricks.binary_search_by_key(&id, |b| b.id) else {
            return false;
        };
        self.bricks.remove(index);
        self.bricks_destroyed += 1;
        true
    }

    /// The ball has dropped entirely below the open bottom edge
    pub fn ball_lost(&self) -> bool {
        self.ball.body.position.y - self.ball.radius() > self.arena.y
    }

    pub fn cleared(&self) -> bool {
        self.bricks.is_empty()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn world() -> World {
        World::new(&Tuning::default(), &mut Pcg32::seed_from_u64(1))
    }

    #[test]
    fn test_new_world_layout() {
        let world = world();
        assert_eq!(world.bricks.len(), 112);
        assert_eq!(world.walls.len(), 3);
        assert_eq!(world.paddle.body.position, Vec2::new(320.0, 440.0));
        assert!(world.ball.body.velocity.y > 0.0);
        assert!(!world.ball_lost());
        assert!(!world.cleared());
    }

    #[test]
    fn test_destroy_brick() {
        let mut world = world();
        assert!(world.destroy_brick(5));
        assert!(!world.destroy_brick(5));
        assert_eq!(world.bricks.len(), 111);
        assert_eq!(world.bricks_destroyed, 1);
        assert!(world.bricks.iter().all(|b| b.id != 5));
    }

    #[test]
    fn test_ball_lost_below_bottom() {
        let mut world = world();
        world.ball.body.position.y = 480.0 + 4.0;
        assert!(!world.ball_lost());
        world.ball.body.position.y = 480.0 + 6.0;
        assert!(world.ball_lost());
    }
}
