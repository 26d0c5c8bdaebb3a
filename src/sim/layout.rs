//! One-time level setup: walls, brick grid and ball spawn

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::state::{Ball, Brick};
use crate::tuning::{BrickGrid, MAX_BRICKS};

/// Walls on the left, right and top of the arena; the bottom is open
///
/// Walls sit just outside the arena so the playfield keeps its full size.
pub fn arena_walls(arena: Vec2, thickness: f32) -> Vec<Aabb> {
    let half = thickness / 2.0;
    let tall = Vec2::new(half, arena.y / 2.0 + thickness);
    vec![
        Aabb::new(Vec2::new(-half, arena.y / 2.0), tall),
        Aabb::new(Vec2::new(arena.x + half, arena.y / 2.0), tall),
        Aabb::new(
            Vec2::new(arena.x / 2.0, -half),
            Vec2::new(arena.x / 2.0 + thickness, half),
        ),
    ]
}

/// Instantiate the brick template over the grid, row by row
///
/// Ids start at `first_id` and follow creation order.
pub fn layout_bricks(grid: &BrickGrid, first_id: u32) -> Vec<Brick> {
    let size = grid.template.size;
    let pitch = size + grid.spacing;
    let count = grid.rows.saturating_mul(grid.columns).min(MAX_BRICKS);
    let mut bricks = Vec::with_capacity(count as usize);

    for row in 0..grid.rows {
        for column in 0..grid.columns {
            let center = Vec2::new(
                grid.start.x + pitch.x * column as f32,
                grid.start.y + pitch.y * row as f32,
            );
            bricks.push(Brick {
                id: first_id + bricks.len() as u32,
                row,
                column,
                aabb: Aabb::from_size(center, size),
            });
        }
    }

    bricks
}

/// Polyline the ball spawns on, sampled by fraction of its length
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnPath {
    points: Vec<Vec2>,
}

impl SpawnPath {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    pub fn length(&self) -> f32 {
        self.points.windows(2).map(|w| w[0].distance(w[1])).sum()
    }

    /// Point at `ratio` (clamped to 0..=1) of the way along the path
    pub fn sample(&self, ratio: f32) -> Vec2 {
        let Some(&first) = self.points.first() else {
            return Vec2::ZERO;
        };

        let mut remaining = ratio.clamp(0.0, 1.0) * self.length();
        for w in self.points.windows(2) {
            let segment = w[0].distance(w[1]);
            if remaining <= segment && segment > 0.0 {
                // Offset from the start keeps points on axis-aligned segments exact
                return w[0] + (w[1] - w[0]) * (remaining / segment);
            }
            remaining -= segment;
        }

        self.points.last().copied().unwrap_or(first)
    }
}

/// Initial ball velocity for a spawn at `ratio` along the path
///
/// Always heads down. `horizontal` (0..1) becomes a leftward component when
/// the ball spawned in the second half of the path, rightward otherwise.
pub fn spawn_velocity(ratio: f32, horizontal: f32, speed: f32) -> Vec2 {
    let sideways = if ratio > 0.5 { -horizontal } else { horizontal };
    (Vec2::Y + Vec2::new(sideways, 0.0)) * speed
}

/// Place a ball at a random point on the path with a random heading
pub fn spawn_ball<R: Rng>(rng: &mut R, path: &SpawnPath, speed: f32, radius: f32) -> Ball {
    let ratio: f32 = rng.random();
    let position = path.sample(ratio);
    let horizontal: f32 = rng.random();
    let velocity = spawn_velocity(ratio, horizontal, speed);

    log::debug!("Ball spawned at {position} (ratio {ratio:.2}) heading {velocity}");
    Ball::new(position, velocity, radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_brick_grid_layout() {
        let grid = BrickGrid::default();
        let bricks = layout_bricks(&grid, 1);

        assert_eq!(bricks.len(), 8 * 14);
        assert_eq!(bricks[0].id, 1);
        assert_eq!(bricks[0].aabb.center, grid.start);
        assert_eq!(bricks[0].aabb.size(), Vec2::new(36.0, 10.0));

        // Second brick in the first row: one width + horizontal spacing over
        assert_eq!(bricks[1].aabb.center, grid.start + Vec2::new(41.0, 0.0));
        assert_eq!(bricks[1].column, 1);

        // First brick of the second row: one height + vertical spacing down
        let second_row = &bricks[14];
        assert_eq!(second_row.row, 1);
        assert_eq!(second_row.column, 0);
        assert_eq!(second_row.aabb.center, grid.start + Vec2::new(0.0, 14.5));

        let last = bricks.last().unwrap();
        assert_eq!(last.id, 112);
        assert_eq!(
            last.aabb.center,
            grid.start + Vec2::new(41.0 * 13.0, 14.5 * 7.0)
        );
    }

    #[test]
    fn test_default_grid_fits_between_walls() {
        let tuning = crate::Tuning::default();
        let bricks = layout_bricks(&tuning.bricks, 1);
        for brick in &bricks {
            assert!(brick.aabb.min().x > 0.0);
            assert!(brick.aabb.max().x < tuning.arena.x);
        }
    }

    #[test]
    fn test_walls_enclose_all_but_bottom() {
        let arena = Vec2::new(640.0, 480.0);
        let walls = arena_walls(arena, 16.0);
        assert_eq!(walls.len(), 3);
        assert_eq!(walls[0].max().x, 0.0);
        assert_eq!(walls[1].min().x, arena.x);
        assert_eq!(walls[2].max().y, 0.0);
        assert!(walls.iter().all(|w| w.max().y >= arena.y || w.min().y < 0.0));
    }

    #[test]
    fn test_spawn_path_sampling() {
        let path = SpawnPath::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 0.0),
            Vec2::new(100.0, 100.0),
        ]);
        assert_eq!(path.length(), 200.0);
        assert_eq!(path.sample(0.0), Vec2::new(0.0, 0.0));
        assert_eq!(path.sample(0.25), Vec2::new(50.0, 0.0));
        assert_eq!(path.sample(0.75), Vec2::new(100.0, 50.0));
        assert_eq!(path.sample(1.0), Vec2::new(100.0, 100.0));
        assert_eq!(path.sample(7.0), Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_sample_stays_on_flat_segment() {
        let path = SpawnPath::new(vec![Vec2::new(120.0, 230.0), Vec2::new(520.0, 230.0)]);
        for i in 0..=1000 {
            let point = path.sample(i as f32 / 1000.0);
            assert_eq!(point.y, 230.0, "ratio {}", i as f32 / 1000.0);
            assert!((120.0..=520.0).contains(&point.x));
        }
    }

    #[test]
    fn test_spawn_velocity_direction() {
        // First half: down and to the right
        let v = spawn_velocity(0.2, 0.5, 250.0);
        assert_eq!(v, Vec2::new(125.0, 250.0));

        // Second half: down and to the left
        let v = spawn_velocity(0.8, 0.5, 250.0);
        assert_eq!(v, Vec2::new(-125.0, 250.0));

        // Exactly half counts as the first half
        assert!(spawn_velocity(0.5, 0.3, 250.0).x > 0.0);
    }

    #[test]
    fn test_spawn_ball_is_on_path_and_heading_down() {
        let path = SpawnPath::new(crate::Tuning::default().spawn_path);
        let mut rng = Pcg32::seed_from_u64(7);

        for _ in 0..100 {
            let ball = spawn_ball(&mut rng, &path, 250.0, 5.0);
            let pos = ball.body.position;
            let vel = ball.body.velocity;

            assert_eq!(pos.y, 230.0);
            assert!((120.0..=520.0).contains(&pos.x));
            assert_eq!(vel.y, 250.0);
            // Second half of the path heads left, first half heads right
            if pos.x > 320.0 {
                assert!(vel.x <= 0.0);
            } else if pos.x < 320.0 {
                assert!(vel.x >= 0.0);
            }
            assert_eq!(ball.radius(), 5.0);
        }
    }

    #[test]
    fn test_spawn_is_deterministic_per_seed() {
        let path = SpawnPath::new(crate::Tuning::default().spawn_path);
        let a = spawn_ball(&mut Pcg32::seed_from_u64(42), &path, 250.0, 5.0);
        let b = spawn_ball(&mut Pcg32::seed_from_u64(42), &path, 250.0, 5.0);
        assert_eq!(a, b);
    }
}
