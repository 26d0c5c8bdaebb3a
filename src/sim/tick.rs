//! Fixed timestep simulation step
//!
//! The paddle moves from the latest sampled direction, then the ball moves
//! and the score is folded forward.

use glam::Vec2;

use super::collision::{Aabb, bounce};
use super::input::Direction;
use super::state::{Collider, GameEvent, Paddle, State};
use super::world::World;
use crate::consts::BRICK_SCORE;

/// Displace the paddle by `direction × speed × dt`, stopping at walls
///
/// Returns the displacement actually applied.
pub fn move_paddle(
    paddle: &mut Paddle,
    walls: &[Aabb],
    direction: Direction,
    speed: f32,
    dt: f32,
) -> Vec2 {
    let motion = direction.vector() * speed * dt;
    if motion == Vec2::ZERO {
        return Vec2::ZERO;
    }

    let start = paddle.body.position;
    paddle
        .body
        .move_and_collide(motion, walls.iter().map(|w| (Collider::Wall, *w)));
    paddle.body.position - start
}

/// Steer a paddle bounce toward the side of the paddle that was struck
///
/// `contact_offset` is the contact x minus the paddle centre x. A ball
/// arriving on the right half while travelling left (or the left half while
/// travelling right) has its bounced x component flipped; otherwise the
/// bounce stands.
pub fn paddle_deflection(incoming: Vec2, bounced: Vec2, contact_offset: f32) -> Vec2 {
    let moving_right = incoming.x > 0.0;
    let flip = (contact_offset > 0.0 && !moving_right) || (contact_offset < 0.0 && moving_right);

    if flip {
        Vec2::new(-bounced.x, bounced.y)
    } else {
        bounced
    }
}

/// Advance the ball by one physics step and fold the score forward
pub fn step(state: State, world: &mut World, dt: f32) -> State {
    let World {
        ball,
        paddle,
        bricks,
        walls,
        events,
        ..
    } = world;

    let incoming = ball.body.velocity;
    let obstacles = walls
        .iter()
        .map(|w| (Collider::Wall, *w))
        .chain(std::iter::once((Collider::Paddle, paddle.aabb())))
        .chain(bricks.iter().map(|b| (Collider::Brick(b.id), b.aabb)));

    let Some(collision) = ball.body.move_and_collide(incoming * dt, obstacles) else {
        return state;
    };

    let mut velocity = bounce(incoming, collision.normal);
    match collision.collider {
        Collider::Paddle => {
            let offset = collision.position.x - paddle.body.position.x;
            velocity = paddle_deflection(incoming, velocity, offset);
            events.push(GameEvent::PaddleHit);
        }
        Collider::Wall => events.push(GameEvent::WallHit),
        Collider::Brick(_) => {}
    }
    ball.body.velocity = velocity;

    let mut score = state.score;
    if let Collider::Brick(id) = collision.collider {
        if world.destroy_brick(id) {
            score += BRICK_SCORE;
            world.events.push(GameEvent::BrickDestroyed { id, score });
            log::debug!("Brick {id} destroyed, score {score}");
        }
    }

    State { score }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::state::{Ball, Brick};
    use crate::tuning::Tuning;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn world_with_ball(position: Vec2, velocity: Vec2) -> World {
        let mut world = World::new(&Tuning::default(), &mut Pcg32::seed_from_u64(3));
        world.bricks.clear();
        world.ball = Ball::new(position, velocity, 5.0);
        world
    }

    #[test]
    fn test_no_collision_keeps_state() {
        let mut world = world_with_ball(Vec2::new(300.0, 300.0), Vec2::new(0.0, 250.0));
        let state = step(State { score: 30 }, &mut world, SIM_DT);
        assert_eq!(state.score, 30);
        assert!(world.events.is_empty());
        assert!((world.ball.body.position.y - (300.0 + 250.0 * SIM_DT)).abs() < 1e-3);
    }

    #[test]
    fn test_brick_hit_scores_and_destroys() {
        let mut world = world_with_ball(Vec2::new(100.0, 111.0), Vec2::new(0.0, -250.0));
        world.bricks.push(Brick {
            id: 9,
            row: 0,
            column: 0,
            aabb: Aabb::from_size(Vec2::new(100.0, 100.0), Vec2::new(36.0, 10.0)),
        });

        let state = step(State::default(), &mut world, SIM_DT);

        assert_eq!(state.score, 10);
        assert!(world.bricks.is_empty());
        assert_eq!(world.bricks_destroyed, 1);
        assert_eq!(world.ball.body.velocity, Vec2::new(0.0, 250.0));
        assert_eq!(
            world.events,
            vec![GameEvent::BrickDestroyed { id: 9, score: 10 }]
        );
    }

    #[test]
    fn test_wall_hit_bounces_without_scoring() {
        let mut world = world_with_ball(Vec2::new(6.0, 200.0), Vec2::new(-250.0, 0.0));
        let state = step(State { score: 20 }, &mut world, SIM_DT);

        assert_eq!(state.score, 20);
        assert_eq!(world.ball.body.velocity, Vec2::new(250.0, 0.0));
        assert_eq!(world.events, vec![GameEvent::WallHit]);
    }

    fn paddle_hit(ball_x: f32, velocity: Vec2) -> Vec2 {
        // Paddle top sits at y = 434; ball bottom starts 1 unit above it
        let mut world = world_with_ball(Vec2::new(ball_x, 428.0), velocity);
        let state = step(State::default(), &mut world, SIM_DT);
        assert_eq!(state.score, 0);
        assert_eq!(world.events, vec![GameEvent::PaddleHit]);
        world.ball.body.velocity
    }

    #[test]
    fn test_paddle_right_side_moving_left_flips() {
        assert_eq!(
            paddle_hit(330.0, Vec2::new(-100.0, 200.0)),
            Vec2::new(100.0, -200.0)
        );
    }

    #[test]
    fn test_paddle_left_side_moving_right_flips() {
        assert_eq!(
            paddle_hit(310.0, Vec2::new(100.0, 200.0)),
            Vec2::new(-100.0, -200.0)
        );
    }

    #[test]
    fn test_paddle_moving_away_from_centre_keeps_bounce() {
        assert_eq!(
            paddle_hit(330.0, Vec2::new(100.0, 200.0)),
            Vec2::new(100.0, -200.0)
        );
        assert_eq!(
            paddle_hit(310.0, Vec2::new(-100.0, 200.0)),
            Vec2::new(-100.0, -200.0)
        );
    }

    #[test]
    fn test_paddle_deflection_dead_centre() {
        let bounced = Vec2::new(-80.0, -200.0);
        assert_eq!(paddle_deflection(Vec2::new(80.0, 200.0), bounced, 0.0), bounced);
    }

    #[test]
    fn test_paddle_stops_at_wall() {
        let mut world = world_with_ball(Vec2::new(300.0, 100.0), Vec2::ZERO);
        world.paddle.body.position.x = 33.0; // 1 unit from the left wall
        let moved = move_paddle(&mut world.paddle, &world.walls, Direction::Left, 200.0, SIM_DT);

        assert!(moved.x < 0.0 && moved.x > -1.0);
        assert!(world.paddle.aabb().min().x > 0.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_paddle_displacement_proportional_to_dt(
            dt in 0.001f32..0.05,
            right in any::<bool>(),
        ) {
            let mut world = world_with_ball(Vec2::new(300.0, 100.0), Vec2::ZERO);
            let direction = if right { Direction::Right } else { Direction::Left };

            let idle = move_paddle(&mut world.paddle, &world.walls, Direction::Idle, 200.0, dt);
            prop_assert_eq!(idle, Vec2::ZERO);

            let moved = move_paddle(&mut world.paddle, &world.walls, direction, 200.0, dt);
            prop_assert!((moved.x - direction.axis() * 200.0 * dt).abs() < 1e-3);
            prop_assert_eq!(moved.y, 0.0);
        }

        #[test]
        fn prop_score_only_grows_by_brick_score(
            seed in any::<u64>(),
            moves in proptest::collection::vec(0u8..3, 64),
        ) {
            let tuning = Tuning::default();
            let mut world = World::new(&tuning, &mut Pcg32::seed_from_u64(seed));
            let mut state = State::default();

            for i in 0..1500 {
                let direction = match moves[i % moves.len()] {
                    0 => Direction::Left,
                    1 => Direction::Idle,
                    _ => Direction::Right,
                };
                let speed = tuning.paddle_speed;
                move_paddle(&mut world.paddle, &world.walls, direction, speed, SIM_DT);

                let destroyed_before = world.bricks_destroyed;
                let next = step(state, &mut world, SIM_DT);
                let destroyed = world.bricks_destroyed - destroyed_before;

                prop_assert!(next.score >= state.score);
                prop_assert_eq!(next.score - state.score, destroyed * BRICK_SCORE);
                prop_assert!(destroyed <= 1);
                state = next;
            }

            prop_assert_eq!(state.score, world.bricks_destroyed * BRICK_SCORE);
        }
    }
}
