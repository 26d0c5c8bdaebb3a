//! Game state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{KinematicBody, Shape};
use super::collision::Aabb;

/// Running score, replaced by a new value every physics step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub score: u32,
}

/// Anything the ball can run into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collider {
    Wall,
    Paddle,
    Brick(u32),
}

/// Things that happened during a step, drained by the frontend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    PaddleHit,
    WallHit,
    BrickDestroyed { id: u32, score: u32 },
    BallLost,
    Cleared,
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub body: KinematicBody,
}

impl Ball {
    pub fn new(position: Vec2, velocity: Vec2, radius: f32) -> Self {
        let mut body = KinematicBody::new(position, Shape::Circle { radius });
        body.velocity = velocity;
        Self { body }
    }

    pub fn radius(&self) -> f32 {
        self.body.shape.half_extents().x
    }
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub body: KinematicBody,
}

impl Paddle {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            body: KinematicBody::new(
                position,
                Shape::Rect {
                    half_extents: size / 2.0,
                },
            ),
        }
    }

    pub fn aabb(&self) -> Aabb {
        self.body.aabb()
    }
}

/// A destructible brick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub id: u32,
    /// Grid row, top row is 0
    pub row: u32,
    pub column: u32,
    pub aabb: Aabb,
}
