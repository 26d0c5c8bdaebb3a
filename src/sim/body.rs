//! Kinematic bodies with a collide-aware move
//!
//! Bodies never respond to forces; gameplay code decides what a collision
//! means and writes the new velocity back.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, SweepHit, sweep_aabb};
use crate::consts::SAFE_MARGIN;

/// Collision shape of a body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle { radius: f32 },
    Rect { half_extents: Vec2 },
}

impl Shape {
    /// Half extents of the shape's bounding box
    pub fn half_extents(&self) -> Vec2 {
        match *self {
            Shape::Circle { radius } => Vec2::splat(radius),
            Shape::Rect { half_extents } => half_extents,
        }
    }
}

/// Outcome of [`KinematicBody::move_and_collide`]
#[derive(Debug, Clone, PartialEq)]
pub struct Collision<C> {
    /// What was hit
    pub collider: C,
    /// Contact point on the collider
    pub position: Vec2,
    /// Collider surface normal at the contact
    pub normal: Vec2,
    /// Motion actually applied
    pub travel: Vec2,
    /// Motion left over after the contact
    pub remainder: Vec2,
}

/// A body moved explicitly by gameplay code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KinematicBody {
    pub position: Vec2,
    pub velocity: Vec2,
    pub shape: Shape,
}

impl KinematicBody {
    pub fn new(position: Vec2, shape: Shape) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            shape,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.position, self.shape.half_extents())
    }

    /// Move by `motion`, stopping at the first obstacle in the way
    ///
    /// Overlaps present before the move are resolved first by pushing the
    /// body out along the axis of least penetration. The body ends up a
    /// safe margin short of the contact. Returns `None` (and applies the
    /// whole motion) when nothing is hit.
    pub fn move_and_collide<C, I>(&mut self, motion: Vec2, obstacles: I) -> Option<Collision<C>>
    where
        I: IntoIterator<Item = (C, Aabb)>,
    {
        let obstacles: Vec<(C, Aabb)> = obstacles.into_iter().collect();
        let half = self.shape.half_extents();

        // Recovery pass
        for (_, aabb) in &obstacles {
            if let Some(hit) = sweep_aabb(self.position, half, Vec2::ZERO, aabb) {
                self.position += hit.normal * hit.penetration;
            }
        }

        let mut best: Option<(C, Aabb, SweepHit)> = None;
        for (collider, aabb) in obstacles {
            let Some(hit) = sweep_aabb(self.position, half, motion, &aabb) else {
                continue;
            };
            if motion.dot(hit.normal) >= 0.0 {
                continue;
            }
            if best.as_ref().is_none_or(|(_, _, b)| hit.toi < b.toi) {
                best = Some((collider, aabb, hit));
            }
        }

        let Some((collider, obstacle, hit)) = best else {
            self.position += motion;
            return None;
        };

        let mut travel = motion * hit.toi;
        let len = travel.length();
        if len > 0.0 {
            travel -= travel / len * SAFE_MARGIN.min(len);
        }
        self.position += travel;

        Some(Collision {
            collider,
            position: obstacle.closest_point(self.position),
            normal: hit.normal,
            travel,
            remainder: motion - travel,
        })
    }
}
