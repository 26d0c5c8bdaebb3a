//! Swept box collision detection and response
//!
//! Every moving shape is swept as its bounding box. Expanding the obstacle by
//! the mover's half extents (Minkowski sum) turns the query into a ray cast
//! against a single box.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box stored as centre + half extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    /// Box of the given full size centred on `center`
    pub fn from_size(center: Vec2, size: Vec2) -> Self {
        Self::new(center, size / 2.0)
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.half_extents * 2.0
    }

    /// Grow the box by `by` on every side
    pub fn expanded(&self, by: Vec2) -> Self {
        Self::new(self.center, self.half_extents + by)
    }

    /// Closest point on or inside the box to `point`
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min(), self.max())
    }
}

/// Result of sweeping a box against an obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepHit {
    /// Fraction of the motion travelled before contact (0..=1)
    pub toi: f32,
    /// Obstacle surface normal at contact (unit, axis aligned)
    pub normal: Vec2,
    /// Overlap depth when the sweep started inside the obstacle, else 0
    pub penetration: f32,
}

/// Sweep a box with `half_extents` centred at `origin` along `motion`
///
/// Returns the first contact with `obstacle` within the motion, or the
/// push-out axis if the box already overlaps it. Sliding along a face
/// without entering it is not a hit.
pub fn sweep_aabb(
    origin: Vec2,
    half_extents: Vec2,
    motion: Vec2,
    obstacle: &Aabb,
) -> Option<SweepHit> {
    let target = obstacle.expanded(half_extents);
    let offset = origin - target.center;
    let overlap = target.half_extents - offset.abs();

    if overlap.x > 0.0 && overlap.y > 0.0 {
        let (normal, penetration) = if overlap.x < overlap.y {
            (Vec2::new(push_sign(offset.x, motion.x), 0.0), overlap.x)
        } else {
            (Vec2::new(0.0, push_sign(offset.y, motion.y)), overlap.y)
        };
        return Some(SweepHit {
            toi: 0.0,
            normal,
            penetration,
        });
    }

    let min = target.min();
    let max = target.max();
    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    let mut normal = Vec2::ZERO;

    for axis in 0..2 {
        let o = origin[axis];
        let m = motion[axis];

        if m.abs() < f32::EPSILON {
            if o <= min[axis] || o >= max[axis] {
                return None;
            }
            continue;
        }

        let inv = 1.0 / m;
        let mut t1 = (min[axis] - o) * inv;
        let mut t2 = (max[axis] - o) * inv;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }

        if t1 > t_enter {
            t_enter = t1;
            normal = Vec2::ZERO;
            normal[axis] = -m.signum();
        }
        t_exit = t_exit.min(t2);

        if t_enter > t_exit {
            return None;
        }
    }

    if !(0.0..=1.0).contains(&t_enter) {
        return None;
    }

    Some(SweepHit {
        toi: t_enter,
        normal,
        penetration: 0.0,
    })
}

/// Direction to push out along an axis: away from the obstacle centre, or
/// against the motion when dead centre
fn push_sign(offset: f32, motion: f32) -> f32 {
    if offset > 0.0 {
        1.0
    } else if offset < 0.0 {
        -1.0
    } else if motion > 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Bounce velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn bounce(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Aabb {
        Aabb::new(Vec2::new(100.0, 0.0), Vec2::new(10.0, 10.0))
    }

    #[test]
    fn test_sweep_hits_face_head_on() {
        let hit = sweep_aabb(Vec2::ZERO, Vec2::splat(5.0), Vec2::new(200.0, 0.0), &unit_box())
            .expect("should hit");
        // Expanded box starts at x = 85
        assert!((hit.toi - 85.0 / 200.0).abs() < 1e-5);
        assert_eq!(hit.normal, Vec2::new(-1.0, 0.0));
        assert_eq!(hit.penetration, 0.0);
    }

    #[test]
    fn test_sweep_misses_short_motion() {
        let hit = sweep_aabb(Vec2::ZERO, Vec2::splat(5.0), Vec2::new(50.0, 0.0), &unit_box());
        assert!(hit.is_none());
    }

    #[test]
    fn test_sweep_misses_when_moving_away() {
        let hit = sweep_aabb(Vec2::ZERO, Vec2::splat(5.0), Vec2::new(-200.0, 0.0), &unit_box());
        assert!(hit.is_none());
    }

    #[test]
    fn test_sweep_misses_parallel_offset() {
        let hit = sweep_aabb(
            Vec2::new(0.0, 40.0),
            Vec2::splat(5.0),
            Vec2::new(200.0, 0.0),
            &unit_box(),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_sweep_diagonal_picks_entry_face() {
        // Approaching from above-left, top face is entered last
        let obstacle = Aabb::new(Vec2::new(50.0, 50.0), Vec2::new(40.0, 5.0));
        let motion = Vec2::new(10.0, 60.0);
        let hit = sweep_aabb(Vec2::new(30.0, 0.0), Vec2::splat(2.0), motion, &obstacle)
            .expect("should hit");
        assert_eq!(hit.normal, Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_sweep_overlap_reports_push_out() {
        let hit = sweep_aabb(Vec2::new(87.0, 2.0), Vec2::splat(5.0), Vec2::ZERO, &unit_box())
            .expect("overlap");
        assert_eq!(hit.toi, 0.0);
        assert_eq!(hit.normal, Vec2::new(-1.0, 0.0));
        assert!((hit.penetration - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_bounce() {
        // Ball moving down-right hits a floor (normal pointing up)
        let bounced = bounce(Vec2::new(100.0, 50.0), Vec2::new(0.0, -1.0));
        assert!((bounced.x - 100.0).abs() < 0.001);
        assert!((bounced.y + 50.0).abs() < 0.001);
    }

    #[test]
    fn test_closest_point_clamps() {
        let b = unit_box();
        assert_eq!(b.closest_point(Vec2::new(0.0, 0.0)), Vec2::new(90.0, 0.0));
        assert_eq!(b.closest_point(Vec2::new(95.0, -30.0)), Vec2::new(95.0, -10.0));
        assert_eq!(b.closest_point(Vec2::new(110.0, 10.0)), Vec2::new(110.0, 10.0));
    }
}
