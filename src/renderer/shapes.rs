//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::sim::{Aabb, World};

/// Segments used for the ball
const BALL_SEGMENTS: u32 = 16;

/// Generate vertices for a filled axis-aligned rectangle
pub fn rect(aabb: &Aabb, color: [f32; 4]) -> Vec<Vertex> {
    let min = aabb.min();
    let max = aabb.max();

    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// All vertices for one frame, in arena coordinates
///
/// Draw order: walls, bricks, paddle, ball.
pub fn scene(world: &World) -> Vec<Vertex> {
    let rects = world.walls.len() + world.bricks.len() + 1;
    let mut vertices = Vec::with_capacity(rects * 6 + (BALL_SEGMENTS * 3) as usize);

    for wall in &world.walls {
        vertices.extend(rect(wall, colors::WALL));
    }
    for brick in &world.bricks {
        vertices.extend(rect(&brick.aabb, colors::brick(brick.row)));
    }
    vertices.extend(rect(&world.paddle.aabb(), colors::PADDLE));
    vertices.extend(circle(
        world.ball.body.position,
        world.ball.radius(),
        colors::BALL,
        BALL_SEGMENTS,
    ));

    vertices
}

/// Map an arena point (origin top-left, +y down) to normalized device
/// coordinates, letterboxed to keep the arena's aspect ratio
///
/// `margin` shrinks the arena inside the viewport so the walls outside it
/// stay visible.
pub fn arena_to_ndc(point: Vec2, arena: Vec2, viewport: (u32, u32), margin: f32) -> Vec2 {
    let view_aspect = viewport.0 as f32 / viewport.1.max(1) as f32;
    let arena_aspect = arena.x / arena.y;

    let scale = if view_aspect > arena_aspect {
        Vec2::new(arena_aspect / view_aspect, 1.0)
    } else {
        Vec2::new(1.0, view_aspect / arena_aspect)
    };

    let unit = Vec2::new(point.x / arena.x * 2.0 - 1.0, 1.0 - point.y / arena.y * 2.0);
    unit * scale * margin
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_rect_covers_box() {
        let verts = rect(&Aabb::new(Vec2::new(10.0, 20.0), Vec2::new(5.0, 2.0)), colors::WALL);
        assert_eq!(verts.len(), 6);
        assert!(verts.iter().all(|v| (5.0..=15.0).contains(&v.position[0])));
        assert!(verts.iter().all(|v| (18.0..=22.0).contains(&v.position[1])));
    }

    #[test]
    fn test_scene_vertex_count() {
        let world = World::new(&Tuning::default(), &mut Pcg32::seed_from_u64(1));
        let verts = scene(&world);
        let expected = (3 + 112 + 1) * 6 + BALL_SEGMENTS as usize * 3;
        assert_eq!(verts.len(), expected);
    }

    #[test]
    fn test_brick_colors_pair_rows() {
        assert_eq!(colors::brick(0), colors::brick(1));
        assert_ne!(colors::brick(1), colors::brick(2));
        assert_eq!(colors::brick(8), colors::brick(0));
    }

    #[test]
    fn test_arena_to_ndc_letterboxes() {
        let arena = Vec2::new(640.0, 480.0);

        // Same aspect: corners map to the corners
        let tl = arena_to_ndc(Vec2::ZERO, arena, (640, 480), 1.0);
        let br = arena_to_ndc(arena, arena, (640, 480), 1.0);
        assert_eq!(tl, Vec2::new(-1.0, 1.0));
        assert_eq!(br, Vec2::new(1.0, -1.0));

        // Wider viewport: pillarboxed horizontally
        let right = arena_to_ndc(Vec2::new(640.0, 240.0), arena, (1280, 480), 1.0);
        assert!((right.x - 0.5).abs() < 1e-5);
        assert_eq!(right.y, 0.0);

        // Taller viewport: letterboxed vertically
        let top = arena_to_ndc(Vec2::new(320.0, 0.0), arena, (640, 960), 1.0);
        assert!((top.y - 0.5).abs() < 1e-5);
    }
}
