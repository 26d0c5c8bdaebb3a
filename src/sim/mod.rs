//! Simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only
//! - Seeded RNG only (ball spawn)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod input;
pub mod layout;
pub mod state;
pub mod tick;
pub mod world;

pub use body::{Collision, KinematicBody, Shape};
pub use collision::{Aabb, bounce, sweep_aabb};
pub use input::{Direction, InputSampler, KeyState};
pub use layout::{SpawnPath, arena_walls, layout_bricks, spawn_ball, spawn_velocity};
pub use state::{Ball, Brick, Collider, GameEvent, Paddle, State};
pub use tick::{move_paddle, paddle_deflection, step};
pub use world::World;
