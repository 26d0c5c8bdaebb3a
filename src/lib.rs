//! Brick Breaker - A single-level Breakout game
//!
//! Core modules:
//! - `sim`: Simulation (kinematic bodies, world, paddle input, score fold)
//! - `game`: Frame/physics driver around the simulation
//! - `renderer`: WebGPU rendering pipeline
//! - `tuning`: Data-driven game balance
//! - `highscores`: Leaderboard of finished rounds

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod game;
pub mod highscores;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use game::{Game, Phase};
pub use highscores::HighScores;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Points awarded per destroyed brick
    pub const BRICK_SCORE: u32 = 10;

    /// Gap kept between a body and whatever it collided with
    pub const SAFE_MARGIN: f32 = 0.08;
}
