//! Data-driven game balance
//!
//! Everything a level designer would set in an editor: arena and body sizes,
//! speeds, the brick grid and its template, and the ball spawn path.
//! Persisted as JSON; any field left out keeps its default.

use anyhow::{Context, ensure};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Largest brick grid a tuning file may ask for
pub const MAX_BRICKS: u32 = 10_000;

/// Prefab every brick in the grid is instantiated from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrickTemplate {
    /// Full width and height
    pub size: Vec2,
}

impl Default for BrickTemplate {
    fn default() -> Self {
        Self {
            size: Vec2::new(36.0, 10.0),
        }
    }
}

/// Brick grid layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrickGrid {
    pub rows: u32,
    pub columns: u32,
    /// Gap between neighbouring bricks (x = horizontal, y = vertical)
    pub spacing: Vec2,
    /// Centre of the top-left brick
    pub start: Vec2,
    pub template: BrickTemplate,
}

impl Default for BrickGrid {
    fn default() -> Self {
        Self {
            rows: 8,
            columns: 14,
            spacing: Vec2::new(5.0, 4.5),
            start: Vec2::new(53.5, 60.0),
            template: BrickTemplate::default(),
        }
    }
}

/// Game balance and layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Playfield size; +y points down, origin top-left
    pub arena: Vec2,
    pub wall_thickness: f32,

    pub paddle_speed: f32,
    pub paddle_size: Vec2,
    pub paddle_start: Vec2,

    pub ball_speed: f32,
    pub ball_radius: f32,

    pub bricks: BrickGrid,

    /// Polyline the ball spawns on
    pub spawn_path: Vec<Vec2>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena: Vec2::new(640.0, 480.0),
            wall_thickness: 16.0,

            paddle_speed: 200.0,
            paddle_size: Vec2::new(64.0, 12.0),
            paddle_start: Vec2::new(320.0, 440.0),

            ball_speed: 250.0,
            ball_radius: 5.0,

            bricks: BrickGrid::default(),

            spawn_path: vec![Vec2::new(120.0, 230.0), Vec2::new(520.0, 230.0)],
        }
    }
}

impl Tuning {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "brick_breaker_tuning";

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let tuning: Tuning = serde_json::from_str(json).context("malformed tuning JSON")?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.arena.x > 0.0 && self.arena.y > 0.0,
            "arena must have a positive size"
        );
        ensure!(self.wall_thickness > 0.0, "wall thickness must be positive");
        ensure!(self.paddle_speed > 0.0, "paddle speed must be positive");
        ensure!(
            self.paddle_size.x > 0.0 && self.paddle_size.y > 0.0,
            "paddle must have a positive size"
        );
        ensure!(self.ball_speed > 0.0, "ball speed must be positive");
        ensure!(self.ball_radius > 0.0, "ball radius must be positive");
        ensure!(
            self.bricks.rows > 0 && self.bricks.columns > 0,
            "brick grid must have at least one row and column"
        );
        let count = self.bricks.rows.checked_mul(self.bricks.columns);
        ensure!(
            count.is_some_and(|n| n <= MAX_BRICKS),
            "brick grid {}x{} exceeds {MAX_BRICKS} bricks",
            self.bricks.rows,
            self.bricks.columns
        );
        let size = self.bricks.template.size;
        ensure!(size.x > 0.0 && size.y > 0.0, "brick template must have a positive size");
        ensure!(
            self.spawn_path.len() >= 2,
            "spawn path needs at least two points, got {}",
            self.spawn_path.len()
        );
        Ok(())
    }

    /// Load tuning overrides from a JSON file (native)
    pub fn from_file(path: &std::path::Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading tuning file {}", path.display()))?;
        Self::from_json(&json)
    }

    /// Load tuning from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring stored tuning: {e:#}"),
                }
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Native builds have no LocalStorage; see [`Tuning::from_file`]
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
