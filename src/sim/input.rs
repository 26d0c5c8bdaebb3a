//! Keyboard sampling for paddle control

use glam::Vec2;

/// Raw key state read once per rendered frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub left: bool,
    pub right: bool,
    /// Start a new round once the current one is over
    pub restart: bool,
}

/// Horizontal paddle direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    Left,
    #[default]
    Idle,
    Right,
}

impl Direction {
    /// Left and right cancel each other out
    pub fn from_keys(keys: KeyState) -> Self {
        match (keys.left, keys.right) {
            (true, false) => Direction::Left,
            (false, true) => Direction::Right,
            _ => Direction::Idle,
        }
    }

    /// Signed x component in {-1, 0, 1}
    pub fn axis(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Idle => 0.0,
            Direction::Right => 1.0,
        }
    }

    pub fn vector(self) -> Vec2 {
        Vec2::new(self.axis(), 0.0)
    }
}

/// Emits a direction only when it differs from the previous sample
#[derive(Debug, Clone, Default)]
pub struct InputSampler {
    last: Option<Direction>,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sample(&mut self, keys: KeyState) -> Option<Direction> {
        let direction = Direction::from_keys(keys);
        if self.last == Some(direction) {
            return None;
        }
        self.last = Some(direction);
        Some(direction)
    }

    /// Forget the last sample so the next frame emits again
    pub fn reset(&mut self) {
        self.last = None;
    }
}
