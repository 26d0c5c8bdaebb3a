//! Frame and physics driver
//!
//! Exposes the two callbacks a game loop provides: `process` once per
//! rendered frame and `physics_process` once per fixed physics step.
//! `advance` combines both with a fixed-step accumulator.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::sim::{Direction, GameEvent, InputSampler, KeyState, State, World, move_paddle, step};
use crate::tuning::Tuning;

/// Round progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    /// Every brick destroyed
    Cleared,
    /// Ball dropped out of the bottom of the arena
    BallLost,
}

impl Phase {
    pub fn is_over(self) -> bool {
        self != Phase::Playing
    }
}

pub struct Game {
    pub tuning: Tuning,
    pub world: World,
    pub state: State,
    pub phase: Phase,
    pub seed: u64,
    sampler: InputSampler,
    /// Latest sampled direction; `None` until the first frame is sampled
    direction: Option<Direction>,
    accumulator: f32,
    rng: Pcg32,
}

impl Game {
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let world = World::new(&tuning, &mut rng);
        Self {
            tuning,
            world,
            state: State::default(),
            phase: Phase::Playing,
            seed,
            sampler: InputSampler::new(),
            direction: None,
            accumulator: 0.0,
            rng,
        }
    }

    /// Lay out a fresh level and reset the score
    pub fn restart(&mut self) {
        self.world = World::new(&self.tuning, &mut self.rng);
        self.state = State::default();
        self.phase = Phase::Playing;
        self.accumulator = 0.0;
        self.sampler.reset();
        self.direction = None;
        log::info!("Round restarted");
    }

    /// Per rendered frame: sample input
    pub fn process(&mut self, keys: KeyState) {
        if let Some(direction) = self.sampler.sample(keys) {
            log::trace!("Paddle direction -> {direction:?}");
            self.direction = Some(direction);
        }

        if keys.restart && self.phase.is_over() {
            self.restart();
        }
    }

    /// Per physics step: move the paddle, then the ball
    pub fn physics_process(&mut self, dt: f32) {
        if self.phase.is_over() {
            return;
        }

        if let Some(direction) = self.direction {
            move_paddle(
                &mut self.world.paddle,
                &self.world.walls,
                direction,
                self.tuning.paddle_speed,
                dt,
            );
        }

        self.state = step(self.state, &mut self.world, dt);
        self.update_phase();
    }

    fn update_phase(&mut self) {
        let next = if self.world.cleared() {
            Phase::Cleared
        } else if self.world.ball_lost() {
            Phase::BallLost
        } else {
            return;
        };

        self.phase = next;
        self.world.events.push(match next {
            Phase::Cleared => GameEvent::Cleared,
            _ => GameEvent::BallLost,
        });
        log::info!(
            "Round over ({next:?}): score {}, {} bricks destroyed",
            self.state.score,
            self.world.bricks_destroyed
        );
    }

    /// Run one rendered frame: sample input, then as many fixed physics
    /// steps as the elapsed time allows. Returns the number of steps run.
    pub fn advance(&mut self, keys: KeyState, frame_dt: f32) -> u32 {
        self.process(keys);

        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.physics_process(SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        substeps
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.world.drain_events()
    }
}
