//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits paddle
    PaddleHit,
    /// Ball hits wall
    WallHit,
    /// Brick destroyed
    BrickBreak,
    /// Ball dropped out of the arena
    BallLost,
    /// Every brick destroyed
    Cleared,
    /// New high score
    HighScore,
}

impl From<GameEvent> for SoundEffect {
    fn from(event: GameEvent) -> Self {
        match event {
            GameEvent::PaddleHit => SoundEffect::PaddleHit,
            GameEvent::WallHit => SoundEffect::WallHit,
            GameEvent::BrickDestroyed { .. } => SoundEffect::BrickBreak,
            GameEvent::BallLost => SoundEffect::BallLost,
            GameEvent::Cleared => SoundEffect::Cleared,
        }
    }
}

/// A single enveloped oscillator note
struct Note {
    freq: f32,
    /// Frequency at the end of the note, for sweeps
    end_freq: Option<f32>,
    osc_type: OscillatorType,
    gain: f32,
    duration: f64,
    delay: f64,
}

impl Note {
    fn new(freq: f32, osc_type: OscillatorType, gain: f32, duration: f64) -> Self {
        Self {
            freq,
            end_freq: None,
            osc_type,
            gain,
            duration,
            delay: 0.0,
        }
    }

    fn sweep_to(mut self, end_freq: f32) -> Self {
        self.end_freq = Some(end_freq);
        self
    }

    fn after(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    master_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: 0.8,
            muted: false,
        }
    }

    /// Flip mute on or off, returning the new state
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Browsers keep the context suspended until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let notes: Vec<Note> = match effect {
            // Solid thump
            SoundEffect::PaddleHit => vec![
                Note::new(150.0, OscillatorType::Sine, 0.6, 0.1).sweep_to(60.0),
            ],
            // Higher ping
            SoundEffect::WallHit => vec![Note::new(400.0, OscillatorType::Sine, 0.3, 0.08)],
            // Bright crack over a bass thump
            SoundEffect::BrickBreak => vec![
                Note::new(1200.0, OscillatorType::Square, 0.15, 0.08).sweep_to(300.0),
                Note::new(90.0, OscillatorType::Sine, 0.3, 0.1),
            ],
            // Ominous descend
            SoundEffect::BallLost => vec![
                Note::new(300.0, OscillatorType::Sine, 0.4, 0.8).sweep_to(20.0),
            ],
            // Fanfare
            SoundEffect::Cleared => [400.0, 500.0, 600.0, 800.0]
                .iter()
                .enumerate()
                .map(|(i, &f)| {
                    Note::new(f, OscillatorType::Triangle, 0.3, 0.4).after(i as f64 * 0.1)
                })
                .collect(),
            SoundEffect::HighScore => [500.0, 600.0, 700.0, 800.0, 1000.0]
                .iter()
                .enumerate()
                .map(|(i, &f)| {
                    Note::new(f, OscillatorType::Triangle, 0.25, 0.25).after(i as f64 * 0.08)
                })
                .collect(),
        };

        for note in &notes {
            self.play_note(ctx, note, vol);
        }
    }

    /// Create an oscillator routed through a gain node
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    fn play_note(&self, ctx: &AudioContext, note: &Note, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, note.freq, note.osc_type) else {
            return;
        };
        let t = ctx.current_time() + note.delay;

        gain.gain().set_value_at_time(vol * note.gain, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + note.duration)
            .ok();

        if let Some(end) = note.end_freq {
            osc.frequency().set_value_at_time(note.freq, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(end, t + note.duration)
                .ok();
        }

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + note.duration * 1.25).ok();
    }
}
