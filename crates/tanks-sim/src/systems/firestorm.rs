//! Firestorm: timed sequences of randomized shell drops across the map.
//!
//! Each activation starts a sequence of `wave_count` shells paced by
//! `shell_delay_secs`. Pacing is a countdown advanced by the engine tick, so
//! cancelling is just dropping the sequence: nothing fires afterwards.

use glam::{Quat, Vec3};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use tanks_core::config::FirestormConfig;
use tanks_core::enums::FirestormActivation;
use tanks_core::events::RoundEvent;
use tanks_core::host::EngineHost;
use tanks_core::state::FirestormView;

/// Countdown remainders at or below this are due. Ticks like 1/60 s are not
/// exact in binary, so a countdown that should reach zero stops just above it.
const DUE_EPSILON: f64 = 1e-9;

/// Where one shell sequence is in its schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SequenceState {
    /// The next shell drops once `secs` more seconds have elapsed.
    ResumeAfter { secs: f64, shells_left: u32 },
    Finished,
}

impl SequenceState {
    fn start(shells: u32) -> Self {
        if shells == 0 {
            SequenceState::Finished
        } else {
            SequenceState::ResumeAfter {
                secs: 0.0,
                shells_left: shells,
            }
        }
    }

    /// Release the shells that are due, then count down by `dt`.
    /// Returns how many shells were released.
    fn advance(&mut self, dt: f64, delay: f64) -> u32 {
        let SequenceState::ResumeAfter { secs, shells_left } = self else {
            return 0;
        };
        let mut due = 0;
        while *secs <= DUE_EPSILON && *shells_left > 0 {
            *shells_left -= 1;
            *secs += delay;
            due += 1;
        }
        *secs -= dt;
        if *shells_left == 0 {
            *self = SequenceState::Finished;
        }
        due
    }

    fn shells_left(&self) -> u32 {
        match self {
            SequenceState::ResumeAfter { shells_left, .. } => *shells_left,
            SequenceState::Finished => 0,
        }
    }
}

/// The Firestorm scheduler. Armed only while a round is being played.
#[derive(Debug, Clone)]
pub struct Firestorm {
    config: FirestormConfig,
    armed: bool,
    uses_remaining: u32,
    sequences: Vec<SequenceState>,
    shells_dropped: u64,
}

impl Firestorm {
    pub fn new(config: FirestormConfig) -> Self {
        Self {
            uses_remaining: config.uses,
            config,
            armed: false,
            sequences: Vec::new(),
            shells_dropped: 0,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn uses_remaining(&self) -> u32 {
        self.uses_remaining
    }

    pub fn shells_dropped(&self) -> u64 {
        self.shells_dropped
    }

    /// Shells still scheduled across all running sequences.
    pub fn shells_pending(&self) -> u32 {
        self.sequences.iter().map(SequenceState::shells_left).sum()
    }

    pub fn is_running(&self) -> bool {
        !self.sequences.is_empty()
    }

    pub fn arm(&mut self) {
        self.armed = true;
    }

    /// Stop accepting activations and discard every running sequence.
    /// Returns the number of shells that will now never drop.
    pub fn disarm(&mut self) -> u32 {
        let discarded = self.shells_pending();
        self.sequences.clear();
        self.armed = false;
        if discarded > 0 {
            debug!(discarded, "Firestorm cancelled");
        }
        discarded
    }

    /// Restore the per-session use budget.
    pub fn reset_uses(&mut self) {
        self.uses_remaining = self.config.uses;
    }

    /// Spend one use and start a new sequence. Sequences may overlap.
    pub fn activate(&mut self) -> FirestormActivation {
        if !self.armed {
            return FirestormActivation::Disarmed;
        }
        if self.uses_remaining == 0 {
            return FirestormActivation::Exhausted;
        }
        self.uses_remaining -= 1;
        let sequence = SequenceState::start(self.config.wave_count);
        if sequence != SequenceState::Finished {
            self.sequences.push(sequence);
        }
        info!(uses_remaining = self.uses_remaining, "Firestorm started");
        FirestormActivation::Started {
            uses_remaining: self.uses_remaining,
        }
    }

    /// Advance every sequence by `dt` and drop the shells that came due.
    /// Returns how many shells were dropped.
    pub fn tick(
        &mut self,
        dt: f64,
        rng: &mut ChaCha8Rng,
        host: &mut impl EngineHost,
        events: &mut Vec<RoundEvent>,
    ) -> u32 {
        if !self.armed {
            self.sequences.clear();
            return 0;
        }

        let delay = self.config.shell_delay_secs;
        let mut dropped = 0;
        for sequence in &mut self.sequences {
            for _ in 0..sequence.advance(dt, delay) {
                let position = drop_shell(&self.config, rng, host);
                events.push(RoundEvent::ShellDropped { position });
                dropped += 1;
            }
        }
        self.sequences.retain(|s| *s != SequenceState::Finished);
        self.shells_dropped += u64::from(dropped);
        dropped
    }

    pub fn view(&self) -> FirestormView {
        FirestormView {
            armed: self.armed,
            uses_remaining: self.uses_remaining,
            shells_pending: self.shells_pending(),
            shells_dropped: self.shells_dropped,
        }
    }
}

/// Drop one shell above a random point of the map, falling straight down.
fn drop_shell(config: &FirestormConfig, rng: &mut ChaCha8Rng, host: &mut impl EngineHost) -> Vec3 {
    let range = config.random_range;
    let x = rng.gen_range(-range..=range);
    let z = rng.gen_range(-range..=range);
    let position = Vec3::new(x, config.drop_height, z);
    let rotation = fall_rotation(position, Vec3::new(x, 0.0, z));
    let velocity = Vec3::NEG_Y * config.fall_speed;
    host.instantiate_shell(position, rotation, velocity);
    position
}

/// Rotation turning `from` onto `to`, identity when either is degenerate.
fn fall_rotation(from: Vec3, to: Vec3) -> Quat {
    let from = from.normalize_or_zero();
    let to = to.normalize_or_zero();
    if from == Vec3::ZERO || to == Vec3::ZERO {
        Quat::IDENTITY
    } else {
        Quat::from_rotation_arc(from, to)
    }
}
