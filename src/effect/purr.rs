//! Purr effect
//!
//! Plays a fixed table of (level, duration) steps in a loop:
//! a short double pulse followed by a rest.

use embassy_time::Duration;

use super::{Effect, EffectState};
use crate::{random::RandomSource, time::Timestamp};

/// One entry of the purr table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurrStep {
    /// Lamp level while the step plays
    pub on: bool,
    /// How long the step plays
    pub duration: Duration,
}

impl PurrStep {
    pub const fn new(on: bool, duration_ms: u64) -> Self {
        Self {
            on,
            duration: Duration::from_millis(duration_ms),
        }
    }
}

/// Double pulse, then rest
pub const DEFAULT_PURR_STEPS: [PurrStep; 4] = [
    PurrStep::new(true, 160),
    PurrStep::new(false, 90),
    PurrStep::new(true, 220),
    PurrStep::new(false, 520),
];

/// Purr effect - cycles through a step table
#[derive(Debug, Clone)]
pub struct PurrEffect {
    steps: &'static [PurrStep],
}

impl PurrEffect {
    /// Create a purr effect over `steps`.
    ///
    /// An empty table holds the lamp on.
    pub const fn new(steps: &'static [PurrStep]) -> Self {
        Self { steps }
    }

    fn play(&self, state: &mut EffectState, index: usize, now: Timestamp) {
        let step = self.steps[index];
        state.step_index = index;
        state.output_on = step.on;
        state.next_deadline = Some(now.wrapping_add(step.duration));
    }
}

impl Effect for PurrEffect {
    fn first_level(&self) -> bool {
        self.steps.first().is_none_or(|step| step.on)
    }

    fn advance<R: RandomSource>(&self, state: &mut EffectState, now: Timestamp, _random: &mut R) {
        if self.steps.is_empty() {
            state.output_on = true;
            return;
        }
        if state.next_deadline.is_none() {
            self.play(state, 0, now);
            return;
        }
        if !state.is_due(now) {
            return;
        }

        let next = (state.step_index + 1) % self.steps.len();
        self.play(state, next, now);
    }
}
