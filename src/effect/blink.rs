//! Blink effect
//!
//! Alternates the lamp between on and off with equal halves.

use embassy_time::Duration;

use super::{Effect, EffectState};
use crate::{random::RandomSource, time::Timestamp};

const DEFAULT_HALF_PERIOD_MS: u64 = 650;

/// Durations of the blink phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkTimings {
    /// Time the lamp stays on
    pub on: Duration,
    /// Time the lamp stays off
    pub off: Duration,
}

impl BlinkTimings {
    /// Equal on and off halves
    pub const fn symmetric(half_period: Duration) -> Self {
        Self {
            on: half_period,
            off: half_period,
        }
    }
}

impl Default for BlinkTimings {
    fn default() -> Self {
        Self::symmetric(Duration::from_millis(DEFAULT_HALF_PERIOD_MS))
    }
}

/// Blink effect - square wave on the lamp pin
#[derive(Debug, Clone)]
pub struct BlinkEffect {
    timings: BlinkTimings,
}

impl BlinkEffect {
    pub const fn new(timings: BlinkTimings) -> Self {
        Self { timings }
    }

    const fn phase_duration(&self, on: bool) -> Duration {
        if on { self.timings.on } else { self.timings.off }
    }
}

impl Effect for BlinkEffect {
    fn advance<R: RandomSource>(&self, state: &mut EffectState, now: Timestamp, _random: &mut R) {
        if state.next_deadline.is_none() {
            state.output_on = true;
            state.next_deadline = Some(now.wrapping_add(self.timings.on));
            return;
        }
        if !state.is_due(now) {
            return;
        }

        state.output_on = !state.output_on;
        let duration = self.phase_duration(state.output_on);
        state.next_deadline = Some(now.wrapping_add(duration));
    }
}
