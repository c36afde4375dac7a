//! Bzzz effect
//!
//! Imitates a lamp with a loose contact. The lamp stays on for a random
//! steady interval, then flickers through a random number of on/off pairs
//! separated by short random gaps, then settles on again.
//!
//! `flickers_remaining == 0` means the steady interval is running.

use embassy_time::Duration;

use super::{Effect, EffectState};
use crate::{random::RandomSource, time::Timestamp};

const DEFAULT_STEADY_MIN_MS: u64 = 6_000;
const DEFAULT_STEADY_MAX_MS: u64 = 14_000;
const DEFAULT_FLICKER_MIN_MS: u64 = 50;
const DEFAULT_FLICKER_MAX_MS: u64 = 120;
const DEFAULT_PAIRS_MIN: u8 = 3;
const DEFAULT_PAIRS_MAX: u8 = 4;

/// Random bounds of the bzzz pattern, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BzzzTimings {
    pub steady_min: Duration,
    pub steady_max: Duration,
    pub flicker_min: Duration,
    pub flicker_max: Duration,
    /// Complete on/off pairs per burst
    pub pairs_min: u8,
    pub pairs_max: u8,
}

impl Default for BzzzTimings {
    fn default() -> Self {
        Self {
            steady_min: Duration::from_millis(DEFAULT_STEADY_MIN_MS),
            steady_max: Duration::from_millis(DEFAULT_STEADY_MAX_MS),
            flicker_min: Duration::from_millis(DEFAULT_FLICKER_MIN_MS),
            flicker_max: Duration::from_millis(DEFAULT_FLICKER_MAX_MS),
            pairs_min: DEFAULT_PAIRS_MIN,
            pairs_max: DEFAULT_PAIRS_MAX,
        }
    }
}

/// Bzzz effect - steady light with random flicker bursts
#[derive(Debug, Clone)]
pub struct BzzzEffect {
    timings: BzzzTimings,
}

#[allow(clippy::cast_possible_truncation)]
fn random_duration<R: RandomSource>(random: &mut R, min: Duration, max: Duration) -> Duration {
    let millis = random.next_in_range(min.as_millis() as u32, max.as_millis() as u32);
    Duration::from_millis(u64::from(millis))
}

impl BzzzEffect {
    pub const fn new(timings: BzzzTimings) -> Self {
        Self { timings }
    }

    fn start_steady<R: RandomSource>(&self, state: &mut EffectState, now: Timestamp, random: &mut R) {
        let steady = random_duration(random, self.timings.steady_min, self.timings.steady_max);
        state.output_on = true;
        state.flickers_remaining = 0;
        state.next_deadline = Some(now.wrapping_add(steady));
    }

    #[allow(clippy::cast_possible_truncation)]
    fn start_burst<R: RandomSource>(&self, state: &mut EffectState, random: &mut R) {
        let pairs = random.next_in_range(
            u32::from(self.timings.pairs_min),
            u32::from(self.timings.pairs_max),
        ) as u8;
        state.flickers_remaining = pairs.saturating_mul(2);
    }

    fn toggle<R: RandomSource>(&self, state: &mut EffectState, now: Timestamp, random: &mut R) {
        state.output_on = !state.output_on;
        state.flickers_remaining -= 1;
        if state.flickers_remaining == 0 {
            self.start_steady(state, now, random);
            return;
        }
        let gap = random_duration(random, self.timings.flicker_min, self.timings.flicker_max);
        state.next_deadline = Some(now.wrapping_add(gap));
    }
}

impl Effect for BzzzEffect {
    fn advance<R: RandomSource>(&self, state: &mut EffectState, now: Timestamp, random: &mut R) {
        if state.next_deadline.is_none() {
            self.start_steady(state, now, random);
            return;
        }
        if !state.is_due(now) {
            return;
        }

        if state.flickers_remaining == 0 {
            self.start_burst(state, random);
            if state.flickers_remaining == 0 {
                // Zero-pair burst: go straight back to steady
                self.start_steady(state, now, random);
                return;
            }
        }
        self.toggle(state, now, random);
    }
}
