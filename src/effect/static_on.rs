//! Steady light
//!
//! Holds the lamp on. Uses no timing state.

use super::{Effect, EffectState};
use crate::{random::RandomSource, time::Timestamp};

/// Static effect - lamp held on
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticEffect;

impl Effect for StaticEffect {
    fn advance<R: RandomSource>(&self, state: &mut EffectState, _now: Timestamp, _random: &mut R) {
        state.output_on = true;
    }
}
