//! Effect system with compile-time known lamp patterns
//!
//! All effects are stored in an enum to avoid dynamic dispatch.
//! Effects are stateless: the timing state of the running pattern lives in
//! [`EffectState`], owned by the scheduler and reset on every power or mode
//! change, so a pattern always starts from its first frame.

mod blink;
mod bzzz;
mod purr;
mod static_on;

pub use blink::{BlinkEffect, BlinkTimings};
pub use bzzz::{BzzzEffect, BzzzTimings};
pub use purr::{DEFAULT_PURR_STEPS, PurrEffect, PurrStep};
pub use static_on::StaticEffect;

use crate::{random::RandomSource, scheduler::LampConfig, time::Timestamp};

const MODE_NAME_STATIC: &str = "static";
const MODE_NAME_BLINK: &str = "blink";
const MODE_NAME_PURR: &str = "purr";
const MODE_NAME_BZZZ: &str = "bzzz";

const MODE_ID_STATIC: u8 = 0;
const MODE_ID_BLINK: u8 = 1;
const MODE_ID_PURR: u8 = 2;
const MODE_ID_BZZZ: u8 = 3;

/// Timing state of the running pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EffectState {
    /// Next forced transition, `None` right after a reset
    pub(crate) next_deadline: Option<Timestamp>,
    /// Current entry of the purr step table
    pub(crate) step_index: usize,
    /// Toggles left in the current flicker burst
    pub(crate) flickers_remaining: u8,
    /// Level currently driven on the lamp pin
    pub(crate) output_on: bool,
}

impl EffectState {
    /// Start-of-pattern state with the given output level
    pub const fn new(output_on: bool) -> Self {
        Self {
            next_deadline: None,
            step_index: 0,
            flickers_remaining: 0,
            output_on,
        }
    }

    pub const fn next_deadline(&self) -> Option<Timestamp> {
        self.next_deadline
    }

    pub const fn step_index(&self) -> usize {
        self.step_index
    }

    pub const fn flickers_remaining(&self) -> u8 {
        self.flickers_remaining
    }

    pub const fn output_on(&self) -> bool {
        self.output_on
    }

    /// Check if the pending deadline is due at `now`
    pub(crate) fn is_due(&self, now: Timestamp) -> bool {
        self.next_deadline
            .is_some_and(|deadline| now.has_reached(deadline))
    }
}

pub trait Effect {
    /// Output level of the first frame after a reset
    fn first_level(&self) -> bool {
        true
    }

    /// Perform at most one transition.
    ///
    /// Must return immediately and be a no-op between deadlines.
    fn advance<R: RandomSource>(&self, state: &mut EffectState, now: Timestamp, random: &mut R);
}

/// Effect slot - enum containing all possible effects
#[derive(Debug, Clone)]
pub enum EffectSlot {
    /// Lamp held on
    Static(StaticEffect),
    /// Equal on/off halves
    Blink(BlinkEffect),
    /// Cycling step table
    Purr(PurrEffect),
    /// Steady light with random flicker bursts
    Bzzz(BzzzEffect),
}

/// Known lamp modes that can be requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum LampMode {
    #[default]
    Static = MODE_ID_STATIC,
    Blink = MODE_ID_BLINK,
    Purr = MODE_ID_PURR,
    Bzzz = MODE_ID_BZZZ,
}

impl Default for EffectSlot {
    fn default() -> Self {
        Self::Static(StaticEffect)
    }
}

impl LampMode {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            MODE_ID_STATIC => Self::Static,
            MODE_ID_BLINK => Self::Blink,
            MODE_ID_PURR => Self::Purr,
            MODE_ID_BZZZ => Self::Bzzz,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Static => MODE_NAME_STATIC,
            Self::Blink => MODE_NAME_BLINK,
            Self::Purr => MODE_NAME_PURR,
            Self::Bzzz => MODE_NAME_BZZZ,
        }
    }

    /// Parse a mode name, ignoring ASCII case
    pub fn parse_from_str(s: &str) -> Option<Self> {
        [Self::Static, Self::Blink, Self::Purr, Self::Bzzz]
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s))
    }

    /// Parse a stored mode name, falling back to [`LampMode::Static`]
    pub fn from_stored(s: &str) -> Self {
        Self::parse_from_str(s).unwrap_or_default()
    }

    pub fn to_slot(self, config: &LampConfig) -> EffectSlot {
        match self {
            Self::Static => EffectSlot::Static(StaticEffect),
            Self::Blink => EffectSlot::Blink(BlinkEffect::new(config.blink)),
            Self::Purr => EffectSlot::Purr(PurrEffect::new(config.purr)),
            Self::Bzzz => EffectSlot::Bzzz(BzzzEffect::new(config.bzzz)),
        }
    }
}

impl EffectSlot {
    /// Get the mode for external observation
    pub fn mode(&self) -> LampMode {
        match self {
            Self::Static(_) => LampMode::Static,
            Self::Blink(_) => LampMode::Blink,
            Self::Purr(_) => LampMode::Purr,
            Self::Bzzz(_) => LampMode::Bzzz,
        }
    }

    /// Output level of the first frame of the current effect
    pub fn first_level(&self) -> bool {
        match self {
            Self::Static(effect) => effect.first_level(),
            Self::Blink(effect) => effect.first_level(),
            Self::Purr(effect) => effect.first_level(),
            Self::Bzzz(effect) => effect.first_level(),
        }
    }

    /// Advance the current effect
    pub fn advance<R: RandomSource>(&self, state: &mut EffectState, now: Timestamp, random: &mut R) {
        match self {
            Self::Static(effect) => effect.advance(state, now, random),
            Self::Blink(effect) => effect.advance(state, now, random),
            Self::Purr(effect) => effect.advance(state, now, random),
            Self::Bzzz(effect) => effect.advance(state, now, random),
        }
    }
}
