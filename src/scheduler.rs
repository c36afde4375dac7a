//! Lamp effect scheduler.
//!
//! Owns the operator intent (power and mode) and the timing state of the
//! running pattern. The caller's loop calls [`LampScheduler::advance`] once
//! per iteration; every call performs at most one transition and returns
//! immediately, so the same thread can keep serving the network.
//!
//! # Usage
//!
//! ```ignore
//! let mut lamp = LampScheduler::new(LampConfig::default(), pin, XorShiftRandom::with_clock(hardware_seed));
//! lamp.set_mode(LampMode::Purr);
//! lamp.set_power(true);
//!
//! loop {
//!     serve_pending_requests();
//!     lamp.advance(Timestamp::from(Instant::now()));
//! }
//! ```

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::LampOutput;
use crate::effect::{
    BlinkTimings, BzzzTimings, DEFAULT_PURR_STEPS, EffectSlot, EffectState, LampMode, PurrStep,
};
use crate::random::RandomSource;
use crate::time::Timestamp;

/// Pattern timings of the scheduler
#[derive(Debug, Clone, Copy)]
pub struct LampConfig {
    pub blink: BlinkTimings,
    pub purr: &'static [PurrStep],
    pub bzzz: BzzzTimings,
}

impl Default for LampConfig {
    fn default() -> Self {
        Self {
            blink: BlinkTimings::default(),
            purr: &DEFAULT_PURR_STEPS,
            bzzz: BzzzTimings::default(),
        }
    }
}

/// Single-owner lamp state machine.
///
/// `set_power`, `set_mode` and `advance` are not meant to be called
/// concurrently; wrap the owner in [`crate::SharedDevice`] when several
/// contexts need access.
pub struct LampScheduler<O: LampOutput, R: RandomSource> {
    // External dependencies and configuration
    output: O,
    random: R,
    config: LampConfig,

    // Operator intent
    power: bool,
    effect: EffectSlot,

    // Transient pattern state
    state: EffectState,
    /// Mix the time of the next `advance` into the random source
    entropy_pending: bool,
}

impl<O: LampOutput, R: RandomSource> LampScheduler<O, R> {
    /// Create a scheduler with the lamp off in static mode.
    ///
    /// Drives the output low right away.
    pub fn new(config: LampConfig, output: O, random: R) -> Self {
        let mut scheduler = Self {
            output,
            random,
            effect: LampMode::Static.to_slot(&config),
            config,
            power: false,
            state: EffectState::new(false),
            entropy_pending: false,
        };
        scheduler.output.set_level(false);
        scheduler
    }

    /// Switch the lamp on or off.
    ///
    /// Restarts the pattern and writes the first frame (or low) before
    /// returning.
    pub fn set_power(&mut self, on: bool) {
        #[cfg(feature = "esp32-log")]
        println!("lamp: power {}", if on { "on" } else { "off" });

        self.power = on;
        self.restart();
    }

    /// Select a new pattern, restarting it from the first frame
    pub fn set_mode(&mut self, mode: LampMode) {
        #[cfg(feature = "esp32-log")]
        println!("lamp: mode {}", mode.as_str());

        self.effect = mode.to_slot(&self.config);
        self.restart();
    }

    /// Move the lamp to another pin, keeping the current output level
    pub fn set_pin(&mut self, pin: u8) {
        self.output.switch_pin(pin, self.state.output_on);
    }

    /// Advance the running pattern by at most one transition.
    ///
    /// Safe to call at any rate: between deadlines it changes nothing.
    pub fn advance(&mut self, now: Timestamp) {
        let previous = self.state.output_on;
        if self.entropy_pending {
            // Restart times follow operator actions
            self.random.mix_entropy(u64::from(now.as_millis()));
            self.entropy_pending = false;
        }
        if self.power {
            self.effect.advance(&mut self.state, now, &mut self.random);
        } else {
            self.state.output_on = false;
        }

        if self.state.output_on != previous {
            self.output.set_level(self.state.output_on);
        }
    }

    /// Operator intent
    pub const fn is_on(&self) -> bool {
        self.power
    }

    /// Level currently driven on the pin
    pub const fn output_is_on(&self) -> bool {
        self.state.output_on
    }

    pub fn mode(&self) -> LampMode {
        self.effect.mode()
    }

    pub const fn state(&self) -> &EffectState {
        &self.state
    }

    pub const fn output(&self) -> &O {
        &self.output
    }

    /// Reset the pattern state and drive its first frame
    fn restart(&mut self) {
        let level = self.power && self.effect.first_level();
        self.state = EffectState::new(level);
        self.entropy_pending = true;
        self.output.set_level(level);
    }
}
