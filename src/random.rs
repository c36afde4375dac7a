//! Bounded random numbers for randomized effects

use embassy_time::Instant;

/// Source of bounded random integers.
///
/// The scheduler is generic over this trait, so tests can substitute
/// a fixed sequence for the process-seeded generator.
pub trait RandomSource {
    /// Return a value in `min..=max`.
    ///
    /// Implementations must return `min` when `max <= min`.
    fn next_in_range(&mut self, min: u32, max: u32) -> u32;

    /// Stir outside entropy into the generator state.
    ///
    /// Sources replaying a fixed sequence ignore it.
    fn mix_entropy(&mut self, _entropy: u64) {}
}

/// Xorshift64* pseudorandom generator
#[derive(Debug, Clone)]
pub struct XorShiftRandom {
    state: u64,
}

/// Fallback seed for the all-zero state, which xorshift can't leave
const NONZERO_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

impl XorShiftRandom {
    /// Create a generator from an explicit seed
    pub const fn new(seed: u64) -> Self {
        let state = if seed == 0 { NONZERO_SEED } else { seed };
        Self { state }
    }

    /// Create a generator from a platform seed mixed with the current
    /// clock reading.
    ///
    /// The clock counts from boot, so it reads nearly the same on every
    /// start: `seed` must come from a varying source such as the chip's
    /// hardware RNG.
    ///
    /// ```ignore
    /// let rng = esp_hal::rng::Rng::new();
    /// let seed = u64::from(rng.random()) << 32 | u64::from(rng.random());
    /// let random = XorShiftRandom::with_clock(seed);
    /// ```
    pub fn with_clock(seed: u64) -> Self {
        let mut random = Self::new(seed);
        random.mix_entropy(Instant::now().as_ticks());
        random
    }

    /// Next raw 64-bit value
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }
}

impl RandomSource for XorShiftRandom {
    #[allow(clippy::cast_possible_truncation)]
    fn next_in_range(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        let span = u64::from(max - min) + 1;
        min + (self.next_u64() % span) as u32
    }

    fn mix_entropy(&mut self, entropy: u64) {
        // Spread low-entropy counter values over the whole state
        let mixed = self.state ^ entropy.wrapping_mul(NONZERO_SEED) ^ (entropy >> 17);
        self.state = if mixed == 0 { NONZERO_SEED } else { mixed };
        self.next_u64();
    }
}
