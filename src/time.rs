//! Wrapping millisecond timestamps.
//!
//! The lamp runs from a 32-bit millisecond counter that overflows roughly
//! every 49.7 days. All deadline checks go through [`Timestamp::has_reached`],
//! which compares the signed difference of the two counters instead of their
//! absolute values.

use embassy_time::{Duration, Instant};

/// Monotonic millisecond counter with 32-bit wraparound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Timestamp(u32);

impl Timestamp {
    /// Timestamp at the counter origin
    pub const ZERO: Self = Self(0);

    /// Create a timestamp from a raw millisecond counter value
    pub const fn from_millis(millis: u32) -> Self {
        Self(millis)
    }

    /// Raw millisecond counter value
    pub const fn as_millis(self) -> u32 {
        self.0
    }

    /// Whole seconds elapsed since the counter origin
    pub const fn as_secs(self) -> u32 {
        self.0 / 1000
    }

    /// Add a duration, wrapping around the counter width
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn wrapping_add(self, duration: Duration) -> Self {
        Self(self.0.wrapping_add(duration.as_millis() as u32))
    }

    /// Check if `deadline` is due at this timestamp.
    ///
    /// Uses the signed difference `self - deadline`, so a deadline set just
    /// before the counter wraps is still reached by a timestamp taken just
    /// after it.
    #[allow(clippy::cast_possible_wrap)]
    pub const fn has_reached(self, deadline: Self) -> bool {
        (self.0.wrapping_sub(deadline.0) as i32) >= 0
    }
}

impl From<Instant> for Timestamp {
    /// Truncates the 64-bit instant to the 32-bit device counter
    #[allow(clippy::cast_possible_truncation)]
    fn from(instant: Instant) -> Self {
        Self(instant.as_millis() as u32)
    }
}
