//! Time abstraction traits for platform-agnostic timing.

use core::time::Duration;

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq + core::fmt::Debug {
    /// Zero duration constant.
    const ZERO: Self;

    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Converts duration to nanoseconds.
    ///
    /// The default derives it from [`as_millis`](Self::as_millis), which is
    /// exact for millisecond-resolution duration types.
    fn as_nanos(&self) -> u128 {
        u128::from(self.as_millis()) * 1_000_000
    }

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;
}

impl TimeDuration for Duration {
    const ZERO: Self = Duration::ZERO;

    fn as_millis(&self) -> u64 {
        u64::try_from(Duration::as_millis(self)).unwrap_or(u64::MAX)
    }

    fn as_nanos(&self) -> u128 {
        Duration::as_nanos(self)
    }

    fn from_millis(millis: u64) -> Self {
        Duration::from_millis(millis)
    }
}

/// Blocks the calling thread of control for a given duration.
///
/// The playback engine never sleeps on its own; every hold and wait goes
/// through the [`Led`](crate::Led)'s delay.
pub trait Delay {
    /// Duration type understood by this delay.
    type Duration: TimeDuration;

    /// Blocks for `duration`.
    fn delay(&mut self, duration: Self::Duration);
}

/// Delay backed by [`std::thread::sleep`].
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct StdDelay;

#[cfg(feature = "std")]
impl Delay for StdDelay {
    type Duration = Duration;

    fn delay(&mut self, duration: Duration) {
        if duration > Duration::ZERO {
            std::thread::sleep(duration);
        }
    }
}
