//! Core types shared by commands and sequences.

/// Which LED on the device a command addresses.
///
/// Single-LED devices only understand [`Target::All`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Target {
    /// Every LED on the device.
    #[default]
    All,

    /// A single LED, numbered from 1.
    Led(u8),
}

impl Target {
    /// Wire representation: 0 for all LEDs, otherwise the LED number.
    #[inline]
    pub const fn as_byte(self) -> u8 {
        match self {
            Target::All => 0,
            Target::Led(n) => n,
        }
    }
}

impl From<u8> for Target {
    fn from(n: u8) -> Self {
        match n {
            0 => Target::All,
            n => Target::Led(n),
        }
    }
}

/// How many times a loop marker sends playback back to its restart point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoopCount {
    /// Play the enclosed frames this many times in total.
    Finite(u32),

    /// Repeat until the loop's stop handle fires.
    Infinite,
}

impl Default for LoopCount {
    fn default() -> Self {
        LoopCount::Finite(1)
    }
}

/// Sequence construction errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequenceError {
    /// Sequence capacity exceeded.
    CapacityExceeded,
}

impl core::fmt::Display for SequenceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SequenceError::CapacityExceeded => {
                write!(f, "sequence capacity exceeded")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SequenceError {}
