//! Command encoding for the device's fixed-size HID feature reports.
//!
//! Every command is an 8-byte report:
//!
//! | Offset | Set     | Fade           | Read   |
//! |--------|---------|----------------|--------|
//! | 0      | id      | id             | id     |
//! | 1      | `'n'`   | `'c'`          | `'r'`  |
//! | 2..=4  | R, G, B | R, G, B        | 0      |
//! | 5..=6  | 0       | fade time (BE) | 0      |
//! | 7      | 0       | target         | target |

use crate::color::Color;
use crate::time::TimeDuration;
use crate::transport::Report;
use crate::types::Target;

/// Report identifier carried in the first byte of every report.
pub const REPORT_ID: u8 = 0x01;

const OP_SET: u8 = b'n';
const OP_FADE: u8 = b'c';
const OP_READ: u8 = b'r';

/// Nanoseconds per device time unit (10 ms).
const NANOS_PER_FADE_UNIT: u128 = 10_000_000;

/// Minimum response length needed to decode a color.
pub const MIN_READ_RESPONSE_LEN: usize = 5;

/// A single device command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<D: TimeDuration> {
    /// Switch to `color` immediately.
    ///
    /// The device applies set commands to every LED; `target` is not
    /// transmitted.
    SetImmediate { color: Color, target: Target },

    /// Fade from the current color to `color` over `duration`.
    ///
    /// `duration` must fit in 16 bits of 10 ms units (about 655 s). Longer
    /// durations are not rejected; the high bits are dropped on the wire.
    FadeTo {
        color: Color,
        duration: D,
        target: Target,
    },

    /// Request the color currently shown by `target`.
    ReadCurrent { target: Target },
}

impl<D: TimeDuration> Command<D> {
    /// Immediate set addressed to all LEDs.
    #[inline]
    pub fn set(color: Color) -> Self {
        Command::SetImmediate {
            color,
            target: Target::All,
        }
    }

    /// Fade addressed to all LEDs.
    #[inline]
    pub fn fade(color: Color, duration: D) -> Self {
        Command::FadeTo {
            color,
            duration,
            target: Target::All,
        }
    }

    /// Encodes the command into its report.
    pub fn encode(&self) -> Report {
        match *self {
            Command::SetImmediate { color, .. } => {
                [REPORT_ID, OP_SET, color.r, color.g, color.b, 0, 0, 0]
            }
            Command::FadeTo {
                color,
                duration,
                target,
            } => {
                let [high, low] = fade_time(duration);
                [
                    REPORT_ID,
                    OP_FADE,
                    color.r,
                    color.g,
                    color.b,
                    high,
                    low,
                    target.as_byte(),
                ]
            }
            Command::ReadCurrent { target } => {
                [REPORT_ID, OP_READ, 0, 0, 0, 0, 0, target.as_byte()]
            }
        }
    }
}

/// Converts a fade duration to big-endian device time units.
///
/// The unit count is truncated, not rounded, and only its low 16 bits are
/// kept.
pub fn fade_time<D: TimeDuration>(duration: D) -> [u8; 2] {
    let units = duration.as_nanos() / NANOS_PER_FADE_UNIT;
    [(units >> 8) as u8, units as u8]
}

/// Extracts the color from a read response.
///
/// Returns `None` if the response is too short to hold a color.
pub fn decode_color(response: &[u8]) -> Option<Color> {
    match response {
        [_, _, r, g, b, ..] => Some(Color::new(*r, *g, *b)),
        _ => None,
    }
}
