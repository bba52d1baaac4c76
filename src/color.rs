//! 24-bit RGB color values.

use core::fmt;
use core::str::FromStr;

use palette::Srgb;

/// A 24-bit RGB color as understood by the device.
///
/// Colors are plain values. Arithmetic never mutates in place and always
/// saturates to `0..=255`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Creates a color from its three channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Returns a copy with every channel multiplied by `factor`.
    ///
    /// Negative factors are ignored and return the color unchanged. Results
    /// are rounded half up and clamped to 255.
    pub fn scale(self, factor: f64) -> Self {
        if factor < 0.0 {
            return self;
        }

        Self {
            r: round_to_channel(f64::from(self.r) * factor),
            g: round_to_channel(f64::from(self.g) * factor),
            b: round_to_channel(f64::from(self.b) * factor),
        }
    }

    /// Channel-wise saturating addition.
    pub fn add(self, other: Color) -> Self {
        Self {
            r: self.r.saturating_add(other.r),
            g: self.g.saturating_add(other.g),
            b: self.b.saturating_add(other.b),
        }
    }

    /// Converts a floating point sRGB color (0.0-1.0 per channel).
    pub fn from_srgb(color: Srgb<f32>) -> Self {
        color.into_format::<u8>().into()
    }

    /// Returns the channels as an `[r, g, b]` array.
    #[inline]
    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

// `value` is never negative here; the cast truncates, so adding 0.5 rounds half up.
fn round_to_channel(value: f64) -> u8 {
    (value.min(255.0) + 0.5) as u8
}

impl From<Srgb<u8>> for Color {
    fn from(color: Srgb<u8>) -> Self {
        Self::new(color.red, color.green, color.blue)
    }
}

impl From<Color> for Srgb<u8> {
    fn from(color: Color) -> Self {
        Srgb::new(color.r, color.g, color.b)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Errors produced when parsing a [`Color`] from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorParseError {
    /// The input was empty.
    Empty,

    /// A `#` color did not contain exactly six hex digits.
    InvalidHex,

    /// A comma separated color did not have three components.
    ComponentCount(usize),

    /// A comma separated component was not an integer in `0..=255`.
    InvalidComponent,
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorParseError::Empty => write!(f, "can not parse color from empty string"),
            ColorParseError::InvalidHex => {
                write!(f, "hex color must be '#' followed by six hex digits")
            }
            ColorParseError::ComponentCount(count) => {
                write!(
                    f,
                    "expected exactly three comma separated values, found {}",
                    count
                )
            }
            ColorParseError::InvalidComponent => {
                write!(f, "color components must be integers between 0 and 255")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ColorParseError {}

impl FromStr for Color {
    type Err = ColorParseError;

    /// Parses `"R,G,B"` (components may be whitespace padded) or `"#RRGGBB"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ColorParseError::Empty);
        }

        match s.strip_prefix('#') {
            Some(hex) => parse_hex(hex),
            None => parse_csv(s),
        }
    }
}

fn parse_hex(hex: &str) -> Result<Color, ColorParseError> {
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColorParseError::InvalidHex);
    }

    let channel = |range: core::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| ColorParseError::InvalidHex)
    };

    Ok(Color::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

fn parse_csv(s: &str) -> Result<Color, ColorParseError> {
    let count = s.split(',').count();
    if count != 3 {
        return Err(ColorParseError::ComponentCount(count));
    }

    let mut channels = [0u8; 3];
    for (channel, part) in channels.iter_mut().zip(s.split(',')) {
        *channel = part
            .trim()
            .parse()
            .map_err(|_| ColorParseError::InvalidComponent)?;
    }

    Ok(Color::new(channels[0], channels[1], channels[2]))
}

#[cfg(test)]
mod tests {
    use super::*;
    extern crate std;
    use std::string::ToString;

    #[test]
    fn rounding_is_half_up() {
        assert_eq!(round_to_channel(0.5), 1);
        assert_eq!(round_to_channel(1.5), 2);
        assert_eq!(round_to_channel(2.5), 3);
        assert_eq!(round_to_channel(2.49), 2);
    }

    #[test]
    fn rounding_clamps_above_range() {
        assert_eq!(round_to_channel(255.0), 255);
        assert_eq!(round_to_channel(1000.0), 255);
    }

    #[test]
    fn display_uses_hex_notation() {
        assert_eq!(Color::new(18, 52, 86).to_string(), "#123456");
    }
}
