//! Named colors and color space conversion helpers.
//!
//! HSV (Hue, Saturation, Value) is more intuitive than RGB for many status
//! animations like hue rotations. All helpers return a device [`Color`].

use crate::color::Color;
use palette::{FromColor, Hsv, Srgb};

/// All channels off.
pub const OFF: Color = Color::new(0, 0, 0);
pub const RED: Color = Color::new(255, 0, 0);
pub const GREEN: Color = Color::new(0, 255, 0);
pub const BLUE: Color = Color::new(0, 0, 255);
pub const YELLOW: Color = Color::new(255, 255, 0);
pub const WHITE: Color = Color::new(255, 255, 255);

/// Creates a color from HSV components.
///
/// `hue` is in degrees, `saturation` and `value` in `0.0..=1.0`.
#[inline]
pub fn hsv(hue: f32, saturation: f32, value: f32) -> Color {
    let hsv = Hsv::new(hue, saturation, value);
    Color::from_srgb(Srgb::from_color(hsv))
}

/// Creates a color from hue only (full saturation and value).
#[inline]
pub fn hue(hue: f32) -> Color {
    hsv(hue, 1.0, 1.0)
}
