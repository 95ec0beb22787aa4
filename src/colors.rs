//! Color helpers for the LED buffer.
//!
//! The buffer stores [`RGB8`] values as expected by `smart-leds` drivers. Hue
//! math goes through `palette` so animations can work on an 8-bit hue wheel
//! (0-255 maps to one full turn) like most addressable-LED code does.

use palette::{FromColor, Hsv, Srgb};
use smart_leds::RGB8;

pub const BLACK: RGB8 = RGB8::new(0, 0, 0);
pub const WHITE: RGB8 = RGB8::new(255, 255, 255);
pub const GREEN: RGB8 = RGB8::new(0, 255, 0);

/// Saturation used for rainbow fills.
pub const RAINBOW_SATURATION: u8 = 240;

/// Creates an RGB color from 8-bit HSV components.
///
/// `hue` covers the full color wheel in 256 steps.
pub fn hsv(hue: u8, saturation: u8, value: u8) -> RGB8 {
    let hsv: Hsv = Hsv::new(
        hue as f32 * (360.0 / 256.0),
        saturation as f32 / 255.0,
        value as f32 / 255.0,
    );
    let rgb: Srgb = Srgb::from_color(hsv);
    let rgb: Srgb<u8> = rgb.into_format();
    RGB8::new(rgb.red, rgb.green, rgb.blue)
}

/// Creates a fully saturated, full brightness color from a hue.
#[inline]
pub fn hue(hue: u8) -> RGB8 {
    hsv(hue, 255, 255)
}

/// Sets every LED in `leds` to `color`.
#[inline]
pub fn fill_solid(leds: &mut [RGB8], color: RGB8) {
    leds.fill(color);
}

/// Paints a rainbow starting at `start_hue`, advancing `delta_hue` per LED.
pub fn fill_rainbow(leds: &mut [RGB8], start_hue: u8, delta_hue: u8) {
    let mut hue = start_hue;
    for led in leds.iter_mut() {
        *led = hsv(hue, RAINBOW_SATURATION, 255);
        hue = hue.wrapping_add(delta_hue);
    }
}
