//! Physical strip output.
//!
//! [`LedStrip`] is what the manager flushes frames into. [`SmartLedsStrip`]
//! implements it for any `smart-leds` driver and adds global brightness and
//! a power limit on top.

use smart_leds::{RGB8, SmartLedsWrite, brightness};

/// Trait for abstracting the LED strip hardware.
///
/// Implementations should handle hardware errors internally - none of these
/// methods can fail.
pub trait LedStrip {
    /// Sends one frame to the strip.
    fn write(&mut self, leds: &[RGB8]);

    /// Global brightness, 0-255, applied to subsequent writes.
    fn set_brightness(&mut self, brightness: u8);

    /// Limits the power drawn by subsequent writes.
    fn set_power_limit(&mut self, volts: u8, milliamps: u32);
}

// Power per channel at full scale in mW, measured for WS2812 at 5 V.
const RED_MW: u32 = 16 * 5;
const GREEN_MW: u32 = 11 * 5;
const BLUE_MW: u32 = 15 * 5;
const DARK_MW: u32 = 5;

/// Estimated power draw of `leds` at full brightness, in mW.
pub fn estimate_power_mw(leds: &[RGB8]) -> u32 {
    let (r, g, b) = leds.iter().fold((0u32, 0u32, 0u32), |(r, g, b), led| {
        (
            r + u32::from(led.r),
            g + u32::from(led.g),
            b + u32::from(led.b),
        )
    });

    ((r * RED_MW + g * GREEN_MW + b * BLUE_MW) >> 8) + DARK_MW * leds.len() as u32
}

/// Highest brightness not above `brightness` that keeps `leds` within
/// `max_power_mw`.
pub fn power_limited_brightness(leds: &[RGB8], brightness: u8, max_power_mw: u32) -> u8 {
    let requested_mw = estimate_power_mw(leds) * u32::from(brightness) / 256;
    if requested_mw <= max_power_mw {
        return brightness;
    }

    (u32::from(brightness) * max_power_mw / requested_mw) as u8
}

/// [`LedStrip`] on top of a `smart-leds` driver.
pub struct SmartLedsStrip<W> {
    writer: W,
    brightness: u8,
    max_power_mw: Option<u32>,
    last_brightness: u8,
    write_failed: bool,
}

impl<W> SmartLedsStrip<W>
where
    W: SmartLedsWrite<Color = RGB8>,
{
    /// Wraps `writer`, starting at full brightness without a power limit.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            brightness: u8::MAX,
            max_power_mw: None,
            last_brightness: u8::MAX,
            write_failed: false,
        }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Brightness actually used for the last frame after power limiting.
    pub fn effective_brightness(&self) -> u8 {
        self.last_brightness
    }
}

impl<W> LedStrip for SmartLedsStrip<W>
where
    W: SmartLedsWrite<Color = RGB8>,
{
    fn write(&mut self, leds: &[RGB8]) {
        let level = match self.max_power_mw {
            Some(max) => power_limited_brightness(leds, self.brightness, max),
            None => self.brightness,
        };
        self.last_brightness = level;

        let result = self.writer.write(brightness(leds.iter().copied(), level));
        match (result.is_ok(), self.write_failed) {
            (false, false) => {
                warn!("led strip write failed");
                self.write_failed = true;
            }
            (true, true) => {
                info!("led strip write recovered");
                self.write_failed = false;
            }
            _ => {}
        }
    }

    fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    fn set_power_limit(&mut self, volts: u8, milliamps: u32) {
        self.max_power_mw = Some(u32::from(volts) * milliamps);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_strip_draws_idle_power_only() {
        let leds = [RGB8::default(); 10];
        assert_eq!(estimate_power_mw(&leds), 50);
    }

    #[test]
    fn white_led_power() {
        let leds = [RGB8::new(255, 255, 255)];
        // (255 * 210) >> 8 = 209, plus idle
        assert_eq!(estimate_power_mw(&leds), 214);
    }

    #[test]
    fn brightness_unchanged_within_budget() {
        let leds = [RGB8::new(255, 255, 255); 10];
        assert_eq!(power_limited_brightness(&leds, 200, 15_000), 200);
    }

    #[test]
    fn brightness_scaled_down_over_budget() {
        let leds = [RGB8::new(255, 255, 255); 232];
        let limited = power_limited_brightness(&leds, 255, 5 * 3000);
        assert!(limited < 255);
        let drawn = estimate_power_mw(&leds) * u32::from(limited) / 256;
        assert!(drawn <= 15_000);
    }
}
