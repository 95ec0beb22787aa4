//! Separator dots between the hour and minute digits.

use smart_leds::RGB8;

use crate::colors::BLACK;
use crate::layout::LedRange;

/// Which of the two separator dots this is. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DotPlacement {
    Top,
    Bottom,
}

/// A two-state indicator occupying a small LED range.
#[derive(Debug, Clone)]
pub struct ClockDot {
    placement: DotPlacement,
    range: LedRange,
    on: bool,
}

impl ClockDot {
    /// Creates a dot that starts switched off.
    pub const fn new(placement: DotPlacement, range: LedRange) -> Self {
        Self {
            placement,
            range,
            on: false,
        }
    }

    pub fn placement(&self) -> DotPlacement {
        self.placement
    }

    pub fn range(&self) -> LedRange {
        self.range
    }

    pub fn on(&self) -> bool {
        self.on
    }

    pub fn set_on(&mut self, on: bool) {
        self.on = on;
    }

    /// The dot's LEDs within `leds`.
    pub fn leds_mut<'a>(&self, leds: &'a mut [RGB8]) -> &'a mut [RGB8] {
        self.range.slice_mut(leds)
    }

    /// Forces the dot black when it is off or when `text_override` is active.
    ///
    /// Otherwise the LEDs keep the colors the animation painted.
    pub fn render(&self, leds: &mut [RGB8], text_override: bool) {
        if !self.on || text_override {
            self.leds_mut(leds).fill(BLACK);
        }
    }
}

impl core::fmt::Display for ClockDot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(if self.on { "On" } else { "Off" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{DOT_RANGES, LED_COUNT};

    const BLUE: RGB8 = RGB8::new(0, 0, 255);

    #[test]
    fn off_dot_renders_black() {
        let mut leds = [BLUE; LED_COUNT];
        let dot = ClockDot::new(DotPlacement::Top, DOT_RANGES[0]);
        dot.render(&mut leds, false);
        assert!(leds[112..116].iter().all(|c| *c == BLACK));
        assert_eq!(leds[116], BLUE);
    }

    #[test]
    fn on_dot_keeps_animation_colors() {
        let mut leds = [BLUE; LED_COUNT];
        let mut dot = ClockDot::new(DotPlacement::Bottom, DOT_RANGES[1]);
        dot.set_on(true);
        dot.render(&mut leds, false);
        assert!(leds[116..120].iter().all(|c| *c == BLUE));
    }

    #[test]
    fn text_override_blanks_lit_dot() {
        let mut leds = [BLUE; LED_COUNT];
        let mut dot = ClockDot::new(DotPlacement::Bottom, DOT_RANGES[1]);
        dot.set_on(true);
        dot.render(&mut leds, true);
        assert!(leds[116..120].iter().all(|c| *c == BLACK));
    }
}
