use smart_leds::RGB8;

use super::{Animation, AnimationId, FrameContext, RenderType};
use crate::colors::{BLACK, GREEN, fill_solid};
use crate::digit::SevenSegmentDigit;
use crate::dot::ClockDot;

/// Firmware update progress, shown right-aligned on the last three digits.
///
/// Internal only: it has no [`AnimationId`] and is activated by the registry
/// whenever an update is in progress.
#[derive(Debug, Clone, Default)]
pub struct OtaAnimation {
    percentage: [u8; 3],
    digit_count: u8,
}

impl OtaAnimation {
    pub const fn new() -> Self {
        Self {
            percentage: [0; 3],
            digit_count: 0,
        }
    }

    /// Number of digits needed for the last seen percentage.
    pub fn digit_count(&self) -> u8 {
        self.digit_count
    }
}

impl Animation for OtaAnimation {
    fn id(&self) -> Option<AnimationId> {
        None
    }

    fn update_interval_ms(&self) -> u32 {
        50
    }

    fn render_type(&self) -> RenderType {
        RenderType::ForEveryDigit
    }

    fn primary_color(&self) -> RGB8 {
        GREEN
    }

    fn should_set_digits(&self) -> bool {
        false
    }

    fn update(&mut self, ctx: &FrameContext, _digits: &mut [SevenSegmentDigit]) {
        let percent = ctx.ota_percent.min(100);
        self.percentage = [percent / 100, (percent / 10) % 10, percent % 10];
        self.digit_count = match percent {
            100 => 3,
            0..=9 => 1,
            _ => 2,
        };
        trace!("ota progress {}%", percent);
    }

    fn render_digit(
        &mut self,
        _ctx: &FrameContext,
        digit: &mut SevenSegmentDigit,
        index: usize,
        leds: &mut [RGB8],
    ) {
        let first_shown = 4 - usize::from(self.digit_count);
        match index {
            1..=3 if index >= first_shown => digit.set_digit(self.percentage[index - 1]),
            _ => digit.clear(),
        }
        fill_solid(leds, GREEN);
    }

    fn render_dot(&mut self, _ctx: &FrameContext, dot: &ClockDot, leds: &mut [RGB8]) {
        dot.leds_mut(leds).fill(BLACK);
    }
}
