use smart_leds::RGB8;

use super::{Animation, AnimationId, FrameContext, RenderType};
use crate::colors::fill_rainbow;
use crate::digit::SevenSegmentDigit;

/// Rotates a rainbow along the strip, one hue step per tick.
#[derive(Debug, Clone, Default)]
pub struct RainbowAnimation {
    hue: u8,
}

impl RainbowAnimation {
    pub const fn new() -> Self {
        Self { hue: 0 }
    }

    pub fn hue(&self) -> u8 {
        self.hue
    }
}

impl Animation for RainbowAnimation {
    fn id(&self) -> Option<AnimationId> {
        Some(AnimationId::Rainbow)
    }

    fn update_interval_ms(&self) -> u32 {
        5
    }

    fn render_type(&self) -> RenderType {
        RenderType::AllAtOnce
    }

    fn update(&mut self, _ctx: &FrameContext, _digits: &mut [SevenSegmentDigit]) {
        self.hue = self.hue.wrapping_add(1);
    }

    fn render_all(&mut self, _ctx: &FrameContext, leds: &mut [RGB8]) {
        fill_rainbow(leds, self.hue, 1);
    }
}
