use smart_leds::RGB8;

use super::{Animation, AnimationId, FrameContext, RenderType, fill_dot};
use crate::colors::{BLACK, fill_solid};
use crate::digit::SevenSegmentDigit;
use crate::dot::ClockDot;

/// Flashes the whole strip in the primary color.
#[derive(Debug, Clone, Default)]
pub struct StrobeAnimation {
    on: bool,
}

impl StrobeAnimation {
    pub const fn new() -> Self {
        Self { on: false }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}

impl Animation for StrobeAnimation {
    fn id(&self) -> Option<AnimationId> {
        Some(AnimationId::Strobe)
    }

    fn update_interval_ms(&self) -> u32 {
        48
    }

    fn render_type(&self) -> RenderType {
        RenderType::AllAtOnce
    }

    fn update(&mut self, _ctx: &FrameContext, _digits: &mut [SevenSegmentDigit]) {
        self.on = !self.on;
    }

    fn render_all(&mut self, ctx: &FrameContext, leds: &mut [RGB8]) {
        fill_solid(leds, if self.on { ctx.primary_color } else { BLACK });
    }

    fn render_dot(&mut self, ctx: &FrameContext, dot: &ClockDot, leds: &mut [RGB8]) {
        fill_dot(dot, leds, ctx.secondary_color, ctx.tertiary_color);
    }
}
