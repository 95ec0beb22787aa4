use smart_leds::RGB8;

use super::{Animation, AnimationId, FrameContext, RenderType, fill_dot};
use crate::digit::SevenSegmentDigit;
use crate::dot::ClockDot;
use crate::segment::Segment;

/// Solid primary color; dots use the secondary color when on and the
/// tertiary color when off.
#[derive(Debug, Clone, Default)]
pub struct StaticColorAnimation;

impl StaticColorAnimation {
    pub const fn new() -> Self {
        Self
    }
}

impl Animation for StaticColorAnimation {
    fn id(&self) -> Option<AnimationId> {
        Some(AnimationId::StaticColor)
    }

    fn update_interval_ms(&self) -> u32 {
        0
    }

    fn render_type(&self) -> RenderType {
        RenderType::ForEverySegment
    }

    fn render_segment(
        &mut self,
        ctx: &FrameContext,
        _digit: &SevenSegmentDigit,
        _segment: Segment,
        segment_leds: &mut [RGB8],
    ) {
        segment_leds.fill(ctx.primary_color);
    }

    fn render_dot(&mut self, ctx: &FrameContext, dot: &ClockDot, leds: &mut [RGB8]) {
        fill_dot(dot, leds, ctx.secondary_color, ctx.tertiary_color);
    }
}
