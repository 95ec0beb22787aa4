//! Animation contract and the built-in animations.
//!
//! An animation paints colors into the strip buffer; the digit masks are
//! applied afterwards by the manager, so animations never need to know which
//! segments are lit. Each frame the manager:
//!
//! 1. checks [`AnimationTimer::needs_update`] against the animation's interval,
//! 2. calls [`Animation::update`] once,
//! 3. dispatches rendering according to [`Animation::render_type`],
//! 4. calls [`Animation::render_dot`] for both dots.

use smart_leds::RGB8;
use time::PrimitiveDateTime;

use crate::colors::BLACK;
use crate::digit::SevenSegmentDigit;
use crate::dot::ClockDot;
use crate::segment::Segment;
use crate::time::TimeInstant;

mod new_year;
mod ota;
mod rainbow;
mod static_color;
mod strobe;

pub use new_year::NewYearAnimation;
pub use ota::OtaAnimation;
pub use rainbow::RainbowAnimation;
pub use static_color::StaticColorAnimation;
pub use strobe::StrobeAnimation;

/// Identity of a user-selectable animation.
///
/// The numeric value and the name are what gets persisted in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AnimationId {
    Rainbow = 0,
    StaticColor = 1,
    Strobe = 2,
    NewYear = 3,
}

impl AnimationId {
    /// Every animation id in declaration order.
    pub const ALL: [AnimationId; 4] = [
        AnimationId::Rainbow,
        AnimationId::StaticColor,
        AnimationId::Strobe,
        AnimationId::NewYear,
    ];

    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            AnimationId::Rainbow => "Rainbow",
            AnimationId::StaticColor => "StaticColor",
            AnimationId::Strobe => "Strobo",
            AnimationId::NewYear => "NewYearAnimation",
        }
    }

    /// Looks up an id by its persisted name.
    pub fn from_name(name: &str) -> Result<Self, ParseAnimationIdError> {
        Self::ALL
            .into_iter()
            .find(|id| id.name() == name)
            .ok_or(ParseAnimationIdError::UnknownName)
    }
}

impl TryFrom<u8> for AnimationId {
    type Error = ParseAnimationIdError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(ParseAnimationIdError::UnknownIndex(value))
    }
}

impl core::str::FromStr for AnimationId {
    type Err = ParseAnimationIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl core::fmt::Display for AnimationId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors converting persisted values into an [`AnimationId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseAnimationIdError {
    /// No animation has this name.
    UnknownName,
    /// No animation has this numeric value.
    UnknownIndex(u8),
}

impl core::fmt::Display for ParseAnimationIdError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParseAnimationIdError::UnknownName => write!(f, "unknown animation name"),
            ParseAnimationIdError::UnknownIndex(value) => {
                write!(f, "unknown animation index {}", value)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseAnimationIdError {}

/// How an animation wants to be invoked during a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderType {
    /// [`Animation::render_all`] once with the whole buffer.
    AllAtOnce,
    /// [`Animation::render_digit`] once per digit, left to right.
    ForEveryDigit,
    /// [`Animation::render_segment`] once per segment of every digit.
    ForEverySegment,
}

/// Read-only inputs an animation may use while rendering a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Local wall-clock time.
    pub local_time: PrimitiveDateTime,
    pub primary_color: RGB8,
    pub secondary_color: RGB8,
    pub tertiary_color: RGB8,
    /// Firmware update progress, 0-100.
    pub ota_percent: u8,
}

/// Behaviour of one animation.
///
/// All hooks have no-op defaults. Hooks receive the full strip buffer; use
/// the ranges of the passed digit or dot to address their LEDs.
pub trait Animation {
    /// Public identity, `None` for internal animations.
    fn id(&self) -> Option<AnimationId>;

    /// Minimum time between two [`update`](Animation::update) calls at a
    /// speed multiplier of 1.0.
    fn update_interval_ms(&self) -> u32;

    fn render_type(&self) -> RenderType {
        RenderType::AllAtOnce
    }

    /// Representative color of the animation.
    fn primary_color(&self) -> RGB8 {
        BLACK
    }

    /// Whether the clock may write the current time into the digits.
    fn should_set_digits(&self) -> bool {
        true
    }

    /// Called when the animation becomes current.
    fn start(&mut self, _leds: &mut [RGB8]) {}

    /// Called when another animation replaces this one.
    fn stop(&mut self, _leds: &mut [RGB8]) {}

    /// Advances the animation by one tick.
    fn update(&mut self, _ctx: &FrameContext, _digits: &mut [SevenSegmentDigit]) {}

    fn render_all(&mut self, _ctx: &FrameContext, _leds: &mut [RGB8]) {}

    fn render_digit(
        &mut self,
        _ctx: &FrameContext,
        _digit: &mut SevenSegmentDigit,
        _index: usize,
        _leds: &mut [RGB8],
    ) {
    }

    /// Renders a single segment; `segment_leds` holds only that segment.
    fn render_segment(
        &mut self,
        _ctx: &FrameContext,
        _digit: &SevenSegmentDigit,
        _segment: Segment,
        _segment_leds: &mut [RGB8],
    ) {
    }

    fn render_dot(&mut self, _ctx: &FrameContext, _dot: &ClockDot, _leds: &mut [RGB8]) {}
}

/// Paints a dot in `on_color` or `off_color` depending on its state.
pub(crate) fn fill_dot(dot: &ClockDot, leds: &mut [RGB8], on_color: RGB8, off_color: RGB8) {
    let color = if dot.on() { on_color } else { off_color };
    dot.leds_mut(leds).fill(color);
}

/// Bookkeeping the registry keeps for every animation slot.
///
/// `start_seq`/`stop_seq` are taken from a registry-wide counter, which makes
/// the relative order of lifecycle calls across animations observable.
#[derive(Debug, Clone, Copy)]
pub struct AnimationTimer<I: TimeInstant> {
    last_update: Option<I>,
    last_render: Option<I>,
    starts: u32,
    stops: u32,
    start_seq: Option<u32>,
    stop_seq: Option<u32>,
}

impl<I: TimeInstant> Default for AnimationTimer<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: TimeInstant> AnimationTimer<I> {
    pub const fn new() -> Self {
        Self {
            last_update: None,
            last_render: None,
            starts: 0,
            stops: 0,
            start_seq: None,
            stop_seq: None,
        }
    }

    /// Whether an update is due.
    ///
    /// True before the first update, afterwards once more than
    /// `interval_ms / speed_multiplier` milliseconds have elapsed. A
    /// multiplier that is not finite and positive counts as 1.0.
    pub fn needs_update(&self, now: I, interval_ms: u32, speed_multiplier: f32) -> bool {
        let Some(last) = self.last_update else {
            return true;
        };

        let multiplier = if speed_multiplier.is_finite() && speed_multiplier > 0.0 {
            speed_multiplier
        } else {
            1.0
        };

        let elapsed = now.millis_since(last) as f32;
        elapsed > interval_ms as f32 / multiplier
    }

    pub fn mark_updated(&mut self, now: I) {
        self.last_update = Some(now);
    }

    pub fn mark_rendered(&mut self, now: I) {
        self.last_render = Some(now);
    }

    pub(crate) fn mark_started(&mut self, now: I, seq: u32) {
        self.starts += 1;
        self.start_seq = Some(seq);
        self.last_render = Some(now);
    }

    pub(crate) fn mark_stopped(&mut self, now: I, seq: u32) {
        self.stops += 1;
        self.stop_seq = Some(seq);
        self.last_render = Some(now);
    }

    pub fn last_update(&self) -> Option<I> {
        self.last_update
    }

    pub fn last_render(&self) -> Option<I> {
        self.last_render
    }

    /// Number of times the animation was started.
    pub fn starts(&self) -> u32 {
        self.starts
    }

    /// Number of times the animation was stopped.
    pub fn stops(&self) -> u32 {
        self.stops
    }

    /// Lifecycle sequence number of the most recent start.
    pub fn start_seq(&self) -> Option<u32> {
        self.start_seq
    }

    /// Lifecycle sequence number of the most recent stop.
    pub fn stop_seq(&self) -> Option<u32> {
        self.stop_seq
    }
}
