use smart_leds::RGB8;
use time::{Date, Month, PrimitiveDateTime, Time};

use super::{Animation, AnimationId, FrameContext, RenderType};
use crate::colors::fill_rainbow;
use crate::digit::SevenSegmentDigit;

/// Time left until the last second of the year, split for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Countdown {
    /// Hours within the current day, 0-23.
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl Countdown {
    /// Countdown from `now` to 23:59:59 on December 31st of the same year.
    ///
    /// Saturates at zero once that moment has passed.
    pub fn until_year_end(now: PrimitiveDateTime) -> Self {
        let remaining = Date::from_calendar_date(now.year(), Month::December, 31)
            .ok()
            .zip(Time::from_hms(23, 59, 59).ok())
            .map(|(date, time)| (PrimitiveDateTime::new(date, time) - now).whole_seconds())
            .unwrap_or(0)
            .max(0);

        Self {
            hours: ((remaining / 3600) % 24) as u8,
            minutes: ((remaining / 60) % 60) as u8,
            seconds: (remaining % 60) as u8,
        }
    }
}

/// Counts down to New Year over a rainbow that turns once per minute.
///
/// Shows `HHMM`, switching to `MMSS` during the last hour of each day.
#[derive(Debug, Clone, Default)]
pub struct NewYearAnimation {
    hue: u8,
}

impl NewYearAnimation {
    pub const fn new() -> Self {
        Self { hue: 0 }
    }

    pub fn hue(&self) -> u8 {
        self.hue
    }
}

impl Animation for NewYearAnimation {
    fn id(&self) -> Option<AnimationId> {
        Some(AnimationId::NewYear)
    }

    fn update_interval_ms(&self) -> u32 {
        16
    }

    fn render_type(&self) -> RenderType {
        RenderType::AllAtOnce
    }

    fn should_set_digits(&self) -> bool {
        false
    }

    fn update(&mut self, ctx: &FrameContext, digits: &mut [SevenSegmentDigit]) {
        let countdown = Countdown::until_year_end(ctx.local_time);

        let (high, low) = if countdown.hours == 0 {
            (countdown.minutes, countdown.seconds)
        } else {
            (countdown.hours, countdown.minutes)
        };

        if let [d0, d1, d2, d3] = digits {
            d0.set_digit(high / 10);
            d1.set_digit(high % 10);
            d2.set_digit(low / 10);
            d3.set_digit(low % 10);
        }

        // 256 / 60 rounded down
        self.hue = countdown.seconds.wrapping_mul(4);
    }

    fn render_all(&mut self, _ctx: &FrameContext, leds: &mut [RGB8]) {
        fill_rainbow(leds, self.hue, 1);
    }
}
