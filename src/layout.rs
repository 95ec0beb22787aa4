//! Physical LED topology of the clock.
//!
//! ```text
//! [digit 0][digit 1][dot top][dot bottom][digit 2][digit 3]
//!  0..56    56..112  112..116 116..120    120..176 176..232
//! ```

use smart_leds::RGB8;

use crate::segment::SEGMENT_COUNT;

pub const LEDS_PER_SEGMENT: usize = 8;
pub const LEDS_PER_DIGIT: usize = LEDS_PER_SEGMENT * SEGMENT_COUNT;
pub const LEDS_PER_DOT: usize = 4;

pub const DIGIT_COUNT: usize = 4;
pub const DOT_COUNT: usize = 2;

/// Total number of LEDs on the strip.
pub const LED_COUNT: usize = LEDS_PER_DIGIT * DIGIT_COUNT + LEDS_PER_DOT * DOT_COUNT;

/// A contiguous range of LEDs inside the strip buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedRange {
    pub start: usize,
    pub len: usize,
}

impl LedRange {
    pub const fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// One past the last LED of the range.
    #[inline]
    pub const fn end(&self) -> usize {
        self.start + self.len
    }

    /// Whether the two ranges share at least one LED.
    pub const fn overlaps(&self, other: &LedRange) -> bool {
        self.start < other.end() && other.start < self.end()
    }

    /// Resolves the range to a slice of `leds`.
    ///
    /// Returns an empty slice if the buffer is too short for the range.
    pub fn slice<'a>(&self, leds: &'a [RGB8]) -> &'a [RGB8] {
        leds.get(self.start..self.end()).unwrap_or_default()
    }

    /// Resolves the range to a mutable slice of `leds`.
    ///
    /// Returns an empty slice if the buffer is too short for the range.
    pub fn slice_mut<'a>(&self, leds: &'a mut [RGB8]) -> &'a mut [RGB8] {
        leds.get_mut(self.start..self.end()).unwrap_or_default()
    }
}

/// LED ranges of the four digits, left to right.
pub const DIGIT_RANGES: [LedRange; DIGIT_COUNT] = [
    LedRange::new(0, LEDS_PER_DIGIT),
    LedRange::new(LEDS_PER_DIGIT, LEDS_PER_DIGIT),
    LedRange::new(LEDS_PER_DIGIT * 2 + LEDS_PER_DOT * 2, LEDS_PER_DIGIT),
    LedRange::new(LEDS_PER_DIGIT * 3 + LEDS_PER_DOT * 2, LEDS_PER_DIGIT),
];

/// LED ranges of the upper and lower dot.
pub const DOT_RANGES: [LedRange; DOT_COUNT] = [
    LedRange::new(LEDS_PER_DIGIT * 2, LEDS_PER_DOT),
    LedRange::new(LEDS_PER_DIGIT * 2 + LEDS_PER_DOT, LEDS_PER_DOT),
];
