//! One seven-segment digit on the strip.

use smart_leds::RGB8;

use crate::colors::{BLACK, WHITE};
use crate::layout::{LEDS_PER_SEGMENT, LedRange};
use crate::segment::{SEGMENT_COUNT, Segment, segment_mask};

/// A seven-segment digit made of [`LEDS_PER_SEGMENT`] LEDs per segment.
///
/// The digit only knows its [`LedRange`]; every operation that touches LEDs
/// takes the full strip buffer and resolves the range at the point of use.
#[derive(Debug, Clone)]
pub struct SevenSegmentDigit {
    range: LedRange,
    glyph: Option<char>,
    segment_colors: [RGB8; SEGMENT_COUNT],
}

impl SevenSegmentDigit {
    /// Creates a blank digit with white segments.
    pub const fn new(range: LedRange) -> Self {
        Self {
            range,
            glyph: None,
            segment_colors: [WHITE; SEGMENT_COUNT],
        }
    }

    pub fn range(&self) -> LedRange {
        self.range
    }

    /// LED range of a single segment.
    pub fn segment_range(&self, segment: Segment) -> LedRange {
        LedRange::new(
            self.range.start + segment.position() * LEDS_PER_SEGMENT,
            LEDS_PER_SEGMENT,
        )
    }

    /// Displays the decimal digit `n`.
    ///
    /// Values above 9 blank the digit.
    pub fn set_digit(&mut self, n: u8) {
        if n > 9 {
            self.clear();
            return;
        }
        self.glyph = Some(char::from(b'0' + n));
    }

    pub fn set_char(&mut self, c: char) {
        self.glyph = Some(c);
    }

    /// Displays `c` and paints every segment in `color`.
    pub fn set_char_with_color(&mut self, c: char, color: RGB8) {
        self.glyph = Some(c);
        self.set_color(color);
    }

    /// Marks the digit blank.
    pub fn clear(&mut self) {
        self.glyph = None;
    }

    pub fn glyph(&self) -> Option<char> {
        self.glyph
    }

    /// Segment mask of the current glyph, `0` when blank.
    pub fn mask(&self) -> u8 {
        segment_mask(self.glyph.unwrap_or(' '))
    }

    pub fn segment_color(&self, segment: Segment) -> RGB8 {
        self.segment_colors[segment.position()]
    }

    pub fn set_segment_color(&mut self, segment: Segment, color: RGB8) {
        self.segment_colors[segment.position()] = color;
    }

    /// Uses `color` for all seven segments.
    pub fn set_color(&mut self, color: RGB8) {
        self.segment_colors = [color; SEGMENT_COUNT];
    }

    /// The digit's LEDs within `leds`.
    pub fn leds_mut<'a>(&self, leds: &'a mut [RGB8]) -> &'a mut [RGB8] {
        self.range.slice_mut(leds)
    }

    pub fn fill_segment(&self, segment: Segment, color: RGB8, leds: &mut [RGB8]) {
        self.segment_range(segment).slice_mut(leds).fill(color);
    }

    /// Paints each segment with its entry from the color table.
    pub fn fill_with_segment_colors(&self, leds: &mut [RGB8]) {
        for segment in Segment::PHYSICAL_ORDER {
            self.fill_segment(segment, self.segment_color(segment), leds);
        }
    }

    /// Blanks every segment that is not part of the current glyph.
    ///
    /// Lit segments keep whatever color was painted earlier in the frame, so
    /// this has to run after the animation has rendered.
    pub fn render_mask(&self, leds: &mut [RGB8]) {
        let mask = self.mask();
        for segment in Segment::PHYSICAL_ORDER {
            if !segment.is_lit(mask) {
                self.fill_segment(segment, BLACK, leds);
            }
        }
    }

    /// Calls `f` for every segment in strip order with that segment's LEDs.
    pub fn for_every_segment<F>(&self, leds: &mut [RGB8], mut f: F)
    where
        F: FnMut(Segment, &mut [RGB8]),
    {
        let digit_leds = self.leds_mut(leds);
        for (segment, segment_leds) in Segment::PHYSICAL_ORDER
            .into_iter()
            .zip(digit_leds.chunks_mut(LEDS_PER_SEGMENT))
        {
            f(segment, segment_leds);
        }
    }
}

impl core::fmt::Display for SevenSegmentDigit {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.glyph {
            None | Some(' ') => write!(f, "SevenSegmentDigit(digit= )"),
            Some(c) => write!(f, "SevenSegmentDigit(digit={})", c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{DIGIT_RANGES, LED_COUNT};
    use crate::segment::SEG_G;

    const RED: RGB8 = RGB8::new(255, 0, 0);

    fn painted() -> [RGB8; LED_COUNT] {
        [RED; LED_COUNT]
    }

    #[test]
    fn segment_ranges_follow_strip_order() {
        let digit = SevenSegmentDigit::new(DIGIT_RANGES[2]);
        assert_eq!(digit.segment_range(Segment::F), LedRange::new(120, 8));
        assert_eq!(digit.segment_range(Segment::A), LedRange::new(168, 8));
    }

    #[test]
    fn set_digit_blanks_values_above_nine() {
        let mut digit = SevenSegmentDigit::new(DIGIT_RANGES[0]);
        digit.set_digit(7);
        assert_eq!(digit.glyph(), Some('7'));
        digit.set_digit(12);
        assert_eq!(digit.glyph(), None);
        assert_eq!(digit.mask(), 0);
        // 17 would land on 'A' in ASCII
        digit.set_digit(17);
        assert_eq!(digit.glyph(), None);
        assert_eq!(digit.mask(), 0);
    }

    #[test]
    fn render_mask_only_blanks_unlit_segments() {
        let mut leds = painted();
        let mut digit = SevenSegmentDigit::new(DIGIT_RANGES[1]);
        digit.set_char('-');
        digit.render_mask(&mut leds);

        assert!(digit.segment_range(Segment::G).slice(&leds).iter().all(|c| *c == RED));
        for segment in Segment::PHYSICAL_ORDER {
            if segment.bit() != SEG_G {
                assert!(digit.segment_range(segment).slice(&leds).iter().all(|c| *c == BLACK));
            }
        }
        // neighbours untouched
        assert_eq!(leds[55], RED);
        assert_eq!(leds[112], RED);
    }

    #[test]
    fn blank_digit_renders_black() {
        let mut leds = painted();
        let digit = SevenSegmentDigit::new(DIGIT_RANGES[0]);
        digit.render_mask(&mut leds);
        assert!(leds[..56].iter().all(|c| *c == BLACK));
    }

    #[test]
    fn for_every_segment_visits_seven_segments_in_order() {
        let mut leds = painted();
        let digit = SevenSegmentDigit::new(DIGIT_RANGES[3]);
        let mut visited = heapless::Vec::<Segment, 7>::new();
        digit.for_every_segment(&mut leds, |segment, segment_leds| {
            assert_eq!(segment_leds.len(), LEDS_PER_SEGMENT);
            segment_leds.fill(BLACK);
            visited.push(segment).unwrap();
        });
        assert_eq!(visited.as_slice(), &Segment::PHYSICAL_ORDER);
        assert!(leds[176..].iter().all(|c| *c == BLACK));
        assert_eq!(leds[175], RED);
    }

    #[test]
    fn set_char_with_color_paints_all_segments() {
        let mut leds = painted();
        let mut digit = SevenSegmentDigit::new(DIGIT_RANGES[0]);
        digit.set_char_with_color('a', WHITE);
        digit.fill_with_segment_colors(&mut leds);
        assert!(leds[..56].iter().all(|c| *c == WHITE));
        assert_eq!(digit.mask(), segment_mask('A'));
    }

    #[test]
    fn segment_color_overrides_single_segment() {
        let mut leds = [BLACK; LED_COUNT];
        let mut digit = SevenSegmentDigit::new(DIGIT_RANGES[1]);
        digit.set_color(WHITE);
        digit.set_segment_color(Segment::G, RED);
        assert_eq!(digit.segment_color(Segment::G), RED);
        assert_eq!(digit.segment_color(Segment::F), WHITE);

        digit.fill_with_segment_colors(&mut leds);
        assert!(digit.segment_range(Segment::G).slice(&leds).iter().all(|c| *c == RED));
        assert!(digit.segment_range(Segment::A).slice(&leds).iter().all(|c| *c == WHITE));
    }
}
