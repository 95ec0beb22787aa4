mod common;

use common::*;
use ws2812_clock::digit::SevenSegmentDigit;
use ws2812_clock::layout::{DIGIT_RANGES, LED_COUNT};
use ws2812_clock::segment::{ALL_SEGMENTS, SEG_A, SEG_D, SEG_G, Segment, is_supported};
use ws2812_clock::segment_mask;

const SUPPORTED: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ -_";

fn toggle_case(c: char) -> char {
    if c.is_ascii_lowercase() {
        c.to_ascii_uppercase()
    } else {
        c.to_ascii_lowercase()
    }
}

#[test]
fn test_mask_is_case_insensitive_for_supported_chars() {
    for c in SUPPORTED.chars() {
        assert_eq!(segment_mask(c), segment_mask(toggle_case(c)), "char {:?}", c);
    }
}

#[test]
fn test_unsupported_chars_are_blank() {
    for c in ['!', '?', '@', '.', ':', '/', '`', '~', '\0', 'ä', '€'] {
        assert!(!is_supported(c));
        assert_eq!(segment_mask(c), 0, "char {:?}", c);
    }
}

#[test]
fn test_digit_masks() {
    assert_eq!(segment_mask('0'), ALL_SEGMENTS & !SEG_G);
    assert_eq!(segment_mask('1'), Segment::B.bit() | Segment::C.bit());
    assert_eq!(segment_mask('8'), ALL_SEGMENTS);
    assert_eq!(segment_mask('-'), SEG_G);
    assert_eq!(segment_mask('_'), SEG_D);
    assert_eq!(segment_mask(' '), 0);
    assert_eq!(segment_mask('7'), SEG_A | Segment::B.bit() | Segment::C.bit());
}

#[test]
fn test_every_table_entry_is_a_valid_mask() {
    for c in SUPPORTED.chars() {
        assert_eq!(segment_mask(c) & !ALL_SEGMENTS, 0);
    }
}

#[test]
fn test_eight_keeps_every_segment_lit() {
    let mut leds = [RED; LED_COUNT];
    let mut digit = SevenSegmentDigit::new(DIGIT_RANGES[0]);
    digit.set_char('8');
    digit.render_mask(&mut leds);
    assert!(all_equal(&leds[..56], RED));
}

#[test]
fn test_one_blanks_five_segments() {
    let mut leds = [RED; LED_COUNT];
    let mut digit = SevenSegmentDigit::new(DIGIT_RANGES[2]);
    digit.set_digit(1);
    digit.render_mask(&mut leds);

    let lit: Vec<Segment> = Segment::PHYSICAL_ORDER
        .into_iter()
        .filter(|s| all_equal(digit.segment_range(*s).slice(&leds), RED))
        .collect();
    assert_eq!(lit, vec![Segment::C, Segment::B]);
}
