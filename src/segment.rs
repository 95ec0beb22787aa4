//! Seven-segment glyph table.
//!
//! ```text
//!    A
//!  F   B
//!    G
//!  E   C
//!    D
//! ```
//!
//! Masks use one bit per segment, `A` in bit 0 through `G` in bit 6. The
//! strip is wired in a different order (see [`Segment`]), so the bit position
//! of a segment and its position on the strip are unrelated.

/// Segment A of the 7-segment display.
pub const SEG_A: u8 = 0b_0000_0001;
/// Segment B of the 7-segment display.
pub const SEG_B: u8 = 0b_0000_0010;
/// Segment C of the 7-segment display.
pub const SEG_C: u8 = 0b_0000_0100;
/// Segment D of the 7-segment display.
pub const SEG_D: u8 = 0b_0000_1000;
/// Segment E of the 7-segment display.
pub const SEG_E: u8 = 0b_0001_0000;
/// Segment F of the 7-segment display.
pub const SEG_F: u8 = 0b_0010_0000;
/// Segment G of the 7-segment display.
pub const SEG_G: u8 = 0b_0100_0000;

/// Mask with every segment lit.
pub const ALL_SEGMENTS: u8 = 0b_0111_1111;

/// Number of segments in one digit.
pub const SEGMENT_COUNT: usize = 7;

/// One segment of a digit.
///
/// The discriminant is the segment's position along the strip, which is also
/// the order [`Segment::PHYSICAL_ORDER`] iterates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Segment {
    F = 0,
    G = 1,
    E = 2,
    D = 3,
    C = 4,
    B = 5,
    A = 6,
}

impl Segment {
    /// All segments in strip order.
    pub const PHYSICAL_ORDER: [Segment; SEGMENT_COUNT] = [
        Segment::F,
        Segment::G,
        Segment::E,
        Segment::D,
        Segment::C,
        Segment::B,
        Segment::A,
    ];

    /// Position of this segment along the digit's LED range.
    #[inline]
    pub const fn position(self) -> usize {
        self as usize
    }

    /// Bit of this segment inside a glyph mask.
    pub const fn bit(self) -> u8 {
        match self {
            Segment::A => SEG_A,
            Segment::B => SEG_B,
            Segment::C => SEG_C,
            Segment::D => SEG_D,
            Segment::E => SEG_E,
            Segment::F => SEG_F,
            Segment::G => SEG_G,
        }
    }

    /// Whether this segment is lit in `mask`.
    #[inline]
    pub const fn is_lit(self, mask: u8) -> bool {
        mask & self.bit() != 0
    }
}

const fn lookup(c: char) -> Option<u8> {
    let mask = match c {
        '0' => SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F,
        '1' => SEG_B | SEG_C,
        '2' => SEG_A | SEG_B | SEG_D | SEG_E | SEG_G,
        '3' => SEG_A | SEG_B | SEG_C | SEG_D | SEG_G,
        '4' => SEG_B | SEG_C | SEG_F | SEG_G,
        '5' => SEG_A | SEG_C | SEG_D | SEG_F | SEG_G,
        '6' => SEG_A | SEG_C | SEG_D | SEG_E | SEG_F | SEG_G,
        '7' => SEG_A | SEG_B | SEG_C,
        '8' => ALL_SEGMENTS,
        '9' => SEG_A | SEG_B | SEG_C | SEG_D | SEG_F | SEG_G,
        'A' => SEG_A | SEG_B | SEG_C | SEG_E | SEG_F | SEG_G,
        'B' => SEG_C | SEG_D | SEG_E | SEG_F | SEG_G,
        'C' => SEG_A | SEG_D | SEG_E | SEG_F,
        'D' => SEG_B | SEG_C | SEG_D | SEG_E | SEG_G,
        'E' => SEG_A | SEG_D | SEG_E | SEG_F | SEG_G,
        'F' => SEG_A | SEG_E | SEG_F | SEG_G,
        'G' => SEG_A | SEG_C | SEG_D | SEG_E | SEG_F,
        'H' => SEG_B | SEG_C | SEG_E | SEG_F | SEG_G,
        'I' => SEG_B | SEG_C,
        'J' => SEG_B | SEG_C | SEG_D | SEG_E,
        'K' => SEG_E | SEG_F | SEG_G,
        'L' => SEG_D | SEG_E | SEG_F,
        'M' => SEG_A | SEG_C | SEG_E,
        'N' => SEG_C | SEG_E | SEG_G,
        'O' => SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F,
        'P' => SEG_A | SEG_B | SEG_E | SEG_F | SEG_G,
        'Q' => SEG_A | SEG_B | SEG_C | SEG_F | SEG_G,
        'R' => SEG_E | SEG_G,
        'S' => SEG_A | SEG_C | SEG_D | SEG_F | SEG_G,
        'T' => SEG_D | SEG_E | SEG_F | SEG_G,
        'U' => SEG_B | SEG_C | SEG_D | SEG_E | SEG_F,
        'V' => SEG_C | SEG_D | SEG_E,
        'W' => SEG_B | SEG_D | SEG_F,
        'X' => SEG_B | SEG_C | SEG_E | SEG_F | SEG_G,
        'Y' => SEG_B | SEG_C | SEG_D | SEG_F | SEG_G,
        'Z' => SEG_A | SEG_B | SEG_D | SEG_E | SEG_G,
        ' ' => 0,
        '-' => SEG_G,
        '_' => SEG_D,
        _ => return None,
    };
    Some(mask)
}

/// Returns the segment mask for `c`.
///
/// Letters match case-insensitively. Characters without a glyph return `0`
/// and render blank.
pub const fn segment_mask(c: char) -> u8 {
    if let Some(mask) = lookup(c) {
        return mask;
    }

    let other_case = if c.is_ascii_lowercase() {
        c.to_ascii_uppercase()
    } else {
        c.to_ascii_lowercase()
    };

    match lookup(other_case) {
        Some(mask) => mask,
        None => 0,
    }
}

/// Whether `c` has an entry in the glyph table (in either case).
pub const fn is_supported(c: char) -> bool {
    lookup(c).is_some() || lookup(c.to_ascii_uppercase()).is_some()
}
