//! Byte classification for sequence input.
//!
//! Every input byte falls into one of five *base categories* (the four
//! canonical bases, with `U` folded onto `T`, plus a catch-all for every other
//! symbol) or one of two sentinels that end the scan of a record.

/// Number of base categories a pattern position can be tested against.
pub const NUM_CATEGORIES: usize = 5;

/// Classification of one input byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    /// A canonical base or the catch-all symbol; the value is the category
    /// index in `0..NUM_CATEGORIES` (A=0, C=1, G=2, T/U=3, other=4).
    Base(u8),
    /// Line terminator (`\n`).
    Terminator,
    /// End-of-stream marker (`\0`).
    EndOfStream,
}

pub const CAT_A: u8 = 0;
pub const CAT_C: u8 = 1;
pub const CAT_G: u8 = 2;
pub const CAT_T: u8 = 3;
pub const CAT_OTHER: u8 = 4;

const TERMINATOR: u8 = 0xFE;
const END_OF_STREAM: u8 = 0xFF;

static CLASSES: [u8; 256] = build_classes();

const fn build_classes() -> [u8; 256] {
    let mut t = [CAT_OTHER; 256];
    t[b'A' as usize] = CAT_A;
    t[b'a' as usize] = CAT_A;
    t[b'C' as usize] = CAT_C;
    t[b'c' as usize] = CAT_C;
    t[b'G' as usize] = CAT_G;
    t[b'g' as usize] = CAT_G;
    t[b'T' as usize] = CAT_T;
    t[b't' as usize] = CAT_T;
    t[b'U' as usize] = CAT_T;
    t[b'u' as usize] = CAT_T;
    t[b'\n' as usize] = TERMINATOR;
    t[0] = END_OF_STREAM;
    t
}

/// Classify one byte of sequence input.
///
/// ```rust
/// use nucgrep::alphabet::{classify, Category};
/// assert_eq!(classify(b'u'), Category::Base(3));
/// assert_eq!(classify(b'N'), Category::Base(4));
/// assert_eq!(classify(b'\n'), Category::Terminator);
/// ```
#[inline]
pub fn classify(byte: u8) -> Category {
    match CLASSES[byte as usize] {
        TERMINATOR => Category::Terminator,
        END_OF_STREAM => Category::EndOfStream,
        c => Category::Base(c),
    }
}
