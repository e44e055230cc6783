//! Query pattern compilation.
//!
//! A pattern is a string of `A C G T U N` (case-insensitive) in which a
//! bracketed group such as `[CG]` stands for a single position accepting any
//! of its letters. Compilation turns it into one [`BaseMask`] per position.
//!
//! ### Example
//! ```rust
//! use nucgrep::Pattern;
//! let p = Pattern::compile("A[CG]t").unwrap();
//! assert_eq!(p.len(), 3);
//! assert!(p.accepts(1, 1) && p.accepts(1, 2));
//! assert!(!p.accepts(1, 0));
//! ```
//!
use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

use crate::alphabet::{CAT_A, CAT_C, CAT_G, CAT_OTHER, CAT_T};
use crate::common::NucgrepError;

/// Set of base categories accepted at one pattern position (bit `c` set
/// means category `c` is accepted).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BaseMask(u8);

impl BaseMask {
    pub const EMPTY: BaseMask = BaseMask(0);
    pub const A: BaseMask = BaseMask(1 << CAT_A);
    pub const C: BaseMask = BaseMask(1 << CAT_C);
    pub const G: BaseMask = BaseMask(1 << CAT_G);
    pub const T: BaseMask = BaseMask(1 << CAT_T);
    /// `N`: every canonical base plus the catch-all category.
    pub const ANY: BaseMask = BaseMask(0x0F | (1 << CAT_OTHER));

    /// Raw bit representation.
    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether base category `category` is accepted.
    #[inline]
    pub fn contains(self, category: u8) -> bool {
        self.0 & (1 << category) != 0
    }
}

impl BitOr for BaseMask {
    type Output = BaseMask;
    fn bitor(self, rhs: BaseMask) -> BaseMask {
        BaseMask(self.0 | rhs.0)
    }
}

impl BitOrAssign for BaseMask {
    fn bitor_assign(&mut self, rhs: BaseMask) {
        self.0 |= rhs.0;
    }
}

/// A compiled query: one [`BaseMask`] per logical position, never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    masks: Vec<BaseMask>,
}

impl Pattern {
    /// Compile an IUPAC-coded pattern string.
    ///
    /// Fails with [`NucgrepError::PatternSyntax`] on a nested or unmatched
    /// bracket, an empty or unclosed group, or any letter other than
    /// `ACGTUN`, and with [`NucgrepError::EmptyPattern`] if no position
    /// results.
    pub fn compile(expr: &str) -> Result<Self, NucgrepError> {
        let syntax = |position: usize, reason: &'static str| NucgrepError::PatternSyntax {
            pattern: expr.to_string(),
            position,
            reason,
        };

        let mut masks = Vec::with_capacity(expr.len());
        let mut group: Option<BaseMask> = None;
        for (i, c) in expr.char_indices() {
            let bits = match c.to_ascii_uppercase() {
                'A' => BaseMask::A,
                'C' => BaseMask::C,
                'G' => BaseMask::G,
                'T' | 'U' => BaseMask::T,
                'N' => BaseMask::ANY,
                '[' => {
                    if group.is_some() {
                        return Err(syntax(i, "nested '['"));
                    }
                    group = Some(BaseMask::EMPTY);
                    continue;
                }
                ']' => {
                    match group.take() {
                        None => return Err(syntax(i, "unmatched ']'")),
                        Some(m) if m.is_empty() => return Err(syntax(i, "empty group")),
                        Some(m) => masks.push(m),
                    }
                    continue;
                }
                _ => return Err(syntax(i, "unrecognized symbol")),
            };
            match group.as_mut() {
                Some(m) => *m |= bits,
                None => masks.push(bits),
            }
        }
        if group.is_some() {
            return Err(syntax(expr.len(), "unclosed '['"));
        }
        if masks.is_empty() {
            return Err(NucgrepError::EmptyPattern);
        }
        Ok(Self { source: expr.to_string(), masks })
    }

    /// Number of logical positions (`L`).
    pub fn len(&self) -> usize {
        self.masks.len()
    }

    /// Always `false`; a compiled pattern has at least one position.
    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }

    pub fn masks(&self) -> &[BaseMask] {
        &self.masks
    }

    /// The pattern text this was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether position `pos` accepts base category `category`.
    #[inline]
    pub fn accepts(&self, pos: usize, category: u8) -> bool {
        self.masks[pos].contains(category)
    }
}

impl FromStr for Pattern {
    type Err = NucgrepError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pattern::compile(s)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(expr: &str) -> (usize, &'static str) {
        match Pattern::compile(expr) {
            Err(NucgrepError::PatternSyntax { position, reason, .. }) => (position, reason),
            other => panic!("expected syntax error for {expr:?}, got {other:?}"),
        }
    }

    #[test]
    fn plain_letters() {
        let p = Pattern::compile("acgTUn").unwrap();
        assert_eq!(p.masks(), &[BaseMask::A, BaseMask::C, BaseMask::G, BaseMask::T, BaseMask::T, BaseMask::ANY]);
    }

    #[test]
    fn groups_are_one_position() {
        let p = Pattern::compile("A[CG]T").unwrap();
        assert_eq!(p.len(), 3);
        assert_eq!(p.masks()[1], BaseMask::C | BaseMask::G);
        let p = Pattern::compile("[A][ACGT]").unwrap();
        assert_eq!(p.len(), 2);
        assert_eq!(p.masks()[0], BaseMask::A);
    }

    #[test]
    fn n_matches_other_category() {
        let p = Pattern::compile("N").unwrap();
        for c in 0..5 {
            assert!(p.accepts(0, c));
        }
        let p = Pattern::compile("[ACGT]").unwrap();
        assert!(!p.accepts(0, CAT_OTHER));
    }

    #[test]
    fn syntax_errors() {
        assert_eq!(reason("AC]"), (2, "unmatched ']'"));
        assert_eq!(reason("A[[C]]"), (2, "nested '['"));
        assert_eq!(reason("A[C"), (3, "unclosed '['"));
        assert_eq!(reason("A[]C"), (2, "empty group"));
        assert_eq!(reason("ACR"), (2, "unrecognized symbol"));
        assert_eq!(reason("AC GT"), (2, "unrecognized symbol"));
    }

    #[test]
    fn empty_pattern() {
        assert!(matches!(Pattern::compile(""), Err(NucgrepError::EmptyPattern)));
    }

    #[test]
    fn from_str_round_trips_source() {
        let p: Pattern = "a[cg]t".parse().unwrap();
        assert_eq!(p.to_string(), "a[cg]t");
    }
}
