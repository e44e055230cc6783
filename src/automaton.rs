//! Blocked bounded edit-distance automaton.
//!
//! The scanner keeps, for every pattern position, a clipped *error level*
//! `0..=2` encoding the vertical difference `1 - level` between consecutive
//! rows of the semi-global edit-distance column. A single position is
//! advanced by the elementary [`step`] function, which also consumes and
//! produces a *carry* `0..=2` (the horizontal difference plus one) linking
//! one row to the next.
//!
//! [`BlockAutomaton`] tabulates `K` chained elementary steps for every
//! combination of block state, match mask and incoming carry, so that the
//! scanner advances `K` pattern positions with a single lookup.
//!
//! ### Example
//! ```rust
//! use nucgrep::automaton::{BlockAutomaton, BlockState};
//! let dfa = BlockAutomaton::new(2).unwrap();
//! // Fresh block, both positions match, neutral carry: the column becomes
//! // [0, 0, 1], so the block contributes 1 and its levels are [1, 0].
//! let t = dfa.transition(BlockState::ZERO, 0b11, 1);
//! assert_eq!(t.delta(), 1);
//! assert_eq!(t.next().digits(2), vec![1, 0]);
//! ```
//!
use crate::common::NucgrepError;

/// Largest supported block width.
pub const MAX_BLOCK_WIDTH: usize = 8;
/// Block width used when none is requested.
pub const DEFAULT_BLOCK_WIDTH: usize = 4;
/// Carry fed into the first block: no horizontal difference on row 0.
pub const NEUTRAL_CARRY: u8 = 1;

const POW3: [u16; MAX_BLOCK_WIDTH + 1] = [1, 3, 9, 27, 81, 243, 729, 2187, 6561];

/// Fail with [`NucgrepError::BlockWidth`] unless `1 <= width <= 8`.
pub fn check_block_width(width: usize) -> Result<(), NucgrepError> {
    if (1..=MAX_BLOCK_WIDTH).contains(&width) {
        Ok(())
    } else {
        Err(NucgrepError::BlockWidth(width))
    }
}

/// Result of one elementary single-position step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub delta: i8,
    pub carry: u8,
    pub state: u8,
}

const fn st(delta: i8, carry: u8, state: u8) -> Step {
    Step { delta, carry, state }
}

/// `STEP[state][carry][match]`.
const STEP: [[[Step; 2]; 3]; 3] = [
    [
        [st(1, 0, 0), st(1, 0, 0)],
        [st(1, 1, 0), st(0, 0, 1)],
        [st(0, 1, 1), st(-1, 0, 2)],
    ],
    [
        [st(1, 1, 0), st(1, 1, 0)],
        [st(1, 2, 0), st(0, 1, 1)],
        [st(0, 2, 1), st(-1, 1, 2)],
    ],
    [
        [st(1, 2, 0), st(1, 2, 0)],
        [st(0, 2, 1), st(0, 2, 1)],
        [st(-1, 2, 2), st(-1, 2, 2)],
    ],
];

/// One column update of the clipped edit-distance recurrence at a single
/// pattern position.
#[inline]
pub fn step(state: u8, carry: u8, matched: bool) -> Step {
    STEP[state as usize][carry as usize][matched as usize]
}

/// Error levels of the `K` positions of a block as base-3 digits, position 0
/// most significant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BlockState(u16);

impl BlockState {
    /// Every position at level 0: the state of a block before any symbol.
    pub const ZERO: BlockState = BlockState(0);

    /// Pack per-position levels (each `0..=2`), position 0 first.
    pub fn from_digits(digits: &[u8]) -> Self {
        debug_assert!(digits.len() <= MAX_BLOCK_WIDTH, "{} digits exceed the widest block", digits.len());
        debug_assert!(digits.iter().all(|&d| d <= 2), "levels must be 0..=2: {digits:?}");
        BlockState(digits.iter().fold(0u16, |acc, &d| acc * 3 + d as u16))
    }

    /// Per-position levels for a block of `width` positions.
    pub fn digits(self, width: usize) -> Vec<u8> {
        (0..width).map(|i| self.digit(i, width)).collect()
    }

    /// Level of position `i` in a block of `width` positions.
    #[inline]
    pub fn digit(self, i: usize, width: usize) -> u8 {
        ((self.0 / POW3[width - 1 - i]) % 3) as u8
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Score contribution of the first `depth` positions alone.
    pub fn partial_delta(self, width: usize, depth: usize) -> i32 {
        (0..depth).map(|i| 1 - self.digit(i, width) as i32).sum()
    }
}

/// Outcome of advancing a whole block by one subject symbol.
///
/// The carry and the minimum prefix delta share one byte: carry in the low
/// nibble, minimum prefix delta as a signed high nibble.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Transition {
    delta: i8,
    gamma: u8,
    next: BlockState,
}

impl Transition {
    fn new(delta: i8, carry: u8, min_delta: i8, next: BlockState) -> Self {
        let gamma = (carry & 0x0F) | ((min_delta as u8) << 4);
        Self { delta, gamma, next }
    }

    /// The block's contribution to the column score: the sum of its new
    /// vertical differences.
    #[inline]
    pub fn delta(self) -> i32 {
        self.delta as i32
    }

    /// Carry passed to the next block.
    #[inline]
    pub fn carry(self) -> u8 {
        self.gamma & 0x0F
    }

    /// Smallest cumulative delta seen after any position of the block,
    /// capped at 1. Adding it to the score entering the block bounds every
    /// row of the block from below.
    #[inline]
    pub fn min_delta(self) -> i32 {
        ((self.gamma as i8) >> 4) as i32
    }

    #[inline]
    pub fn next(self) -> BlockState {
        self.next
    }
}

/// Exhaustive transition table for blocks of `K` positions.
#[derive(Clone, Debug)]
pub struct BlockAutomaton {
    width: usize,
    table: Vec<Transition>,
}

impl BlockAutomaton {
    /// Tabulate every `(state, match mask, carry)` transition for blocks of
    /// `width` positions (`3^K * 2^K * 3` entries).
    pub fn new(width: usize) -> Result<Self, NucgrepError> {
        check_block_width(width)?;
        let states = POW3[width] as usize;
        let masks = 1usize << width;
        let mut table = Vec::with_capacity(states * masks * 3);
        for s in 0..states {
            let state = BlockState(s as u16);
            for m in 0..masks {
                for carry in 0..3u8 {
                    table.push(Self::advance(state, m as u8, carry, width));
                }
            }
        }
        log::debug!("built block automaton: width={width}, transitions={}", table.len());
        Ok(Self { width, table })
    }

    fn advance(state: BlockState, matches: u8, carry_in: u8, width: usize) -> Transition {
        let mut carry = carry_in;
        let mut next = 0u16;
        let mut delta = 0i8;
        let mut min_delta = 1i8;
        for i in 0..width {
            let out = step(state.digit(i, width), carry, (matches >> i) & 1 == 1);
            carry = out.carry;
            next += out.state as u16 * POW3[width - 1 - i];
            delta += out.delta;
            min_delta = min_delta.min(delta);
        }
        Transition::new(delta, carry, min_delta, BlockState(next))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of tabulated transitions.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Transition for a block in `state` whose positions matched per
    /// `matches` (bit `i` for position `i`), entered with `carry` (`0..=2`).
    #[inline]
    pub fn transition(&self, state: BlockState, matches: u8, carry: u8) -> Transition {
        debug_assert!(state.index() < POW3[self.width] as usize, "state {} out of range for width {}", state.index(), self.width);
        debug_assert!((matches as usize) < 1 << self.width, "match mask {matches:#b} wider than {}", self.width);
        debug_assert!(carry <= 2, "carry {carry} out of range");
        self.table[((state.index() << self.width) | matches as usize) * 3 + carry as usize]
    }
}
