//! Online scanner: walks one record through the block automaton and reports
//! the end of every approximate occurrence.
//!
//! For each consumed symbol the scanner advances every block of the pattern
//! with one table lookup, summing the blocks' contributions into the running
//! score (the edit distance of the best alignment of the whole pattern
//! ending at this symbol). Blocks that can no longer hold a row within
//! distance are skipped; a skipped block is restarted from all-zero levels
//! when it is next needed, which overestimates its rows and so never creates
//! a spurious hit. A hit is reported each time the score, having been
//! within distance, rises again: one report per local minimum.
//!
//! ### Example
//! ```rust
//! use nucgrep::{Hit, Matcher};
//! let m = Matcher::new("ACGT", 1).unwrap();
//! let hits = m.scan(1, b"TTACCTTT\n");
//! assert_eq!(hits, vec![Hit { record: 1, offset: 5, distance: 1 }]);
//! ```
//!
use std::fmt;
use std::sync::Arc;

use crate::alphabet::{classify, Category};
use crate::automaton::{BlockAutomaton, BlockState, Transition, DEFAULT_BLOCK_WIDTH, NEUTRAL_CARRY};
use crate::common::NucgrepError;
use crate::identity::IdentityTable;
use crate::pattern::Pattern;

/// End of one approximate occurrence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hit {
    /// 1-based record number.
    pub record: usize,
    /// 0-based offset of the last symbol of the occurrence.
    pub offset: usize,
    /// Edit distance of the occurrence (`<= dist`).
    pub distance: usize,
}

impl fmt::Display for Hit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{},{}", self.record, self.offset, self.distance)
    }
}

/// Check a requested distance against the pattern length.
pub fn validate_distance(dist: i64, pattern_len: usize) -> Result<usize, NucgrepError> {
    let Ok(d) = usize::try_from(dist) else {
        return Err(NucgrepError::NegativeDistance(dist));
    };
    if d >= pattern_len {
        return Err(NucgrepError::DistanceTooLarge { dist: d, len: pattern_len });
    }
    Ok(d)
}

/// Per-record scanning state. Allocate one per thread with
/// [`Matcher::new_state`]; it is reset at the start of every record.
#[derive(Clone, Debug)]
pub struct ScanState {
    blocks: Vec<BlockState>,
    /// Blocks at or past this index were skipped on the previous symbol and
    /// hold stale levels; they re-enter from [`BlockState::ZERO`].
    frontier: usize,
    last_active: usize,
    last_score: i32,
    hit_pending: bool,
}

impl ScanState {
    fn reset(&mut self, dist: usize) {
        self.blocks.fill(BlockState::ZERO);
        self.frontier = self.blocks.len();
        self.last_active = dist;
        self.last_score = dist as i32 + 1;
        self.hit_pending = true;
    }
}

/// A compiled pattern together with its identity table and a (shareable)
/// block automaton. Immutable once built; scan with any number of
/// [`ScanState`]s concurrently.
#[derive(Clone, Debug)]
pub struct Matcher {
    pattern: Pattern,
    dist: usize,
    identity: IdentityTable,
    automaton: Arc<BlockAutomaton>,
}

impl Matcher {
    /// Compile `pattern` for distance `dist` with the default block width.
    pub fn new(pattern: &str, dist: i64) -> Result<Self, NucgrepError> {
        Self::with_block_width(pattern, dist, DEFAULT_BLOCK_WIDTH)
    }

    /// Compile `pattern` for distance `dist` with blocks of `width` positions.
    pub fn with_block_width(pattern: &str, dist: i64, width: usize) -> Result<Self, NucgrepError> {
        let automaton = Arc::new(BlockAutomaton::new(width)?);
        Self::with_automaton(Pattern::compile(pattern)?, dist, automaton)
    }

    /// Build a matcher around an existing automaton, which can be shared by
    /// any number of patterns.
    pub fn with_automaton(pattern: Pattern, dist: i64, automaton: Arc<BlockAutomaton>) -> Result<Self, NucgrepError> {
        let dist = validate_distance(dist, pattern.len())?;
        let identity = IdentityTable::new(&pattern, automaton.width())?;
        log::debug!(
            "compiled pattern {pattern}: len={}, dist={dist}, blocks={}, width={}, depth={}",
            pattern.len(),
            identity.blocks(),
            identity.width(),
            identity.depth()
        );
        Ok(Self { pattern, dist, identity, automaton })
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn dist(&self) -> usize {
        self.dist
    }

    pub fn block_width(&self) -> usize {
        self.identity.width()
    }

    pub fn automaton(&self) -> &Arc<BlockAutomaton> {
        &self.automaton
    }

    /// Fresh scanning state sized for this pattern.
    pub fn new_state(&self) -> ScanState {
        ScanState {
            blocks: vec![BlockState::ZERO; self.identity.blocks()],
            frontier: self.identity.blocks(),
            last_active: self.dist,
            last_score: self.dist as i32 + 1,
            hit_pending: true,
        }
    }

    /// Scan one record and collect its hits.
    pub fn scan(&self, record: usize, bytes: &[u8]) -> Vec<Hit> {
        let mut state = self.new_state();
        let mut hits = Vec::new();
        self.scan_record(&mut state, record, bytes, |h| hits.push(h));
        hits
    }

    /// Scan one record, passing hits to `on_hit` in offset order.
    ///
    /// Scanning stops at the first `\n` or `\0`; the end of `bytes` acts as
    /// an end-of-stream marker.
    pub fn scan_record<F: FnMut(Hit)>(&self, state: &mut ScanState, record: usize, bytes: &[u8], mut on_hit: F) {
        let dist = self.dist as i32;
        let nblocks = self.identity.blocks();
        let depth = self.identity.depth();
        let width = self.identity.width();
        state.reset(self.dist);

        let mut emit = |offset: usize, score: i32| {
            let hit = Hit { record, offset, distance: score.max(0) as usize };
            log::trace!("hit {hit}");
            on_hit(hit);
        };

        for i in 0..=bytes.len() {
            let category = bytes.get(i).map_or(Category::EndOfStream, |&b| classify(b));
            let c = match category {
                Category::Base(c) => c,
                Category::Terminator | Category::EndOfStream => {
                    if state.last_score <= dist && state.hit_pending {
                        emit(i - 1, state.last_score);
                    }
                    return;
                }
            };

            let ident = self.identity.row(c);
            let active_ref = state.last_active + 1;
            let mut score = 0i32;
            let mut carry = NEUTRAL_CARRY;
            let mut last = Transition::default();
            let mut j = 0;
            while j < nblocks {
                if score > dist && j > active_ref {
                    break;
                }
                let current = if j < state.frontier { state.blocks[j] } else { BlockState::ZERO };
                let t = self.automaton.transition(current, ident[j], carry);
                state.blocks[j] = t.next();
                carry = t.carry();
                if score + t.min_delta() <= dist {
                    state.last_active = j;
                }
                score += t.delta();
                last = t;
                j += 1;
            }
            state.frontier = j;
            // Padding positions of a partial last block always match; count
            // only the real ones.
            if depth != 0 && j == nblocks {
                score += last.next().partial_delta(width, depth) - last.delta();
            }

            if state.last_score <= dist && score > state.last_score && state.hit_pending {
                emit(i - 1, state.last_score);
                state.hit_pending = false;
            } else if score < state.last_score {
                state.hit_pending = true;
            }
            state.last_score = score;
        }
    }
}
