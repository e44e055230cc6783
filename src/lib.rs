//! # nucgrep
//!
//! Bounded approximate search for IUPAC-coded patterns in nucleotide
//! sequences.
//!
//! Given a pattern such as `GAT[CT]NCA` and a maximum edit distance `dist`,
//! the scanner streams each record symbol by symbol and reports the end of
//! every occurrence whose edit distance (substitutions, insertions,
//! deletions) to the pattern is at most `dist`, once per local minimum of the
//! running distance.
//!
//! ## How it works
//! The semi-global edit-distance column is stored as per-position vertical
//! differences, each clipped to three levels. Pattern positions are grouped
//! into blocks of `K` (1..=8); a precomputed automaton advances a whole block
//! per input symbol with a single lookup keyed by the block's levels, the
//! block's match mask for the symbol (from a per-pattern identity table) and
//! the carry from the block above. Blocks that cannot contain a row within
//! distance are skipped.
//!
//! - [`pattern`]: pattern compilation into per-position base masks.
//! - [`identity`]: per-category, per-block match masks.
//! - [`automaton`]: the block transition table.
//! - [`scanner`]: [`Matcher`] and the per-record scan.
//! - [`search`]: line/FASTA record sources, sequential and parallel drivers.
//! - [`reference`]: a plain DP scanner for cross-checking.
//!
//! ### Example
//! ```
//! use nucgrep::{Hit, Matcher};
//! let m = Matcher::new("A[CG]T", 0).unwrap();
//! assert_eq!(m.scan(1, b"AGT\n"), vec![Hit { record: 1, offset: 2, distance: 0 }]);
//! assert!(m.scan(1, b"ATT\n").is_empty());
//! ```
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub mod alphabet;
pub mod automaton;
pub mod common;
pub mod identity;
pub mod pattern;
pub mod reference;
pub mod scanner;
pub mod search;

pub use automaton::{BlockAutomaton, BlockState, Transition, DEFAULT_BLOCK_WIDTH, MAX_BLOCK_WIDTH};
pub use common::NucgrepError;
pub use identity::IdentityTable;
pub use pattern::{BaseMask, Pattern};
pub use reference::{end_distance, reference_scan};
pub use scanner::{validate_distance, Hit, Matcher, ScanState};
pub use search::{open_source, search_path, search_reader, RecordFormat, RecordReader, SearchOptions, SearchSummary};
