//! Common definitions shared by the search components: the crate error type.
//!
use std::io;
use std::path::PathBuf;

/// Errors that can be returned by pattern compilation, table construction
/// and scanning.
///
/// Every variant is terminal: nothing is retried and no hit is emitted once
/// one of these has been returned.
#[derive(thiserror::Error, Debug)]
pub enum NucgrepError {
    /// Malformed bracket nesting or a letter outside `ACGTUN`.
    #[error("pattern syntax error in {pattern:?} at position {position}: {reason}")]
    PatternSyntax {
        pattern: String,
        position: usize,
        reason: &'static str,
    },
    /// The pattern compiled to zero positions.
    #[error("pattern is empty")]
    EmptyPattern,
    /// Returned if the requested distance is negative.
    #[error("invalid distance {0}: must be >= 0")]
    NegativeDistance(i64),
    /// Returned if the requested distance is not smaller than the pattern.
    #[error("distance {dist} must be smaller than the pattern length {len}")]
    DistanceTooLarge { dist: usize, len: usize },
    /// Automaton block width outside `1..=8`.
    #[error("block width {0} is outside 1..=8")]
    BlockWidth(usize),
    /// The sequence source could not be opened.
    #[error("cannot open sequence source {}: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Read or write failure on an already opened source or sink.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// The worker pool for a parallel scan could not be started.
    #[error("cannot start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        let e = NucgrepError::DistanceTooLarge { dist: 2, len: 2 };
        assert_eq!(e.to_string(), "distance 2 must be smaller than the pattern length 2");
        assert_eq!(NucgrepError::BlockWidth(9).to_string(), "block width 9 is outside 1..=8");
    }
}
