//! CLI for `nucgrep verify`: scan every record with both the automaton and
//! the reference DP and list the records where they disagree.
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use anyhow::Result;
use clap::Args;
use nucgrep::*;

use crate::search_cmd::FormatChoice;

#[derive(Debug, Args)]
pub struct VerifyCmd {
    /// Maximum edit distance (0 <= DIST < pattern length).
    #[arg(allow_negative_numbers = true)]
    pub dist: i64,
    /// Pattern over A,C,G,T,U,N; a bracketed group like [CG] is one position.
    pub pattern: String,
    /// Sequence file. Reads stdin if omitted or `-`.
    #[arg(value_name = "FILE")]
    pub sequence: Option<PathBuf>,
    /// How the input is split into records.
    #[arg(long, value_enum, default_value_t=FormatChoice::Lines)]
    pub format: FormatChoice,
    /// Pattern positions advanced per table lookup.
    #[arg(long, default_value_t=DEFAULT_BLOCK_WIDTH as u8, value_parser=clap::value_parser!(u8).range(1..=MAX_BLOCK_WIDTH as i64))]
    pub block_width: u8,
}

fn join(hits: &[Hit]) -> String {
    hits.iter().map(|h| h.to_string()).collect::<Vec<_>>().join(" ")
}

/// Records read and records whose automaton hits differ from `reference`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifySummary {
    pub records: usize,
    pub differing: usize,
}

/// Scan every record with `matcher` and with `reference`, writing one line
/// per record whose hit lists disagree.
pub fn verify_records<R, W, F>(matcher: &Matcher, records: &mut RecordReader<R>, out: &mut W, reference: F) -> Result<VerifySummary>
where
    R: BufRead,
    W: Write,
    F: Fn(&Matcher, usize, &[u8]) -> Vec<Hit>,
{
    let mut state = matcher.new_state();
    let mut buf = Vec::new();
    let mut summary = VerifySummary { records: 0, differing: 0 };
    while records.next_record(&mut buf)? {
        summary.records += 1;
        let n = summary.records;
        let mut fast = Vec::new();
        matcher.scan_record(&mut state, n, &buf, |h| fast.push(h));
        let slow = reference(matcher, n, &buf);
        if fast != slow {
            summary.differing += 1;
            writeln!(out, "record {n}: automaton [{}] reference [{}]", join(&fast), join(&slow))?;
        }
    }
    Ok(summary)
}

pub fn run(cmd: VerifyCmd) -> Result<()> {
    let matcher = Matcher::with_block_width(&cmd.pattern, cmd.dist, usize::from(cmd.block_width))?;
    let mut records = RecordReader::new(open_source(cmd.sequence.as_deref())?, cmd.format.into());
    let mut out = io::stdout().lock();
    let VerifySummary { records: n, differing } =
        verify_records(&matcher, &mut records, &mut out, |m, record, bytes| reference_scan(m.pattern(), m.dist(), record, bytes))?;
    log::info!("verified {n} records, {differing} differ");
    if differing > 0 {
        anyhow::bail!("{differing} of {n} records differ from the reference scan");
    }
    writeln!(out, "{n} records agree")?;
    Ok(())
}
