//! CLI subcommand for `nucgrep search` (one `<record>:<offset>,<distance>` line per hit).
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use nucgrep::*;

/// Options for the `search` subcommand.
#[derive(Debug, Args)]
pub struct SearchCmd {
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
    /// Worker threads for scanning records in parallel.
    #[arg(long, default_value_t=1)]
    pub threads: usize,
    /// Write hits here instead of stdout.
    #[arg(long)]
    pub outfile: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FormatChoice { Lines, Fasta }

impl From<FormatChoice> for RecordFormat {
    fn from(c: FormatChoice) -> Self {
        match c {
            FormatChoice::Lines => RecordFormat::Lines,
            FormatChoice::Fasta => RecordFormat::Fasta,
        }
    }
}

pub fn run(cmd: SearchCmd) -> Result<()> {
    let matcher = Matcher::with_block_width(&cmd.pattern, cmd.dist, usize::from(cmd.block_width))?;
    let reader = open_source(cmd.sequence.as_deref())?;

    let out: Box<dyn Write> = match &cmd.outfile {
        Some(p) => Box::new(BufWriter::new(File::create(p).with_context(|| format!("create {}", p.display()))?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    let opts = SearchOptions { threads: cmd.threads, format: cmd.format.into() };
    search_reader(&matcher, reader, &opts, out).context("search failed")?;
    Ok(())
}
