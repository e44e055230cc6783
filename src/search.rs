//! Record sources and search drivers.
//!
//! Records come either from lines of text (each line scanned together with
//! its `\n`) or from FASTA entries (each entry's sequence with line breaks
//! removed). Both framings stream: only the record being assembled is held
//! in memory, and bytes are passed through untouched. Hits are written one
//! per line as `<record>:<offset>,<distance>`.
//!
//! With `threads > 1` records are read in batches and scanned in parallel on
//! a dedicated rayon pool; every batch is written back in record order, so
//! the output is identical to a sequential run.
//!
//! ### Example
//! ```rust
//! use nucgrep::{search_reader, Matcher, SearchOptions};
//! let m = Matcher::new("ACGT", 0).unwrap();
//! let mut out = Vec::new();
//! let summary = search_reader(&m, &b"TTTT\nGGACGTGG\n"[..], &SearchOptions::default(), &mut out).unwrap();
//! assert_eq!(summary.records, 2);
//! assert_eq!(String::from_utf8(out).unwrap(), "2:5,0\n");
//! ```
//!
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use rayon::prelude::*;

use crate::common::NucgrepError;
use crate::scanner::{Hit, Matcher};

/// Records handed to the worker pool at a time.
const BATCH_RECORDS: usize = 1 << 14;

/// How the input is split into records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RecordFormat {
    /// One record per line, terminator included.
    #[default]
    Lines,
    /// One record per FASTA entry.
    Fasta,
}

/// Options for [`search_reader`] and [`search_path`]. The block width is a
/// property of the [`Matcher`] and is chosen when it is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOptions {
    /// Worker threads; 0 and 1 both scan on the calling thread.
    pub threads: usize,
    pub format: RecordFormat,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self { threads: 1, format: RecordFormat::Lines }
    }
}

/// Totals for one search run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchSummary {
    pub records: usize,
    pub hits: usize,
}

/// Pulls records one at a time out of a buffered reader.
pub struct RecordReader<R> {
    reader: R,
    format: RecordFormat,
    line: Vec<u8>,
    /// A FASTA header has been read whose record is not yet returned.
    in_entry: bool,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(reader: R, format: RecordFormat) -> Self {
        Self { reader, format, line: Vec::new(), in_entry: false }
    }

    /// Replace `buf` with the next record; `false` once the input is
    /// exhausted.
    pub fn next_record(&mut self, buf: &mut Vec<u8>) -> Result<bool, NucgrepError> {
        buf.clear();
        match self.format {
            RecordFormat::Lines => Ok(self.reader.read_until(b'\n', buf)? > 0),
            RecordFormat::Fasta => self.next_fasta(buf),
        }
    }

    /// Sequence lines before the first header are skipped; an entry ends at
    /// the next header or at end of input.
    fn next_fasta(&mut self, buf: &mut Vec<u8>) -> Result<bool, NucgrepError> {
        loop {
            self.line.clear();
            if self.reader.read_until(b'\n', &mut self.line)? == 0 {
                return Ok(std::mem::take(&mut self.in_entry));
            }
            if self.line.first() == Some(&b'>') {
                if self.in_entry {
                    return Ok(true);
                }
                self.in_entry = true;
            } else if self.in_entry {
                buf.extend_from_slice(self.line.trim_ascii());
            }
        }
    }
}

/// Open a sequence source: a file, or stdin for `None` / `-`.
pub fn open_source(path: Option<&Path>) -> Result<Box<dyn BufRead>, NucgrepError> {
    match path {
        None => Ok(Box::new(io::stdin().lock())),
        Some(p) if p.as_os_str() == "-" => Ok(Box::new(io::stdin().lock())),
        Some(p) => {
            let file = File::open(p).map_err(|source| NucgrepError::SourceUnavailable { path: p.to_path_buf(), source })?;
            Ok(Box::new(BufReader::new(file)))
        }
    }
}

/// Search every record of the file at `path` (stdin for `None` / `-`).
pub fn search_path<W: Write>(matcher: &Matcher, path: Option<&Path>, opts: &SearchOptions, out: W) -> Result<SearchSummary, NucgrepError> {
    let reader = open_source(path)?;
    search_reader(matcher, reader, opts, out)
}

/// Search every record from `reader`, writing hits to `out` in record then
/// offset order.
pub fn search_reader<R: BufRead, W: Write>(matcher: &Matcher, reader: R, opts: &SearchOptions, mut out: W) -> Result<SearchSummary, NucgrepError> {
    let mut records = RecordReader::new(reader, opts.format);
    let summary = if opts.threads > 1 {
        search_parallel(matcher, &mut records, opts.threads, &mut out)?
    } else {
        search_sequential(matcher, &mut records, &mut out)?
    };
    out.flush()?;
    log::info!("scanned {} records, {} hits", summary.records, summary.hits);
    Ok(summary)
}

fn search_sequential<R: BufRead, W: Write>(matcher: &Matcher, records: &mut RecordReader<R>, out: &mut W) -> Result<SearchSummary, NucgrepError> {
    let mut state = matcher.new_state();
    let mut summary = SearchSummary::default();
    let mut buf = Vec::new();
    let mut hits: Vec<Hit> = Vec::new();
    while records.next_record(&mut buf)? {
        summary.records += 1;
        hits.clear();
        matcher.scan_record(&mut state, summary.records, &buf, |h| hits.push(h));
        for h in &hits {
            writeln!(out, "{h}")?;
        }
        summary.hits += hits.len();
    }
    Ok(summary)
}

fn search_parallel<R: BufRead, W: Write>(
    matcher: &Matcher,
    records: &mut RecordReader<R>,
    threads: usize,
    out: &mut W,
) -> Result<SearchSummary, NucgrepError> {
    let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
    log::debug!("scanning with {threads} threads, batches of {BATCH_RECORDS} records");
    let mut summary = SearchSummary::default();
    let mut batch: Vec<Vec<u8>> = Vec::with_capacity(BATCH_RECORDS);
    loop {
        batch.clear();
        let mut buf = Vec::new();
        while batch.len() < BATCH_RECORDS && records.next_record(&mut buf)? {
            batch.push(std::mem::take(&mut buf));
        }
        if batch.is_empty() {
            break;
        }
        let first = summary.records + 1;
        let per_record: Vec<Vec<Hit>> = pool.install(|| {
            batch
                .par_iter()
                .enumerate()
                .map_init(
                    || matcher.new_state(),
                    |state, (k, rec)| {
                        let mut hits = Vec::new();
                        matcher.scan_record(state, first + k, rec, |h| hits.push(h));
                        hits
                    },
                )
                .collect()
        });
        for h in per_record.iter().flatten() {
            writeln!(out, "{h}")?;
            summary.hits += 1;
        }
        summary.records += batch.len();
    }
    Ok(summary)
}
