//! Command-line interface for the `nucgrep` crate.
//!
//! Subcommands are implemented in separate files (modules) under `src/bin/nucgrep/`:
//! - `search_cmd.rs` (alias: `scan`)
//! - `verify_cmd.rs`
//!
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name="nucgrep", version=env!("CARGO_PKG_VERSION"), about="Approximate IUPAC pattern search in nucleotide sequences", disable_help_subcommand=true)]
struct Cli {
    /// Log table construction and run statistics to stderr (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Report every occurrence within DIST edits of PATTERN. Alias: `scan`.
    #[command(visible_alias = "scan")]
    Search(search_cmd::SearchCmd),
    /// Cross-check the automaton against a plain dynamic-programming scan.
    Verify(verify_cmd::VerifyCmd),
}

#[path = "nucgrep/search_cmd.rs"] mod search_cmd;
#[path = "nucgrep/verify_cmd.rs"] mod verify_cmd;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();
    match cli.command {
        Command::Search(cmd) => search_cmd::run(cmd),
        Command::Verify(cmd) => verify_cmd::run(cmd),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn negative_distance_reaches_the_library() {
        let cli = Cli::try_parse_from(["nucgrep", "search", "-1", "ACGT", "-"]).unwrap();
        match cli.command {
            Command::Search(cmd) => assert_eq!(cmd.dist, -1),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn block_width_is_range_checked() {
        assert!(Cli::try_parse_from(["nucgrep", "scan", "--block-width", "9", "1", "ACGT"]).is_err());
        assert!(Cli::try_parse_from(["nucgrep", "scan", "--block-width", "8", "1", "ACGT"]).is_ok());
    }

    #[test]
    fn block_width_defaults_to_the_library_default() {
        let cli = Cli::try_parse_from(["nucgrep", "search", "1", "ACGT"]).unwrap();
        match cli.command {
            Command::Search(cmd) => assert_eq!(usize::from(cmd.block_width), nucgrep::DEFAULT_BLOCK_WIDTH),
            other => panic!("unexpected {other:?}"),
        }
        let cli = Cli::try_parse_from(["nucgrep", "verify", "1", "ACGT"]).unwrap();
        match cli.command {
            Command::Verify(cmd) => assert_eq!(usize::from(cmd.block_width), nucgrep::DEFAULT_BLOCK_WIDTH),
            other => panic!("unexpected {other:?}"),
        }
    }

    fn verify_input(input: &[u8], reference: impl Fn(&nucgrep::Matcher, usize, &[u8]) -> Vec<nucgrep::Hit>) -> (verify_cmd::VerifySummary, String) {
        let m = nucgrep::Matcher::new("GATTACA", 2).unwrap();
        let mut records = nucgrep::RecordReader::new(input, nucgrep::RecordFormat::Lines);
        let mut out = Vec::new();
        let summary = verify_cmd::verify_records(&m, &mut records, &mut out, reference).unwrap();
        (summary, String::from_utf8(out).unwrap())
    }

    #[test]
    fn verify_agrees_with_the_reference_scan() {
        let (summary, out) = verify_input(b"GATTACA\nTTTT\nCCGATTTACAGG\n", |m, r, b| nucgrep::reference_scan(m.pattern(), m.dist(), r, b));
        assert_eq!(summary, verify_cmd::VerifySummary { records: 3, differing: 0 });
        assert!(out.is_empty());
    }

    #[test]
    fn verify_lists_disagreeing_records() {
        let (summary, out) = verify_input(b"GATTACA\nTTTT\n", |_, _, _| Vec::new());
        assert_eq!(summary, verify_cmd::VerifySummary { records: 2, differing: 1 });
        assert_eq!(out, "record 1: automaton [1:6,0] reference []\n");
    }

    #[test]
    fn verify_run_reads_a_file_and_rejects_a_missing_one() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut f, b"GATTACA\nGATCACA\n").unwrap();
        let cmd = |path: std::path::PathBuf| verify_cmd::VerifyCmd {
            dist: 1,
            pattern: "GATTACA".into(),
            sequence: Some(path),
            format: search_cmd::FormatChoice::Lines,
            block_width: 3,
        };
        assert!(verify_cmd::run(cmd(f.path().to_path_buf())).is_ok());
        assert!(verify_cmd::run(cmd(f.path().with_extension("absent"))).is_err());
    }
}
