//! CLI argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

/// opencover-merge: combine OpenCover coverage reports, summing visit counts
#[derive(Parser, Debug)]
#[command(name = "opencover-merge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input report (repeat for each report, merged in the order given)
    #[arg(long = "from", value_name = "FILE")]
    pub from: Vec<PathBuf>,

    /// Destination of the merged report
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Resolve relative paths against this directory
    #[arg(long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Print merge stats as JSON
    #[arg(long)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repeated_from() {
        let cli = Cli::try_parse_from([
            "opencover-merge",
            "--from=a.xml",
            "--from",
            "b.xml",
            "--output=out.xml",
        ])
        .unwrap();
        assert_eq!(cli.from, [PathBuf::from("a.xml"), PathBuf::from("b.xml")]);
        assert_eq!(cli.output, Some(PathBuf::from("out.xml")));
    }

    #[test]
    fn test_parse_no_args() {
        let cli = Cli::try_parse_from(["opencover-merge"]).unwrap();
        assert!(cli.from.is_empty());
        assert!(cli.output.is_none());
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "opencover-merge",
            "-vv",
            "--json",
            "--base-dir",
            "/work",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.json);
        assert_eq!(cli.base_dir, Some(PathBuf::from("/work")));
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(Cli::try_parse_from(["opencover-merge", "--into=x.xml"]).is_err());
    }
}
