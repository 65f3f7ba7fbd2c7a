//! Command-line interface definitions for annexdupe.
//!
//! # Example
//!
//! ```bash
//! # List duplicate sets in the current git-annex repository
//! annexdupe
//!
//! # Summary only, for a repository elsewhere
//! annexdupe --summary -C ~/datasets/photos
//!
//! # Sets with at least three copies, full paths, as JSON
//! annexdupe -m 3 -v --output json
//!
//! # Analyse a captured inventory
//! git annex find --format='${key} ${file}\n' > inventory.txt
//! annexdupe --input inventory.txt
//! ```

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Find duplicate annexed files in a git-annex repository.
///
/// Files sharing an annex key point to identical content. annexdupe lists
/// every key shared by several files, with the size recorded in the key.
#[derive(Debug, Parser)]
#[command(name = "annexdupe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Show full paths (-v) and more log detail (-vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Show only summary statistics
    #[arg(short, long)]
    pub summary: bool,

    /// Minimum number of files sharing a key to report (default: 2)
    #[arg(
        short,
        long = "min-duplicates",
        value_name = "N",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub min_duplicates: Option<u64>,

    /// Suppress log output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Repository to inventory (default: current directory)
    #[arg(short = 'C', long, value_name = "PATH", conflicts_with = "input")]
    pub repo: Option<PathBuf>,

    /// Read a captured `<key> <path>` inventory instead of running git-annex ('-' for stdin)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Configuration file (default: platform config directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write the effective configuration to PATH as TOML and exit
    #[arg(long, value_name = "PATH")]
    pub save_config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Report errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON output for scripting
    Json,
    /// CSV output for spreadsheets
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_help() {
        let result = Cli::try_parse_from(["annexdupe", "--help"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_defaults() {
        let cli = Cli::try_parse_from(["annexdupe"]).unwrap();
        assert_eq!(cli.verbose, 0);
        assert!(!cli.summary);
        assert_eq!(cli.min_duplicates, None);
        assert_eq!(cli.output, None);
        assert!(cli.repo.is_none());
        assert!(cli.input.is_none());
        assert!(cli.save_config.is_none());
    }

    #[test]
    fn test_cli_parse_short_flags() {
        let cli = Cli::try_parse_from(["annexdupe", "-v", "-s", "-m", "3"]).unwrap();
        assert_eq!(cli.verbose, 1);
        assert!(cli.summary);
        assert_eq!(cli.min_duplicates, Some(3));
    }

    #[test]
    fn test_cli_parse_long_flags() {
        let cli = Cli::try_parse_from([
            "annexdupe",
            "--verbose",
            "--verbose",
            "--summary",
            "--min-duplicates",
            "5",
            "--output",
            "json",
            "--repo",
            "/data/repo",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.summary);
        assert_eq!(cli.min_duplicates, Some(5));
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(cli.repo, Some(PathBuf::from("/data/repo")));
    }

    #[test]
    fn test_cli_min_duplicates_must_be_positive() {
        assert!(Cli::try_parse_from(["annexdupe", "-m", "0"]).is_err());
        assert!(Cli::try_parse_from(["annexdupe", "-m", "-1"]).is_err());
        assert!(Cli::try_parse_from(["annexdupe", "-m", "two"]).is_err());
    }

    #[test]
    fn test_cli_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["annexdupe", "-v", "-q"]).is_err());
    }

    #[test]
    fn test_cli_repo_conflicts_with_input() {
        let result = Cli::try_parse_from(["annexdupe", "-C", "/repo", "-i", "inv.txt"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_input_stdin() {
        let cli = Cli::try_parse_from(["annexdupe", "--input", "-"]).unwrap();
        assert_eq!(cli.input, Some(PathBuf::from("-")));
    }

    #[test]
    fn test_cli_save_config_takes_path() {
        let cli = Cli::try_parse_from(["annexdupe", "--save-config", "cfg.toml"]).unwrap();
        assert_eq!(cli.save_config, Some(PathBuf::from("cfg.toml")));
        assert!(Cli::try_parse_from(["annexdupe", "--save-config"]).is_err());
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Text.to_string(), "text");
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::Csv.to_string(), "csv");
    }
}
