//! annexdupe - Duplicate annexed file finder
//!
//! Reports which files in a git-annex repository share a content key, i.e.
//! hold identical content. The inventory comes from `git annex find` (or a
//! captured copy of its output); nothing in the repository is modified.
//!
//! The pipeline is a single sequential pass:
//! inventory → [`duplicates::group_by_key`] → [`duplicates::filter_duplicates`]
//! → [`output::write_report`].

pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod inventory;
pub mod logging;
pub mod output;

use std::io::{self, BufWriter, IsTerminal, Write};

use anyhow::{Context, Result};

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::duplicates::{filter_duplicates, group_by_key, DuplicateSummary};
use crate::error::{ConfigLoadError, ExitCode};
use crate::inventory::{parse_inventory, GitAnnexSource, InventorySource, ReaderSource};
use crate::output::{write_report, ReportOptions};

/// Run the application for parsed command-line arguments.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the inventory cannot
/// be fetched, or the report cannot be written.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    let mut config = Config::load(cli.config.as_deref()).context(ConfigLoadError)?;
    config.apply_cli(&cli);
    log::debug!("Effective configuration: {config:?}");

    if let Some(path) = &cli.save_config {
        config
            .save_to(path)
            .with_context(|| format!("failed to save configuration to {}", path.display()))?;
        log::info!("Saved configuration to {}", path.display());
        return Ok(ExitCode::Success);
    }

    let source = select_source(&cli, &config);

    let stdout = io::stdout();
    let options = config.report_options(cli.summary, stdout.is_terminal());
    let mut writer = BufWriter::new(stdout.lock());

    analyze(
        source.as_ref(),
        config.min_duplicates,
        config.output,
        &options,
        &mut writer,
    )?;
    writer.flush().context("failed to write report")?;

    Ok(ExitCode::Success)
}

fn select_source(cli: &Cli, config: &Config) -> Box<dyn InventorySource> {
    match &cli.input {
        Some(input) => Box::new(ReaderSource::from_arg(input)),
        None => {
            let mut source = GitAnnexSource::new(config.git_program.as_str());
            if let Some(repo) = &cli.repo {
                source = source.with_repo(repo);
            }
            Box::new(source)
        }
    }
}

/// Fetch, group, filter and report in one pass.
///
/// Returns the summary of what was reported.
///
/// # Errors
///
/// Returns an error if the inventory cannot be fetched or the report
/// cannot be written.
pub fn analyze<S, W>(
    source: &S,
    min_duplicates: usize,
    format: OutputFormat,
    options: &ReportOptions,
    writer: W,
) -> Result<DuplicateSummary>
where
    S: InventorySource + ?Sized,
    W: Write,
{
    log::info!("Scanning annexed files for duplicates...");

    let lines = source
        .fetch()
        .with_context(|| format!("failed to fetch inventory from {}", source.describe()))?;
    let (records, _) = parse_inventory(&lines);

    let groups = group_by_key(records);
    let duplicates = filter_duplicates(&groups, min_duplicates);

    write_report(format, &groups, &duplicates, options, writer)
        .context("failed to write report")?;

    Ok(DuplicateSummary::new(&groups, &duplicates))
}
