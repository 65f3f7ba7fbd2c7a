//! Application configuration management.
//!
//! Settings are layered with figment, later layers overriding earlier ones:
//!
//! 1. Built-in defaults ([`Config::default`])
//! 2. TOML config file (`--config PATH`, or `config.toml` in the platform
//!    config directory)
//! 3. `ANNEXDUPE_*` environment variables
//! 4. Command-line flags ([`Config::apply_cli`])

use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::{Cli, OutputFormat};
use crate::duplicates::DEFAULT_MIN_DUPLICATES;
use crate::output::{ReportOptions, DEFAULT_PATH_WIDTH};

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "ANNEXDUPE_";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Minimum number of files sharing a key to report
    pub min_duplicates: usize,
    /// Print full paths instead of eliding long ones
    pub full_paths: bool,
    /// Width beyond which paths are elided in text output
    pub path_width: usize,
    /// Program used to run `annex find`
    pub git_program: String,
    /// Report format
    pub output: OutputFormat,
    /// Style text headings
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_duplicates: DEFAULT_MIN_DUPLICATES,
            full_paths: false,
            path_width: DEFAULT_PATH_WIDTH,
            git_program: "git".to_string(),
            output: OutputFormat::Text,
            color: true,
        }
    }
}

impl Config {
    /// Build the layered figment for an optional explicit config file.
    ///
    /// A missing default config file is silently skipped; an explicit one
    /// must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit config file does not exist.
    pub fn figment(explicit: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        match explicit {
            Some(path) => {
                if !path.is_file() {
                    anyhow::bail!("config file not found: {}", path.display());
                }
                figment = figment.merge(Toml::file(path));
            }
            None => {
                if let Some(path) = Self::default_path() {
                    log::debug!("Looking for config at {}", path.display());
                    figment = figment.merge(Toml::file(path));
                }
            }
        }

        Ok(figment.merge(Env::prefixed(ENV_PREFIX)))
    }

    /// Load configuration from the file and environment layers.
    ///
    /// # Errors
    ///
    /// Returns an error if a config layer is invalid.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config: Self = Self::figment(explicit)?
            .extract()
            .context("invalid configuration")?;
        Ok(config.normalized())
    }

    /// Apply command-line overrides on top of the loaded layers.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(min) = cli.min_duplicates {
            self.min_duplicates = usize::try_from(min).unwrap_or(usize::MAX);
        }
        if cli.verbose > 0 {
            self.full_paths = true;
        }
        if let Some(output) = cli.output {
            self.output = output;
        }
        if cli.no_color {
            self.color = false;
        }
    }

    /// Presentation options derived from this configuration.
    #[must_use]
    pub fn report_options(&self, summary_only: bool, color_allowed: bool) -> ReportOptions {
        ReportOptions {
            summary_only,
            full_paths: self.full_paths,
            path_width: self.path_width,
            color: self.color && color_allowed,
        }
    }

    /// Save the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config")?;
        fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    /// Default platform-specific config file path.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "annexdupe", "annexdupe")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    fn normalized(mut self) -> Self {
        if self.min_duplicates < 1 {
            log::warn!("min_duplicates must be at least 1; using 1");
            self.min_duplicates = 1;
        }
        self
    }
}
