//! Inventory sources: the git-annex command and captured inventories.

use std::borrow::Cow;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use super::{InventoryError, InventorySource};

/// Format argument passed to `git annex find`.
///
/// git-annex expands `${key}`, `${file}` and the `\n` escape itself, so each
/// output line is exactly `<key> <file>`.
pub const ANNEX_FIND_FORMAT: &str = "--format=${key} ${file}\\n";

/// Runs `git annex find` and collects its output.
#[derive(Debug, Clone)]
pub struct GitAnnexSource {
    program: String,
    repo: Option<PathBuf>,
}

impl Default for GitAnnexSource {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitAnnexSource {
    /// Create a source that invokes `program` (normally `git`).
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            repo: None,
        }
    }

    /// Run the command inside `repo` instead of the current directory.
    #[must_use]
    pub fn with_repo(mut self, repo: impl Into<PathBuf>) -> Self {
        self.repo = Some(repo.into());
        self
    }

    /// Arguments passed to the program.
    #[must_use]
    pub fn args() -> [&'static str; 3] {
        ["annex", "find", ANNEX_FIND_FORMAT]
    }

    fn command_line(&self) -> String {
        let mut parts = vec![self.program.as_str()];
        parts.extend(Self::args());
        parts.join(" ")
    }
}

impl InventorySource for GitAnnexSource {
    fn describe(&self) -> String {
        match &self.repo {
            Some(repo) => format!("'{}' in {}", self.command_line(), repo.display()),
            None => format!("'{}'", self.command_line()),
        }
    }

    fn fetch(&self) -> Result<Vec<String>, InventoryError> {
        let mut command = Command::new(&self.program);
        command.args(Self::args()).stdin(Stdio::null());
        if let Some(repo) = &self.repo {
            command.current_dir(repo);
        }

        log::debug!("Running inventory command {}", self.describe());

        let output = command.output().map_err(|source| InventoryError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(InventoryError::CommandFailed {
                command: self.command_line(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(split_lines(&output.stdout, &self.describe()))
    }
}

/// Reads a previously captured inventory.
#[derive(Debug, Clone)]
pub enum ReaderSource {
    /// Inventory stored in a file
    File(PathBuf),
    /// Inventory piped on standard input
    Stdin,
    /// Inventory already held in memory
    Memory {
        /// Label used in log and error messages
        label: String,
        /// Raw inventory text
        data: Vec<u8>,
    },
}

impl ReaderSource {
    /// Source for a command-line argument: `-` is stdin, anything else a file.
    #[must_use]
    pub fn from_arg(arg: &Path) -> Self {
        if arg == Path::new("-") {
            Self::Stdin
        } else {
            Self::File(arg.to_path_buf())
        }
    }

    /// Source for an in-memory inventory.
    #[must_use]
    pub fn from_bytes(label: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self::Memory {
            label: label.into(),
            data: data.into(),
        }
    }
}

impl InventorySource for ReaderSource {
    fn describe(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Stdin => "stdin".to_string(),
            Self::Memory { label, .. } => label.clone(),
        }
    }

    fn fetch(&self) -> Result<Vec<String>, InventoryError> {
        let origin = self.describe();
        let read_error = |source: io::Error| InventoryError::Read {
            origin: origin.clone(),
            source,
        };

        let bytes = match self {
            Self::File(path) => fs::read(path).map_err(read_error)?,
            Self::Stdin => {
                let mut buf = Vec::new();
                io::stdin().lock().read_to_end(&mut buf).map_err(read_error)?;
                buf
            }
            Self::Memory { data, .. } => data.clone(),
        };

        // Captured inventories may have been saved with CRLF line endings
        Ok(split_lines(&bytes, &origin)
            .into_iter()
            .map(strip_carriage_return)
            .collect())
    }
}

/// Split raw output at `\n` only, replacing invalid UTF-8 rather than failing.
///
/// Any other character, `\r` included, belongs to the line.
fn split_lines(bytes: &[u8], origin: &str) -> Vec<String> {
    let text = String::from_utf8_lossy(bytes);
    if matches!(text, Cow::Owned(_)) {
        log::warn!(
            "Inventory from {origin} contains invalid UTF-8; affected paths are shown lossily"
        );
    }
    text.split_terminator('\n').map(str::to_string).collect()
}

fn strip_carriage_return(mut line: String) -> String {
    if line.ends_with('\r') {
        line.pop();
    }
    line
}
