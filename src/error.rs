//! Structured error handling and exit codes.

use serde::Serialize;

use crate::inventory::InventoryError;

/// Exit codes for the annexdupe application.
///
/// - 0: Success (report written, with or without duplicates)
/// - 1: General error (unexpected failure, e.g. writing the report)
/// - 2: Inventory failure (git-annex could not be run or failed)
/// - 3: Configuration error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: the report was written.
    Success = 0,
    /// General error: An unexpected error occurred.
    GeneralError = 1,
    /// Inventory failure: the inventory could not be fetched.
    InventoryFailed = 2,
    /// Configuration error: a config file or variable is invalid.
    ConfigError = 3,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "AD000",
            Self::GeneralError => "AD001",
            Self::InventoryFailed => "AD002",
            Self::ConfigError => "AD003",
        }
    }

    /// Classify an application error.
    #[must_use]
    pub fn for_error(err: &anyhow::Error) -> Self {
        if err.downcast_ref::<InventoryError>().is_some() {
            Self::InventoryFailed
        } else if err.downcast_ref::<ConfigLoadError>().is_some() {
            Self::ConfigError
        } else {
            Self::GeneralError
        }
    }
}

/// Marker error for configuration failures.
#[derive(Debug, thiserror::Error)]
#[error("failed to load configuration")]
pub struct ConfigLoadError;

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "AD002")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message, including its causes
    pub message: String,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{err:#}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::GeneralError.as_i32(), 1);
        assert_eq!(ExitCode::InventoryFailed.as_i32(), 2);
        assert_eq!(ExitCode::ConfigError.as_i32(), 3);
        assert_eq!(ExitCode::InventoryFailed.code_prefix(), "AD002");
    }

    #[test]
    fn test_for_error_finds_inventory_error_in_chain() {
        let err = Err::<(), _>(InventoryError::Spawn {
            program: "git".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        })
        .context("failed to fetch inventory")
        .unwrap_err();

        assert_eq!(ExitCode::for_error(&err), ExitCode::InventoryFailed);
    }

    #[test]
    fn test_for_error_config() {
        let err = anyhow::Error::new(ConfigLoadError).context("startup");
        assert_eq!(ExitCode::for_error(&err), ExitCode::ConfigError);
    }

    #[test]
    fn test_for_error_general() {
        let err = anyhow::anyhow!("broken pipe");
        assert_eq!(ExitCode::for_error(&err), ExitCode::GeneralError);
    }

    #[test]
    fn test_structured_error_includes_cause() {
        let err = anyhow::anyhow!("root cause").context("outer");
        let structured = StructuredError::new(&err, ExitCode::GeneralError);
        assert_eq!(structured.code, "AD001");
        assert_eq!(structured.message, "outer: root cause");
    }
}
