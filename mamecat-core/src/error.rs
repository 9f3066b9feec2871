use std::path::PathBuf;

use thiserror::Error;

/// Errors that can end a catalog build or a single-machine lookup.
///
/// Conditions the pipeline recovers from on its own (a malformed batch or an
/// empty verification pass that triggers the single-name fallback) only
/// surface here when the fallback itself fails.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The configured MAME executable does not exist
    #[error("MAME executable not found: {}", .0.display())]
    ExecutableNotFound(PathBuf),

    /// The OS refused to start the MAME process
    #[error("Unable to start {}: {source}", path.display())]
    ProcessStart {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `-showconfig` output ended without the requested key
    #[error("MAME configuration has no '{0}' entry")]
    ConfigKeyNotFound(String),

    /// Tool output could not be parsed, even one name at a time
    #[error("Malformed MAME output: {0}")]
    MalformedToolOutput(String),

    /// Verification reported no good sets, even one name at a time
    #[error("MAME verified no ROM sets")]
    EmptyVerificationResult,

    /// A single-machine lookup produced no catalog entry
    #[error("No playable machine named '{0}'")]
    MachineNotFound(String),

    /// I/O error while reading tool output or ROM directories
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    pub fn process_start(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ProcessStart {
            path: path.into(),
            source,
        }
    }

    pub fn config_key_not_found(key: impl Into<String>) -> Self {
        Self::ConfigKeyNotFound(key.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedToolOutput(msg.into())
    }

    pub fn machine_not_found(name: impl Into<String>) -> Self {
        Self::MachineNotFound(name.into())
    }

    /// True for errors raised before any tool output was read: a bad
    /// executable path or a process that would not start.
    pub fn is_launch_failure(&self) -> bool {
        matches!(
            self,
            Self::ExecutableNotFound(_) | Self::ProcessStart { .. }
        )
    }
}
