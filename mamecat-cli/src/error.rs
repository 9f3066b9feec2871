use mamecat_core::CatalogError;
use mamecat_lib::{CategoryError, StoreError};
use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Running MAME or reading its output failed
    #[error("{0}")]
    Catalog(#[from] CatalogError),

    /// Category file could not be loaded
    #[error("{0}")]
    Category(#[from] CategoryError),

    /// Saved catalog could not be read or written
    #[error("Catalog file error: {0}")]
    Store(#[from] StoreError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
