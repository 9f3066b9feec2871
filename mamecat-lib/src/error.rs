use std::path::PathBuf;

use thiserror::Error;

/// Errors loading a `catver.ini` category file.
#[derive(Debug, Error)]
pub enum CategoryError {
    /// I/O error while reading the file
    #[error("Unable to read category file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CategoryError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors reading or writing a saved catalog.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error on the catalog file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog file is not valid JSON for a catalog
    #[error("Invalid catalog file: {0}")]
    Json(#[from] serde_json::Error),

    /// No catalog has been built yet
    #[error("No catalog found at {}", .0.display())]
    NotFound(PathBuf),
}
