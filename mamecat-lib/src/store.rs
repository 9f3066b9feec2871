//! Saved catalogs, kept as JSON next to the settings file.

use std::path::{Path, PathBuf};

use mamecat_core::CatalogEntry;

use crate::error::StoreError;
use crate::settings::config_dir;

/// Returns `~/.config/mamecat/catalog.json`.
pub fn catalog_path() -> PathBuf {
    config_dir().join("catalog.json")
}

/// Write `entries` to `path` atomically (write to temp, then rename).
pub fn save_catalog(path: &Path, entries: &[CatalogEntry]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let contents = serde_json::to_string_pretty(entries)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, contents)?;
    std::fs::rename(&tmp, path)?;
    log::debug!("Saved {} catalog entries to {}", entries.len(), path.display());
    Ok(())
}

/// Read a catalog written by [`save_catalog`].
pub fn load_catalog(path: &Path) -> Result<Vec<CatalogEntry>, StoreError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(StoreError::NotFound(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };
    Ok(serde_json::from_str(&contents)?)
}
