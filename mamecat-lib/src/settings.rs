//! Application settings, stored as `~/.config/mamecat/settings.toml`.

use std::path::{Path, PathBuf};

use mamecat_core::AcceptedStatuses;
use serde::{Deserialize, Serialize};

use crate::batch::DEFAULT_BATCH_SIZE;
use crate::catalog::CatalogOptions;

/// Environment variable overriding the configured MAME executable.
pub const EXECUTABLE_ENV_VAR: &str = "MAMECAT_EXECUTABLE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub mame: MameSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
}

/// How to run MAME.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MameSettings {
    pub executable_path: PathBuf,
    /// Options passed before the machine name when playing.
    pub command_line_options: String,
    /// How long `play` lets a machine run before stopping it.
    pub minutes_per_game: u64,
}

impl Default for MameSettings {
    fn default() -> Self {
        Self {
            executable_path: default_executable(),
            command_line_options:
                "-skip_gameinfo -nowindow -noswitchres -sleep -triplebuffer -sound none"
                    .to_string(),
            minutes_per_game: 5,
        }
    }
}

impl MameSettings {
    /// `command_line_options` split on whitespace.
    pub fn options(&self) -> Vec<String> {
        self.command_line_options
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }
}

#[cfg(windows)]
fn default_executable() -> PathBuf {
    PathBuf::from(r"C:\MAME\mame.exe")
}

#[cfg(not(windows))]
fn default_executable() -> PathBuf {
    PathBuf::from("/usr/games/mame")
}

/// How catalogs are built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Accept machines whose driver status is "imperfect" as well as "good".
    pub include_imperfect: bool,
    pub verify_batch_size: usize,
    pub detail_batch_size: usize,
    /// Optional `catver.ini` for categories.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_file: Option<PathBuf>,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            include_imperfect: false,
            verify_batch_size: DEFAULT_BATCH_SIZE,
            detail_batch_size: DEFAULT_BATCH_SIZE,
            category_file: None,
        }
    }
}

impl CatalogSettings {
    pub fn options(&self) -> CatalogOptions {
        CatalogOptions {
            verify_batch_size: self.verify_batch_size.max(1),
            detail_batch_size: self.detail_batch_size.max(1),
            accepted_statuses: AcceptedStatuses::with_imperfect(self.include_imperfect),
        }
    }
}

impl Settings {
    /// The MAME executable to use:
    ///
    /// 1. CLI override (if `Some`)
    /// 2. `MAMECAT_EXECUTABLE` environment variable
    /// 3. `mame.executable_path` from the settings file
    pub fn resolve_executable(&self, cli_override: Option<PathBuf>) -> PathBuf {
        let env = std::env::var_os(EXECUTABLE_ENV_VAR).map(PathBuf::from);
        resolve_executable_from(cli_override, env, &self.mame.executable_path)
    }
}

fn resolve_executable_from(
    cli_override: Option<PathBuf>,
    env: Option<PathBuf>,
    configured: &Path,
) -> PathBuf {
    cli_override
        .or_else(|| env.filter(|p| !p.as_os_str().is_empty()))
        .unwrap_or_else(|| configured.to_path_buf())
}

/// Directory holding the settings file and the saved catalog.
pub fn config_dir() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("mamecat")
}

/// Returns `~/.config/mamecat/settings.toml`.
pub fn settings_path() -> PathBuf {
    config_dir().join("settings.toml")
}

/// Load settings from the default location.
pub fn load_settings() -> Settings {
    load_settings_from(&settings_path())
}

/// Load settings from `path`, returning defaults if missing or corrupt.
pub fn load_settings_from(path: &Path) -> Settings {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
            log::warn!("Failed to parse settings at {}: {}", path.display(), e);
            Settings::default()
        }),
        Err(_) => Settings::default(),
    }
}

/// Save settings to the default location.
pub fn save_settings(settings: &Settings) -> std::io::Result<()> {
    save_settings_to(&settings_path(), settings)
}

/// Save settings to `path` atomically (write to temp, then rename).
pub fn save_settings_to(path: &Path, settings: &Settings) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let contents = toml::to_string_pretty(settings).map_err(std::io::Error::other)?;
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, contents)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
