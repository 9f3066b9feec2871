//! Reads path lists out of MAME's `-showconfig` output.
//!
//! MAME prints its effective configuration as `key  value` lines. Path
//! settings such as `rompath` and `artpath` hold semicolon-separated lists,
//! which may be relative to MAME's own directory or start with `$HOME`.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use mamecat_core::{CatalogError, ToolInvoker};

pub const ROM_PATH_KEY: &str = "rompath";
pub const ART_PATH_KEY: &str = "artpath";

/// Resolves configured directories by asking MAME for its configuration.
#[derive(Debug, Clone)]
pub struct PathResolver<T> {
    tool: T,
}

impl<T: ToolInvoker> PathResolver<T> {
    pub fn new(tool: T) -> Self {
        Self { tool }
    }

    /// Absolute paths listed under `key`, in configuration order.
    ///
    /// # Errors
    /// `CatalogError::ConfigKeyNotFound` if the output ends without a line
    /// for `key`; invocation errors are passed through.
    pub fn resolve_paths(&self, key: &str) -> Result<Vec<PathBuf>, CatalogError> {
        log::debug!("Getting MAME {}", key);

        let output = self.tool.invoke(&["-showconfig".to_string()])?;
        for line in output.lines() {
            let line = line?;
            if let Some(paths) = extract_config_paths(key, &line, self.tool.working_dir()) {
                return Ok(paths);
            }
        }

        Err(CatalogError::config_key_not_found(key))
    }

    /// Directories MAME searches for ROM sets.
    pub fn rom_paths(&self) -> Result<Vec<PathBuf>, CatalogError> {
        self.resolve_paths(ROM_PATH_KEY)
    }

    /// Directories MAME searches for artwork and layouts.
    pub fn art_paths(&self) -> Result<Vec<PathBuf>, CatalogError> {
        self.resolve_paths(ART_PATH_KEY)
    }
}

/// Parse one `-showconfig` line. Returns `None` when the line is not the
/// entry for `key`.
pub fn extract_config_paths(key: &str, line: &str, base: Option<&Path>) -> Option<Vec<PathBuf>> {
    let trimmed = line.trim();
    let mut parts = trimmed.splitn(2, |c: char| c.is_ascii_whitespace());
    if parts.next()? != key {
        return None;
    }

    let raw = parts.next().unwrap_or("").trim();
    let value = raw
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(raw);

    let paths = value
        .split(';')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| absolutize(expand_home(segment), base))
        .collect();

    Some(paths)
}

/// Expand a leading `~` or `$HOME`.
fn expand_home(segment: &str) -> PathBuf {
    let rest = segment
        .strip_prefix("$HOME")
        .or_else(|| segment.strip_prefix('~'));

    match (rest, dirs::home_dir()) {
        (Some(rest), Some(home)) if rest.is_empty() || rest.starts_with(['/', '\\']) => {
            home.join(rest.trim_start_matches(['/', '\\']))
        }
        _ => PathBuf::from(segment),
    }
}

fn absolutize(path: PathBuf, base: Option<&Path>) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    match base {
        Some(base) => base.join(path),
        None => std::env::current_dir()
            .map(|cwd| cwd.join(&path))
            .unwrap_or(path),
    }
}

/// Art paths resolved once and reused until invalidated.
///
/// Resolving costs a MAME invocation, so a consumer that needs the list
/// repeatedly (e.g. once per launched game) keeps one of these.
#[derive(Debug, Clone, Default)]
pub struct ArtPathCache {
    paths: Option<Vec<PathBuf>>,
}

impl ArtPathCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached paths, resolving them on first use.
    pub fn get<T: ToolInvoker>(
        &mut self,
        resolver: &PathResolver<T>,
    ) -> Result<&[PathBuf], CatalogError> {
        let paths = match self.paths.take() {
            Some(paths) => paths,
            None => resolver.art_paths()?,
        };
        Ok(self.paths.insert(paths).as_slice())
    }

    /// Drop the cached list and resolve it again now.
    pub fn recompute<T: ToolInvoker>(
        &mut self,
        resolver: &PathResolver<T>,
    ) -> Result<&[PathBuf], CatalogError> {
        self.invalidate();
        self.get(resolver)
    }

    /// Forget the cached list; the next `get` resolves it again.
    pub fn invalidate(&mut self) {
        self.paths = None;
    }

    pub fn is_cached(&self) -> bool {
        self.paths.is_some()
    }
}

#[cfg(test)]
#[path = "tests/paths_tests.rs"]
mod tests;
