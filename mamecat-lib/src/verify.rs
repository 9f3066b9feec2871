//! ROM set verification with `-verifyroms`.

use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use mamecat_core::{BuildPhase, CatalogError, ToolInvoker, VerifiedEntry, VerifiedSets};
use regex::Regex;

use crate::batch::{BatchOutcome, DEFAULT_BATCH_SIZE, RetryReason, run_with_fallback, tool_args};
use crate::progress::PhaseTracker;

static GOOD_ROMSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"romset (\w*)(?:\s\[(\w*)\])? is good").expect("static pattern")
});

/// Names of the `*.zip` archives in `dirs`, without extension.
///
/// Each directory is read in path order; a name seen in an earlier
/// directory is not repeated. Missing directories are skipped with a
/// warning.
pub fn rom_candidates(dirs: &[PathBuf]) -> Result<Vec<String>, CatalogError> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();

    for dir in dirs {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("ROM directory does not exist: {}", dir.display());
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let mut archives: Vec<PathBuf> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && is_zip(path))
            .collect();
        archives.sort();

        for path in archives {
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if seen.insert(stem.to_string()) {
                names.push(stem.to_string());
            }
        }
    }

    Ok(names)
}

fn is_zip(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("zip"))
}

/// Every `romset NAME [PARENT] is good` line in `-verifyroms` output.
pub fn parse_verify_output(text: &str) -> Vec<VerifiedEntry> {
    GOOD_ROMSET
        .captures_iter(text)
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str();
            if name.is_empty() {
                return None;
            }
            let clone_of = caps.get(2).map_or("", |m| m.as_str());
            Some(VerifiedEntry::new(name, clone_of))
        })
        .collect()
}

/// Asks MAME which candidate ROM sets are complete and correct.
#[derive(Debug, Clone)]
pub struct RomVerifier<T> {
    tool: T,
    batch_size: usize,
}

impl<T: ToolInvoker> RomVerifier<T> {
    pub fn new(tool: T) -> Self {
        Self {
            tool,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Verify `rom_names`, reporting 0-50% through `progress`.
    ///
    /// If a pass finds no good sets at all, it is repeated one name at a
    /// time. A single-name pass that also finds nothing fails with
    /// `CatalogError::EmptyVerificationResult`.
    pub fn verify(
        &self,
        rom_names: &[String],
        progress: &mut dyn FnMut(u8),
    ) -> Result<VerifiedSets, CatalogError> {
        let mut tracker = PhaseTracker::new(progress, BuildPhase::Verify, rom_names.len());
        if rom_names.is_empty() {
            tracker.finish();
            return Ok(VerifiedSets::new());
        }

        let verified = run_with_fallback(BuildPhase::Verify, self.batch_size, |batch_size| {
            self.verify_pass(rom_names, batch_size, &mut tracker)
        })?;
        tracker.finish();

        log::info!(
            "{} of {} ROM sets verified as good",
            verified.len(),
            rom_names.len()
        );
        Ok(verified)
    }

    fn verify_pass<F: FnMut(u8) + ?Sized>(
        &self,
        rom_names: &[String],
        batch_size: usize,
        tracker: &mut PhaseTracker<'_, F>,
    ) -> BatchOutcome<VerifiedSets> {
        let mut verified = VerifiedSets::new();
        let mut processed = 0;

        for batch in rom_names.chunks(batch_size) {
            match self.verify_batch(batch) {
                Ok(entries) => {
                    for entry in entries {
                        verified.insert(entry.name, entry.clone_of);
                    }
                }
                Err(e) => return BatchOutcome::Fatal(e),
            }
            processed += batch.len();
            tracker.advance(processed);
        }

        if verified.is_empty() {
            BatchOutcome::RetryAtSmallerBatch(RetryReason::EmptyVerificationResult)
        } else {
            BatchOutcome::Success(verified)
        }
    }

    fn verify_batch(&self, batch: &[String]) -> Result<Vec<VerifiedEntry>, CatalogError> {
        let mut output = self.tool.invoke(&tool_args("-verifyroms", batch))?;
        let mut bytes = Vec::new();
        output.read_to_end(&mut bytes)?;
        Ok(parse_verify_output(&String::from_utf8_lossy(&bytes)))
    }
}

#[cfg(test)]
#[path = "tests/verify_tests.rs"]
mod tests;
