//! Builds the catalog of playable machines.
//!
//! A build runs in two phases. Verification (0-50%) asks MAME which ROM
//! archives hold good sets; the details phase (50-100%) fetches `-listxml`
//! metadata for those sets and keeps the machines a player can actually run.

use std::collections::HashSet;
use std::fmt;

use mamecat_core::{
    AcceptedStatuses, BuildPhase, CatalogEntry, CatalogError, CategorySource, MachineRecord,
    ToolInvoker, VerifiedSets,
};

use crate::batch::{BatchOutcome, DEFAULT_BATCH_SIZE, run_with_fallback, tool_args};
use crate::listxml::MachineReader;
use crate::paths::PathResolver;
use crate::progress::PhaseTracker;
use crate::verify::{RomVerifier, rom_candidates};

/// Tunables for a catalog build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogOptions {
    pub verify_batch_size: usize,
    pub detail_batch_size: usize,
    /// Driver statuses a verified machine must have.
    pub accepted_statuses: AcceptedStatuses,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            verify_batch_size: DEFAULT_BATCH_SIZE,
            detail_batch_size: DEFAULT_BATCH_SIZE,
            accepted_statuses: AcceptedStatuses::default(),
        }
    }
}

/// Why a machine was left out of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    Device,
    Bios,
    Mechanical,
    NotRunnable,
    NoDriver,
    Status(String),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Device => write!(f, "it is a device"),
            Self::Bios => write!(f, "it is a BIOS"),
            Self::Mechanical => write!(f, "it is mechanical"),
            Self::NotRunnable => write!(f, "it is not runnable"),
            Self::NoDriver => write!(f, "it has no driver information"),
            Self::Status(status) => write!(f, "its driver status is '{status}'"),
        }
    }
}

/// Check `record` against the validity rules, in order.
///
/// `accepted` is `None` when the driver status does not matter.
pub fn check_validity(
    record: &MachineRecord,
    accepted: Option<&AcceptedStatuses>,
) -> Result<(), Rejection> {
    if record.is_device {
        return Err(Rejection::Device);
    }
    if record.is_bios {
        return Err(Rejection::Bios);
    }
    if record.is_mechanical {
        return Err(Rejection::Mechanical);
    }
    if !record.runnable {
        return Err(Rejection::NotRunnable);
    }
    let Some(status) = record.status.as_deref() else {
        return Err(Rejection::NoDriver);
    };
    match accepted {
        Some(accepted) if !accepted.accepts(status) => Err(Rejection::Status(status.to_string())),
        _ => Ok(()),
    }
}

/// Runs MAME to produce catalog entries.
pub struct CatalogBuilder<T, C> {
    tool: T,
    categories: C,
    options: CatalogOptions,
}

impl<T: ToolInvoker, C: CategorySource> CatalogBuilder<T, C> {
    pub fn new(tool: T, categories: C) -> Self {
        Self {
            tool,
            categories,
            options: CatalogOptions::default(),
        }
    }

    pub fn with_options(mut self, options: CatalogOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &CatalogOptions {
        &self.options
    }

    /// Full build: resolve the ROM directories, list the archives in them,
    /// verify, and fetch details. Progress runs from 0 to 100.
    pub fn build_catalog(
        &self,
        progress: &mut dyn FnMut(u8),
    ) -> Result<Vec<CatalogEntry>, CatalogError> {
        let rom_dirs = PathResolver::new(&self.tool).rom_paths()?;
        let rom_names = rom_candidates(&rom_dirs)?;
        log::info!(
            "Found {} ROM archive(s) in {} director(ies)",
            rom_names.len(),
            rom_dirs.len()
        );

        let verified = RomVerifier::new(&self.tool)
            .with_batch_size(self.options.verify_batch_size)
            .verify(&rom_names, progress)?;

        self.build(&rom_names, &verified, progress)
    }

    /// Details phase: fetch metadata for every verified set and keep the
    /// valid machines. Progress runs from 50 to 100, counting the candidates
    /// that failed verification as already processed.
    pub fn build(
        &self,
        rom_names: &[String],
        verified: &VerifiedSets,
        progress: &mut dyn FnMut(u8),
    ) -> Result<Vec<CatalogEntry>, CatalogError> {
        let names: Vec<String> = verified.keys().cloned().collect();
        let total = rom_names.len().max(names.len());
        let unverified = total - names.len();

        let mut tracker = PhaseTracker::new(progress, BuildPhase::Details, total);
        if names.is_empty() {
            tracker.finish();
            return Ok(Vec::new());
        }

        let entries = run_with_fallback(
            BuildPhase::Details,
            self.options.detail_batch_size,
            |batch_size| {
                BatchOutcome::from_result(self.details_pass(
                    &names,
                    verified,
                    unverified,
                    batch_size,
                    &mut tracker,
                ))
            },
        )?;
        tracker.finish();

        log::info!("{} machine(s) added to the catalog", entries.len());
        Ok(entries)
    }

    fn details_pass<F: FnMut(u8) + ?Sized>(
        &self,
        names: &[String],
        verified: &VerifiedSets,
        unverified: usize,
        batch_size: usize,
        tracker: &mut PhaseTracker<'_, F>,
    ) -> Result<Vec<CatalogEntry>, CatalogError> {
        let mut entries = Vec::new();
        let mut seen = HashSet::new();
        let mut processed = unverified;

        for batch in names.chunks(batch_size) {
            let output = self.tool.invoke(&tool_args("-listxml", batch))?;
            for record in MachineReader::new(output) {
                let record = record?;
                if seen.contains(&record.name) {
                    continue;
                }
                let clone_of = verified.get(&record.name).cloned().unwrap_or_default();
                if let Some(entry) = self.accept(record, true, clone_of) {
                    seen.insert(entry.name.clone());
                    entries.push(entry);
                }
            }
            processed += batch.len();
            tracker.advance(processed);
        }

        Ok(entries)
    }

    /// Details for a single machine, whatever its driver status.
    ///
    /// # Errors
    /// `CatalogError::MachineNotFound` if MAME does not know `name` or the
    /// machine is not playable.
    pub fn lookup(&self, name: &str) -> Result<CatalogEntry, CatalogError> {
        let output = self.tool.invoke(&tool_args("-listxml", &[name.to_string()]))?;
        for record in MachineReader::new(output) {
            if let Some(entry) = self.accept(record?, false, String::new()) {
                return Ok(entry);
            }
        }
        Err(CatalogError::machine_not_found(name))
    }

    fn accept(
        &self,
        mut record: MachineRecord,
        require_status: bool,
        clone_of: String,
    ) -> Option<CatalogEntry> {
        let accepted = require_status.then_some(&self.options.accepted_statuses);
        if let Err(rejection) = check_validity(&record, accepted) {
            log::debug!("{} not added to the catalog as {}", record.name, rejection);
            return None;
        }

        let detail = self.categories.category(&record.name);
        record.category = detail.category;
        record.subcategory = detail.subcategory;
        Some(CatalogEntry::from_record(record, clone_of))
    }
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
