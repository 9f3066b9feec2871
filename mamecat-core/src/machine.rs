//! Records produced while building a catalog.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// ROM sets MAME reported as good, keyed by set name. The value is the
/// parent set for clones and empty otherwise.
pub type VerifiedSets = BTreeMap<String, String>;

/// One `romset NAME [CLONE] is good` line from `-verifyroms`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedEntry {
    pub name: String,
    /// Parent set name, empty when the set is not a clone.
    pub clone_of: String,
}

impl VerifiedEntry {
    pub fn new(name: impl Into<String>, clone_of: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            clone_of: clone_of.into(),
        }
    }
}

/// Category and subcategory for a set, e.g. "Maze" / "Collect".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDetail {
    pub category: String,
    pub subcategory: String,
}

/// One `<machine>` (or legacy `<game>`) element from `-listxml`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MachineRecord {
    pub name: String,
    pub description: String,
    pub year: String,
    pub manufacturer: String,
    /// `display/@rotate`, e.g. "0" or "270"; empty when there is no display.
    pub rotation: String,
    /// `driver/@status`. `None` when the machine has no `<driver>` element.
    pub status: Option<String>,
    pub category: String,
    pub subcategory: String,
    pub is_device: bool,
    pub is_bios: bool,
    pub is_mechanical: bool,
    pub runnable: bool,
}

impl MachineRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            runnable: true,
            ..Self::default()
        }
    }
}

/// A machine that passed every validity check, ready for a selection UI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub description: String,
    pub year: String,
    pub manufacturer: String,
    pub rotation: String,
    pub status: String,
    pub category: String,
    pub subcategory: String,
    /// Parent set from verification; empty for parents and single lookups.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub clone_of: String,
}

impl CatalogEntry {
    pub fn from_record(record: MachineRecord, clone_of: impl Into<String>) -> Self {
        Self {
            name: record.name,
            description: record.description,
            year: record.year,
            manufacturer: record.manufacturer,
            rotation: record.rotation,
            status: record.status.unwrap_or_default(),
            category: record.category,
            subcategory: record.subcategory,
            clone_of: clone_of.into(),
        }
    }

    /// True when the machine's screen is mounted horizontally.
    pub fn is_horizontal(&self) -> bool {
        matches!(self.rotation.as_str(), "" | "0" | "180")
    }
}
