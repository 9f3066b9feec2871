//! Categories from a `catver.ini` file.
//!
//! The `[Category]` section maps set names to `Category / Subcategory`
//! strings; adult titles carry a trailing `* Mature *` marker. Every other
//! section (e.g. `[VerAdded]`) is ignored.

use std::collections::HashMap;
use std::path::Path;

use mamecat_core::{CategoryDetail, CategorySource};

use crate::error::CategoryError;

const CATEGORY_SECTION: &str = "Category";
const MATURE_MARKER: &str = "* Mature *";

/// Set name to category, parsed from `catver.ini`.
#[derive(Debug, Clone, Default)]
pub struct CatverIndex {
    entries: HashMap<String, CategoryDetail>,
}

impl CatverIndex {
    /// Parse the text of a `catver.ini` file. Lines that do not parse are
    /// skipped.
    pub fn parse(text: &str) -> Self {
        let mut entries = HashMap::new();
        let mut in_category = false;

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(';') {
                continue;
            }
            if let Some(section) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                in_category = section.trim().eq_ignore_ascii_case(CATEGORY_SECTION);
                continue;
            }
            if !in_category {
                continue;
            }
            let Some((name, value)) = line.split_once('=') else {
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            entries.insert(name.to_string(), parse_category(value));
        }

        Self { entries }
    }

    /// Read and parse `path`. Invalid UTF-8 is replaced rather than rejected.
    pub fn load(path: &Path) -> Result<Self, CategoryError> {
        let bytes = std::fs::read(path).map_err(|e| CategoryError::io(path, e))?;
        let index = Self::parse(&String::from_utf8_lossy(&bytes));
        log::debug!(
            "Loaded {} categories from {}",
            index.len(),
            path.display()
        );
        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&CategoryDetail> {
        self.entries.get(name)
    }
}

impl CategorySource for CatverIndex {
    fn category(&self, name: &str) -> CategoryDetail {
        self.get(name).cloned().unwrap_or_default()
    }
}

/// Split `Category / Subcategory * Mature *` into its parts.
fn parse_category(value: &str) -> CategoryDetail {
    let value = value.trim();
    let value = value.strip_suffix(MATURE_MARKER).unwrap_or(value).trim();
    let (category, subcategory) = value.split_once('/').unwrap_or((value, ""));
    CategoryDetail {
        category: category.trim().to_string(),
        subcategory: subcategory.trim().to_string(),
    }
}
