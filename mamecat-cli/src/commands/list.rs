use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use mamecat_core::CatalogEntry;
use mamecat_lib::store::{catalog_path, load_catalog};

use crate::error::CliError;

/// Screen orientation filter for `list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Orientation {
    Any,
    Horizontal,
    Vertical,
}

impl Orientation {
    pub(crate) fn from_flags(horizontal: bool, vertical: bool) -> Self {
        match (horizontal, vertical) {
            (true, _) => Self::Horizontal,
            (_, true) => Self::Vertical,
            _ => Self::Any,
        }
    }

    fn matches(self, entry: &CatalogEntry) -> bool {
        match self {
            Self::Any => true,
            Self::Horizontal => entry.is_horizontal(),
            Self::Vertical => !entry.is_horizontal(),
        }
    }
}

/// Entry point for `list`.
pub(crate) fn run_list(
    catalog: Option<PathBuf>,
    category: Option<String>,
    orientation: Orientation,
) -> Result<(), CliError> {
    let path = catalog.unwrap_or_else(catalog_path);
    let entries = load_catalog(&path)?;

    let shown: Vec<&CatalogEntry> = entries
        .iter()
        .filter(|e| orientation.matches(e))
        .filter(|e| {
            category
                .as_deref()
                .is_none_or(|c| e.category.eq_ignore_ascii_case(c))
        })
        .collect();

    for entry in &shown {
        let category = if entry.subcategory.is_empty() {
            entry.category.clone()
        } else {
            format!("{} / {}", entry.category, entry.subcategory)
        };
        log::info!(
            "{} {} {}{}",
            format!("{:<16}", entry.name).if_supports_color(Stdout, |t| t.bold()),
            entry.description,
            format!("({}, {})", entry.year, entry.manufacturer)
                .if_supports_color(Stdout, |t| t.dimmed()),
            if category.is_empty() {
                String::new()
            } else {
                format!(" [{}]", category.if_supports_color(Stdout, |t| t.cyan()))
            },
        );
    }

    log::info!("");
    log::info!("{} of {} machine(s)", shown.len(), entries.len());
    Ok(())
}
