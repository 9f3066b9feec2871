use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use mamecat_core::CatalogEntry;
use mamecat_lib::CatalogBuilder;

use super::Session;
use crate::error::CliError;

/// Entry point for `lookup`.
pub(crate) fn run_lookup(
    session: &Session,
    name: &str,
    categories: Option<PathBuf>,
) -> Result<(), CliError> {
    let categories = session.categories(categories.as_deref())?;
    let entry = CatalogBuilder::new(&session.invoker, categories).lookup(name)?;
    print_entry(&entry);
    Ok(())
}

fn print_entry(entry: &CatalogEntry) {
    log::info!(
        "{} {}",
        entry.name.if_supports_color(Stdout, |t| t.bold()),
        format!("({})", entry.description).if_supports_color(Stdout, |t| t.cyan()),
    );
    log::info!("  Year:         {}", entry.year);
    log::info!("  Manufacturer: {}", entry.manufacturer);
    log::info!(
        "  Screen:       {}",
        if entry.is_horizontal() { "horizontal" } else { "vertical" }
    );
    log::info!("  Driver:       {}", entry.status);
    if !entry.category.is_empty() {
        log::info!("  Category:     {}", entry.category);
    }
    if !entry.subcategory.is_empty() {
        log::info!("  Subcategory:  {}", entry.subcategory);
    }
}
