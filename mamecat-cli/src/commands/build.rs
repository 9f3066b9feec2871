use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use mamecat_lib::CatalogBuilder;
use mamecat_lib::store::{catalog_path, save_catalog};

use super::Session;
use crate::cli_types::CatalogArgs;
use crate::error::CliError;

/// Entry point for `build`.
pub(crate) fn run_build(
    session: &Session,
    args: CatalogArgs,
    output: Option<PathBuf>,
) -> Result<(), CliError> {
    let categories = session.categories(args.categories.as_deref())?;
    let builder = CatalogBuilder::new(&session.invoker, categories)
        .with_options(session.catalog_options(&args));

    let pb = if session.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(100)
    };
    pb.set_style(
        ProgressStyle::with_template("  {bar:40.cyan/blue} {pos:>3}% {msg}")
            .expect("static pattern")
            .progress_chars("=> "),
    );
    pb.set_message("Verifying ROM sets");

    let mut progress = |percentage: u8| {
        if percentage >= 50 {
            pb.set_message("Reading machine details");
        }
        pb.set_position(u64::from(percentage));
    };
    let result = builder.build_catalog(&mut progress);
    pb.finish_and_clear();
    let entries = result?;

    let path = output.unwrap_or_else(catalog_path);
    save_catalog(&path, &entries)?;

    log::info!(
        "{} {} machine(s) written to {}",
        "Done:".if_supports_color(Stdout, |t| t.bold()),
        entries.len(),
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}
