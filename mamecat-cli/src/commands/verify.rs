use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use mamecat_lib::{PathResolver, RomVerifier, rom_candidates};

use super::Session;
use crate::error::CliError;

/// Entry point for `verify`.
pub(crate) fn run_verify(
    session: &Session,
    names: Vec<String>,
    batch_size: Option<usize>,
) -> Result<(), CliError> {
    let names = if names.is_empty() {
        let dirs = PathResolver::new(&session.invoker).rom_paths()?;
        rom_candidates(&dirs)?
    } else {
        names
    };

    let batch_size = batch_size.unwrap_or(session.settings.catalog.verify_batch_size);
    let verified = RomVerifier::new(&session.invoker)
        .with_batch_size(batch_size)
        .verify(&names, &mut |_| {})?;

    for (name, parent) in &verified {
        if parent.is_empty() {
            log::info!("  {}", name.if_supports_color(Stdout, |t| t.green()));
        } else {
            log::info!(
                "  {} {}",
                name.if_supports_color(Stdout, |t| t.green()),
                format!("(clone of {parent})").if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
    }

    let failed = names.iter().filter(|n| !verified.contains_key(n.as_str())).count();
    log::info!("");
    log::info!(
        "{} good, {} missing or bad",
        verified.len().if_supports_color(Stdout, |t| t.bold()),
        failed.if_supports_color(Stdout, |t| t.bold()),
    );
    Ok(())
}
