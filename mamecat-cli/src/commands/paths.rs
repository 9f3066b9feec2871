use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use mamecat_lib::PathResolver;

use super::Session;
use crate::error::CliError;

/// Entry point for `paths`.
pub(crate) fn run_paths(session: &Session) -> Result<(), CliError> {
    let resolver = PathResolver::new(&session.invoker);
    print_paths("ROM paths", &resolver.rom_paths()?);
    log::info!("");
    print_paths("Artwork paths", &resolver.art_paths()?);
    Ok(())
}

fn print_paths(title: &str, paths: &[PathBuf]) {
    log::info!("{}:", title.if_supports_color(Stdout, |t| t.bold()));
    if paths.is_empty() {
        log::info!("  {}", "(none)".if_supports_color(Stdout, |t| t.dimmed()));
    }
    for path in paths {
        if path.is_dir() {
            log::info!("  {}", path.display().if_supports_color(Stdout, |t| t.cyan()));
        } else {
            log::info!(
                "  {} {}",
                path.display().if_supports_color(Stdout, |t| t.cyan()),
                "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
    }
}
