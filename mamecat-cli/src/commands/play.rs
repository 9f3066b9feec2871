use std::path::{Path, PathBuf};
use std::time::Duration;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use mamecat_lib::{ArtPathCache, PathResolver};

use super::Session;
use crate::error::CliError;

/// Entry point for `play`: run each machine for the configured time, then
/// stop it and start the next.
pub(crate) fn run_play(
    session: &Session,
    names: &[String],
    minutes: Option<u64>,
) -> Result<(), CliError> {
    let minutes = minutes.unwrap_or(session.settings.mame.minutes_per_game);
    let duration = Duration::from_secs(minutes.saturating_mul(60));
    let resolver = PathResolver::new(&session.invoker);
    let mut art = ArtPathCache::new();

    for (i, name) in names.iter().enumerate() {
        if let Some(artwork) = find_artwork(art.get(&resolver)?, name) {
            log::info!("  Artwork: {}", artwork.display());
        }

        let mut args = session.settings.mame.options();
        args.push(name.clone());

        log::info!(
            "[{}/{}] Playing {} for {} minute(s)",
            i + 1,
            names.len(),
            name.if_supports_color(Stdout, |t| t.bold()),
            minutes
        );
        let handle = session.invoker.launch(&args)?;
        std::thread::sleep(duration);
        session.invoker.terminate(handle);
    }
    Ok(())
}

/// `<dir>/<name>.zip` or `<dir>/<name>/` in the first art directory that has one.
fn find_artwork(dirs: &[PathBuf], name: &str) -> Option<PathBuf> {
    dirs.iter()
        .flat_map(|dir| artwork_candidates(dir, name))
        .find(|path| path.exists())
}

fn artwork_candidates(dir: &Path, name: &str) -> [PathBuf; 2] {
    [dir.join(format!("{name}.zip")), dir.join(name)]
}
