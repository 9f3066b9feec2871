pub(crate) mod build;
pub(crate) mod config;
pub(crate) mod list;
pub(crate) mod lookup;
pub(crate) mod paths;
pub(crate) mod play;
pub(crate) mod verify;

use std::path::{Path, PathBuf};

use mamecat_lib::settings::{Settings, load_settings};
use mamecat_lib::{CatalogOptions, CatverIndex, MameInvoker};

use crate::cli_types::CatalogArgs;
use crate::error::CliError;

/// What every MAME-running command needs: the settings and an invoker for
/// the resolved executable.
pub(crate) struct Session {
    pub settings: Settings,
    pub invoker: MameInvoker,
    pub quiet: bool,
}

impl Session {
    pub(crate) fn open(mame: Option<PathBuf>, quiet: bool) -> Self {
        let settings = load_settings();
        let executable = settings.resolve_executable(mame);
        log::debug!("Using MAME at {}", executable.display());
        Self {
            invoker: MameInvoker::new(executable),
            settings,
            quiet,
        }
    }

    /// Catalog options from the settings, with CLI overrides applied.
    pub(crate) fn catalog_options(&self, args: &CatalogArgs) -> CatalogOptions {
        let mut catalog = self.settings.catalog.clone();
        if let Some(n) = args.verify_batch_size {
            catalog.verify_batch_size = n;
        }
        if let Some(n) = args.detail_batch_size {
            catalog.detail_batch_size = n;
        }
        if args.include_imperfect {
            catalog.include_imperfect = true;
        }
        catalog.options()
    }

    /// Categories from `path`, or from `catalog.category_file` when not given.
    /// Empty when neither is set.
    pub(crate) fn categories(&self, path: Option<&Path>) -> Result<CatverIndex, CliError> {
        match path.or(self.settings.catalog.category_file.as_deref()) {
            Some(path) => Ok(CatverIndex::load(path)?),
            None => Ok(CatverIndex::default()),
        }
    }
}
