use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use mamecat_lib::settings::{
    EXECUTABLE_ENV_VAR, Settings, load_settings, save_settings, settings_path,
};

use crate::error::CliError;

/// Show the settings file location and the effective settings.
pub(crate) fn run_config_show() -> Result<(), CliError> {
    let path = settings_path();
    let settings = load_settings();

    log::info!(
        "{}",
        "mamecat Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");
    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found, using defaults)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    if let Some(value) = std::env::var_os(EXECUTABLE_ENV_VAR) {
        log::info!(
            "  {} overrides the executable: {}",
            EXECUTABLE_ENV_VAR,
            value.to_string_lossy()
        );
    }
    log::info!("");

    let text = toml::to_string_pretty(&settings)
        .map_err(|e| CliError::config(format!("Unable to format settings: {e}")))?;
    for line in text.lines() {
        log::info!("  {}", line);
    }
    Ok(())
}

/// Write a default settings file unless one already exists.
pub(crate) fn run_config_init() -> Result<(), CliError> {
    let path = settings_path();
    if path.exists() {
        log::warn!("Settings file already exists at {}", path.display());
        return Ok(());
    }
    save_settings(&Settings::default())?;
    log::info!(
        "Wrote default settings to {}",
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}

/// Print the config file path.
pub(crate) fn run_config_path() {
    log::info!("{}", settings_path().display());
}
