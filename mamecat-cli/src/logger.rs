//! Console logger for the CLI.
//!
//! Normal output goes through `log::info!` so `--quiet` can silence it and
//! `--logfile` can capture it. Info and below print to stdout, warnings and
//! errors to stderr.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

struct CliLogger {
    level: LevelFilter,
    verbose: bool,
    file: Option<Mutex<File>>,
}

impl CliLogger {
    fn format(&self, record: &Record<'_>) -> String {
        let message = record.args().to_string();
        if self.verbose {
            return format!(
                "{} {:<5} [{}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            );
        }
        match record.level() {
            Level::Error => format!(
                "{} {}",
                "error:".if_supports_color(Stderr, |t| t.red()),
                message
            ),
            Level::Warn => format!(
                "{} {}",
                "warning:".if_supports_color(Stderr, |t| t.yellow()),
                message
            ),
            _ => message,
        }
    }
}

impl Log for CliLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = self.format(record);

        if record.level() <= Level::Warn {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }

        if let Some(file) = &self.file {
            if let Ok(mut file) = file.lock() {
                let _ = writeln!(file, "{}", strip_ansi_escapes::strip_str(&line));
            }
        }
    }

    fn flush(&self) {
        if let Some(file) = &self.file {
            if let Ok(mut file) = file.lock() {
                let _ = file.flush();
            }
        }
    }
}

/// Install the logger. `quiet` wins over `verbose`.
pub(crate) fn init(quiet: bool, verbose: bool, logfile: Option<&Path>) -> std::io::Result<()> {
    let level = if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let file = logfile.map(File::create).transpose()?.map(Mutex::new);

    let logger = CliLogger {
        level,
        verbose: verbose && !quiet,
        file,
    };
    log::set_boxed_logger(Box::new(logger)).map_err(std::io::Error::other)?;
    log::set_max_level(level);
    Ok(())
}
