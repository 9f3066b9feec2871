//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mamecat")]
#[command(about = "Build a catalog of playable MAME machines", long_about = None)]
pub(crate) struct Cli {
    /// MAME executable (overrides MAMECAT_EXECUTABLE and settings.toml)
    #[arg(short, long, global = true)]
    pub mame: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Overrides for the `[catalog]` settings.
#[derive(Args, Clone, Default)]
pub(crate) struct CatalogArgs {
    /// ROM sets per -verifyroms invocation
    #[arg(long)]
    pub verify_batch_size: Option<usize>,

    /// ROM sets per -listxml invocation
    #[arg(long)]
    pub detail_batch_size: Option<usize>,

    /// Also accept machines whose driver status is "imperfect"
    #[arg(long)]
    pub include_imperfect: bool,

    /// catver.ini file to take categories from
    #[arg(long)]
    pub categories: Option<PathBuf>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Verify all ROM sets and build the catalog
    Build {
        #[command(flatten)]
        catalog: CatalogArgs,

        /// Where to write the catalog (defaults to catalog.json in the config directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Verify ROM sets without building a catalog
    Verify {
        /// ROM set names (defaults to every archive in MAME's ROM paths)
        names: Vec<String>,

        /// ROM sets per -verifyroms invocation
        #[arg(long)]
        batch_size: Option<usize>,
    },

    /// Show the catalog entry for one machine, whatever its driver status
    Lookup {
        /// Machine name (e.g., pacman)
        name: String,

        /// catver.ini file to take categories from
        #[arg(long)]
        categories: Option<PathBuf>,
    },

    /// List a saved catalog
    List {
        /// Catalog file (defaults to catalog.json in the config directory)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Only machines in this category (case-insensitive)
        #[arg(long)]
        category: Option<String>,

        /// Only machines with a horizontal screen
        #[arg(long, conflicts_with = "vertical")]
        horizontal: bool,

        /// Only machines with a vertical screen
        #[arg(long)]
        vertical: bool,
    },

    /// Show the ROM and artwork directories MAME is configured with
    Paths,

    /// Play machines one after another, each for a fixed time
    Play {
        /// Machine names
        #[arg(required = true)]
        names: Vec<String>,

        /// Minutes per machine (defaults to mame.minutes_per_game)
        #[arg(long)]
        minutes: Option<u64>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the effective settings
    Show,

    /// Write a settings file with default values if none exists
    Init,

    /// Print the settings file path
    Path,
}
