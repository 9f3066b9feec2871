//! mamecat CLI
//!
//! Command-line interface for building and browsing a catalog of playable
//! MAME machines.

mod cli_types;
mod commands;
mod error;
mod logger;

use clap::Parser;

use cli_types::{Cli, Commands, ConfigAction};
use commands::Session;
use commands::list::Orientation;
use error::CliError;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = logger::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("Unable to set up logging: {e}");
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        log::error!("{e}");
        if matches!(&e, CliError::Catalog(inner) if inner.is_launch_failure()) {
            log::info!(
                "Set the MAME executable with --mame, the {} variable or mame.executable_path in settings.toml",
                mamecat_lib::settings::EXECUTABLE_ENV_VAR
            );
        }
        log::logger().flush();
        std::process::exit(1);
    }
    log::logger().flush();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let open = || Session::open(cli.mame.clone(), cli.quiet);

    match cli.command {
        Commands::Build { catalog, output } => commands::build::run_build(&open(), catalog, output),
        Commands::Verify { names, batch_size } => {
            commands::verify::run_verify(&open(), names, batch_size)
        }
        Commands::Lookup { name, categories } => {
            commands::lookup::run_lookup(&open(), &name, categories)
        }
        Commands::List {
            catalog,
            category,
            horizontal,
            vertical,
        } => commands::list::run_list(
            catalog,
            category,
            Orientation::from_flags(horizontal, vertical),
        ),
        Commands::Paths => commands::paths::run_paths(&open()),
        Commands::Play { names, minutes } => commands::play::run_play(&open(), &names, minutes),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(),
            ConfigAction::Init => commands::config::run_config_init(),
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
        },
    }
}
