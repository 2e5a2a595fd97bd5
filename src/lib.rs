//! rTimeclock library root.
//! Exposes the CLI parser, the high-level run() function, and the time
//! accounting core (session state machine and record store).

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod models;
pub mod store;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use utils::{logging, path::log_dir_for};

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli, cfg),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Status { .. } => cli::commands::status::handle(&cli.command, cfg),
        Commands::In | Commands::Out { .. } | Commands::Break | Commands::Resume => {
            cli::commands::clock::handle(&cli.command, cfg)
        }
        Commands::Goal { .. } => cli::commands::goal::handle(&cli.command, cfg),
        Commands::Week { .. } => cli::commands::week::handle(&cli.command, cfg),
        Commands::List { .. } => cli::commands::list::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load()?;

    if let Some(custom_store) = &cli.store {
        cfg.store = custom_store.clone();
    }

    // logging problems never block the command itself
    if let Err(e) = logging::enable_logging(
        &log_dir_for(&cfg.store_path()),
        cfg.log_level.as_deref().and_then(|l| l.parse().ok()),
    ) {
        eprintln!("⚠️  Logging disabled: {}", e);
    }

    let result = dispatch(&cli, &cfg);
    if let Err(e) = &result {
        if e.is_rejection() {
            tracing::warn!(error = %e, "command rejected");
        } else {
            tracing::error!(error = %e, "command failed");
        }
    }
    result
}
