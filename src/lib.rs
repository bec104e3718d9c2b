//! rsal library root.
//! Exposes the CLI parser, the high-level run() function and the internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod store;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        None | Some(Commands::Session) => cli::commands::session::handle(cfg),
        Some(Commands::Init) => cli::commands::init::handle(cli, cfg),
        Some(Commands::Recover) => cli::commands::recover::handle(cfg),
        Some(cmd @ Commands::Stats { .. }) => cli::commands::stats::handle(cmd, cfg),
        Some(Commands::Users) => cli::commands::users::handle(cfg),
        Some(cmd @ Commands::Config { .. }) => cli::commands::config::handle(cmd, cfg),
        Some(cmd @ Commands::Log { .. }) => cli::commands::log::handle(cmd, cfg),
        Some(cmd @ Commands::Export { .. }) => cli::commands::export::handle(cmd, cfg),
        Some(cmd @ Commands::Backup { .. }) => cli::commands::backup::handle(cmd, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // config is loaded once and handed to every command
    let mut cfg = Config::load()?;

    if let Some(dir) = &cli.data_dir {
        cfg.use_data_dir(dir);
    }

    dispatch(&cli, &cfg)
}
