use crate::core::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rsal
/// Card-tap attendance terminal for a shared study hall
#[derive(Parser)]
#[command(
    name = "rsal",
    version = env!("CARGO_PKG_VERSION"),
    about = "Card-tap attendance terminal: daily attendance, streaks and statistics",
    long_about = None
)]
pub struct Cli {
    /// Override the data directory (useful for tests or a second room)
    #[arg(global = true, long = "data-dir")]
    pub data_dir: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Without a subcommand the interactive session starts
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive card-reader session (default)
    Session,

    /// Initialize the configuration, data directories and internal log
    Init,

    /// Rebuild all attendance tables from the raw event log
    Recover,

    /// Show statistics for one card
    Stats {
        /// Card identifier (10 digits)
        identifier: String,
    },

    /// List known cards and their usernames
    Users,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Print the internal operation log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Export attendance records
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        /// Export a single card instead of everyone
        #[arg(long = "id", value_name = "IDENTIFIER")]
        id: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Create a zip backup of the data directory
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
