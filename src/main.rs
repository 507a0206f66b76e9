// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Bicycles CLI - your garage and your wishlist

use anyhow::Result;
use bicycles::commands::{self, bike::BikeCommand, export::ExportFormat, wish::WishCommand, Output};
use bicycles::config;
use clap::{CommandFactory, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bicycles")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file path
    #[arg(short, long, env = "BICYCLES_CONFIG", global = true)]
    config: Option<std::path::PathBuf>,

    /// Data directory override
    #[arg(long, env = "BICYCLES_DATA_DIR", global = true)]
    data_dir: Option<std::path::PathBuf>,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR", global = true)]
    no_color: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the bicycles in your garage
    #[command(subcommand)]
    Bike(BikeCommand),

    /// Manage your wishlist
    #[command(subcommand)]
    Wish(WishCommand),

    /// Export every collection
    Export {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },

    /// Show configuration
    Config {
        /// Configuration key (omit to show all)
        key: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = config::load(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        settings.data_dir = dir;
    }
    if cli.no_color {
        settings.color = false;
    }

    // Initialize logging
    let log_level = match cli.verbose {
        0 if cli.quiet => tracing::Level::ERROR,
        0 => settings.tracing_level().unwrap_or(tracing::Level::INFO),
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let out = Output {
        json: cli.json,
        color: settings.color,
    };

    // Execute command
    match cli.command {
        Commands::Bike(command) => commands::bike::run(command, &settings, out),
        Commands::Wish(command) => commands::wish::run(command, &settings, out),
        Commands::Export { format, output } => commands::export::run(format, output, &settings),
        Commands::Config { key } => commands::config::run(key.as_deref(), &settings),
        Commands::Completions { shell } => commands::completions::run(shell, &mut Cli::command()),
    }
}
