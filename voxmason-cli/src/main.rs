//! voxmason CLI - Command-line interface
//!
//! This binary drives the voxmason library: it builds shapes through the
//! batch engine and manages the configuration file.

mod commands;
mod error;
mod runner;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::build::BuildArgs;
use commands::config::ConfigCommands;
use error::CliError;
use runner::CliRunner;

#[derive(Debug, Parser)]
#[command(name = "voxmason")]
#[command(version = voxmason::VERSION)]
#[command(about = "Batched shape building for voxel grids", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ~/.voxmason/config.ini)
    #[arg(long = "config", value_name = "PATH", global = true)]
    config_path: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Build a shape and report the placement result
    Build(BuildArgs),

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = dispatch(cli).await {
        e.exit();
    }
}

async fn dispatch(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Build(args) => {
            let runner = CliRunner::new(cli.config_path.as_deref(), cli.verbose)?;
            runner.log_startup("build");
            commands::build::run(args, runner.config()).await
        }
        Commands::Config { action } => commands::config::run(action, cli.config_path.as_deref()),
    }
}
