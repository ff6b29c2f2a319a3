use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use winknight::maintenance::StepKind;

mod cli;

#[derive(Parser)]
#[command(name = "winknight")]
#[command(about = "WinKnight - restore point, SFC, DISM and cache cleanup in one supervised run")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.winknight/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full scan: restore point, SFC, DISM, cache cleanup
    Scan {
        /// Print the run report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a manual System Restore point
    RestorePoint {
        /// Restore point description (defaults to the configured manual description)
        #[arg(short, long)]
        description: Option<String>,

        #[command(subcommand)]
        action: Option<RestorePointAction>,
    },

    /// Run the System File Checker only
    Sfc,

    /// Run the DISM component store repair only
    Dism,

    /// Clear temporary-file directories only
    Clean,

    /// Show the most recent activity log entries
    Log {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value_t = 20)]
        count: usize,

        /// Show the newest entry first
        #[arg(long)]
        newest_first: bool,
    },

    /// Write a default configuration file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum RestorePointAction {
    /// List existing restore points
    List,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let config_path = cli.config.as_deref();

    let succeeded = match cli.command {
        Some(Commands::Scan { json }) => cli::scan::scan_command(config_path, json).await?,
        Some(Commands::RestorePoint {
            action: Some(RestorePointAction::List),
            ..
        }) => cli::restore::list_restore_points_command(config_path).await?,
        Some(Commands::RestorePoint {
            description,
            action: None,
        }) => cli::restore::restore_point_command(config_path, description).await?,
        Some(Commands::Sfc) => cli::single::single_step_command(config_path, StepKind::FileIntegrity).await?,
        Some(Commands::Dism) => {
            cli::single::single_step_command(config_path, StepKind::ComponentStoreRepair).await?
        }
        Some(Commands::Clean) => cli::single::single_step_command(config_path, StepKind::CacheCleanup).await?,
        Some(Commands::Log {
            count,
            newest_first,
        }) => {
            cli::log::log_command(config_path, count, newest_first)?;
            true
        }
        Some(Commands::Init { force }) => {
            cli::init::init_command(config_path, force)?;
            true
        }
        None => {
            // Default: run the full scan
            cli::scan::scan_command(config_path, false).await?
        }
    };

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
