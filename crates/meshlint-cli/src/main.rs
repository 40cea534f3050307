//! meshlint CLI tool.
//!
//! Usage:
//! ```bash
//! meshlint scan [OPTIONS]
//! meshlint profile export <FILE>
//! meshlint profile import <FILE>
//! meshlint list-rules
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod progress;

/// Content-validation rule engine for 3D mesh asset descriptors
#[derive(Parser)]
#[command(name = "meshlint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress the progress bar
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Content root containing asset descriptors
    #[arg(short, long, global = true, default_value = ".")]
    root: PathBuf,

    /// Path to the settings file (meshlint.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan assets and report findings
    Scan {
        /// Limit the scan to these folders (relative to the content root)
        #[arg(long)]
        folders: Vec<String>,

        /// Scan exactly these asset descriptor files
        #[arg(long)]
        assets: Vec<PathBuf>,

        /// Scan the assets referenced by a level file
        #[arg(long)]
        level: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Use a specific profile JSON document for this scan
        #[arg(long)]
        profile: Option<PathBuf>,

        /// Apply attached fix actions after the scan
        #[arg(long)]
        fix: bool,
    },

    /// Export or import profile documents
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },

    /// List available rules
    ListRules,
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// Export the active profile to a JSON file
    Export {
        /// Destination file
        file: PathBuf,
    },
    /// Validate a profile JSON file and record it as the active profile
    Import {
        /// Profile document to import
        file: PathBuf,

        /// Only validate; do not record it in the settings file
        #[arg(long)]
        check_only: bool,
    },
}

/// Output format for scan reports.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-finding compact format.
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Scan {
            folders,
            assets,
            level,
            format,
            profile,
            fix,
        } => commands::scan::run(commands::scan::ScanArgs {
            root: cli.root,
            config: cli.config,
            folders,
            assets,
            level,
            format,
            profile,
            fix,
            quiet: cli.quiet,
        }),
        Commands::Profile { command } => match command {
            ProfileCommands::Export { file } => {
                commands::profile_cmd::export(cli.config.as_deref(), &file)
            }
            ProfileCommands::Import { file, check_only } => {
                commands::profile_cmd::import(cli.config.as_deref(), &file, check_only)
            }
        },
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(())
        }
    }
}
