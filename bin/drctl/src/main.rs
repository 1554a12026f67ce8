//! ---
//! dr_section: "08-cli"
//! dr_subsection: "binary"
//! dr_type: "source"
//! dr_scope: "code"
//! dr_description: "Command line driver for the DR decision core."
//! dr_version: "v0.0.0-prealpha"
//! dr_owner: "tbd"
//! ---
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use dr_common::{init_tracing, DrConfig, LoadedDrConfig};
use dr_models::{DrActionType, ModelError, ResourceSnapshot};
use serde::Serialize;
use tracing::debug;

mod apps;
mod progress;
mod target;

const DEFAULT_CONFIG_CANDIDATES: [&str; 2] = ["drctl.toml", "/etc/dr/drctl.toml"];

#[derive(Debug, Parser)]
#[command(
    author,
    disable_version_flag = true,
    about = "Evaluate DR failover and relocate decisions against resource snapshots",
    long_about = None
)]
struct Cli {
    #[arg(
        short = 'V',
        long = "version",
        action = ArgAction::SetTrue,
        help = "Print version information and exit"
    )]
    version: bool,
    /// Configuration file (defaults to ./drctl.toml, then /etc/dr/drctl.toml).
    #[arg(long, value_name = "FILE", global = true, env = "DR_CONFIG")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate a target cluster for a failover or relocate.
    Target(target::TargetCommand),
    /// Render the progression of an in-flight action.
    Progress(progress::ProgressCommand),
    /// Show the DR protection of an application.
    Apps(apps::AppsCommand),
}

fn load_config(explicit: Option<&Path>) -> Result<DrConfig> {
    let loaded = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(anyhow!("config file {} does not exist", path.display()));
            }
            LoadedDrConfig {
                config: DrConfig::from_path(path)?,
                source: Some(path.to_path_buf()),
            }
        }
        None => DrConfig::load_with_source(&DEFAULT_CONFIG_CANDIDATES)?,
    };
    if let Some(source) = &loaded.source {
        debug!(config = %source.display(), "configuration loaded");
    }
    Ok(loaded.config)
}

/// Read a snapshot bundle, attaching the path to any failure.
pub(crate) fn load_snapshot(path: &Path) -> Result<ResourceSnapshot> {
    ResourceSnapshot::from_path(path)
        .with_context(|| format!("unable to load snapshot {}", path.display()))
}

pub(crate) fn parse_action(raw: &str) -> std::result::Result<DrActionType, ModelError> {
    raw.parse()
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render output")?;
    println!("{rendered}");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.version {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = load_config(cli.config.as_deref())?;
    init_tracing("drctl", &config.logging)?;

    match command {
        Commands::Target(cmd) => target::run(cmd, &config)?,
        Commands::Progress(cmd) => progress::run(cmd, &config)?,
        Commands::Apps(cmd) => apps::run(cmd, &config)?,
    }
    Ok(())
}
