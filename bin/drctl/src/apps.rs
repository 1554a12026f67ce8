//! ---
//! dr_section: "08-cli"
//! dr_subsection: "binary"
//! dr_type: "source"
//! dr_scope: "code"
//! dr_description: "Command line driver for the DR decision core."
//! dr_version: "v0.0.0-prealpha"
//! dr_owner: "tbd"
//! ---
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Args;
use dr_common::DrConfig;
use dr_logging::{dr_warn, LogContext};
use dr_matcher::{
    filter_dr_subscriptions_with_placements, get_app_dr_info_with_placements, ApplicationDrInfo,
    PlacementIndex,
};
use dr_models::ResourceSnapshot;

use crate::{load_snapshot, print_json};

#[derive(Debug, Args)]
pub struct AppsCommand {
    /// Resource snapshot (.yaml, .yml or .json).
    #[arg(long, value_name = "FILE")]
    snapshot: PathBuf,
    /// Application name.
    #[arg(long, value_name = "NAME")]
    application: String,
    /// Restrict the application lookup to a namespace.
    #[arg(long, value_name = "NAMESPACE")]
    namespace: Option<String>,
}

pub fn run(cmd: AppsCommand, config: &DrConfig) -> Result<()> {
    let snapshot = load_snapshot(&cmd.snapshot)?;
    let info = resolve(&snapshot, &cmd.application, cmd.namespace.as_deref(), config)?;
    if info.is_empty() {
        let ctx = LogContext::new().with_application(&cmd.application);
        dr_warn!(context = ctx, "application is not DR-protected");
    }
    print_json(&info)
}

fn resolve(
    snapshot: &ResourceSnapshot,
    name: &str,
    namespace: Option<&str>,
    config: &DrConfig,
) -> Result<Vec<ApplicationDrInfo>> {
    let application = snapshot
        .application(name, namespace)
        .ok_or_else(|| anyhow!("application {name} not found in snapshot"))?;
    let index = PlacementIndex {
        rules: &snapshot.placement_rules,
        placements: &snapshot.placements,
        decisions: &snapshot.placement_decisions,
    };
    let grouped = filter_dr_subscriptions_with_placements(
        application,
        &snapshot.subscriptions,
        index,
        &config.scheduler.name,
    );
    Ok(get_app_dr_info_with_placements(
        &snapshot.dr_placement_controls,
        &grouped,
        index,
    ))
}
