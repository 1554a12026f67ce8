//! ---
//! dr_section: "01-core-functionality"
//! dr_subsection: "module"
//! dr_type: "source"
//! dr_scope: "code"
//! dr_description: "Shared primitives and utilities for the decision core."
//! dr_version: "v0.0.0-prealpha"
//! dr_owner: "tbd"
//! ---
//! Kept in its own binary: it mutates `DR_CONFIG` for the whole process.
use std::fs;

use dr_common::config::DrConfig;
use tempfile::tempdir;

#[test]
fn env_override_and_explicit_path_precedence() {
    let dir = tempdir().expect("temp dir");
    let explicit = dir.path().join("explicit.toml");
    let from_env = dir.path().join("from-env.toml");
    fs::write(&explicit, "[scheduler]\nname = \"from-flag\"\n").expect("write explicit");
    fs::write(&from_env, "[scheduler]\nname = \"from-env\"\n").expect("write env config");

    std::env::set_var(DrConfig::ENV_CONFIG_PATH, &from_env);

    let walked = DrConfig::load_with_source(&[explicit.clone()]).expect("candidate walk");
    assert_eq!(walked.config.scheduler.name, "from-env");
    assert_eq!(walked.source.as_deref(), Some(from_env.as_path()));

    let direct = DrConfig::from_path(&explicit).expect("explicit file");
    assert_eq!(direct.scheduler.name, "from-flag");

    std::env::remove_var(DrConfig::ENV_CONFIG_PATH);
}
