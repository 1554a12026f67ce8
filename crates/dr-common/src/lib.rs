//! ---
//! dr_section: "01-core-functionality"
//! dr_subsection: "module"
//! dr_type: "source"
//! dr_scope: "code"
//! dr_description: "Shared primitives and utilities for the decision core."
//! dr_version: "v0.0.0-prealpha"
//! dr_owner: "tbd"
//! ---
//! Shared primitives for the DR decision workspace.
//! This crate exposes configuration loading and tracing bootstrap
//! consumed by the CLI and the integration suites.

pub mod config;
pub mod logging;

pub use config::{
    DrConfig, LoadedDrConfig, LoggingConfig, SchedulerConfig, ValidationConfig,
    MAX_VOLUME_SYNC_DELAY_FACTOR,
};
pub use logging::{init_tracing, LogFormat};
