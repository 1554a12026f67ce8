//! ---
//! dr_section: "01-core-functionality"
//! dr_subsection: "module"
//! dr_type: "source"
//! dr_scope: "code"
//! dr_description: "Shared primitives and utilities for the decision core."
//! dr_version: "v0.0.0-prealpha"
//! dr_owner: "tbd"
//! ---
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationSeconds};
use tracing::debug;

use crate::logging::LogFormat;

/// Upper bound on `validation.volume_sync_delay_factor`.
pub const MAX_VOLUME_SYNC_DELAY_FACTOR: u32 = 1_000;

fn default_scheduler_name() -> String {
    "ramen".to_owned()
}

fn default_volume_sync_delay_factor() -> u32 {
    3
}

fn default_volume_sync_grace() -> Duration {
    Duration::from_secs(0)
}

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

fn default_log_filter() -> String {
    "info".to_owned()
}

/// Primary configuration object for the decision core.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DrConfig {
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Metadata describing where a [`DrConfig`] was loaded from.
#[derive(Debug, Clone)]
pub struct LoadedDrConfig {
    pub config: DrConfig,
    pub source: Option<PathBuf>,
}

impl DrConfig {
    pub const ENV_CONFIG_PATH: &'static str = "DR_CONFIG";

    /// Load configuration from disk, respecting the `DR_CONFIG` override.
    ///
    /// Unlike a daemon, the decision core is usable without any file: when
    /// no candidate exists the defaults are returned.
    pub fn load<P: AsRef<Path>>(candidates: &[P]) -> Result<Self> {
        Ok(Self::load_with_source(candidates)?.config)
    }

    /// Load configuration together with the effective source path.
    pub fn load_with_source<P: AsRef<Path>>(candidates: &[P]) -> Result<LoadedDrConfig> {
        if let Ok(env_path) = std::env::var(Self::ENV_CONFIG_PATH) {
            if !env_path.trim().is_empty() {
                let path = PathBuf::from(env_path);
                let config = Self::from_path(&path)?;
                return Ok(LoadedDrConfig {
                    config,
                    source: Some(path),
                });
            }
        }

        for candidate in candidates {
            if candidate.as_ref().exists() {
                let path = candidate.as_ref().to_path_buf();
                let config = Self::from_path(&path)?;
                return Ok(LoadedDrConfig {
                    config,
                    source: Some(path),
                });
            }
        }

        debug!(
            inspected = candidates.len(),
            "no configuration file found; using defaults"
        );
        Ok(LoadedDrConfig {
            config: DrConfig::default(),
            source: None,
        })
    }

    /// Load one explicit file, bypassing `DR_CONFIG` and the candidate walk.
    pub fn from_path(path: &Path) -> Result<Self> {
        debug!(config_path = %path.display(), "loading configuration");
        let contents = fs::read_to_string(path)
            .with_context(|| format!("unable to read config file {}", path.display()))?;
        let config = toml::from_str::<DrConfig>(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate structural invariants.
    pub fn validate(&self) -> Result<()> {
        if self.scheduler.name.trim().is_empty() {
            return Err(anyhow!("scheduler name must not be empty"));
        }
        let factor = self.validation.volume_sync_delay_factor;
        if !(1..=MAX_VOLUME_SYNC_DELAY_FACTOR).contains(&factor) {
            return Err(anyhow!(
                "validation.volume_sync_delay_factor must be between 1 and {MAX_VOLUME_SYNC_DELAY_FACTOR}, got {factor}"
            ));
        }
        Ok(())
    }
}

impl std::str::FromStr for DrConfig {
    type Err = anyhow::Error;

    fn from_str(content: &str) -> std::result::Result<Self, Self::Err> {
        let config: DrConfig =
            toml::from_str(content).with_context(|| "failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }
}

/// Placement scheduling settings used to recognise DR-managed placements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    #[serde(default = "default_scheduler_name")]
    pub name: String,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            name: default_scheduler_name(),
        }
    }
}

#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Surface advisory messages next to blocking ones.
    #[serde(default)]
    pub include_warnings: bool,
    /// Multiple of the policy scheduling interval after which a sync is late.
    #[serde(default = "default_volume_sync_delay_factor")]
    pub volume_sync_delay_factor: u32,
    #[serde(default = "default_volume_sync_grace")]
    #[serde_as(as = "DurationSeconds<u64>")]
    pub volume_sync_grace: Duration,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            include_warnings: false,
            volume_sync_delay_factor: default_volume_sync_delay_factor(),
            volume_sync_grace: default_volume_sync_grace(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Optional directory receiving a daily rolling JSON log.
    #[serde(default)]
    pub directory: Option<PathBuf>,
    #[serde(default)]
    pub file_prefix: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: default_log_format(),
            filter: default_log_filter(),
            directory: None,
            file_prefix: None,
        }
    }
}
