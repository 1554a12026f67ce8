//! ---
//! dr_section: "02-resource-models"
//! dr_subsection: "module"
//! dr_type: "source"
//! dr_scope: "code"
//! dr_description: "Custom-resource snapshot models consumed by the decision core."
//! dr_version: "v0.0.0-prealpha"
//! dr_owner: "tbd"
//! ---
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ModelError>;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unable to read snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("json deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("yaml deserialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unsupported snapshot format for {0}; expected .json, .yaml or .yml")]
    UnsupportedFormat(PathBuf),
    #[error("unknown DR action: {0}")]
    UnknownAction(String),
}
