//! Error types for the layout engine.

use std::path::PathBuf;

use dmml_core::{DmmlError, NodeId};
use dmml_scene::{LayoutId, LayoutNodeError, LayoutParseError, SceneError};

/// Errors surfaced by the layout logic and its helpers.
///
/// Reconciliation never fails as a whole; per-element problems are logged
/// and the element is skipped. These values report why.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("View element has no class attribute")]
    MissingClass,

    #[error("No node class registered as '{class}'")]
    UnknownClass { class: String },

    #[error("Class '{class}' does not create view nodes")]
    NotAView { class: String },

    #[error("Layout logic is not attached to a scene")]
    Unattached,

    #[error("View node {node} has no singleton tag and cannot be maximized")]
    UntaggedView { node: NodeId },

    #[error("Invalid layout description: {0}")]
    Parse(#[from] LayoutParseError),

    #[error("Layout registry error: {0}")]
    Registry(#[from] LayoutNodeError),

    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type LayoutResult<T> = Result<T, LayoutError>;

impl From<LayoutError> for DmmlError {
    fn from(err: LayoutError) -> Self {
        match err {
            LayoutError::Scene(scene) => scene.into(),
            LayoutError::Config(config) => config.into(),
            other => DmmlError::Layout {
                what: other.to_string(),
            },
        }
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {path}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write config file: {path}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate layout id {id}")]
    DuplicateId { id: LayoutId },

    #[error("Layout {id} ({name}) does not parse: {source}")]
    InvalidDescription {
        id: LayoutId,
        name: String,
        source: LayoutParseError,
    },

    #[error("Layout {id} replaces built-in '{builtin}' without `replace: true`")]
    BuiltinCollision { id: LayoutId, builtin: &'static str },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

impl From<ConfigError> for DmmlError {
    fn from(err: ConfigError) -> Self {
        DmmlError::InvalidArg {
            what: err.to_string(),
        }
    }
}
