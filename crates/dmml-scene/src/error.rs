//! Scene-specific error types.

use dmml_core::{DmmlError, NodeId};

use crate::layout_id::LayoutId;

/// Scene lookup and structure errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// No node with this ID is present in the scene.
    NodeNotFound { node: NodeId },

    /// The node exists but is not of the requested kind.
    WrongNodeKind {
        node: NodeId,
        expected: &'static str,
        actual: String,
    },

    /// No factory is registered for a class name.
    UnknownClass { class: String },
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneError::NodeNotFound { node } => {
                write!(f, "Node {} is not in the scene", node)
            }
            SceneError::WrongNodeKind {
                node,
                expected,
                actual,
            } => {
                write!(f, "Node {} is a {} (expected {})", node, actual, expected)
            }
            SceneError::UnknownClass { class } => {
                write!(f, "No node class registered as '{}'", class)
            }
        }
    }
}

impl std::error::Error for SceneError {}

impl From<SceneError> for DmmlError {
    fn from(err: SceneError) -> Self {
        match err {
            SceneError::NodeNotFound { .. } => DmmlError::NodeNotFound {
                what: err.to_string(),
            },
            _ => DmmlError::Invariant {
                what: err.to_string(),
            },
        }
    }
}

/// Failure to turn a layout description string into a tree.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutParseError {
    #[error("Malformed layout XML: {0}")]
    Xml(String),

    #[error("Layout description root must be <layout>, found <{name}>")]
    UnexpectedRoot { name: String },
}

impl From<roxmltree::Error> for LayoutParseError {
    fn from(err: roxmltree::Error) -> Self {
        LayoutParseError::Xml(err.to_string())
    }
}

/// Registry operations rejected by the layout node.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutNodeError {
    #[error("Layout {0} already has a description")]
    DuplicateLayout(LayoutId),

    #[error("Layout {0} has no description")]
    UnknownLayout(LayoutId),
}

impl From<LayoutParseError> for DmmlError {
    fn from(err: LayoutParseError) -> Self {
        DmmlError::Layout {
            what: err.to_string(),
        }
    }
}

impl From<LayoutNodeError> for DmmlError {
    fn from(err: LayoutNodeError) -> Self {
        DmmlError::Layout {
            what: err.to_string(),
        }
    }
}
