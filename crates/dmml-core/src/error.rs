use thiserror::Error;

pub type DmmlResult<T> = Result<T, DmmlError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DmmlError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    #[error("Node not found: {what}")]
    NodeNotFound { what: String },

    #[error("Layout error: {what}")]
    Layout { what: String },

    #[error("Invariant violated: {what}")]
    Invariant { what: String },
}
