//! Error types for the bridge.
//!
//! Tool-level failures (`ValidationError`, `StoreError`) are caught per call
//! and turned into error payloads. `BridgeError` covers startup, where every
//! failure is fatal.

use thiserror::Error;

/// Malformed tool arguments
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("missing required argument '{0}'")]
    MissingArgument(&'static str),

    #[error("invalid argument '{argument}': {source}")]
    InvalidArgument {
        argument: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("'{field}' must not be blank in '{argument}' (item {index})")]
    BlankField {
        argument: &'static str,
        field: &'static str,
        index: usize,
    },
}

/// Failure talking to the graph store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] neo4rs::Error),

    #[error("unexpected record shape: {0}")]
    Decode(#[from] neo4rs::DeError),
}

/// Error raised by a single tool call
#[derive(Debug, Error)]
pub enum ToolError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to serialize result: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ToolError {
    /// Short machine-readable category used in error payloads
    pub fn kind(&self) -> &'static str {
        match self {
            ToolError::Validation(_) => "validation",
            ToolError::Store(_) => "store",
            ToolError::Serialization(_) => "serialization",
        }
    }
}

/// Fatal startup error
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("config error: {0}")]
    Config(String),

    #[error("logger error: {0}")]
    Logger(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
