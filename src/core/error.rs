//! Error types for pipeline execution

use crate::core::Backend;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving or running a pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("The value provided {value} is not a supported backend. The backends are {valid:?}")]
    UnsupportedBackend {
        value: String,
        valid: Vec<&'static str>,
    },

    #[error("{0} is not currently accepted as a backend")]
    BackendNotImplemented(Backend),

    #[error(
        "The number of process nodes and storage nodes need to be the same. \
         The process nodes are {process:?} and the storage nodes are {storage:?}"
    )]
    PairingMismatch {
        storage: Vec<String>,
        process: Vec<String>,
    },

    #[error("Failed to open run log {}: {source}", path.display())]
    RunLog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Compute session unavailable: {0}")]
    Session(anyhow::Error),

    /// Error raised by a storage or process node, passed through untouched
    #[error(transparent)]
    Node(#[from] anyhow::Error),
}

/// Result alias for manager operations
pub type Result<T> = std::result::Result<T, PipelineError>;
