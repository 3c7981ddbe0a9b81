//! ml-pipeline - scaffold for small ML data pipelines
//!
//! A pipeline pairs storage nodes with process nodes. The [`NodesManager`]
//! builds each pair for the selected backend and runs it: load the source,
//! process it, save the checkpoint.

pub mod cli;
pub mod core;
pub mod execution;
pub mod logging;
pub mod nodes;
pub mod session;
pub mod tools;

// Re-export commonly used types
pub use core::{Backend, InitParams, Pipeline, PipelineError, RunId};
pub use execution::{ExecutionEvent, NodesManager, RunOptions, RunReport};
pub use nodes::{ProcessNode, ProcessNodeType, StorageNode, StorageNodeType};
pub use session::{RunTracker, SessionHandle, SessionProvider};
