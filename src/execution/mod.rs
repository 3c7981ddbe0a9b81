//! Pipeline execution

pub mod events;
pub mod manager;

pub use events::{EventHandler, ExecutionEvent};
pub use manager::{NodesManager, RunOptions, RunReport};
