//! Events emitted while a pipeline runs

use crate::core::{Backend, RunId};
use std::sync::Arc;
use std::time::Duration;

/// Events that can occur during pipeline execution
#[derive(Debug, Clone)]
pub enum ExecutionEvent {
    RunStarted {
        run_id: RunId,
        backend: Backend,
        total_pairs: usize,
    },
    PairStarted {
        index: usize,
        storage_node: String,
        process_node: String,
    },
    PairCompleted {
        index: usize,
        elapsed: Duration,
    },
    RunCompleted {
        run_id: RunId,
        pairs_executed: usize,
    },
    RunFailed {
        run_id: RunId,
        error: String,
    },
}

/// Type for event handlers
pub type EventHandler = Arc<dyn Fn(&ExecutionEvent) + Send + Sync>;
