//! Execution-time logging around node calls

use std::time::Instant;
use tracing::info;

/// Run `f`, logging when it starts and how long it took
///
/// `node` is the node's type name and `operation` the method being called.
pub fn log_execution<T, F>(node: &str, operation: &str, f: F) -> T
where
    F: FnOnce() -> T,
{
    info!("Running {} - {}", node, operation);
    let start = Instant::now();
    let result = f();
    info!(
        "The execution of {} - {} took {:.2} seconds",
        node,
        operation,
        start.elapsed().as_secs_f64()
    );
    result
}
