//! Test utility functions for ml-pipeline
//!
//! Recording nodes log every call into a thread-local journal. The manager
//! runs synchronously on the calling thread, so each test sees only its own
//! calls.

#![allow(dead_code)]

use anyhow::{anyhow, Result};
use ml_pipeline::core::InitParams;
use ml_pipeline::session::{RunInfo, RunTracker};
use ml_pipeline::{NodesManager, ProcessNode, RunId, StorageNode};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

thread_local! {
    static CALLS: RefCell<Vec<String>> = RefCell::new(Vec::new());
}

/// Record a call in this thread's journal
pub fn record(call: impl Into<String>) {
    CALLS.with(|calls| calls.borrow_mut().push(call.into()));
}

/// Take and clear this thread's journal
pub fn take_calls() -> Vec<String> {
    CALLS.with(|calls| std::mem::take(&mut *calls.borrow_mut()))
}

/// Storage node `S<ID>`: loads `"x<ID>"`, records what it saves
pub struct RecordingStorage<const ID: usize> {
    arity: usize,
}

impl<const ID: usize> StorageNode for RecordingStorage<ID> {
    fn from_params(params: &InitParams) -> Result<Self> {
        record(format!("S{}::new(arity={})", ID, params.arity()));
        Ok(Self {
            arity: params.arity(),
        })
    }

    fn load_source(&self) -> Result<Vec<Value>> {
        record(format!("S{}.load_source", ID));
        Ok(vec![json!(format!("x{}", ID))])
    }

    fn save_checkpoint(&self, outputs: Vec<Value>) -> Result<()> {
        record(format!("S{}.save_checkpoint({})", ID, Value::Array(outputs)));
        Ok(())
    }

    fn load_checkpoint(&self) -> Result<Vec<Value>> {
        record(format!("S{}.load_checkpoint", ID));
        Ok(vec![json!(self.arity)])
    }
}

/// Storage node whose source cannot be read
pub struct UnreadableStorage;

impl StorageNode for UnreadableStorage {
    fn from_params(_params: &InitParams) -> Result<Self> {
        record("Unreadable::new");
        Ok(Self)
    }

    fn load_source(&self) -> Result<Vec<Value>> {
        record("Unreadable.load_source");
        Err(anyhow!("source missing"))
    }

    fn save_checkpoint(&self, _outputs: Vec<Value>) -> Result<()> {
        record("Unreadable.save_checkpoint");
        Ok(())
    }

    fn load_checkpoint(&self) -> Result<Vec<Value>> {
        Ok(vec![])
    }
}

/// Process node `P<ID>`: maps each input `v` to `"P<ID>(v)"`
#[derive(Default)]
pub struct RecordingProcess<const ID: usize>;

impl<const ID: usize> ProcessNode for RecordingProcess<ID> {
    fn process(&self, inputs: Vec<Value>) -> Result<Vec<Value>> {
        record(format!("P{}.process({})", ID, Value::Array(inputs.clone())));
        Ok(inputs
            .into_iter()
            .map(|v| json!(format!("P{}({})", ID, v.as_str().unwrap_or_default())))
            .collect())
    }
}

/// Process node that always fails
#[derive(Default)]
pub struct FailingProcess;

impl ProcessNode for FailingProcess {
    fn process(&self, _inputs: Vec<Value>) -> Result<Vec<Value>> {
        record("Failing.process");
        Err(anyhow!("process exploded"))
    }
}

/// Run tracker counting how often runs are opened and closed
#[derive(Clone, Default)]
pub struct CountingTracker {
    pub started: Arc<AtomicUsize>,
    pub ended: Arc<AtomicUsize>,
}

impl CountingTracker {
    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    pub fn ended(&self) -> usize {
        self.ended.load(Ordering::SeqCst)
    }
}

impl RunTracker for CountingTracker {
    fn start_run(&self) -> Result<RunInfo> {
        self.started.fetch_add(1, Ordering::SeqCst);
        Ok(RunInfo {
            run_id: RunId::from("tracked-run"),
            started_at: chrono::Utc::now(),
        })
    }

    fn end_run(&self, _run: &RunInfo) {
        self.ended.fetch_add(1, Ordering::SeqCst);
    }
}

/// Run tracker that cannot reach its server
#[derive(Clone, Default)]
pub struct UnavailableTracker {
    pub ended: Arc<AtomicUsize>,
}

impl UnavailableTracker {
    pub fn ended(&self) -> usize {
        self.ended.load(Ordering::SeqCst)
    }
}

impl RunTracker for UnavailableTracker {
    fn start_run(&self) -> Result<RunInfo> {
        Err(anyhow!("tracking server unreachable"))
    }

    fn end_run(&self, _run: &RunInfo) {
        self.ended.fetch_add(1, Ordering::SeqCst);
    }
}

/// Manager writing its journals into a fresh temporary directory
pub fn manager_in_tempdir() -> (NodesManager, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let manager = NodesManager::new().with_logs_dir(dir.path().join("logs").join("journals"));
    (manager, dir)
}

/// Assert `run_id` is a 32 character lowercase hex token
pub fn assert_hex_run_id(run_id: &RunId) {
    let id = run_id.as_str();
    assert_eq!(id.len(), 32, "Run id '{}' should have 32 characters", id);
    assert!(
        id.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)),
        "Run id '{}' should be lowercase hex",
        id
    );
}
