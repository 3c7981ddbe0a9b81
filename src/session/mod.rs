//! Distributed backend collaborators
//!
//! The databricks backend needs two things from its runtime: a compute
//! session handle passed to storage nodes, and a tracking run that scopes the
//! execution. Both sit behind traits so the manager never talks to the
//! runtime directly.

use crate::core::RunId;
use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use std::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

/// Application name used when the manager has to create a session itself
pub const DEFAULT_APP_NAME: &str = "pipeline_cli";

/// Handle on a distributed compute session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionHandle {
    app_name: String,
    id: Uuid,
}

impl SessionHandle {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            id: Uuid::new_v4(),
        }
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
}

/// Source of compute sessions
pub trait SessionProvider {
    /// Return the active session, creating one named `app_name` if none exists
    fn get_or_create(&self, app_name: &str) -> Result<SessionHandle>;
}

/// Session provider that creates one session and keeps handing it out
#[derive(Debug, Default)]
pub struct DefaultSessionProvider {
    active: Mutex<Option<SessionHandle>>,
}

impl DefaultSessionProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionProvider for DefaultSessionProvider {
    fn get_or_create(&self, app_name: &str) -> Result<SessionHandle> {
        let mut active = self
            .active
            .lock()
            .map_err(|_| anyhow!("session registry lock poisoned"))?;

        let session = active.get_or_insert_with(|| {
            info!("Creating compute session {}", app_name);
            SessionHandle::new(app_name)
        });
        Ok(session.clone())
    }
}

/// Metadata of an open tracking run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunInfo {
    pub run_id: RunId,
    pub started_at: DateTime<Utc>,
}

/// Experiment tracking service that scopes distributed runs
pub trait RunTracker {
    /// Open a tracking run
    fn start_run(&self) -> Result<RunInfo>;

    /// Close a run opened by [`RunTracker::start_run`]
    fn end_run(&self, run: &RunInfo);
}

/// Tracker that only records runs in the log
#[derive(Debug, Default)]
pub struct LocalRunTracker;

impl RunTracker for LocalRunTracker {
    fn start_run(&self) -> Result<RunInfo> {
        let run = RunInfo {
            run_id: RunId::generate(),
            started_at: Utc::now(),
        };
        info!("Started tracking run {}", run.run_id);
        Ok(run)
    }

    fn end_run(&self, run: &RunInfo) {
        let elapsed = Utc::now().signed_duration_since(run.started_at);
        info!(
            "Ended tracking run {} after {}ms",
            run.run_id,
            elapsed.num_milliseconds()
        );
    }
}

/// Open tracking run, closed when dropped
pub struct ActiveRun<'a> {
    tracker: &'a dyn RunTracker,
    info: RunInfo,
}

impl<'a> ActiveRun<'a> {
    /// Open a run on `tracker`
    pub fn start(tracker: &'a dyn RunTracker) -> Result<Self> {
        let info = tracker.start_run()?;
        Ok(Self { tracker, info })
    }

    pub fn info(&self) -> &RunInfo {
        &self.info
    }

    pub fn run_id(&self) -> &RunId {
        &self.info.run_id
    }
}

impl Drop for ActiveRun<'_> {
    fn drop(&mut self) {
        debug!("Closing tracking run {}", self.info.run_id);
        self.tracker.end_run(&self.info);
    }
}
