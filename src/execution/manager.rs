//! Nodes manager - wires storage nodes to process nodes and runs them

use crate::{
    core::{
        error::{PipelineError, Result},
        Backend, InitParams, Pipeline, RunId,
    },
    execution::{EventHandler, ExecutionEvent},
    logging,
    nodes::{ProcessNodeType, StorageNodeType},
    session::{
        ActiveRun, DefaultSessionProvider, LocalRunTracker, RunTracker, SessionHandle,
        SessionProvider, DEFAULT_APP_NAME,
    },
    tools::{filesystem, timing::log_execution},
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Caller-supplied overrides for one run
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Existing compute session (databricks only)
    pub session: Option<SessionHandle>,

    /// Externally supplied run id (ignored by the local backend)
    pub run_id: Option<RunId>,
}

impl RunOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(mut self, session: SessionHandle) -> Self {
        self.session = Some(session);
        self
    }

    pub fn with_run_id(mut self, run_id: impl Into<RunId>) -> Self {
        self.run_id = Some(run_id.into());
        self
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub run_id: RunId,
    pub backend: Backend,
    pub pairs_executed: usize,
    /// Journal written during the run, if the backend opens one
    pub log_file: Option<PathBuf>,
}

/// Builds storage/process node pairs and executes them in order
///
/// The manager keeps no state between runs. Its collaborators (session
/// provider, run tracker, journal directory, event handlers) are fixed when it
/// is built.
pub struct NodesManager {
    session_provider: Box<dyn SessionProvider>,
    run_tracker: Box<dyn RunTracker>,
    logs_dir: PathBuf,
    event_handlers: Vec<EventHandler>,
}

impl NodesManager {
    /// Manager with the default collaborators and `<root>/logs/journals` as
    /// journal directory
    pub fn new() -> Self {
        let root = filesystem::root_directory().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            session_provider: Box::new(DefaultSessionProvider::new()),
            run_tracker: Box::new(LocalRunTracker),
            logs_dir: filesystem::logs_directory(&root),
            event_handlers: Vec::new(),
        }
    }

    pub fn with_session_provider(mut self, provider: impl SessionProvider + 'static) -> Self {
        self.session_provider = Box::new(provider);
        self
    }

    pub fn with_run_tracker(mut self, tracker: impl RunTracker + 'static) -> Self {
        self.run_tracker = Box::new(tracker);
        self
    }

    pub fn with_logs_dir(mut self, logs_dir: impl Into<PathBuf>) -> Self {
        self.logs_dir = logs_dir.into();
        self
    }

    pub fn logs_dir(&self) -> &Path {
        &self.logs_dir
    }

    /// Add an event handler
    pub fn add_event_handler<F>(&mut self, handler: F)
    where
        F: Fn(&ExecutionEvent) + Send + Sync + 'static,
    {
        self.event_handlers.push(Arc::new(handler));
    }

    /// Emit an event to all handlers
    fn emit_event(&self, event: ExecutionEvent) {
        for handler in &self.event_handlers {
            handler(&event);
        }
    }

    /// Build the storage constructor arguments for `backend`
    ///
    /// Databricks gets a session (created through the session provider when
    /// `session` is `None`) and the run id. Local gets nothing.
    pub fn resolve_init_parameters(
        &self,
        backend: Backend,
        session: Option<SessionHandle>,
        run_id: Option<RunId>,
    ) -> Result<InitParams> {
        match backend {
            Backend::Databricks => {
                let session = match session {
                    Some(session) => session,
                    None => self
                        .session_provider
                        .get_or_create(DEFAULT_APP_NAME)
                        .map_err(PipelineError::Session)?,
                };
                Ok(InitParams::Databricks { session, run_id })
            }
            Backend::Local => Ok(InitParams::Local),
        }
    }

    /// Execute the pipeline against `backend`
    ///
    /// Local runs get a fresh run id and their own journal file before any
    /// node is built. Databricks runs open a tracking run and then fail with
    /// [`PipelineError::BackendNotImplemented`]; the tracking run is closed
    /// before the error is returned. A tracker that cannot open the run fails
    /// with [`PipelineError::Session`] instead.
    ///
    /// The journal only receives lines once a subscriber routing to it is
    /// installed (see [`logging::init`]); without one the file stays empty.
    pub fn execute(
        &self,
        pipeline: &Pipeline,
        backend: Backend,
        options: RunOptions,
    ) -> Result<RunReport> {
        let RunOptions { session, run_id } = options;

        let (storage_nodes, run_id, log_file) = match backend {
            Backend::Databricks => {
                let run = ActiveRun::start(self.run_tracker.as_ref())
                    .map_err(PipelineError::Session)?;
                let storage_nodes = pipeline.storage_nodes_for(backend);
                let run_id = run_id.unwrap_or_else(|| run.run_id().clone());
                debug!(
                    "Prepared {} run {} with {} storage nodes",
                    backend,
                    run_id,
                    storage_nodes.len()
                );
                warn!("{} runs cannot be executed yet", backend);
                drop(run);
                return Err(PipelineError::BackendNotImplemented(backend));
            }
            Backend::Local => {
                if let Some(ignored) = &run_id {
                    debug!("Ignoring supplied run id {} for local backend", ignored);
                }
                let log_file = logging::open_run_log(&self.logs_dir)?;
                (
                    pipeline.storage_nodes_for(backend),
                    RunId::generate(),
                    Some(log_file),
                )
            }
        };

        info!("Starting {} run {}", backend, run_id);
        let init_params = self.resolve_init_parameters(backend, session, Some(run_id.clone()))?;

        let process_nodes = pipeline.process_nodes();
        if storage_nodes.len() != process_nodes.len() {
            return Err(PipelineError::PairingMismatch {
                storage: storage_nodes.iter().map(|n| n.name().to_string()).collect(),
                process: process_nodes.iter().map(|n| n.name().to_string()).collect(),
            });
        }

        let pairs: Vec<(StorageNodeType, ProcessNodeType)> = storage_nodes
            .iter()
            .copied()
            .zip(process_nodes.iter().copied())
            .collect();

        self.emit_event(ExecutionEvent::RunStarted {
            run_id: run_id.clone(),
            backend,
            total_pairs: pairs.len(),
        });

        if let Err(e) = self.execute_nodes(&pairs, &init_params) {
            self.emit_event(ExecutionEvent::RunFailed {
                run_id: run_id.clone(),
                error: e.to_string(),
            });
            return Err(e);
        }

        info!("Finished {} run {} ({} pairs)", backend, run_id, pairs.len());
        self.emit_event(ExecutionEvent::RunCompleted {
            run_id: run_id.clone(),
            pairs_executed: pairs.len(),
        });

        Ok(RunReport {
            run_id,
            backend,
            pairs_executed: pairs.len(),
            log_file,
        })
    }

    /// Run each (storage, process) pair in order
    ///
    /// For every pair: build the storage node with `init_params`, load its
    /// source, run the process node on it and save the result through the
    /// same storage node. The first error stops the loop; checkpoints saved by
    /// earlier pairs are kept.
    pub fn execute_nodes(
        &self,
        pairs: &[(StorageNodeType, ProcessNodeType)],
        init_params: &InitParams,
    ) -> Result<()> {
        for (index, (storage_type, process_type)) in pairs.iter().enumerate() {
            self.emit_event(ExecutionEvent::PairStarted {
                index,
                storage_node: storage_type.name().to_string(),
                process_node: process_type.name().to_string(),
            });
            let start = Instant::now();

            let storage = storage_type.instantiate(init_params)?;
            let sources = log_execution(storage_type.name(), "load_source", || {
                storage.load_source()
            })?;

            let process = process_type.instantiate();
            let results = log_execution(process_type.name(), "process", || {
                process.process(sources)
            })?;

            log_execution(storage_type.name(), "save_checkpoint", || {
                storage.save_checkpoint(results)
            })?;

            self.emit_event(ExecutionEvent::PairCompleted {
                index,
                elapsed: start.elapsed(),
            });
        }

        Ok(())
    }
}

impl Default for NodesManager {
    fn default() -> Self {
        Self::new()
    }
}
