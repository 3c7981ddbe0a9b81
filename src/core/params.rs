//! Per-run storage construction parameters and run identifiers

use crate::session::SessionHandle;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Arguments handed to every storage node constructor for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitParams {
    /// Local filesystem storage takes no arguments
    Local,
    /// Distributed storage receives the compute session and the run id
    Databricks {
        session: SessionHandle,
        run_id: Option<RunId>,
    },
}

impl InitParams {
    /// Number of values carried (0 for local, 2 for databricks)
    pub fn arity(&self) -> usize {
        match self {
            InitParams::Local => 0,
            InitParams::Databricks { .. } => 2,
        }
    }

    /// Compute session, when the backend provides one
    pub fn session(&self) -> Option<&SessionHandle> {
        match self {
            InitParams::Local => None,
            InitParams::Databricks { session, .. } => Some(session),
        }
    }

    /// Run id threaded into storage construction, when the backend provides one
    pub fn run_id(&self) -> Option<&RunId> {
        match self {
            InitParams::Local => None,
            InitParams::Databricks { run_id, .. } => run_id.as_ref(),
        }
    }
}

/// Unique token naming one pipeline execution
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(String);

impl RunId {
    /// Fresh random run id: 32 lowercase hex characters
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for RunId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for RunId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
