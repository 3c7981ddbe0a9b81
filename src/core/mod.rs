//! Core domain models
//!
//! This module defines the pipeline record, backend selection, the
//! per-run parameters handed to storage nodes, and the configuration layer
//! that builds pipelines from YAML.

pub mod backend;
pub mod config;
pub mod error;
pub mod params;
pub mod pipeline;
pub mod registry;

pub use backend::*;
pub use error::PipelineError;
pub use params::*;
pub use pipeline::*;
pub use registry::NodeRegistry;
