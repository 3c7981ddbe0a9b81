//! CLI command definitions

use crate::core::Backend;
use clap::Args;
use std::path::PathBuf;

/// Run a pipeline
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Path to pipeline YAML file
    #[arg(short, long)]
    pub file: String,

    /// Backend to run against (overrides the configuration file)
    #[arg(short, long, value_parser = parse_backend)]
    pub backend: Option<Backend>,

    /// Run id for backends that accept one
    #[arg(long)]
    pub run_id: Option<String>,

    /// Directory for run journals
    #[arg(long)]
    pub logs_dir: Option<PathBuf>,
}

/// Validate a pipeline configuration
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    /// Path to pipeline YAML file
    #[arg(short, long)]
    pub file: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// List registered nodes
#[derive(Debug, Args, Clone)]
pub struct NodesCommand {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Parse a backend name
pub fn parse_backend(s: &str) -> Result<Backend, String> {
    s.parse::<Backend>().map_err(|e| e.to_string())
}
