//! Pipeline configuration from YAML

use crate::core::{Backend, NodeRegistry, Pipeline};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level pipeline configuration loaded from YAML
///
/// ```yaml
/// name: "sample"
/// backend: "local"
/// local_storage_nodes: ["json_file_storage"]
/// process_nodes: ["record_count"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Pipeline name
    pub name: String,

    /// Optional description
    #[serde(default)]
    pub description: Option<String>,

    /// Backend used when none is given on the command line
    #[serde(default)]
    pub backend: Backend,

    /// Directory for run journals (defaults to `<root>/logs/journals`)
    #[serde(default)]
    pub logs_dir: Option<PathBuf>,

    /// Storage node names for the local backend
    #[serde(default)]
    pub local_storage_nodes: Vec<String>,

    /// Storage node names for the databricks backend
    #[serde(default)]
    pub databricks_storage_nodes: Vec<String>,

    /// Process node names, paired positionally with the storage nodes
    pub process_nodes: Vec<String>,
}

impl PipelineConfig {
    /// Load pipeline configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content)
    }

    /// Parse pipeline configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: PipelineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the pipeline configuration
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            anyhow::bail!("Pipeline name cannot be empty");
        }
        if self.process_nodes.is_empty() {
            anyhow::bail!("Pipeline '{}' has no process nodes", self.name);
        }
        Ok(())
    }

    /// Resolve node names against `registry`
    pub fn to_pipeline(&self, registry: &NodeRegistry) -> Result<Pipeline> {
        let resolve_storage = |names: &[String]| {
            names
                .iter()
                .map(|name| {
                    registry
                        .storage(name)
                        .with_context(|| format!("Unknown storage node '{}'", name))
                })
                .collect::<Result<Vec<_>>>()
        };

        let process_nodes = self
            .process_nodes
            .iter()
            .map(|name| {
                registry
                    .process(name)
                    .with_context(|| format!("Unknown process node '{}'", name))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Pipeline::new(
            resolve_storage(&self.local_storage_nodes)?,
            resolve_storage(&self.databricks_storage_nodes)?,
            process_nodes,
        ))
    }
}
