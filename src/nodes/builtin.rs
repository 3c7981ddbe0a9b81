//! Sample nodes shipped with the scaffold

use crate::core::InitParams;
use crate::nodes::{ProcessNode, StorageNode};
use crate::tools::{checkpoint, filesystem};
use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

/// Local storage backed by JSON files under the project root
///
/// Reads `data/raw/source.json` and keeps its checkpoint in
/// `data/checkpoints/json_file_storage.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    root: PathBuf,
}

impl JsonFileStorage {
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn source_path(&self) -> PathBuf {
        self.root.join("data").join("raw").join("source.json")
    }

    pub fn checkpoint_path(&self) -> PathBuf {
        self.root
            .join("data")
            .join("checkpoints")
            .join("json_file_storage.json")
    }

    fn read_json(path: &Path) -> Result<Value> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read source {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON in {}", path.display()))
    }
}

impl StorageNode for JsonFileStorage {
    fn from_params(_params: &InitParams) -> Result<Self> {
        Ok(Self::with_root(filesystem::root_directory()?))
    }

    fn load_source(&self) -> Result<Vec<Value>> {
        Ok(vec![Self::read_json(&self.source_path())?])
    }

    fn save_checkpoint(&self, outputs: Vec<Value>) -> Result<()> {
        checkpoint::save(&outputs, self.checkpoint_path())
    }

    fn load_checkpoint(&self) -> Result<Vec<Value>> {
        checkpoint::load(self.checkpoint_path())
    }
}

/// Returns its inputs unchanged
#[derive(Debug, Default)]
pub struct Passthrough;

impl ProcessNode for Passthrough {
    fn process(&self, inputs: Vec<Value>) -> Result<Vec<Value>> {
        Ok(inputs)
    }
}

/// Counts records across all inputs
///
/// Arrays contribute their length, `null` contributes nothing and any other
/// value counts as one record.
#[derive(Debug, Default)]
pub struct RecordCount;

impl ProcessNode for RecordCount {
    fn process(&self, inputs: Vec<Value>) -> Result<Vec<Value>> {
        let records: usize = inputs
            .iter()
            .map(|input| match input {
                Value::Array(items) => items.len(),
                Value::Null => 0,
                _ => 1,
            })
            .sum();
        Ok(vec![json!({ "records": records })])
    }
}
