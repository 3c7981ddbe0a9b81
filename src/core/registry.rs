//! Name-based lookup of node types

use crate::nodes::builtin::{JsonFileStorage, Passthrough, RecordCount};
use crate::nodes::{ProcessNode, ProcessNodeType, StorageNode, StorageNodeType};
use anyhow::Result;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z][a-z0-9_]*$").expect("node name pattern is valid"))
}

/// Registry mapping snake_case names to node types
///
/// Pipeline configuration files refer to nodes by these names.
#[derive(Debug, Clone, Default)]
pub struct NodeRegistry {
    storage: BTreeMap<String, StorageNodeType>,
    process: BTreeMap<String, ProcessNodeType>,
}

impl NodeRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the sample nodes shipped with the crate
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry
            .storage
            .insert("json_file_storage".to_string(), StorageNodeType::of::<JsonFileStorage>());
        registry
            .process
            .insert("passthrough".to_string(), ProcessNodeType::of::<Passthrough>());
        registry
            .process
            .insert("record_count".to_string(), ProcessNodeType::of::<RecordCount>());
        registry
    }

    /// Register storage node type `S` under `name`
    pub fn register_storage<S: StorageNode + 'static>(&mut self, name: &str) -> Result<()> {
        Self::check_name(name)?;
        if self.storage.contains_key(name) {
            anyhow::bail!("Storage node '{}' is already registered", name);
        }
        self.storage.insert(name.to_string(), StorageNodeType::of::<S>());
        Ok(())
    }

    /// Register process node type `P` under `name`
    pub fn register_process<P: ProcessNode + Default + 'static>(
        &mut self,
        name: &str,
    ) -> Result<()> {
        Self::check_name(name)?;
        if self.process.contains_key(name) {
            anyhow::bail!("Process node '{}' is already registered", name);
        }
        self.process.insert(name.to_string(), ProcessNodeType::of::<P>());
        Ok(())
    }

    pub fn storage(&self, name: &str) -> Option<StorageNodeType> {
        self.storage.get(name).copied()
    }

    pub fn process(&self, name: &str) -> Option<ProcessNodeType> {
        self.process.get(name).copied()
    }

    /// Registered storage node names with their types, sorted by name
    pub fn storage_nodes(&self) -> impl Iterator<Item = (&str, &StorageNodeType)> {
        self.storage.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// Registered process node names with their types, sorted by name
    pub fn process_nodes(&self) -> impl Iterator<Item = (&str, &ProcessNodeType)> {
        self.process.iter().map(|(name, node)| (name.as_str(), node))
    }

    fn check_name(name: &str) -> Result<()> {
        if !name_pattern().is_match(name) {
            anyhow::bail!(
                "Invalid node name '{}': use lowercase letters, digits and underscores",
                name
            );
        }
        Ok(())
    }
}
