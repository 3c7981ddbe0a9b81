//! Pipeline domain model

use crate::core::Backend;
use crate::nodes::{ProcessNodeType, StorageNodeType};

/// A pipeline definition
///
/// Holds the storage nodes for each backend and the process nodes they pair
/// with. Position `i` of the active storage sequence pairs with position `i`
/// of `process_nodes`. The record is read-only once built.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    /// Storage nodes used with the local backend
    local_storage_nodes: Vec<StorageNodeType>,

    /// Storage nodes used with the databricks backend
    databricks_storage_nodes: Vec<StorageNodeType>,

    /// Process nodes, shared by both storage sets
    process_nodes: Vec<ProcessNodeType>,
}

impl Pipeline {
    /// Create a pipeline from its three node sequences
    pub fn new(
        local_storage_nodes: Vec<StorageNodeType>,
        databricks_storage_nodes: Vec<StorageNodeType>,
        process_nodes: Vec<ProcessNodeType>,
    ) -> Self {
        Self {
            local_storage_nodes,
            databricks_storage_nodes,
            process_nodes,
        }
    }

    /// Start building a pipeline node by node
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    pub fn local_storage_nodes(&self) -> &[StorageNodeType] {
        &self.local_storage_nodes
    }

    pub fn databricks_storage_nodes(&self) -> &[StorageNodeType] {
        &self.databricks_storage_nodes
    }

    pub fn process_nodes(&self) -> &[ProcessNodeType] {
        &self.process_nodes
    }

    /// Storage sequence used when running against `backend`
    pub fn storage_nodes_for(&self, backend: Backend) -> &[StorageNodeType] {
        match backend {
            Backend::Local => &self.local_storage_nodes,
            Backend::Databricks => &self.databricks_storage_nodes,
        }
    }
}

/// Builder for [`Pipeline`]
#[derive(Debug, Default)]
pub struct PipelineBuilder {
    pipeline: Pipeline,
}

impl PipelineBuilder {
    /// Append a local storage node
    pub fn local(mut self, node: StorageNodeType) -> Self {
        self.pipeline.local_storage_nodes.push(node);
        self
    }

    /// Append a databricks storage node
    pub fn databricks(mut self, node: StorageNodeType) -> Self {
        self.pipeline.databricks_storage_nodes.push(node);
        self
    }

    /// Append a process node
    pub fn process(mut self, node: ProcessNodeType) -> Self {
        self.pipeline.process_nodes.push(node);
        self
    }

    pub fn build(self) -> Pipeline {
        self.pipeline
    }
}
