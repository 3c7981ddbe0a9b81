//! Node contracts
//!
//! A pipeline is made of two kinds of nodes: storage nodes, which load the
//! inputs of a stage and persist its outputs, and process nodes, which turn
//! inputs into outputs. Pipelines refer to nodes through type descriptors so
//! that a fresh instance is built for every run.

pub mod builtin;

use crate::core::InitParams;
use serde_json::Value;
use std::fmt;

/// Processing capability: transform inputs into outputs
pub trait ProcessNode {
    /// Run the node over the values loaded by the paired storage node
    fn process(&self, inputs: Vec<Value>) -> anyhow::Result<Vec<Value>>;
}

/// Storage capability: load stage inputs and persist stage outputs
pub trait StorageNode {
    /// Build the node from the backend's initialization parameters
    fn from_params(params: &InitParams) -> anyhow::Result<Self>
    where
        Self: Sized;

    /// Load the inputs for the paired process node
    fn load_source(&self) -> anyhow::Result<Vec<Value>>;

    /// Persist the outputs of the paired process node
    fn save_checkpoint(&self, outputs: Vec<Value>) -> anyhow::Result<()>;

    /// Reload outputs saved by a previous run
    fn load_checkpoint(&self) -> anyhow::Result<Vec<Value>>;
}

type StorageConstructor = fn(&InitParams) -> anyhow::Result<Box<dyn StorageNode>>;
type ProcessConstructor = fn() -> Box<dyn ProcessNode>;

/// Descriptor of a storage node type
#[derive(Clone, Copy)]
pub struct StorageNodeType {
    name: &'static str,
    construct: StorageConstructor,
}

impl StorageNodeType {
    /// Descriptor for the storage node type `S`
    pub fn of<S: StorageNode + 'static>() -> Self {
        Self {
            name: std::any::type_name::<S>(),
            construct: construct_storage::<S>,
        }
    }

    /// Fully qualified type name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Build a new instance with the given parameters
    pub fn instantiate(&self, params: &InitParams) -> anyhow::Result<Box<dyn StorageNode>> {
        (self.construct)(params)
    }
}

impl fmt::Debug for StorageNodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StorageNodeType").field(&self.name).finish()
    }
}

impl PartialEq for StorageNodeType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// Descriptor of a process node type
#[derive(Clone, Copy)]
pub struct ProcessNodeType {
    name: &'static str,
    construct: ProcessConstructor,
}

impl ProcessNodeType {
    /// Descriptor for the process node type `P`
    pub fn of<P: ProcessNode + Default + 'static>() -> Self {
        Self {
            name: std::any::type_name::<P>(),
            construct: construct_process::<P>,
        }
    }

    /// Fully qualified type name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Build a new instance
    pub fn instantiate(&self) -> Box<dyn ProcessNode> {
        (self.construct)()
    }
}

impl fmt::Debug for ProcessNodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ProcessNodeType").field(&self.name).finish()
    }
}

impl PartialEq for ProcessNodeType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

fn construct_storage<S: StorageNode + 'static>(
    params: &InitParams,
) -> anyhow::Result<Box<dyn StorageNode>> {
    Ok(Box::new(S::from_params(params)?))
}

fn construct_process<P: ProcessNode + Default + 'static>() -> Box<dyn ProcessNode> {
    Box::new(P::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Default)]
    struct Double;

    impl ProcessNode for Double {
        fn process(&self, inputs: Vec<Value>) -> anyhow::Result<Vec<Value>> {
            Ok(inputs
                .into_iter()
                .map(|v| json!(v.as_i64().unwrap_or(0) * 2))
                .collect())
        }
    }

    struct Fixed {
        arity: usize,
    }

    impl StorageNode for Fixed {
        fn from_params(params: &InitParams) -> anyhow::Result<Self> {
            Ok(Self { arity: params.arity() })
        }

        fn load_source(&self) -> anyhow::Result<Vec<Value>> {
            Ok(vec![json!(self.arity)])
        }

        fn save_checkpoint(&self, _outputs: Vec<Value>) -> anyhow::Result<()> {
            Ok(())
        }

        fn load_checkpoint(&self) -> anyhow::Result<Vec<Value>> {
            Ok(vec![])
        }
    }

    #[test]
    fn test_descriptor_names_are_qualified() {
        let process = ProcessNodeType::of::<Double>();
        assert!(process.name().contains("nodes::tests::Double"));
        assert_eq!(format!("{:?}", process), format!("ProcessNodeType({:?})", process.name()));
    }

    #[test]
    fn test_instantiate_process_node() {
        let node = ProcessNodeType::of::<Double>().instantiate();
        assert_eq!(node.process(vec![json!(4)]).unwrap(), vec![json!(8)]);
    }

    #[test]
    fn test_instantiate_storage_node_with_params() {
        let storage = StorageNodeType::of::<Fixed>()
            .instantiate(&InitParams::Local)
            .unwrap();
        assert_eq!(storage.load_source().unwrap(), vec![json!(0)]);
    }

    #[test]
    fn test_descriptor_equality_by_type() {
        assert_eq!(StorageNodeType::of::<Fixed>(), StorageNodeType::of::<Fixed>());
    }
}
