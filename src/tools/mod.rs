//! Small helpers shared by nodes and the manager

pub mod checkpoint;
pub mod filesystem;
pub mod timing;
