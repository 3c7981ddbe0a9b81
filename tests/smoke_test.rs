//! Smoke test - runs a YAML pipeline with the builtin nodes end-to-end
//!
//! The builtin storage node resolves its files from `PIPELINE_ROOT`, so this
//! binary holds a single test and owns the variable.

use ml_pipeline::core::config::PipelineConfig;
use ml_pipeline::core::NodeRegistry;
use ml_pipeline::nodes::builtin::JsonFileStorage;
use ml_pipeline::tools::filesystem::ROOT_ENV_VAR;
use ml_pipeline::{Backend, NodesManager, RunOptions, StorageNode};
use serde_json::json;

#[test]
fn smoke_test_local_pipeline() {
    let root = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(root.path().join("data").join("raw")).unwrap();
    std::fs::write(
        root.path().join("data").join("raw").join("source.json"),
        r#"[{"id": 1}, {"id": 2}, {"id": 3}]"#,
    )
    .unwrap();
    std::env::set_var(ROOT_ENV_VAR, root.path());

    let yaml = r#"
name: "Smoke Test Pipeline"
local_storage_nodes: ["json_file_storage"]
databricks_storage_nodes: []
process_nodes: ["record_count"]
"#;

    let config = PipelineConfig::from_yaml(yaml).expect("Should parse YAML");
    assert_eq!(config.backend, Backend::Local);
    let pipeline = config
        .to_pipeline(&NodeRegistry::builtin())
        .expect("Builtin nodes should resolve");

    let manager = NodesManager::new();
    assert_eq!(manager.logs_dir(), root.path().join("logs").join("journals"));

    let report = manager
        .execute(&pipeline, Backend::Local, RunOptions::new())
        .expect("Pipeline should run");
    assert_eq!(report.pairs_executed, 1);
    assert!(report.log_file.unwrap().exists());

    let storage = JsonFileStorage::with_root(root.path());
    let saved = storage.load_checkpoint().unwrap();
    assert_eq!(saved, vec![json!({ "records": 3 })]);

    // The same pipeline cannot run remotely yet
    let err = manager
        .execute(&pipeline, Backend::Databricks, RunOptions::new())
        .unwrap_err();
    assert!(err.to_string().contains("not currently accepted"));

    std::env::remove_var(ROOT_ENV_VAR);
}
