use anyhow::{Context, Result};
use ml_pipeline::cli::commands::{NodesCommand, RunCommand, ValidateCommand};
use ml_pipeline::cli::output::*;
use ml_pipeline::cli::{Cli, Command};
use ml_pipeline::core::{config::PipelineConfig, Backend, NodeRegistry};
use ml_pipeline::{logging, ExecutionEvent, NodesManager, RunOptions};
use tracing::error;

fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging
    logging::init(cli.verbose)?;

    // Execute command
    match &cli.command {
        Command::Run(cmd) => run_pipeline(cmd)?,
        Command::Validate(cmd) => validate_pipeline(cmd)?,
        Command::Nodes(cmd) => list_nodes(cmd)?,
    }

    Ok(())
}

fn run_pipeline(cmd: &RunCommand) -> Result<()> {
    let config = PipelineConfig::from_file(&cmd.file).context("Failed to load pipeline config")?;

    println!("{} Loaded pipeline: {}", INFO, style(&config.name).bold());

    let registry = NodeRegistry::builtin();
    let pipeline = config.to_pipeline(&registry)?;
    let backend = cmd.backend.unwrap_or(config.backend);

    let mut manager = NodesManager::new();
    if let Some(logs_dir) = cmd.logs_dir.clone().or_else(|| config.logs_dir.clone()) {
        manager = manager.with_logs_dir(logs_dir);
    }

    // Progress bar driven by execution events
    let progress = create_progress_bar(pipeline.process_nodes().len());
    let bar = progress.clone();
    manager.add_event_handler(move |event| {
        match event {
            ExecutionEvent::PairStarted { process_node, .. } => {
                bar.set_message(short_name(process_node).to_string());
            }
            ExecutionEvent::PairCompleted { .. } => bar.inc(1),
            _ => {}
        }
        bar.println(format_execution_event(event));
    });

    let mut options = RunOptions::new();
    if let Some(run_id) = &cmd.run_id {
        options = options.with_run_id(run_id.as_str());
    }

    println!();
    let result = manager.execute(&pipeline, backend, options);
    progress.finish_and_clear();

    match result {
        Ok(report) => {
            println!("\n{}", format_run_report(&report));
            Ok(())
        }
        Err(e) => {
            println!(
                "\n{} {} {}",
                CROSS,
                style(&config.name).bold(),
                style("failed").red()
            );
            error!("{}", e);
            std::process::exit(1);
        }
    }
}

fn validate_pipeline(cmd: &ValidateCommand) -> Result<()> {
    println!("{} Validating pipeline...", INFO);

    let result = PipelineConfig::from_file(&cmd.file)
        .and_then(|config| config.to_pipeline(&NodeRegistry::builtin()).map(|p| (config, p)));

    match result {
        Ok((config, pipeline)) => {
            println!("{} Pipeline configuration is valid!", CHECK);
            println!("  Name: {}", style(&config.name).bold());
            println!("  Default backend: {}", style(config.backend).cyan());
            println!("  Process nodes: {}", style(pipeline.process_nodes().len()).cyan());

            for backend in Backend::ALL {
                let storage = pipeline.storage_nodes_for(backend).len();
                let pairs = if storage == pipeline.process_nodes().len() {
                    style("paired".to_string()).green()
                } else {
                    style(format!("{} storage nodes, cannot pair", storage)).yellow()
                };
                println!("  {}: {}", backend, pairs);
            }

            if cmd.json {
                let json = serde_json::to_string_pretty(&config)?;
                println!("\n{}", json);
            }
            Ok(())
        }
        Err(e) => {
            println!("{} Validation failed:", CROSS);
            println!("  {}", style(format!("{:#}", e)).red());
            std::process::exit(1);
        }
    }
}

fn list_nodes(cmd: &NodesCommand) -> Result<()> {
    let registry = NodeRegistry::builtin();

    if cmd.json {
        let storage: Vec<_> = registry
            .storage_nodes()
            .map(|(name, node)| serde_json::json!({ "name": name, "type": node.name() }))
            .collect();
        let process: Vec<_> = registry
            .process_nodes()
            .map(|(name, node)| serde_json::json!({ "name": name, "type": node.name() }))
            .collect();
        let data = serde_json::json!({ "storage_nodes": storage, "process_nodes": process });
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }

    println!("{} Storage nodes:", INFO);
    for (name, node) in registry.storage_nodes() {
        println!("  {} {}", style(name).bold(), style(node.name()).dim());
    }
    println!("{} Process nodes:", INFO);
    for (name, node) in registry.process_nodes() {
        println!("  {} {}", style(name).bold(), style(node.name()).dim());
    }

    Ok(())
}
