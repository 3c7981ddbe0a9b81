//! CLI output formatting

use crate::execution::{ExecutionEvent, RunReport};
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static SPINNER: Emoji<'_, '_> = Emoji("⏳ ", "~ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");

/// Create a progress bar
pub fn create_progress_bar(total: usize) -> ProgressBar {
    let progress = ProgressBar::new(total as u64);
    if let Ok(template) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        progress.set_style(template.progress_chars("#>-"));
    }
    progress.enable_steady_tick(Duration::from_millis(100));
    progress
}

/// Last path segment of a qualified type name
pub fn short_name(qualified: &str) -> &str {
    qualified.rsplit("::").next().unwrap_or(qualified)
}

/// Format an execution event for display
pub fn format_execution_event(event: &ExecutionEvent) -> String {
    match event {
        ExecutionEvent::RunStarted {
            run_id,
            backend,
            total_pairs,
        } => format!(
            "{} Starting {} run {} ({} pairs)",
            ROCKET,
            style(backend).bold(),
            style(run_id).dim(),
            total_pairs
        ),
        ExecutionEvent::PairStarted {
            index,
            storage_node,
            process_node,
        } => format!(
            "{} [{}] {} → {}",
            SPINNER,
            index + 1,
            style(short_name(storage_node)).cyan(),
            style(short_name(process_node)).cyan()
        ),
        ExecutionEvent::PairCompleted { index, elapsed } => format!(
            "{} [{}] done in {}",
            CHECK,
            index + 1,
            style(format!("{:.2}s", elapsed.as_secs_f64())).dim()
        ),
        ExecutionEvent::RunCompleted {
            run_id,
            pairs_executed,
        } => format!(
            "{} Run {} {} ({} pairs)",
            INFO,
            style(run_id).dim(),
            style("completed").green(),
            pairs_executed
        ),
        ExecutionEvent::RunFailed { run_id, error } => format!(
            "{} Run {} {}: {}",
            CROSS,
            style(run_id).dim(),
            style("failed").red(),
            style(error).dim()
        ),
    }
}

/// Format the final report of a run
pub fn format_run_report(report: &RunReport) -> String {
    let mut out = format!(
        "{} {} run {} executed {} pairs",
        CHECK,
        style(report.backend).bold(),
        style(&report.run_id).cyan(),
        report.pairs_executed
    );
    if let Some(log_file) = &report.log_file {
        out.push_str(&format!("\n  Journal: {}", style(log_file.display()).dim()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Backend, RunId};

    #[test]
    fn test_short_name() {
        assert_eq!(short_name("ml_pipeline::nodes::builtin::Passthrough"), "Passthrough");
        assert_eq!(short_name("Plain"), "Plain");
    }

    #[test]
    fn test_format_pair_started_uses_short_names() {
        let text = format_execution_event(&ExecutionEvent::PairStarted {
            index: 0,
            storage_node: "a::b::Storage".to_string(),
            process_node: "a::b::Process".to_string(),
        });
        assert!(text.contains("[1]"));
        assert!(text.contains("Storage"));
        assert!(!text.contains("a::b::"));
    }

    #[test]
    fn test_format_run_report_mentions_journal() {
        let report = RunReport {
            run_id: RunId::from("0123"),
            backend: Backend::Local,
            pairs_executed: 2,
            log_file: Some("logs/journals/run.log".into()),
        };
        let text = format_run_report(&report);
        assert!(text.contains("0123"));
        assert!(text.contains("run.log"));
    }
}
