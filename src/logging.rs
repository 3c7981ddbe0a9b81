//! Process-wide logging setup
//!
//! Log output goes to stderr and to a run journal file. The journal file is
//! process-wide state: every local run points it at a fresh
//! `run_execution_<timestamp>.log`, so two runs executing at the same time in
//! one process write into whichever journal was opened last. Use separate
//! processes when runs must be isolated.

use crate::core::error::{PipelineError, Result};
use chrono::{DateTime, Local};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing_subscriber::{
    filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

static RUN_LOG: Mutex<Option<File>> = Mutex::new(None);

/// Lock the journal sink, recovering it if a writer panicked while holding it
fn run_log() -> MutexGuard<'static, Option<File>> {
    RUN_LOG.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Writer targeting the currently open run journal; drops output when none is open
#[derive(Debug, Clone, Copy, Default)]
pub struct RunLogWriter;

impl Write for RunLogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(file) = run_log().as_mut() {
            file.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Some(file) = run_log().as_mut() {
            file.flush()?;
        }
        Ok(())
    }
}

/// Install the global subscriber
///
/// Stderr shows warnings and errors (everything from debug up when
/// `verbose`); the run journal receives what `RUST_LOG` allows, `info` by
/// default.
pub fn init(verbose: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("ml_pipeline=debug,info")
        } else {
            EnvFilter::new("info")
        }
    });
    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .compact()
                .with_writer(io::stderr)
                .with_filter(console_level),
        )
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_level(false)
                .with_writer(RunLogWriter::default),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set logging subscriber: {}", e))
}

/// Journal file name for a run started at `now`
pub fn run_log_file_name(now: DateTime<Local>) -> String {
    format!("run_execution_{}.log", now.format("%Y_%m_%d_%H_%M_%S"))
}

/// Open a new run journal in `dir` and route file logging to it
///
/// An existing file with the same name is truncated.
pub fn open_run_log(dir: &Path) -> Result<PathBuf> {
    let path = dir.join(run_log_file_name(Local::now()));
    let run_log_error = |source| PipelineError::RunLog {
        path: path.clone(),
        source,
    };

    std::fs::create_dir_all(dir).map_err(run_log_error)?;
    let file = File::create(&path).map_err(run_log_error)?;

    *run_log() = Some(file);

    Ok(path)
}
