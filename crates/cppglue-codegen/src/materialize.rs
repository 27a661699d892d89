//! Compare-before-write file output.
//!
//! Files whose on-disk content already matches are left untouched, so a
//! second run over unchanged inputs performs no writes and downstream build
//! tools see no modified timestamps.

use crate::error::{CodegenError, CodegenResult};
use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};

/// What [`Materializer::write_if_different`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Unchanged,
}

/// Paths written and skipped during a run, in completion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    pub written: Vec<PathBuf>,
    pub unchanged: Vec<PathBuf>,
}

impl MaterializeReport {
    pub fn total(&self) -> usize {
        self.written.len() + self.unchanged.len()
    }
}

/// Idempotent file writer.
///
/// Calls for distinct paths may run concurrently.
#[derive(Debug, Default)]
pub struct Materializer {
    report: Mutex<MaterializeReport>,
}

impl Materializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `content` to `path` unless the file already holds exactly those bytes.
    ///
    /// Missing parent directories are created. An existing file that cannot be
    /// read is treated as different.
    pub fn write_if_different(&self, path: &Path, content: &str) -> CodegenResult<WriteOutcome> {
        if let Ok(existing) = fs::read(path)
            && existing == content.as_bytes()
        {
            tracing::debug!(path = %path.display(), "unchanged");
            self.report.lock().unchanged.push(path.to_path_buf());
            return Ok(WriteOutcome::Unchanged);
        }

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| CodegenError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(path, content).map_err(|source| CodegenError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!(path = %path.display(), bytes = content.len(), "wrote");
        self.report.lock().written.push(path.to_path_buf());
        Ok(WriteOutcome::Written)
    }

    /// Snapshot of what has been written and skipped so far.
    pub fn report(&self) -> MaterializeReport {
        self.report.lock().clone()
    }
}
