//! AST providers: where declaration sightings come from.
//!
//! Parsing C++ is left to an external frontend. A provider either reads a
//! sightings document written earlier, or runs the frontend per source file and
//! reads the document from its standard output.

use crate::config::GlueConfig;
use cppglue_core::{SightingError, UnitSightings};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;
use thiserror::Error;

/// Failure to obtain sightings for one source.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("failed to load sightings for {}: {source}", path.display())]
    Sightings {
        path: PathBuf,
        #[source]
        source: SightingError,
    },

    #[error("failed to launch frontend '{command}': {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("frontend '{command}' failed on {} ({status}): {stderr}", path.display())]
    Failed {
        command: String,
        path: PathBuf,
        status: String,
        stderr: String,
    },
}

/// Supplies the sightings of one analyzed unit.
pub trait AstProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Analyze `source` with `compile_args`.
    fn analyze(
        &self,
        source: &Path,
        compile_args: &[String],
    ) -> Result<UnitSightings, ProviderError>;
}

/// Reads each source path as a JSON sightings document.
#[derive(Debug, Clone, Default)]
pub struct SightingsFileProvider;

impl AstProvider for SightingsFileProvider {
    fn name(&self) -> &str {
        "sightings-file"
    }

    fn analyze(
        &self,
        source: &Path,
        compile_args: &[String],
    ) -> Result<UnitSightings, ProviderError> {
        if !compile_args.is_empty() {
            tracing::debug!(
                source = %source.display(),
                "compile arguments are ignored for sightings documents"
            );
        }

        let mut unit = UnitSightings::from_file(source).map_err(|e| ProviderError::Sightings {
            path: source.to_path_buf(),
            source: e,
        })?;
        if unit.main_file.is_empty() {
            unit.main_file = source.display().to_string();
        }
        Ok(unit)
    }
}

/// Runs `<command> <source> -- <compile args...>` and parses its stdout.
#[derive(Debug, Clone)]
pub struct FrontendCommandProvider {
    command: String,
}

impl FrontendCommandProvider {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl AstProvider for FrontendCommandProvider {
    fn name(&self) -> &str {
        &self.command
    }

    fn analyze(
        &self,
        source: &Path,
        compile_args: &[String],
    ) -> Result<UnitSightings, ProviderError> {
        tracing::debug!(command = %self.command, source = %source.display(), "running frontend");

        let output = Command::new(&self.command)
            .arg(source)
            .arg("--")
            .args(compile_args)
            .output()
            .map_err(|e| ProviderError::Launch {
                command: self.command.clone(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(ProviderError::Failed {
                command: self.command.clone(),
                path: source.to_path_buf(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let mut unit = UnitSightings::from_json(&stdout).map_err(|e| ProviderError::Sightings {
            path: source.to_path_buf(),
            source: e,
        })?;
        if unit.main_file.is_empty() {
            unit.main_file = source.display().to_string();
        }
        Ok(unit)
    }
}

/// The provider selected by `config`.
pub fn from_config(config: &GlueConfig) -> Arc<dyn AstProvider> {
    match &config.frontend {
        Some(command) => Arc::new(FrontendCommandProvider::new(command.trim())),
        None => Arc::new(SightingsFileProvider),
    }
}

#[cfg(test)]
#[path = "provider/provider_tests.rs"]
mod provider_tests;
