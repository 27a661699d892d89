//! Configuration file parsing and validation

use anyhow::{Context, Result};
use cppglue_codegen::naming::is_python_identifier;
use cppglue_core::DuplicatePolicy;
use cppglue_logging::LogLevel;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "cppglue.toml";

/// cppglue.toml structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlueConfig {
    /// Python module name; also names the package and the CMake target.
    #[serde(default)]
    pub module_name: String,

    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Translation units (or sightings documents) to analyze.
    #[serde(default)]
    pub sources: Vec<PathBuf>,

    /// Arguments handed to the frontend after `--`.
    #[serde(default)]
    pub compile_args: Vec<String>,

    /// Directory overriding the embedded scaffold templates.
    #[serde(default)]
    pub template_dir: Option<PathBuf>,

    /// Frontend executable. Without one, sources are read as sightings documents.
    #[serde(default)]
    pub frontend: Option<String>,

    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,

    #[serde(default)]
    pub log_level: LogLevel,

    /// Upper bound on concurrently analyzed sources.
    #[serde(default)]
    pub jobs: Option<usize>,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for GlueConfig {
    fn default() -> Self {
        Self {
            module_name: String::new(),
            version: default_version(),
            output_dir: default_output_dir(),
            sources: Vec::new(),
            compile_args: Vec::new(),
            template_dir: None,
            frontend: None,
            duplicate_policy: DuplicatePolicy::default(),
            log_level: LogLevel::default(),
            jobs: None,
        }
    }
}

/// Values given on the command line. Each one replaces its file counterpart.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub module_name: Option<String>,
    pub version: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub frontend: Option<String>,
    pub jobs: Option<usize>,
    pub sources: Vec<PathBuf>,
    pub compile_args: Vec<String>,
}

impl GlueConfig {
    /// Load config from a file
    ///
    /// Relative paths inside the file are resolved against its directory.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let mut config = Self::from_str(&content)
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    /// Parse config from string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config")
    }

    /// Load the config for a run: the given file, else `cppglue.toml` when present,
    /// else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                tracing::debug!(file = DEFAULT_CONFIG_FILE, "using config from working directory");
                Self::from_file(DEFAULT_CONFIG_FILE)
            }
            None => Ok(Self::default()),
        }
    }

    /// Replace file values with command line values.
    ///
    /// Sources and compile arguments given on the command line replace the
    /// file's lists entirely.
    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(module_name) = overrides.module_name {
            self.module_name = module_name;
        }
        if let Some(version) = overrides.version {
            self.version = version;
        }
        if let Some(output_dir) = overrides.output_dir {
            self.output_dir = output_dir;
        }
        if let Some(frontend) = overrides.frontend {
            self.frontend = Some(frontend);
        }
        if let Some(jobs) = overrides.jobs {
            self.jobs = Some(jobs);
        }
        if !overrides.sources.is_empty() {
            self.sources = overrides.sources;
        }
        if !overrides.compile_args.is_empty() {
            self.compile_args = overrides.compile_args;
        }
    }

    /// Validate the config
    pub fn validate(&self) -> Result<()> {
        if self.module_name.is_empty() {
            anyhow::bail!("Module name cannot be empty (set module_name or pass --module)");
        }

        if !is_python_identifier(&self.module_name) {
            anyhow::bail!(
                "Module name '{}' is not a valid Python identifier",
                self.module_name
            );
        }

        if !self.version.contains('.') {
            anyhow::bail!("Version should be in semver format (e.g., 1.0.0)");
        }

        if self.sources.is_empty() {
            anyhow::bail!("At least one source file is required");
        }

        if let Some(frontend) = &self.frontend
            && frontend.trim().is_empty()
        {
            anyhow::bail!("Frontend command cannot be empty");
        }

        if self.jobs == Some(0) {
            anyhow::bail!("jobs must be at least 1");
        }

        Ok(())
    }

    fn resolve_paths(&mut self, base: &Path) {
        let resolve = |path: &Path| {
            if path.is_relative() {
                base.join(path)
            } else {
                path.to_path_buf()
            }
        };

        self.output_dir = resolve(&self.output_dir);
        self.sources = self.sources.iter().map(|p| resolve(p.as_path())).collect();
        self.template_dir = self.template_dir.as_deref().map(resolve);
    }
}

/// Check command implementation
pub fn check(config_path: Option<PathBuf>) -> Result<()> {
    let path = config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    println!("Checking config: {}", path.display());

    let config = GlueConfig::from_file(&path)?;
    config.validate()?;

    println!("✓ Module: {} v{}", config.module_name, config.version);
    println!("✓ Sources: {}", config.sources.len());
    println!("✓ Output: {}", config.output_dir.display());
    match &config.frontend {
        Some(frontend) => println!("✓ Frontend: {frontend}"),
        None => println!("✓ Frontend: none (sources are sightings documents)"),
    }
    println!("✓ Duplicates: {}", config.duplicate_policy);
    println!("\nConfig is valid!");

    Ok(())
}
