//! cppglue CLI - pybind11 binding generator for C++ sources
//!
//! Commands:
//! - `cppglue generate` - Analyze sources and write bindings, stubs and build files
//! - `cppglue check` - Validate a cppglue.toml config

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cppglue_logging::{LogLevel, ReloadHandle, init_logging};
use std::path::PathBuf;
use tokio::runtime::Builder;

mod config;
mod generate;
mod provider;

use config::{GlueConfig, Overrides};

#[derive(Parser)]
#[command(name = "cppglue")]
#[command(author, version, about = "Generate pybind11 bindings and Python packaging for C++ code", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate bindings, type stubs and build scaffolding
    Generate {
        /// Python module name
        #[arg(short, long)]
        module: Option<String>,

        /// Output directory for generated files
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Path to cppglue.toml (default: ./cppglue.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Package version written to the build files
        #[arg(long)]
        version: Option<String>,

        /// Frontend executable producing declaration sightings
        #[arg(long)]
        frontend: Option<String>,

        /// Maximum number of sources analyzed at once
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Source files to analyze
        sources: Vec<PathBuf>,

        /// Arguments passed to the frontend after `--`
        #[arg(last = true)]
        compile_args: Vec<String>,
    },

    /// Validate a cppglue.toml config
    Check {
        /// Path to cppglue.toml (default: ./cppglue.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(LogLevel::from_verbosity(LogLevel::Info, cli.verbose));

    match cli.command {
        Commands::Generate {
            module,
            output,
            config,
            version,
            frontend,
            jobs,
            sources,
            compile_args,
        } => {
            let mut glue = GlueConfig::load(config.as_deref())?;
            glue.apply(Overrides {
                module_name: module,
                version,
                output_dir: output,
                frontend,
                jobs,
                sources,
                compile_args,
            });
            glue.validate()?;

            let level = LogLevel::from_verbosity(glue.log_level, cli.verbose);
            if let Err(e) = ReloadHandle::global().reload_level(level) {
                tracing::debug!(error = %e, "log level not reloaded");
            }

            let runtime = Builder::new_multi_thread()
                .thread_name("cppglue-worker")
                .enable_all()
                .build()
                .context("Failed to start async runtime")?;
            let provider = provider::from_config(&glue);
            let report = runtime.block_on(generate::run(&glue, provider))?;

            println!(
                "Generated module '{}' in {}: {} written, {} unchanged",
                glue.module_name,
                glue.output_dir.display(),
                report.written.len(),
                report.unchanged.len()
            );
        }
        Commands::Check { config } => {
            config::check(config)?;
        }
    }

    Ok(())
}
