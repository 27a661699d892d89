//! Generate command implementation
//!
//! Sources are analyzed on blocking workers and folded into one model in
//! input order. The three emitters then run concurrently over the shared
//! model, and the artifacts are materialized concurrently, one task per path.

use crate::config::GlueConfig;
use crate::provider::AstProvider;
use anyhow::{Context, Result};
use cppglue_codegen::{
    ArtifactPaths, ArtifactSet, MaterializeReport, Materializer, StubFiles, TemplateContext,
    TemplateSet, naming::function_name, render_bindings, render_scaffold,
};
use cppglue_core::{BindingModel, DeclarationCollector, ModelAggregator, UnitResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::{JoinSet, spawn_blocking};

/// Run the whole pipeline for a validated config.
pub async fn run(config: &GlueConfig, provider: Arc<dyn AstProvider>) -> Result<MaterializeReport> {
    tracing::info!(
        module = %config.module_name,
        sources = config.sources.len(),
        provider = provider.name(),
        "generating bindings"
    );

    let model = Arc::new(analyze(config, provider).await?);
    warn_model_inconsistencies(&model);

    let templates = match &config.template_dir {
        Some(dir) => TemplateSet::from_dir(dir)?,
        None => TemplateSet::embedded(),
    };
    let ctx = TemplateContext::new(&config.module_name, &config.version);
    let set = emit(Arc::clone(&model), templates, ctx, &config.output_dir).await?;

    materialize(set).await
}

/// Analyze every source and aggregate the results in input order.
async fn analyze(config: &GlueConfig, provider: Arc<dyn AstProvider>) -> Result<BindingModel> {
    let compile_args = Arc::new(config.compile_args.clone());
    let jobs = config
        .jobs
        .map_or(Semaphore::MAX_PERMITS, |jobs| jobs.min(Semaphore::MAX_PERMITS));
    let permits = Arc::new(Semaphore::new(jobs));

    let handles: Vec<_> = config
        .sources
        .iter()
        .cloned()
        .map(|source| {
            let provider = Arc::clone(&provider);
            let compile_args = Arc::clone(&compile_args);
            let permits = Arc::clone(&permits);
            tokio::spawn(async move {
                let _permit = permits.acquire_owned().await?;
                spawn_blocking(move || analyze_unit(provider.as_ref(), source, &compile_args))
                    .await
                    .context("analysis task panicked")?
            })
        })
        .collect();

    let aggregator = ModelAggregator::with_policy(config.duplicate_policy);
    for (source, handle) in config.sources.iter().zip(handles) {
        let unit = handle
            .await
            .context("analysis task panicked")?
            .with_context(|| format!("Failed to analyze {}", source.display()))?;
        aggregator.append(unit);
    }

    Ok(aggregator.finish())
}

fn analyze_unit(
    provider: &dyn AstProvider,
    source: PathBuf,
    compile_args: &[String],
) -> Result<UnitResult> {
    let sightings = provider.analyze(&source, compile_args)?;
    let unit = DeclarationCollector::collect(&sightings);
    if unit.is_empty() {
        tracing::warn!(source = %source.display(), "no user declarations or includes found");
    }

    tracing::info!(
        source = %source.display(),
        types = unit.types.len(),
        functions = unit.functions.len(),
        headers = unit.headers.len(),
        "analyzed"
    );
    Ok(unit)
}

/// Log the model problems the emitters silently work around.
fn warn_model_inconsistencies(model: &BindingModel) {
    for method in model.orphaned_methods() {
        tracing::warn!(
            method = %method.name.qualified,
            owner = method.owner.as_ref().map_or("", |o| o.qualified.as_str()),
            "method owner was not collected; method omitted from bindings"
        );
    }

    for function in model.functions.iter().filter(|f| function_name(f).is_none()) {
        tracing::debug!(
            function = %function.name.qualified,
            "no Python name for this function; omitted from bindings"
        );
    }

    for name in model.ambiguous_type_names() {
        tracing::warn!(
            %name,
            "several collected types share this name; stub annotations cannot tell them apart"
        );
    }
}

/// Run the emitters concurrently and collect their artifacts.
async fn emit(
    model: Arc<BindingModel>,
    templates: TemplateSet,
    ctx: TemplateContext,
    output_dir: &Path,
) -> Result<ArtifactSet> {
    let module = ctx.module_name.clone();

    let bindings = spawn_blocking({
        let model = Arc::clone(&model);
        let module = module.clone();
        move || render_bindings(&model, &module)
    });
    let stubs = spawn_blocking({
        let model = Arc::clone(&model);
        let module = module.clone();
        move || StubFiles::render(&model, &module)
    });
    let scaffold = spawn_blocking(move || render_scaffold(&model, &templates, &ctx));

    let (bindings, stubs, scaffold) =
        tokio::try_join!(bindings, stubs, scaffold).context("emitter task panicked")?;

    let set = ArtifactSet::assemble(
        &ArtifactPaths::new(output_dir, &module),
        bindings,
        stubs,
        scaffold?,
    )?;
    tracing::debug!(artifacts = set.len(), "rendered artifacts");
    Ok(set)
}

/// Write every artifact, one blocking task per path.
async fn materialize(set: ArtifactSet) -> Result<MaterializeReport> {
    let materializer = Arc::new(Materializer::new());
    let mut tasks = JoinSet::new();

    for artifact in set.into_vec() {
        let materializer = Arc::clone(&materializer);
        tasks.spawn_blocking(move || {
            materializer.write_if_different(&artifact.path, &artifact.content)
        });
    }

    while let Some(result) = tasks.join_next().await {
        result.context("materializer task panicked")??;
    }

    let report = materializer.report();
    tracing::info!(
        total = report.total(),
        written = report.written.len(),
        unchanged = report.unchanged.len(),
        "materialized artifacts"
    );
    Ok(report)
}
