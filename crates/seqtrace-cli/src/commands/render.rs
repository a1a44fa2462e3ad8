use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use seqtrace_config::{RenderConfig, SeqtraceConfig};
use seqtrace_graphviz::{DotRenderer, Renderer, to_dot};

use crate::cli::RenderArgs;
use crate::pipeline;

/// Handle `seqtrace render`.
pub fn handle(args: &RenderArgs, quiet: bool) -> anyhow::Result<()> {
    let config = SeqtraceConfig::load().context("failed to load seqtrace configuration")?;
    let path = run(args, &config)?;
    if !quiet {
        println!("{}", path.display());
    }
    Ok(())
}

/// Render the pipeline graph and write it to disk, returning the image path.
fn run(args: &RenderArgs, config: &SeqtraceConfig) -> anyhow::Result<PathBuf> {
    let settings = effective_settings(args, &config.render)?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| config.general.output_path(&settings.format));

    let view = pipeline::build(args.pipeline.pipeline, &args.pipeline.tokens)?;
    let renderer = DotRenderer::new(&settings.executable, &settings.format)
        .with_args(settings.args.iter().cloned());
    let image = renderer
        .render(&to_dot(view.as_ref()))
        .with_context(|| format!("failed to render graph with '{}'", settings.executable))?;

    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&output, &image)
        .with_context(|| format!("failed to write {}", output.display()))?;

    tracing::info!(path = %output.display(), bytes = image.len(), "wrote rendered graph");
    Ok(output)
}

/// Configured renderer settings with command line overrides applied.
fn effective_settings(args: &RenderArgs, base: &RenderConfig) -> anyhow::Result<RenderConfig> {
    let mut settings = base.clone();
    if let Some(format) = &args.format {
        settings.format.clone_from(format);
    }
    if let Some(executable) = &args.executable {
        settings.executable.clone_from(executable);
    }
    settings.validate()?;
    Ok(settings)
}
