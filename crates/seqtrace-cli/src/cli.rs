use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Top-level CLI parser for the `seqtrace` binary.
#[derive(Debug, Parser)]
#[command(
    name = "seqtrace",
    version,
    about = "Trace a sequence pipeline and draw where every element came from"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Print the pipeline's provenance graph as DOT.
    Dot(PipelineArgs),
    /// Render the provenance graph to an image file.
    Render(RenderArgs),
    /// Print the recorded steps as JSON.
    Trace(PipelineArgs),
}

/// Which demo pipeline to run over the input tokens.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum PipelineKind {
    /// Parse, deduplicate, sort, multiply.
    Product,
    /// Parse, sum.
    Sum,
    /// Parse, deduplicate, sort.
    Distinct,
}

#[derive(Clone, Debug, Args)]
pub struct PipelineArgs {
    /// Input tokens; those that do not parse as integers are filtered out.
    #[arg(required = true, num_args = 1..)]
    pub tokens: Vec<String>,

    #[arg(long, value_enum, default_value_t = PipelineKind::Product)]
    pub pipeline: PipelineKind,
}

#[derive(Clone, Debug, Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub pipeline: PipelineArgs,

    /// Image path (defaults to `<general.output_dir>/<general.file_stem>.<format>`).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format passed to the renderer as `-T<format>`.
    #[arg(long)]
    pub format: Option<String>,

    /// Renderer executable (defaults to `render.executable`).
    #[arg(long)]
    pub executable: Option<String>,
}
