use seqtrace_graphviz::to_dot;

use crate::cli::PipelineArgs;
use crate::pipeline;

/// Handle `seqtrace dot`.
pub fn handle(args: &PipelineArgs) -> anyhow::Result<()> {
    println!("{}", run(args)?);
    Ok(())
}

fn run(args: &PipelineArgs) -> anyhow::Result<String> {
    let view = pipeline::build(args.pipeline, &args.tokens)?;
    Ok(to_dot(view.as_ref()))
}
