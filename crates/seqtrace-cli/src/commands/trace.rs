use seqtrace_core::{Edge, Traced};
use serde::Serialize;

use crate::cli::PipelineArgs;
use crate::pipeline;

/// JSON view of a traced pipeline.
#[derive(Debug, Serialize)]
pub struct TraceSummary {
    pub steps: Vec<StepSummary>,
    pub result: StateSummary,
}

#[derive(Debug, Serialize)]
pub struct StepSummary {
    pub operation: String,
    pub input: StateSummary,
    pub edges: Vec<Edge>,
}

#[derive(Debug, Serialize)]
pub struct StateSummary {
    pub type_name: String,
    pub elements: Vec<String>,
}

impl TraceSummary {
    pub fn of(view: &dyn Traced) -> Self {
        let steps = view
            .history()
            .iter()
            .map(|step| StepSummary {
                operation: step.label(),
                input: StateSummary {
                    type_name: step.source_type_name().to_string(),
                    elements: step.source().descriptions().collect(),
                },
                edges: step.edges().to_vec(),
            })
            .collect();

        Self {
            steps,
            result: StateSummary {
                type_name: view.declared_type_name(),
                elements: view.display_elements(),
            },
        }
    }
}

/// Handle `seqtrace trace`.
pub fn handle(args: &PipelineArgs) -> anyhow::Result<()> {
    let view = pipeline::build(args.pipeline, &args.tokens)?;
    let summary = TraceSummary::of(view.as_ref());
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
