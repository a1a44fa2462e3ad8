//! Rendering error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    /// The renderer executable could not be started.
    #[error("failed to start renderer '{executable}': {source}")]
    Spawn {
        executable: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing the graph or reading the image failed.
    #[error("renderer io error: {0}")]
    Io(#[from] std::io::Error),

    /// The renderer exited unsuccessfully.
    #[error("renderer exited with {}: {stderr}", exit_code_text(.status))]
    Failed { status: Option<i32>, stderr: String },

    /// The renderer succeeded but wrote no image.
    #[error("renderer produced no output")]
    EmptyOutput,
}

fn exit_code_text(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("status {code}"),
        None => String::from("a signal"),
    }
}
