//! Rendering DOT text into an image through an external executable.

use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

use seqtrace_core::Traced;

use crate::dot::to_dot;
use crate::error::RenderError;

/// Turns DOT text into encoded image bytes.
pub trait Renderer {
    fn render(&self, dot: &str) -> Result<Vec<u8>, RenderError>;
}

/// Runs a Graphviz-compatible executable as `<executable> [args...] -T<format>`,
/// feeding the graph on stdin and collecting the image from stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotRenderer {
    executable: PathBuf,
    args: Vec<String>,
    format: String,
}

impl DotRenderer {
    #[must_use]
    pub fn new(executable: impl Into<PathBuf>, format: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
            args: Vec::new(),
            format: format.into(),
        }
    }

    /// Extra arguments passed before `-T<format>` (e.g. `-Gdpi=150`).
    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    #[must_use]
    pub fn format(&self) -> &str {
        &self.format
    }
}

impl Default for DotRenderer {
    fn default() -> Self {
        Self::new("dot", "png")
    }
}

impl Renderer for DotRenderer {
    fn render(&self, dot: &str) -> Result<Vec<u8>, RenderError> {
        tracing::debug!(
            executable = %self.executable.display(),
            format = %self.format,
            bytes = dot.len(),
            "spawning renderer"
        );

        let mut child = Command::new(&self.executable)
            .args(&self.args)
            .arg(format!("-T{}", self.format))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| RenderError::Spawn {
                executable: self.executable.display().to_string(),
                source,
            })?;

        // stdin is written on its own thread while stdout and stderr drain
        // here; the renderer may emit output before reading all of its input.
        // The writer drops stdin when done, closing the pipe. A renderer that
        // exits early is reported through its exit status, not a broken pipe.
        let stdin = child.stdin.take();
        let (output, written) = thread::scope(|scope| {
            let writer = scope.spawn(move || match stdin {
                Some(mut stdin) => stdin.write_all(dot.as_bytes()),
                None => Ok(()),
            });
            let output = child.wait_with_output();
            let written = writer
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("stdin writer panicked")));
            (output, written)
        });
        if let Err(error) = written
            && error.kind() != ErrorKind::BrokenPipe
        {
            return Err(error.into());
        }
        let output = output?;
        if !output.status.success() {
            return Err(RenderError::Failed {
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        if output.stdout.is_empty() {
            return Err(RenderError::EmptyOutput);
        }

        tracing::debug!(bytes = output.stdout.len(), "renderer produced image");
        Ok(output.stdout)
    }
}

/// Render a traced view, logging and swallowing any failure.
///
/// `None` means no image could be produced; the trace itself is unaffected.
pub fn render_image<R, V>(renderer: &R, view: &V) -> Option<Vec<u8>>
where
    R: Renderer + ?Sized,
    V: Traced + ?Sized,
{
    match renderer.render(&to_dot(view)) {
        Ok(image) => Some(image),
        Err(error) => {
            tracing::warn!(%error, "graph rendering failed");
            None
        }
    }
}
