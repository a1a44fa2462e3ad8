//! Provenance edges between two consecutive states of a traced view.

use serde::{Deserialize, Serialize};

/// Links an input position to an output position of one transformation step.
///
/// `source == None` marks a synthetic edge: the output element has no real
/// predecessor (e.g. the `None` produced by `find` when nothing matched). The
/// edge is still recorded so the graph keeps its positional alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Index into the step's input elements.
    pub source: Option<usize>,

    /// Index into the step's output elements.
    pub target: usize,
}

impl Edge {
    #[must_use]
    pub const fn new(source: usize, target: usize) -> Self {
        Self {
            source: Some(source),
            target,
        }
    }

    /// An edge without a source element.
    #[must_use]
    pub const fn synthetic(target: usize) -> Self {
        Self {
            source: None,
            target,
        }
    }

    #[must_use]
    pub const fn is_synthetic(&self) -> bool {
        self.source.is_none()
    }
}
