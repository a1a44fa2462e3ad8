//! Transformation steps and the append-only history that orders them.

use std::rc::Rc;

use crate::edge::Edge;
use crate::snapshot::ElementSnapshot;

/// One recorded operation.
///
/// `source` is the collection the operation consumed, not what it produced.
/// Each edge's `target` indexes the output, which is the next step's source (or
/// the view's final elements for the last step).
#[derive(Debug, Clone)]
pub struct TransformationStep {
    name: String,
    parameter: Option<String>,
    source: ElementSnapshot,
    edges: Vec<Edge>,
}

impl TransformationStep {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        parameter: Option<String>,
        source: ElementSnapshot,
        edges: Vec<Edge>,
    ) -> Self {
        Self {
            name: name.into(),
            parameter,
            source,
            edges,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn parameter(&self) -> Option<&str> {
        self.parameter.as_deref()
    }

    /// Operation name, followed by `(parameter)` when one was given.
    #[must_use]
    pub fn label(&self) -> String {
        match &self.parameter {
            Some(parameter) => format!("{}({parameter})", self.name),
            None => self.name.clone(),
        }
    }

    #[must_use]
    pub const fn source(&self) -> &ElementSnapshot {
        &self.source
    }

    /// Element type name of the step's input.
    #[must_use]
    pub fn source_type_name(&self) -> &str {
        self.source.type_name()
    }

    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}

/// Ordered steps applied to a traced view since it was lifted.
///
/// Steps are reference counted, so cloning a history (or forking a chain)
/// copies only pointers. [`History::appended`] never touches `self`.
#[derive(Debug, Clone, Default)]
pub struct History {
    steps: Vec<Rc<TransformationStep>>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A new history holding these steps followed by `step`.
    #[must_use]
    pub fn appended(&self, step: TransformationStep) -> Self {
        let mut steps = Vec::with_capacity(self.steps.len() + 1);
        steps.extend(self.steps.iter().cloned());
        steps.push(Rc::new(step));
        Self { steps }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TransformationStep> {
        self.steps.get(index).map(|step| &**step)
    }

    #[must_use]
    pub fn last(&self) -> Option<&TransformationStep> {
        self.steps.last().map(|step| &**step)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &TransformationStep> {
        self.steps.iter().map(|step| &**step)
    }

    /// Whether both histories hold the very same step objects.
    #[must_use]
    pub fn shares_steps_with(&self, other: &Self) -> bool {
        self.steps.len() == other.steps.len()
            && self
                .steps
                .iter()
                .zip(&other.steps)
                .all(|(a, b)| Rc::ptr_eq(a, b))
    }
}
