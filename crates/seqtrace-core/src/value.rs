//! Traced scalar results.

use std::convert::Infallible;
use std::fmt;
use std::rc::Rc;

use crate::edge::Edge;
use crate::history::{History, TransformationStep};
use crate::snapshot::ElementSnapshot;
use crate::traced::Traced;
use crate::type_name::short_type_name;

/// A single value together with the history that produced it.
///
/// Produced by reducing operations such as `fold`, `find` or `max`.
pub struct TracedValue<T> {
    value: Rc<T>,
    history: History,
}

impl<T> Clone for TracedValue<T> {
    fn clone(&self) -> Self {
        Self {
            value: Rc::clone(&self.value),
            history: self.history.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for TracedValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TracedValue")
            .field("value", &self.value)
            .field("steps", &self.history.len())
            .finish()
    }
}

impl<T: fmt::Debug + 'static> TracedValue<T> {
    /// Lift a plain value with an empty history.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self::with_history(value, History::new())
    }

    pub(crate) fn with_history(value: T, history: History) -> Self {
        Self {
            value: Rc::new(value),
            history,
        }
    }

    #[must_use]
    pub fn value(&self) -> &T {
        &self.value
    }

    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    /// The wrapped value, cloned only if the storage is still shared with a
    /// recorded step.
    #[must_use]
    pub fn into_inner(self) -> T
    where
        T: Clone,
    {
        Rc::try_unwrap(self.value).unwrap_or_else(|shared| T::clone(&shared))
    }

    pub fn try_map<U, E, F>(&self, transform: F) -> Result<TracedValue<U>, E>
    where
        U: fmt::Debug + 'static,
        F: FnOnce(&T) -> Result<U, E>,
    {
        let mapped = transform(&self.value)?;
        tracing::trace!(operation = "map", "recorded value step");
        let step = TransformationStep::new(
            "map",
            None,
            ElementSnapshot::of_value(&self.value),
            vec![Edge::new(0, 0)],
        );
        Ok(TracedValue::with_history(mapped, self.history.appended(step)))
    }

    #[must_use]
    pub fn map<U, F>(&self, transform: F) -> TracedValue<U>
    where
        U: fmt::Debug + 'static,
        F: FnOnce(&T) -> U,
    {
        match self.try_map(|value| Ok::<_, Infallible>(transform(value))) {
            Ok(mapped) => mapped,
            Err(never) => match never {},
        }
    }
}

impl<T: fmt::Debug + 'static> Traced for TracedValue<T> {
    fn history(&self) -> &History {
        &self.history
    }

    fn display_elements(&self) -> Vec<String> {
        vec![format!("{:?}", self.value)]
    }

    fn declared_type_name(&self) -> String {
        short_type_name::<T>()
    }
}
