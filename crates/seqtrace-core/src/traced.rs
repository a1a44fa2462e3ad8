//! The interface shared by scalar and sequence views, and the lift into one.

use std::fmt;

use crate::history::History;
use crate::sequence::TracedSequence;

/// What a graph serializer needs from a traced view.
///
/// Implemented by [`TracedSequence`] and [`crate::TracedValue`]. Object safe,
/// so heterogeneous pipelines can be handled as `Box<dyn Traced>`.
pub trait Traced {
    /// Steps recorded so far, oldest first.
    fn history(&self) -> &History;

    /// Debug rendering of the current elements (one entry for a scalar).
    fn display_elements(&self) -> Vec<String>;

    /// Type name of the current elements.
    fn declared_type_name(&self) -> String;
}

/// Lifts any iterable into a [`TracedSequence`] with an empty history.
pub trait IntoTraced: IntoIterator + Sized
where
    Self::Item: fmt::Debug + 'static,
{
    fn traced(self) -> TracedSequence<Self::Item> {
        self.into_iter().collect()
    }
}

impl<I> IntoTraced for I
where
    I: IntoIterator,
    I::Item: fmt::Debug + 'static,
{
}
