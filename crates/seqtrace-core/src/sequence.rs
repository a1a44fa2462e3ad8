//! Traced sequences and their recorded operations.
//!
//! Every operation materializes its output, derives one [`Edge`] per
//! provenance link and returns a new view with one more step. Operations that
//! take a callback come in pairs: `try_<op>` propagates the callback's error
//! untouched (and records nothing), `<op>` is the infallible convenience built
//! on top of it.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use crate::edge::Edge;
use crate::history::{History, TransformationStep};
use crate::snapshot::ElementSnapshot;
use crate::traced::Traced;
use crate::type_name::short_type_name;
use crate::value::TracedValue;

/// Unwraps the result of a `try_*` operation whose callback cannot fail.
fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

/// Parameter text for count-taking operations, omitted for the default of 1.
fn count_parameter(count: usize) -> Option<String> {
    (count != 1).then(|| count.to_string())
}

/// An immutable, materialized sequence together with its transformation
/// history.
pub struct TracedSequence<T> {
    elements: Rc<Vec<T>>,
    history: History,
}

impl<T> Clone for TracedSequence<T> {
    fn clone(&self) -> Self {
        Self {
            elements: Rc::clone(&self.elements),
            history: self.history.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for TracedSequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TracedSequence")
            .field("elements", &self.elements)
            .field("steps", &self.history.len())
            .finish()
    }
}

impl<T: fmt::Debug + 'static> From<Vec<T>> for TracedSequence<T> {
    fn from(elements: Vec<T>) -> Self {
        Self::new(elements)
    }
}

impl<T: fmt::Debug + 'static> FromIterator<T> for TracedSequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T: fmt::Debug + 'static> TracedSequence<T> {
    /// Lift `elements` into a view with an empty history.
    #[must_use]
    pub fn new(elements: Vec<T>) -> Self {
        Self::with_history(elements, History::new())
    }

    pub(crate) fn with_history(elements: Vec<T>, history: History) -> Self {
        Self {
            elements: Rc::new(elements),
            history,
        }
    }

    #[must_use]
    pub fn elements(&self) -> &[T] {
        &self.elements
    }

    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The current elements, cloned out of the shared storage.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.elements.to_vec()
    }

    fn step(&self, name: &str, parameter: Option<String>, edges: Vec<Edge>) -> TransformationStep {
        TransformationStep::new(
            name,
            parameter,
            ElementSnapshot::of_sequence(&self.elements),
            edges,
        )
    }

    /// Commit an operation whose output elements are given with the input
    /// position each one came from.
    fn record<U: fmt::Debug + 'static>(
        &self,
        name: &str,
        parameter: Option<String>,
        pairs: Vec<(usize, U)>,
    ) -> TracedSequence<U> {
        let mut edges = Vec::with_capacity(pairs.len());
        let mut elements = Vec::with_capacity(pairs.len());
        for (target, (source, element)) in pairs.into_iter().enumerate() {
            edges.push(Edge::new(source, target));
            elements.push(element);
        }
        self.record_with_edges(name, parameter, elements, edges)
    }

    fn record_with_edges<U: fmt::Debug + 'static>(
        &self,
        name: &str,
        parameter: Option<String>,
        elements: Vec<U>,
        edges: Vec<Edge>,
    ) -> TracedSequence<U> {
        tracing::trace!(
            operation = name,
            inputs = self.len(),
            outputs = elements.len(),
            edges = edges.len(),
            "recorded sequence step"
        );
        let history = self.history.appended(self.step(name, parameter, edges));
        TracedSequence::with_history(elements, history)
    }

    /// Commit an operation that reduces the sequence to a single value.
    fn conclude<U: fmt::Debug + 'static>(
        &self,
        name: &str,
        parameter: Option<String>,
        value: U,
        edges: Vec<Edge>,
    ) -> TracedValue<U> {
        tracing::trace!(
            operation = name,
            inputs = self.len(),
            edges = edges.len(),
            "recorded value step"
        );
        let history = self.history.appended(self.step(name, parameter, edges));
        TracedValue::with_history(value, history)
    }

    /// Edge from `found` to the single output slot, synthetic when nothing
    /// was found.
    fn lookup_edges(found: Option<usize>) -> Vec<Edge> {
        vec![found.map_or_else(|| Edge::synthetic(0), |index| Edge::new(index, 0))]
    }

    /// Every input contributes to the single output slot. An empty input still
    /// gets one synthetic edge so the result has a place in the graph.
    fn contributing_edges(&self) -> Vec<Edge> {
        if self.is_empty() {
            return vec![Edge::synthetic(0)];
        }
        (0..self.len()).map(|index| Edge::new(index, 0)).collect()
    }

    fn enumerated(
        &self,
    ) -> impl DoubleEndedIterator<Item = (usize, T)> + ExactSizeIterator + '_
    where
        T: Clone,
    {
        self.elements.iter().cloned().enumerate()
    }

    // -- element-wise ------------------------------------------------------

    pub fn try_map<U, E, F>(&self, mut transform: F) -> Result<TracedSequence<U>, E>
    where
        U: fmt::Debug + 'static,
        F: FnMut(&T) -> Result<U, E>,
    {
        let pairs = self
            .elements
            .iter()
            .enumerate()
            .map(|(index, element)| transform(element).map(|mapped| (index, mapped)))
            .collect::<Result<Vec<_>, E>>()?;
        Ok(self.record("map", None, pairs))
    }

    #[must_use]
    pub fn map<U, F>(&self, mut transform: F) -> TracedSequence<U>
    where
        U: fmt::Debug + 'static,
        F: FnMut(&T) -> U,
    {
        infallible(self.try_map(|element| Ok(transform(element))))
    }

    pub fn try_filter<E, F>(&self, mut predicate: F) -> Result<Self, E>
    where
        T: Clone,
        F: FnMut(&T) -> Result<bool, E>,
    {
        let mut pairs = Vec::new();
        for (index, element) in self.elements.iter().enumerate() {
            if predicate(element)? {
                pairs.push((index, element.clone()));
            }
        }
        Ok(self.record("filter", None, pairs))
    }

    #[must_use]
    pub fn filter<F>(&self, mut predicate: F) -> Self
    where
        T: Clone,
        F: FnMut(&T) -> bool,
    {
        infallible(self.try_filter(|element| Ok(predicate(element))))
    }

    pub fn try_filter_map<U, E, F>(&self, mut transform: F) -> Result<TracedSequence<U>, E>
    where
        U: fmt::Debug + 'static,
        F: FnMut(&T) -> Result<Option<U>, E>,
    {
        let mut pairs = Vec::new();
        for (index, element) in self.elements.iter().enumerate() {
            if let Some(mapped) = transform(element)? {
                pairs.push((index, mapped));
            }
        }
        Ok(self.record("filter_map", None, pairs))
    }

    #[must_use]
    pub fn filter_map<U, F>(&self, mut transform: F) -> TracedSequence<U>
    where
        U: fmt::Debug + 'static,
        F: FnMut(&T) -> Option<U>,
    {
        infallible(self.try_filter_map(|element| Ok(transform(element))))
    }

    pub fn try_flat_map<I, E, F>(&self, transform: F) -> Result<TracedSequence<I::Item>, E>
    where
        I: IntoIterator,
        I::Item: fmt::Debug + 'static,
        F: FnMut(&T) -> Result<I, E>,
    {
        self.expand("flat_map", transform)
    }

    #[must_use]
    pub fn flat_map<I, F>(&self, mut transform: F) -> TracedSequence<I::Item>
    where
        I: IntoIterator,
        I::Item: fmt::Debug + 'static,
        F: FnMut(&T) -> I,
    {
        infallible(self.try_flat_map(|element| Ok(transform(element))))
    }

    /// Concatenate the elements, which are themselves iterable.
    #[must_use]
    pub fn flatten(&self) -> TracedSequence<<T as IntoIterator>::Item>
    where
        T: Clone + IntoIterator,
        <T as IntoIterator>::Item: fmt::Debug + 'static,
    {
        infallible(self.expand("flatten", |element: &T| Ok(element.clone())))
    }

    fn expand<I, E, F>(&self, name: &str, mut transform: F) -> Result<TracedSequence<I::Item>, E>
    where
        I: IntoIterator,
        I::Item: fmt::Debug + 'static,
        F: FnMut(&T) -> Result<I, E>,
    {
        let mut pairs = Vec::new();
        for (index, element) in self.elements.iter().enumerate() {
            pairs.extend(transform(element)?.into_iter().map(|item| (index, item)));
        }
        Ok(self.record(name, None, pairs))
    }

    // -- reordering --------------------------------------------------------

    /// Stable sort with a fallible comparator.
    ///
    /// Once the comparator fails it is not called again; the error is returned
    /// after the sort unwinds and no step is recorded.
    pub fn try_sorted_by<E, F>(&self, compare: F) -> Result<Self, E>
    where
        T: Clone,
        F: FnMut(&T, &T) -> Result<Ordering, E>,
    {
        self.sort_as("sorted_by", compare)
    }

    #[must_use]
    pub fn sorted_by<F>(&self, mut compare: F) -> Self
    where
        T: Clone,
        F: FnMut(&T, &T) -> Ordering,
    {
        infallible(self.try_sorted_by(|a, b| Ok(compare(a, b))))
    }

    #[must_use]
    pub fn sorted_by_key<K, F>(&self, mut key: F) -> Self
    where
        T: Clone,
        K: Ord,
        F: FnMut(&T) -> K,
    {
        infallible(self.sort_as("sorted_by_key", |a: &T, b: &T| Ok(key(a).cmp(&key(b)))))
    }

    #[must_use]
    pub fn sorted(&self) -> Self
    where
        T: Clone + Ord,
    {
        infallible(self.sort_as("sorted", |a: &T, b: &T| Ok(a.cmp(b))))
    }

    fn sort_as<E, F>(&self, name: &str, mut compare: F) -> Result<Self, E>
    where
        T: Clone,
        F: FnMut(&T, &T) -> Result<Ordering, E>,
    {
        let mut failure = None;
        let mut order: Vec<usize> = (0..self.len()).collect();
        order.sort_by(|&a, &b| {
            if failure.is_some() {
                return Ordering::Equal;
            }
            compare(&self.elements[a], &self.elements[b]).unwrap_or_else(|error| {
                failure = Some(error);
                Ordering::Equal
            })
        });
        if let Some(error) = failure {
            return Err(error);
        }
        let pairs = order
            .into_iter()
            .map(|index| (index, self.elements[index].clone()))
            .collect();
        Ok(self.record(name, None, pairs))
    }

    #[must_use]
    pub fn reversed(&self) -> Self
    where
        T: Clone,
    {
        let pairs = self.enumerated().rev().collect();
        self.record("reversed", None, pairs)
    }

    // -- slicing -----------------------------------------------------------

    /// Everything but the first `count` elements, i.e. the suffix starting at
    /// position `count`.
    #[doc(alias = "suffix_from")]
    #[must_use]
    pub fn drop_first(&self, count: usize) -> Self
    where
        T: Clone,
    {
        let pairs = self.enumerated().skip(count).collect();
        self.record("drop_first", count_parameter(count), pairs)
    }

    /// Everything but the last `count` elements.
    #[must_use]
    pub fn drop_last(&self, count: usize) -> Self
    where
        T: Clone,
    {
        let kept = self.len().saturating_sub(count);
        let pairs = self.enumerated().take(kept).collect();
        self.record("drop_last", count_parameter(count), pairs)
    }

    /// At most the first `count` elements.
    #[must_use]
    pub fn prefix(&self, count: usize) -> Self
    where
        T: Clone,
    {
        let pairs = self.enumerated().take(count).collect();
        self.record("prefix", Some(count.to_string()), pairs)
    }

    /// At most the last `count` elements.
    #[must_use]
    pub fn suffix(&self, count: usize) -> Self
    where
        T: Clone,
    {
        let start = self.len().saturating_sub(count);
        let pairs = self.enumerated().skip(start).collect();
        self.record("suffix", Some(count.to_string()), pairs)
    }

    /// Skip the leading run of elements matching `predicate`. The predicate is
    /// not called again once it returns `false`.
    pub fn try_drop_while<E, F>(&self, mut predicate: F) -> Result<Self, E>
    where
        T: Clone,
        F: FnMut(&T) -> Result<bool, E>,
    {
        let mut start = self.len();
        for (index, element) in self.elements.iter().enumerate() {
            if !predicate(element)? {
                start = index;
                break;
            }
        }
        let pairs = self.enumerated().skip(start).collect();
        Ok(self.record("drop_while", None, pairs))
    }

    #[must_use]
    pub fn drop_while<F>(&self, mut predicate: F) -> Self
    where
        T: Clone,
        F: FnMut(&T) -> bool,
    {
        infallible(self.try_drop_while(|element| Ok(predicate(element))))
    }

    /// Keep the leading run of elements matching `predicate`. The predicate is
    /// not called again once it returns `false`.
    pub fn try_take_while<E, F>(&self, mut predicate: F) -> Result<Self, E>
    where
        T: Clone,
        F: FnMut(&T) -> Result<bool, E>,
    {
        let mut pairs = Vec::new();
        for (index, element) in self.elements.iter().enumerate() {
            if !predicate(element)? {
                break;
            }
            pairs.push((index, element.clone()));
        }
        Ok(self.record("take_while", None, pairs))
    }

    #[must_use]
    pub fn take_while<F>(&self, mut predicate: F) -> Self
    where
        T: Clone,
        F: FnMut(&T) -> bool,
    {
        infallible(self.try_take_while(|element| Ok(predicate(element))))
    }

    // -- de-duplication ----------------------------------------------------

    /// Keep the first occurrence of every value.
    ///
    /// Each repeated occurrence gets an edge to the output position of its
    /// first occurrence, so the step has one edge per input element and
    /// several edges may converge on the same target.
    #[must_use]
    pub fn unique(&self) -> Self
    where
        T: Clone + Eq + Hash,
    {
        let mut seen: HashMap<&T, usize> = HashMap::with_capacity(self.len());
        let mut edges = Vec::with_capacity(self.len());
        let mut kept = Vec::new();
        for (index, element) in self.elements.iter().enumerate() {
            let target = *seen.entry(element).or_insert_with(|| {
                kept.push(element.clone());
                kept.len() - 1
            });
            edges.push(Edge::new(index, target));
        }
        self.record_with_edges("unique", None, kept, edges)
    }

    // -- lookups -----------------------------------------------------------

    /// The first element matching `predicate`. Absent results keep a
    /// synthetic edge.
    pub fn try_find<E, F>(&self, mut predicate: F) -> Result<TracedValue<Option<T>>, E>
    where
        T: Clone,
        F: FnMut(&T) -> Result<bool, E>,
    {
        let mut found = None;
        for (index, element) in self.elements.iter().enumerate() {
            if predicate(element)? {
                found = Some(index);
                break;
            }
        }
        let value = found.map(|index| self.elements[index].clone());
        Ok(self.conclude("find", None, value, Self::lookup_edges(found)))
    }

    #[must_use]
    pub fn find<F>(&self, mut predicate: F) -> TracedValue<Option<T>>
    where
        T: Clone,
        F: FnMut(&T) -> bool,
    {
        infallible(self.try_find(|element| Ok(predicate(element))))
    }

    #[must_use]
    pub fn first(&self) -> TracedValue<Option<T>>
    where
        T: Clone,
    {
        let found = (!self.is_empty()).then_some(0);
        let value = self.elements.first().cloned();
        self.conclude("first", None, value, Self::lookup_edges(found))
    }

    /// Whether any element matches `predicate`; the edge points at the first
    /// match.
    pub fn try_any<E, F>(&self, predicate: F) -> Result<TracedValue<bool>, E>
    where
        F: FnMut(&T) -> Result<bool, E>,
    {
        self.search("any", None, predicate)
    }

    #[must_use]
    pub fn any<F>(&self, mut predicate: F) -> TracedValue<bool>
    where
        F: FnMut(&T) -> bool,
    {
        infallible(self.try_any(|element| Ok(predicate(element))))
    }

    #[must_use]
    pub fn contains(&self, needle: &T) -> TracedValue<bool>
    where
        T: PartialEq,
    {
        infallible(self.search("contains", Some(format!("{needle:?}")), |element: &T| {
            Ok(element == needle)
        }))
    }

    fn search<E, F>(
        &self,
        name: &str,
        parameter: Option<String>,
        mut predicate: F,
    ) -> Result<TracedValue<bool>, E>
    where
        F: FnMut(&T) -> Result<bool, E>,
    {
        let mut found = None;
        for (index, element) in self.elements.iter().enumerate() {
            if predicate(element)? {
                found = Some(index);
                break;
            }
        }
        Ok(self.conclude(name, parameter, found.is_some(), Self::lookup_edges(found)))
    }

    /// The last maximal element.
    #[must_use]
    pub fn max(&self) -> TracedValue<Option<T>>
    where
        T: Clone + Ord,
    {
        let found = self
            .elements
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.cmp(b.1))
            .map(|(index, _)| index);
        let value = found.map(|index| self.elements[index].clone());
        self.conclude("max", None, value, Self::lookup_edges(found))
    }

    /// The first minimal element.
    #[must_use]
    pub fn min(&self) -> TracedValue<Option<T>>
    where
        T: Clone + Ord,
    {
        let found = self
            .elements
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.cmp(b.1))
            .map(|(index, _)| index);
        let value = found.map(|index| self.elements[index].clone());
        self.conclude("min", None, value, Self::lookup_edges(found))
    }

    // -- reductions --------------------------------------------------------

    /// Fold into a single value. Every input element gets an edge to the
    /// result; the intermediate accumulators are not traced.
    pub fn try_fold<A, E, F>(&self, initial: A, mut combine: F) -> Result<TracedValue<A>, E>
    where
        A: fmt::Debug + 'static,
        F: FnMut(A, &T) -> Result<A, E>,
    {
        let mut accumulator = initial;
        for element in self.elements.iter() {
            accumulator = combine(accumulator, element)?;
        }
        let edges = (0..self.len()).map(|index| Edge::new(index, 0)).collect();
        Ok(self.conclude("fold", None, accumulator, edges))
    }

    #[must_use]
    pub fn fold<A, F>(&self, initial: A, mut combine: F) -> TracedValue<A>
    where
        A: fmt::Debug + 'static,
        F: FnMut(A, &T) -> A,
    {
        infallible(self.try_fold(initial, |accumulator, element| {
            Ok(combine(accumulator, element))
        }))
    }

    /// Fold using the first element as the initial value; `None` when empty.
    pub fn try_reduce<E, F>(&self, mut combine: F) -> Result<TracedValue<Option<T>>, E>
    where
        T: Clone,
        F: FnMut(T, &T) -> Result<T, E>,
    {
        let mut elements = self.elements.iter();
        let value = match elements.next() {
            Some(first) => {
                let mut accumulator = first.clone();
                for element in elements {
                    accumulator = combine(accumulator, element)?;
                }
                Some(accumulator)
            }
            None => None,
        };
        Ok(self.conclude("reduce", None, value, self.contributing_edges()))
    }

    #[must_use]
    pub fn reduce<F>(&self, mut combine: F) -> TracedValue<Option<T>>
    where
        T: Clone,
        F: FnMut(T, &T) -> T,
    {
        infallible(self.try_reduce(|accumulator, element| Ok(combine(accumulator, element))))
    }

    #[must_use]
    pub fn count(&self) -> TracedValue<usize> {
        self.conclude("count", None, self.len(), self.contributing_edges())
    }

    /// Concatenate string elements with `separator` between them.
    #[must_use]
    pub fn joined(&self, separator: &str) -> TracedValue<String>
    where
        T: AsRef<str>,
    {
        let joined = self
            .elements
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<&str>>()
            .join(separator);
        self.conclude(
            "joined",
            Some(format!("{separator:?}")),
            joined,
            self.contributing_edges(),
        )
    }
}

impl<T: fmt::Debug + 'static> Traced for TracedSequence<T> {
    fn history(&self) -> &History {
        &self.history
    }

    fn display_elements(&self) -> Vec<String> {
        self.elements.iter().map(|element| format!("{element:?}")).collect()
    }

    fn declared_type_name(&self) -> String {
        short_type_name::<T>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::traced::IntoTraced;

    fn last_edges<V: Traced>(view: &V) -> Vec<Edge> {
        view.history()
            .last()
            .map(|step| step.edges().to_vec())
            .unwrap_or_default()
    }

    fn last_label<V: Traced>(view: &V) -> Option<String> {
        view.history().last().map(TransformationStep::label)
    }

    fn pairs(edges: &[(usize, usize)]) -> Vec<Edge> {
        edges
            .iter()
            .map(|&(source, target)| Edge::new(source, target))
            .collect()
    }

    #[test]
    fn map_links_each_index_to_itself() {
        let mapped = vec![1, 2, 3].traced().map(|x| x * 10);
        assert_eq!(mapped.elements(), &[10, 20, 30]);
        assert_eq!(last_edges(&mapped), pairs(&[(0, 0), (1, 1), (2, 2)]));
    }

    #[test]
    fn filter_reindexes_kept_elements_densely() {
        let even = vec![1, 2, 3, 4, 6].traced().filter(|x| x % 2 == 0);
        assert_eq!(even.elements(), &[2, 4, 6]);
        assert_eq!(last_edges(&even), pairs(&[(1, 0), (3, 1), (4, 2)]));
    }

    #[test]
    fn filter_map_links_only_produced_values() {
        let parsed = vec!["1", "x", "3"].traced().filter_map(|s| s.parse::<i32>().ok());
        assert_eq!(parsed.elements(), &[1, 3]);
        assert_eq!(last_edges(&parsed), pairs(&[(0, 0), (2, 1)]));
    }

    #[test]
    fn flat_map_shares_source_across_produced_elements() {
        let expanded = vec![2_usize, 0, 1].traced().flat_map(|&n| vec![n; n]);
        assert_eq!(expanded.elements(), &[2, 2, 1]);
        assert_eq!(last_edges(&expanded), pairs(&[(0, 0), (0, 1), (2, 2)]));
    }

    #[test]
    fn flatten_concatenates_inner_collections() {
        let flat = vec![vec!['a', 'b'], vec![], vec!['c']].traced().flatten();
        assert_eq!(flat.elements(), &['a', 'b', 'c']);
        assert_eq!(last_edges(&flat), pairs(&[(0, 0), (0, 1), (2, 2)]));
        assert_eq!(flat.history().last().map(TransformationStep::name), Some("flatten"));
    }

    #[test]
    fn sorted_points_at_original_positions() {
        let sorted = vec![30, 10, 20].traced().sorted();
        assert_eq!(sorted.elements(), &[10, 20, 30]);
        assert_eq!(last_edges(&sorted), pairs(&[(1, 0), (2, 1), (0, 2)]));
    }

    #[test]
    fn sorted_by_is_stable() {
        let sorted = vec![(1, 'a'), (0, 'b'), (1, 'c')]
            .traced()
            .sorted_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(sorted.elements(), &[(0, 'b'), (1, 'a'), (1, 'c')]);
        assert_eq!(last_edges(&sorted), pairs(&[(1, 0), (0, 1), (2, 2)]));
    }

    #[test]
    fn sorted_by_key_records_its_own_name() {
        let sorted = vec!["ccc", "a", "bb"].traced().sorted_by_key(|s| s.len());
        assert_eq!(sorted.elements(), &["a", "bb", "ccc"]);
        assert_eq!(
            sorted.history().last().map(TransformationStep::name),
            Some("sorted_by_key")
        );
    }

    #[test]
    fn reversed_mirrors_positions() {
        let reversed = vec!['a', 'b', 'c'].traced().reversed();
        assert_eq!(reversed.elements(), &['c', 'b', 'a']);
        assert_eq!(last_edges(&reversed), pairs(&[(2, 0), (1, 1), (0, 2)]));
    }

    #[test]
    fn drop_first_and_last_keep_original_sources() {
        let source = vec![1, 2, 3, 4].traced();

        let tail = source.drop_first(1);
        assert_eq!(tail.elements(), &[2, 3, 4]);
        assert_eq!(last_edges(&tail), pairs(&[(1, 0), (2, 1), (3, 2)]));
        assert_eq!(last_label(&tail).as_deref(), Some("drop_first"));

        let head = source.drop_last(3);
        assert_eq!(head.elements(), &[1]);
        assert_eq!(last_edges(&head), pairs(&[(0, 0)]));
        assert_eq!(last_label(&head).as_deref(), Some("drop_last(3)"));

        assert!(source.drop_last(10).is_empty());
        assert!(source.drop_first(10).is_empty());
    }

    #[test]
    fn prefix_and_suffix_clamp_to_length() {
        let source = vec![1, 2, 3].traced();
        assert_eq!(source.prefix(2).elements(), &[1, 2]);
        assert_eq!(source.prefix(9).elements(), &[1, 2, 3]);

        let tail = source.suffix(2);
        assert_eq!(tail.elements(), &[2, 3]);
        assert_eq!(last_edges(&tail), pairs(&[(1, 0), (2, 1)]));
        assert_eq!(source.suffix(9).len(), 3);
    }

    #[test]
    fn drop_while_and_take_while_stop_calling_after_flip() {
        let source = vec![1, 2, 5, 1, 2].traced();

        let mut calls = 0;
        let rest = source.drop_while(|&x| {
            calls += 1;
            x < 3
        });
        assert_eq!(rest.elements(), &[5, 1, 2]);
        assert_eq!(last_edges(&rest), pairs(&[(2, 0), (3, 1), (4, 2)]));
        assert_eq!(calls, 3);

        let mut calls = 0;
        let head = source.take_while(|&x| {
            calls += 1;
            x < 3
        });
        assert_eq!(head.elements(), &[1, 2]);
        assert_eq!(last_edges(&head), pairs(&[(0, 0), (1, 1)]));
        assert_eq!(calls, 3);
    }

    #[test]
    fn drop_while_everything_matches() {
        let rest = vec![1, 1].traced().drop_while(|_| true);
        assert!(rest.is_empty());
        assert!(last_edges(&rest).is_empty());
    }

    #[test]
    fn unique_links_duplicates_to_first_occurrence() {
        let unique = vec![1, 2, 1, 3, 2].traced().unique();
        assert_eq!(unique.elements(), &[1, 2, 3]);
        assert_eq!(
            last_edges(&unique),
            pairs(&[(0, 0), (1, 1), (2, 0), (3, 2), (4, 1)])
        );
    }

    #[test]
    fn find_links_match_or_records_synthetic_edge() {
        let source = vec![4, 7, 9].traced();

        let found = source.find(|&x| x > 5);
        assert_eq!(found.value(), &Some(7));
        assert_eq!(last_edges(&found), pairs(&[(1, 0)]));

        let missing = source.find(|&x| x > 100);
        assert_eq!(missing.value(), &None);
        assert_eq!(last_edges(&missing), vec![Edge::synthetic(0)]);

        let empty = Vec::<i32>::new().traced().find(|_| true);
        assert_eq!(empty.value(), &None);
        assert_eq!(last_edges(&empty), vec![Edge::synthetic(0)]);
    }

    #[test]
    fn first_on_empty_is_synthetic() {
        let first = vec![5, 6].traced().first();
        assert_eq!(first.value(), &Some(5));
        assert_eq!(last_edges(&first), pairs(&[(0, 0)]));

        let none = Vec::<u8>::new().traced().first();
        assert_eq!(none.value(), &None);
        assert_eq!(last_edges(&none), vec![Edge::synthetic(0)]);
    }

    #[test]
    fn any_and_contains_point_at_first_match() {
        let source = vec!["a", "b", "b"].traced();

        let hit = source.contains(&"b");
        assert!(*hit.value());
        assert_eq!(last_edges(&hit), pairs(&[(1, 0)]));
        assert_eq!(last_label(&hit).as_deref(), Some(r#"contains("b")"#));

        let miss = source.any(|s| s.is_empty());
        assert!(!*miss.value());
        assert_eq!(last_edges(&miss), vec![Edge::synthetic(0)]);
    }

    #[test]
    fn max_and_min_follow_std_tie_breaking() {
        let source = vec![3, 1, 3, 1].traced();

        let max = source.max();
        assert_eq!(max.value(), &Some(3));
        assert_eq!(last_edges(&max), pairs(&[(2, 0)]));

        let min = source.min();
        assert_eq!(min.value(), &Some(1));
        assert_eq!(last_edges(&min), pairs(&[(1, 0)]));

        assert_eq!(last_edges(&Vec::<i32>::new().traced().max()), vec![Edge::synthetic(0)]);
    }

    #[test]
    fn fold_links_every_input_to_result() {
        let total = vec![1, 2, 3, 4].traced().fold(0, |acc, x| acc + x);
        assert_eq!(*total.value(), 10);
        assert_eq!(
            last_edges(&total),
            pairs(&[(0, 0), (1, 0), (2, 0), (3, 0)])
        );

        let tuple = vec![1, 2].traced().fold((0, 1), |(sum, product), x| (sum + x, product * x));
        assert_eq!(*tuple.value(), (3, 2));
        assert_eq!(last_edges(&tuple).len(), 2);
    }

    #[test]
    fn fold_over_empty_input_has_no_edges() {
        let total = Vec::<i32>::new().traced().fold(0, |acc, x| acc + x);
        assert_eq!(*total.value(), 0);
        assert!(last_edges(&total).is_empty());
    }

    #[test]
    fn reduce_and_count() {
        let source = vec![2, 3, 4].traced();
        let product = source.reduce(|acc, x| acc * x);
        assert_eq!(product.value(), &Some(24));
        assert_eq!(last_edges(&product), pairs(&[(0, 0), (1, 0), (2, 0)]));

        let count = source.count();
        assert_eq!(*count.value(), 3);
        assert_eq!(last_edges(&count).len(), 3);

        let empty = Vec::<i32>::new().traced();
        assert_eq!(empty.reduce(|acc, x| acc + x).value(), &None);
        assert_eq!(last_edges(&empty.count()), vec![Edge::synthetic(0)]);
    }

    #[test]
    fn joined_concatenates_with_separator() {
        let joined = vec!["a", "b", "c"].traced().joined(", ");
        assert_eq!(joined.value(), "a, b, c");
        assert_eq!(last_edges(&joined).len(), 3);
        assert_eq!(last_label(&joined).as_deref(), Some(r#"joined(", ")"#));
    }

    #[test]
    fn try_variants_record_nothing_on_failure() {
        let source = vec!["1", "two", "3"].traced();

        let mut calls = 0;
        let failed = source.try_map(|s| {
            calls += 1;
            s.parse::<i32>()
        });
        assert!(failed.is_err());
        assert_eq!(calls, 2);
        assert!(source.history().is_empty());

        let failed: Result<TracedSequence<&str>, &str> =
            source.try_filter(|s| if *s == "3" { Err("boom") } else { Ok(true) });
        assert_eq!(failed.err(), Some("boom"));

        let failed = source.try_fold(0, |acc: i32, s| s.parse::<i32>().map(|n| acc + n));
        assert!(failed.is_err());
    }

    #[derive(Debug, PartialEq, Eq)]
    struct Rejected(&'static str);

    fn fail_on(x: i32, bad: i32, name: &'static str) -> Result<i32, Rejected> {
        if x == bad {
            Err(Rejected(name))
        } else {
            Ok(x)
        }
    }

    #[test]
    fn remaining_try_variants_return_the_callback_error_untouched() {
        let source = vec![1, 2, 3].traced();

        let dropped = source.try_drop_while(|&x| fail_on(x, 2, "drop_while").map(|_| true));
        assert_eq!(dropped.err(), Some(Rejected("drop_while")));

        let taken = source.try_take_while(|&x| fail_on(x, 2, "take_while").map(|_| true));
        assert_eq!(taken.err(), Some(Rejected("take_while")));

        let found = source.try_find(|&x| fail_on(x, 3, "find").map(|_| false));
        assert_eq!(found.err(), Some(Rejected("find")));

        let any = source.try_any(|&x| fail_on(x, 1, "any").map(|_| false));
        assert_eq!(any.err(), Some(Rejected("any")));

        let expanded = source.try_flat_map(|&x| fail_on(x, 3, "flat_map").map(|x| vec![x, x]));
        assert_eq!(expanded.err(), Some(Rejected("flat_map")));

        let mapped = source.try_filter_map(|&x| fail_on(x, 1, "filter_map").map(Some));
        assert_eq!(mapped.err(), Some(Rejected("filter_map")));

        let reduced = source.try_reduce(|acc, &x| fail_on(x, 3, "reduce").map(|x| acc + x));
        assert_eq!(reduced.err(), Some(Rejected("reduce")));

        assert!(source.history().is_empty());
    }

    #[test]
    fn try_sorted_by_propagates_comparator_error() {
        let source = vec![3, 1, 2].traced();
        let mut calls = 0;
        let failed: Result<TracedSequence<i32>, String> = source.try_sorted_by(|_, _| {
            calls += 1;
            Err(String::from("incomparable"))
        });
        assert_eq!(failed.err().as_deref(), Some("incomparable"));
        assert_eq!(calls, 1);
    }

    #[test]
    fn sequence_and_lifted_history_stay_independent() {
        let source = vec![1, 2, 3].traced();
        let left = source.map(|x| x + 1);
        let right = source.filter(|&x| x > 1).reversed();

        assert!(source.history().is_empty());
        assert_eq!(left.history().len(), 1);
        assert_eq!(right.history().len(), 2);
        assert_eq!(
            right.history().iter().map(TransformationStep::name).collect::<Vec<_>>(),
            vec!["filter", "reversed"]
        );
    }

    #[test]
    fn step_snapshot_holds_pre_operation_elements() {
        let mapped = vec![1, 2].traced().map(|x| format!("#{x}"));
        let step = mapped.history().last().expect("step recorded");
        assert_eq!(step.source().descriptions().collect::<Vec<_>>(), vec!["1", "2"]);
        assert_eq!(step.source_type_name(), "i32");
        assert_eq!(mapped.declared_type_name(), "String");
        assert_eq!(mapped.display_elements(), vec![r##""#1""##, r##""#2""##]);
    }
}
