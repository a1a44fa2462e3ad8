//! # seqtrace-core
//!
//! Traced views over sequences and the transformation history they record.
//!
//! A [`TracedSequence`] wraps a materialized sequence. Every operation on it
//! (map, filter, sort, dedupe, fold, ...) computes its result the usual way and
//! additionally records a [`TransformationStep`]: the operation name, a
//! type-erased snapshot of the input elements, and the provenance [`Edge`]s
//! linking input positions to output positions.
//!
//! Views are immutable. Each operation takes `&self` and returns a new view
//! whose [`History`] is the previous one plus exactly one step, so a chain can
//! be forked freely and every branch keeps its own trace.
//!
//! ```
//! use seqtrace_core::{Edge, IntoTraced};
//!
//! let traced = vec![1, 2, 1, 3, 2].traced().unique();
//! assert_eq!(traced.elements(), &[1, 2, 3]);
//!
//! let step = traced.history().last().expect("one step recorded");
//! assert_eq!(step.edges()[2], Edge::new(2, 0));
//! ```
//!
//! Fallible callbacks use the `try_*` variants. The callback's own error is
//! returned unchanged and nothing is recorded:
//!
//! ```
//! use seqtrace_core::IntoTraced;
//!
//! let parsed = vec!["1", "x"]
//!     .traced()
//!     .try_map(|s| s.parse::<i32>());
//! assert!(parsed.is_err());
//! ```

pub mod edge;
pub mod history;
pub mod sequence;
pub mod snapshot;
pub mod traced;
pub mod type_name;
pub mod value;

pub use edge::Edge;
pub use history::{History, TransformationStep};
pub use sequence::TracedSequence;
pub use snapshot::ElementSnapshot;
pub use traced::{IntoTraced, Traced};
pub use type_name::short_type_name;
pub use value::TracedValue;
