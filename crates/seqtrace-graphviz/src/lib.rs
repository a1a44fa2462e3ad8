//! # seqtrace-graphviz
//!
//! Turns the history of a traced view into a Graphviz DOT description and,
//! optionally, hands it to a renderer executable.
//!
//! - [`escape_label`]: numeric character references for every non-letter
//! - [`to_dot`] / [`ToGraphviz`]: the deterministic history-to-DOT serializer
//! - [`Renderer`], [`DotRenderer`], [`render_image`]: the rendering seam
//!
//! ```
//! use seqtrace_core::IntoTraced;
//! use seqtrace_graphviz::ToGraphviz;
//!
//! let dot = vec![3, 1, 2].traced().sorted().as_graphviz();
//! assert!(dot.starts_with("digraph g {"));
//! assert!(dot.contains("op0 [label=\"sorted\"];"));
//! ```

mod dot;
mod error;
mod escape;
mod render;

pub use dot::{ToGraphviz, to_dot};
pub use error::RenderError;
pub use escape::escape_label;
pub use render::{DotRenderer, Renderer, render_image};
