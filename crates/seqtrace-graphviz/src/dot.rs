//! History to DOT serialization.
//!
//! Layout of the produced graph, for a history of `n` steps:
//!
//! ```text
//! legend0 -> op0 -> legend1 -> ... -> op(n-1) -> legendn     (invisible chain)
//!   |                  |                            |
//! node0 ============> node1 ====== ... ==========> noden     (provenance edges)
//! ```
//!
//! `nodeK` is a record with one port `fI` per element; `legendK` names the
//! element type at stage `K` and shares its rank. Only `Vec` iteration order is
//! used, so identical histories always produce identical text.

use std::fmt::Write;

use seqtrace_core::{Edge, Traced};

use crate::escape::escape_label;

const INDENT: &str = "    ";
const INVISIBLE: &str = "[penwidth=0.0,arrowhead=none]";

/// Serialize a traced view's history and current state as a DOT digraph.
#[must_use]
pub fn to_dot<V: Traced + ?Sized>(view: &V) -> String {
    let history = view.history();

    let mut states: Vec<Vec<String>> = history
        .iter()
        .map(|step| step.source().descriptions().collect())
        .collect();
    states.push(view.display_elements());

    let mut type_names: Vec<String> = history
        .iter()
        .map(|step| step.source_type_name().to_string())
        .collect();
    type_names.push(view.declared_type_name());

    tracing::debug!(
        stages = states.len(),
        steps = history.len(),
        "serializing trace to dot"
    );

    let mut lines = vec![
        String::from("rankdir=LR;"),
        String::from("splines=false;"),
        String::from("node [shape=record,height=.1];"),
    ];

    for (stage, elements) in states.iter().enumerate() {
        lines.push(format!("node{stage}[label=\"{}\"];", record_label(elements)));
    }
    for (index, step) in history.iter().enumerate() {
        lines.extend(step.edges().iter().map(|edge| edge_statement(index, edge)));
    }

    lines.push(String::from("node [shape=none];"));
    lines.push(format!("edge {INVISIBLE};"));
    for stage in 0..states.len() {
        lines.push(format!("{{ rank=same; node{stage} legend{stage} }}"));
    }
    for (stage, type_name) in type_names.iter().enumerate() {
        lines.push(format!("legend{stage} [label=\"{}\"];", escape_label(type_name)));
    }

    lines.push(String::from("node [shape=rarrow];"));
    for (index, step) in history.iter().enumerate() {
        lines.push(format!("op{index} [label=\"{}\"];", escape_label(&step.label())));
    }
    lines.push(legend_chain(history.len()));

    let mut dot = String::from("digraph g {\n");
    for line in &lines {
        dot.push_str(INDENT);
        dot.push_str(line);
        dot.push('\n');
    }
    dot.push('}');
    dot
}

/// `<f0> a|<f1> b|...` with every element label escaped.
fn record_label(elements: &[String]) -> String {
    let mut label = String::new();
    for (index, element) in elements.iter().enumerate() {
        if index > 0 {
            label.push('|');
        }
        let _ = write!(label, "<f{index}> {}", escape_label(element));
    }
    label
}

/// Connector from stage `step` to stage `step + 1`. Synthetic edges leave port
/// `f0` and are drawn invisibly.
fn edge_statement(step: usize, edge: &Edge) -> String {
    let attributes = if edge.is_synthetic() { INVISIBLE } else { "" };
    format!(
        "\"node{step}\":f{} -> \"node{}\":f{}{attributes};",
        edge.source.unwrap_or(0),
        step + 1,
        edge.target
    )
}

/// `legend0 -> op0 -> legend1 -> ... -> legendN;`
fn legend_chain(steps: usize) -> String {
    let mut chain = String::from("legend0");
    for index in 0..steps {
        let _ = write!(chain, " -> op{index} -> legend{}", index + 1);
    }
    chain.push(';');
    chain
}

/// DOT serialization for every traced view.
pub trait ToGraphviz {
    fn as_graphviz(&self) -> String;
}

impl<V: Traced + ?Sized> ToGraphviz for V {
    fn as_graphviz(&self) -> String {
        to_dot(self)
    }
}
