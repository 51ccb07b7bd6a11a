//! Per-row generic graph construction.
//!
//! Maps one input row into an ephemeral graph: a fresh blank-node subject,
//! and one triple per column that has both a header and a non-empty cell.
//! Predicates are derived from header text alone, so identical headers
//! yield identical predicate IRIs across all rows and runs.

use oxigraph::model::{BlankNode, Graph, Literal, NamedNode, Triple};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::parser::Row;

/// Characters escaped in derived predicate fragments: everything except
/// the RFC 3986 unreserved set (ALPHA / DIGIT / `-` / `.` / `_` / `~`).
/// Non-ASCII bytes are always percent-encoded.
const FRAGMENT_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// The generic graph produced from a single row.
///
/// Lives only for the duration of that row's processing; its triples are
/// replaced wholesale by the query transform.
#[derive(Debug, Clone)]
pub struct RowGraph {
    /// Subject shared by every triple in the graph; unique to this row.
    pub subject: BlankNode,
    /// The accumulated triples.
    pub graph: Graph,
}

/// Builds one ephemeral generic graph per input row.
#[derive(Debug, Clone)]
pub struct RowGraphBuilder {
    base: NamedNode,
}

impl RowGraphBuilder {
    pub fn new(base: NamedNode) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &NamedNode {
        &self.base
    }

    /// Derive the predicate IRI for a header name: `base + "#" + encoded header`.
    ///
    /// Pure and total; no state affects the result.
    pub fn predicate(&self, header: &str) -> NamedNode {
        let fragment = utf8_percent_encode(header, FRAGMENT_ESCAPE);
        // base is a validated IRI and the fragment is fully percent-encoded
        NamedNode::new_unchecked(format!("{}#{}", self.base.as_str(), fragment))
    }

    /// Build the row graph.
    ///
    /// Allocates a fresh subject, then adds `(subject, predicate, cell)` for
    /// every column with a present header and non-empty cell. Columns missing
    /// either are skipped silently. Duplicate header names are permitted;
    /// each occurrence contributes its own triple, and only exact
    /// `(s, p, o)` duplicates collapse since the graph is a set.
    pub fn build(&self, row: &Row) -> RowGraph {
        let subject = BlankNode::default();
        let mut graph = Graph::new();

        for (header, cell) in row.columns() {
            if let (Some(header), Some(cell)) = (header, cell) {
                graph.insert(&Triple::new(
                    subject.clone(),
                    self.predicate(header),
                    Literal::new_simple_literal(cell),
                ));
            }
        }

        RowGraph { subject, graph }
    }
}
