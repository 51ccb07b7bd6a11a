//! Validated transformation queries.
//!
//! The pipeline accepts exactly two query kinds: CONSTRUCT and DESCRIBE.
//! Anything else is a configuration defect, rejected here before any row
//! is read, so the transformer never sees an invalid query.

use oxigraph::model::NamedNode;
use oxigraph::sparql::Query;

use crate::error::{QueryError, QueryResult};

/// The query kinds accepted for row transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// Produces a new set of triples from pattern matches against the row graph.
    Construct,
    /// Produces triples describing a resource. The query is expected to carry
    /// its own resource reference (or a pattern binding one): the row's
    /// synthetic subject is a fresh blank node, reachable only through graph
    /// patterns, never by name.
    Describe,
}

impl QueryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKind::Construct => "CONSTRUCT",
            QueryKind::Describe => "DESCRIBE",
        }
    }
}

/// A SPARQL query validated for row transformation.
///
/// Parsed and classified once; immutable for the whole run. The base IRI is
/// bound at parse time and resolves relative IRIs inside the query; the same
/// base later derives the row graph's predicate IRIs.
#[derive(Debug, Clone)]
pub struct TransformQuery {
    query: Query,
    kind: QueryKind,
    base: NamedNode,
}

impl TransformQuery {
    /// Parse and validate a query, binding `base` as its base IRI.
    ///
    /// Fails on malformed base IRIs, on SPARQL syntax errors, and on any
    /// query kind other than CONSTRUCT or DESCRIBE.
    pub fn parse(text: &str, base: &str) -> QueryResult<Self> {
        let base = NamedNode::new(base)?;

        // classify on the algebra; the engine keeps its own parsed form
        let kind = match spargebra::Query::parse(text, Some(base.as_str()))? {
            spargebra::Query::Construct { .. } => QueryKind::Construct,
            spargebra::Query::Describe { .. } => QueryKind::Describe,
            spargebra::Query::Select { .. } => return Err(QueryError::UnsupportedKind("SELECT")),
            spargebra::Query::Ask { .. } => return Err(QueryError::UnsupportedKind("ASK")),
        };
        let query = Query::parse(text, Some(base.as_str()))?;

        Ok(Self { query, kind, base })
    }

    pub fn kind(&self) -> QueryKind {
        self.kind
    }

    /// The base identifier bound to this query.
    pub fn base(&self) -> &NamedNode {
        &self.base
    }

    /// The executable form of the query.
    pub fn query(&self) -> &Query {
        &self.query
    }
}
