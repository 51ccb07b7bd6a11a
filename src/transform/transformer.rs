//! Per-row query evaluation.
//!
//! The graph-query evaluator is an injected capability behind a one-method
//! trait, so any engine can be substituted without touching the pipeline.
//! The default implementation evaluates with oxigraph against a fresh
//! in-memory dataset holding only the row graph.

use oxigraph::model::{Graph, GraphNameRef};
use oxigraph::sparql::QueryResults;
use oxigraph::store::Store;

use super::query::TransformQuery;
use crate::error::{TransformError, TransformResult};

/// Evaluates a transformation query against one row graph.
///
/// Implementations must be pure and stateless across rows: identical
/// `(query, graph)` pairs yield set-equal output, modulo fresh blank-node
/// renaming. Evaluation is synchronous and may block; the pipeline does not
/// move to the next row until it returns.
pub trait GraphTransformer {
    fn transform(&self, query: &TransformQuery, graph: &Graph) -> TransformResult<Graph>;
}

/// SPARQL evaluation with oxigraph.
///
/// Each call loads the row graph into a fresh in-memory store (the sole
/// active dataset), evaluates the query, and collects the resulting graph.
/// The store is dropped with the call, so peak memory stays bounded by one
/// row's footprint.
#[derive(Debug, Default, Clone, Copy)]
pub struct SparqlTransformer;

impl GraphTransformer for SparqlTransformer {
    fn transform(&self, query: &TransformQuery, graph: &Graph) -> TransformResult<Graph> {
        let store = Store::new()?;
        for triple in graph.iter() {
            store.insert(triple.in_graph(GraphNameRef::DefaultGraph))?;
        }

        match store.query(query.query().clone())? {
            QueryResults::Graph(triples) => {
                let mut output = Graph::new();
                for triple in triples {
                    output.insert(&triple?);
                }
                Ok(output)
            }
            // a TransformQuery never evaluates to solutions or a boolean
            _ => Err(TransformError::UnexpectedResults),
        }
    }
}
