//! Transformation module.
//!
//! This module turns row graphs into domain triples:
//! - Query: validated CONSTRUCT/DESCRIBE transformation queries
//! - Transformer: the injected graph-query capability
//! - Pipeline: the row-by-row orchestrator and its counters

pub mod pipeline;
pub mod query;
pub mod transformer;

pub use pipeline::{
    transform_file, transform_read, CancelFlag, Pipeline, PipelineReport, TransformOptions,
};
pub use query::{QueryKind, TransformQuery};
pub use transformer::{GraphTransformer, SparqlTransformer};
