//! # csv2rdf - streaming CSV to RDF transformation
//!
//! Converts delimited-text records into RDF triples by applying a SPARQL
//! CONSTRUCT or DESCRIBE query to each row.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────┐     ┌─────────────┐     ┌─────────────┐     ┌───────────┐
//! │ CSV rows  │────▶│  Row graph  │────▶│   SPARQL    │────▶│  Triple   │
//! │  (lazy)   │     │  (per row)  │     │  transform  │     │   sink    │
//! └───────────┘     └─────────────┘     └─────────────┘     └───────────┘
//! ```
//!
//! Each row becomes an ephemeral generic graph (a fresh blank-node subject
//! and one triple per non-empty cell, with predicates derived from the
//! header names), which the query maps into the target vocabulary. The
//! resulting triples are forwarded to an append-only sink, one row at a
//! time, so memory use is bounded by one row's footprint regardless of
//! input size.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use csv2rdf::{transform_read, TransformOptions, TransformQuery};
//!
//! let query = TransformQuery::parse(
//!     "CONSTRUCT { ?s a <https://example.org/Person> } \
//!      WHERE { ?s <https://example.org/#name> ?name }",
//!     "https://example.org/",
//! )?;
//! let report = transform_read(
//!     std::io::stdin(),
//!     &query,
//!     &TransformOptions::default(),
//!     std::io::stdout(),
//! )?;
//! eprintln!("{} subjects, {} triples", report.subject_count, report.triple_count);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`parser`] - Lazy row source over delimited text
//! - [`graph`] - Per-row generic graph construction
//! - [`transform`] - Query validation, SPARQL transformer, pipeline
//! - [`sink`] - Triple stream sinks

// Core modules
pub mod error;
pub mod graph;
pub mod parser;
pub mod sink;
pub mod transform;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{CsvError, PipelineError, QueryError, SinkError, TransformError};

// =============================================================================
// Re-exports - Row source
// =============================================================================

pub use parser::{decode_content, detect_encoding, Row, RowReader};

// =============================================================================
// Re-exports - Row graph
// =============================================================================

pub use graph::{RowGraph, RowGraphBuilder};

// =============================================================================
// Re-exports - Transformation
// =============================================================================

pub use transform::{
    transform_file, transform_read, CancelFlag, GraphTransformer, Pipeline, PipelineReport,
    QueryKind, SparqlTransformer, TransformOptions, TransformQuery,
};

// =============================================================================
// Re-exports - Sinks
// =============================================================================

pub use sink::{MemorySink, NTriplesSink, TripleSink};
