//! Error types for the csv2rdf transformation pipeline.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`CsvError`] - row source errors
//! - [`QueryError`] - transformation query configuration errors
//! - [`TransformError`] - per-row query evaluation errors
//! - [`SinkError`] - triple stream sink errors
//! - [`PipelineError`] - top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// Row Source Errors
// =============================================================================

/// Errors from the row source.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read input.
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed delimited text.
    #[error("Invalid CSV record: {0}")]
    Parse(#[from] csv::Error),

    /// A cell exceeded the configured maximum length.
    ///
    /// This guards against unbounded memory use; it aborts the whole
    /// sequence rather than skipping the row.
    #[error("Cell on line {line} is {len} characters long (limit {max})")]
    CellTooLong { line: u64, len: usize, max: usize },

    /// Unknown input charset label.
    #[error("Unsupported input charset: {0}")]
    Encoding(String),

    /// Input contained no header record.
    #[error("CSV input is empty")]
    EmptyInput,
}

// =============================================================================
// Query Configuration Errors
// =============================================================================

/// Errors raised while validating the transformation query.
///
/// All of these are configuration errors: they are detected before any
/// row is read and abort the run with no partial output.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The query text failed to parse.
    #[error("Invalid SPARQL query: {0}")]
    Syntax(#[from] spargebra::SparqlSyntaxError),

    /// The query parsed but is not a transformation kind.
    #[error("Only CONSTRUCT and DESCRIBE queries can be used for transformation, got {0}")]
    UnsupportedKind(&'static str),

    /// The base identifier is not a valid IRI.
    #[error("Invalid base IRI: {0}")]
    InvalidBase(#[from] oxigraph::model::IriParseError),
}

// =============================================================================
// Transformation Errors
// =============================================================================

/// Errors during per-row query evaluation.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The row graph could not be loaded into the evaluation dataset.
    #[error("Row graph storage error: {0}")]
    Storage(#[from] oxigraph::store::StorageError),

    /// Query evaluation failed.
    #[error("Query evaluation failed: {0}")]
    Evaluation(#[from] oxigraph::sparql::EvaluationError),

    /// Evaluation produced solutions or a boolean instead of a graph.
    #[error("Query evaluation did not produce a graph")]
    UnexpectedResults,
}

// =============================================================================
// Sink Errors
// =============================================================================

/// Errors from the triple stream sink.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The write target rejected a triple or failed to flush.
    #[error("Failed to write triple: {0}")]
    Io(#[from] std::io::Error),

    /// The sink was used after it was finalized.
    #[error("Sink already finished")]
    Finished,
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline orchestration errors.
///
/// This is the main error type returned by [`crate::transform::Pipeline::run`].
/// It wraps all lower-level errors and adds pipeline-specific variants.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Row source error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Query configuration error.
    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    /// Per-row transformation error.
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    /// Sink error.
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),

    /// The run was cancelled between rows.
    #[error("Run cancelled")]
    Cancelled,
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for row source operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for query validation.
pub type QueryResult<T> = Result<T, QueryError>;

/// Result type for per-row transformation.
pub type TransformResult<T> = Result<T, TransformError>;

/// Result type for sink operations.
pub type SinkResult<T> = Result<T, SinkError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
