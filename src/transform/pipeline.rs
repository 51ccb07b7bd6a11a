//! Pipeline orchestration.
//!
//! Wires the row source, row graph builder, query transformer and triple
//! sink together, strictly one row at a time: no row's data is retained
//! once its triples are forwarded, so memory stays bounded by one row's
//! footprint regardless of input size.

use std::io::{Read, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::query::TransformQuery;
use super::transformer::{GraphTransformer, SparqlTransformer};
use crate::error::PipelineResult;
use crate::graph::RowGraphBuilder;
use crate::parser::RowReader;
use crate::sink::{NTriplesSink, TripleSink};

/// Row source options for the convenience entry points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformOptions {
    /// Field delimiter byte.
    pub delimiter: u8,

    /// Maximum characters per cell; `None` means unbounded.
    pub max_cell_len: Option<usize>,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            max_cell_len: None,
        }
    }
}

/// Counters reported after a completed run.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PipelineReport {
    /// Rows processed, one synthetic subject each.
    pub subject_count: u64,

    /// Triples forwarded to the sink, post-transform.
    pub triple_count: u64,
}

/// Cooperative cancellation flag, checked between rows.
///
/// Cancellation does not roll back triples already forwarded; the output
/// remains a valid partial prefix and the sink is left un-finalized.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Drives the row-by-row transformation.
///
/// Owns the run-scoped counters; an instance is never shared across
/// concurrent runs. The query kind is already guaranteed by
/// [`TransformQuery`], so a pipeline cannot be constructed around an
/// unsupported query: the gate fires before any row source exists.
pub struct Pipeline<T: GraphTransformer = SparqlTransformer> {
    query: TransformQuery,
    transformer: T,
    cancel: CancelFlag,
    subject_count: u64,
    triple_count: u64,
}

impl Pipeline<SparqlTransformer> {
    /// Pipeline with the built-in SPARQL transformer.
    pub fn new(query: TransformQuery) -> Self {
        Self::with_transformer(query, SparqlTransformer)
    }
}

impl<T: GraphTransformer> Pipeline<T> {
    /// Pipeline with a caller-supplied transformer implementation.
    pub fn with_transformer(query: TransformQuery, transformer: T) -> Self {
        Self {
            query,
            transformer,
            cancel: CancelFlag::new(),
            subject_count: 0,
            triple_count: 0,
        }
    }

    /// Flag that aborts the run between rows once set.
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Rows processed so far.
    pub fn subject_count(&self) -> u64 {
        self.subject_count
    }

    /// Triples forwarded to the sink so far.
    pub fn triple_count(&self) -> u64 {
        self.triple_count
    }

    /// Run the transformation to completion.
    ///
    /// Announces the base to the sink, then per row in arrival order:
    /// build the row graph, transform it, forward every resulting triple in
    /// the order the transform yields them. After the source is exhausted
    /// the sink is finalized exactly once.
    ///
    /// On any error the run aborts with the sink left un-finalized; triples
    /// already forwarded remain a valid partial prefix of the stream.
    pub fn run<R: Read, S: TripleSink>(
        &mut self,
        rows: RowReader<R>,
        sink: &mut S,
    ) -> PipelineResult<PipelineReport> {
        self.subject_count = 0;
        self.triple_count = 0;

        info!(
            base = self.query.base().as_str(),
            kind = self.query.kind().as_str(),
            "transformation started"
        );
        sink.set_base(self.query.base().as_ref())?;
        let builder = RowGraphBuilder::new(self.query.base().clone());

        for row in rows {
            if self.cancel.is_cancelled() {
                return Err(crate::error::PipelineError::Cancelled);
            }
            let row = row?;
            self.subject_count += 1;

            let row_graph = builder.build(&row);
            let output = self.transformer.transform(&self.query, &row_graph.graph)?;

            let mut forwarded = 0u64;
            for triple in output.iter() {
                sink.send(triple)?;
                forwarded += 1;
            }
            self.triple_count += forwarded;
            debug!(
                line = row.line(),
                cells = row.len(),
                triples = forwarded,
                "row transformed"
            );
        }

        sink.finish()?;
        info!(
            subjects = self.subject_count,
            triples = self.triple_count,
            "transformation finished"
        );

        Ok(PipelineReport {
            subject_count: self.subject_count,
            triple_count: self.triple_count,
        })
    }
}

/// Transform delimited text from `csv` and write N-Triples to `out`.
///
/// Convenience wrapper: builds a [`RowReader`], an [`NTriplesSink`] and a
/// [`Pipeline`] with the built-in SPARQL transformer.
pub fn transform_read<R: Read, W: Write>(
    csv: R,
    query: &TransformQuery,
    options: &TransformOptions,
    out: W,
) -> PipelineResult<PipelineReport> {
    let rows = RowReader::new(csv, options.delimiter, options.max_cell_len)?;
    let mut sink = NTriplesSink::new(out);
    Pipeline::new(query.clone()).run(rows, &mut sink)
}

/// Transform a CSV file and write N-Triples to `out`.
pub fn transform_file<P: AsRef<Path>, W: Write>(
    path: P,
    query: &TransformQuery,
    options: &TransformOptions,
    out: W,
) -> PipelineResult<PipelineReport> {
    let rows = RowReader::from_path(path, options.delimiter, options.max_cell_len)?;
    let mut sink = NTriplesSink::new(out);
    Pipeline::new(query.clone()).run(rows, &mut sink)
}
