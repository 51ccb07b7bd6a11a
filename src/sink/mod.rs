//! Triple stream sinks.
//!
//! An append-only, ordered destination for transformed triples. The
//! pipeline announces the base identifier once, sends triples in forwarding
//! order, and finalizes the sink exactly once; a finalized sink accepts
//! nothing further.

use std::io::Write;

use oxigraph::model::{Graph, NamedNode, NamedNodeRef, TripleRef};

use crate::error::{SinkError, SinkResult};

/// Append-only, ordered triple destination.
pub trait TripleSink {
    /// Announce the base identifier. Called once, before any triple.
    fn set_base(&mut self, base: NamedNodeRef<'_>) -> SinkResult<()>;

    /// Append one triple.
    fn send(&mut self, triple: TripleRef<'_>) -> SinkResult<()>;

    /// Finalize the stream. Terminal: any later `send` or `finish` fails
    /// with [`SinkError::Finished`].
    fn finish(&mut self) -> SinkResult<()>;
}

/// Writes triples as N-Triples lines.
///
/// N-Triples carries absolute IRIs only, so the base is recorded rather
/// than emitted. The writer is flushed on finish.
pub struct NTriplesSink<W: Write> {
    writer: Option<W>,
    base: Option<NamedNode>,
}

impl<W: Write> NTriplesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Some(writer),
            base: None,
        }
    }

    /// The base identifier announced by the pipeline, if any yet.
    pub fn base(&self) -> Option<&NamedNode> {
        self.base.as_ref()
    }
}

impl<W: Write> TripleSink for NTriplesSink<W> {
    fn set_base(&mut self, base: NamedNodeRef<'_>) -> SinkResult<()> {
        tracing::debug!(base = base.as_str(), "output base set");
        self.base = Some(base.into_owned());
        Ok(())
    }

    fn send(&mut self, triple: TripleRef<'_>) -> SinkResult<()> {
        let writer = self.writer.as_mut().ok_or(SinkError::Finished)?;
        writeln!(writer, "{triple} .")?;
        Ok(())
    }

    fn finish(&mut self) -> SinkResult<()> {
        let mut writer = self.writer.take().ok_or(SinkError::Finished)?;
        writer.flush()?;
        Ok(())
    }
}

/// Collects triples into an in-memory graph.
///
/// Intended for tests and programmatic consumption; records the announced
/// base and whether the stream was finalized.
#[derive(Debug, Default)]
pub struct MemorySink {
    graph: Graph,
    base: Option<NamedNode>,
    finished: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn into_graph(self) -> Graph {
        self.graph
    }

    pub fn base(&self) -> Option<&NamedNode> {
        self.base.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn len(&self) -> usize {
        self.graph.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }
}

impl TripleSink for MemorySink {
    fn set_base(&mut self, base: NamedNodeRef<'_>) -> SinkResult<()> {
        if self.finished {
            return Err(SinkError::Finished);
        }
        self.base = Some(base.into_owned());
        Ok(())
    }

    fn send(&mut self, triple: TripleRef<'_>) -> SinkResult<()> {
        if self.finished {
            return Err(SinkError::Finished);
        }
        self.graph.insert(triple);
        Ok(())
    }

    fn finish(&mut self) -> SinkResult<()> {
        if self.finished {
            return Err(SinkError::Finished);
        }
        self.finished = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxigraph::model::{Literal, Triple};

    fn triple() -> Triple {
        Triple::new(
            NamedNode::new("https://example.org/s").unwrap(),
            NamedNode::new("https://example.org/p").unwrap(),
            Literal::new_simple_literal("Alice"),
        )
    }

    #[test]
    fn test_ntriples_sink_writes_lines() {
        let mut sink = NTriplesSink::new(Vec::new());
        let base = NamedNode::new("https://example.org/").unwrap();

        sink.set_base(base.as_ref()).unwrap();
        sink.send(triple().as_ref()).unwrap();
        sink.finish().unwrap();

        assert_eq!(sink.base(), Some(&base));
    }

    #[test]
    fn test_ntriples_line_format() {
        let mut out = Vec::new();
        {
            let mut sink = NTriplesSink::new(&mut out);
            sink.send(triple().as_ref()).unwrap();
            sink.finish().unwrap();
        }

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "<https://example.org/s> <https://example.org/p> \"Alice\" .\n"
        );
    }

    #[test]
    fn test_ntriples_send_after_finish_fails() {
        let mut sink = NTriplesSink::new(Vec::new());
        sink.finish().unwrap();

        assert!(matches!(
            sink.send(triple().as_ref()),
            Err(SinkError::Finished)
        ));
        assert!(matches!(sink.finish(), Err(SinkError::Finished)));
    }

    #[test]
    fn test_memory_sink_collects() {
        let mut sink = MemorySink::new();
        let base = NamedNode::new("https://example.org/").unwrap();

        sink.set_base(base.as_ref()).unwrap();
        sink.send(triple().as_ref()).unwrap();

        assert_eq!(sink.len(), 1);
        assert!(!sink.is_finished());

        sink.finish().unwrap();
        assert!(sink.is_finished());
        assert_eq!(sink.base(), Some(&base));
    }

    #[test]
    fn test_memory_sink_finish_is_terminal() {
        let mut sink = MemorySink::new();
        sink.finish().unwrap();

        assert!(matches!(
            sink.send(triple().as_ref()),
            Err(SinkError::Finished)
        ));
        assert!(matches!(sink.finish(), Err(SinkError::Finished)));
    }
}
