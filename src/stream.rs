//! Edge-list stream reader
//!
//! Reads whitespace-separated `src dst [ignored...]` records. Blank lines and
//! comment lines starting with `#` or `%` are skipped, self-loops are
//! dropped, and malformed records are logged and skipped.

use crate::graph::{Edge, VertexId};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;
use tracing::warn;

/// Stream errors
#[derive(Error, Debug)]
pub enum StreamError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed record at line {line}: {reason}")]
    Malformed { line: u64, reason: String },
}

pub type StreamResult<T> = Result<T, StreamError>;

/// A single parsed record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    Edge(Edge),
    SelfLoop(VertexId),
    Skip,
}

/// Parse one edge-list line
///
/// `line_no` is only used for error reporting.
pub fn parse_edge_line(line: &str, line_no: u64) -> StreamResult<Record> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('%') {
        return Ok(Record::Skip);
    }

    let mut fields = trimmed.split_whitespace();
    let mut endpoint = |name: &str| -> StreamResult<VertexId> {
        let token = fields.next().ok_or_else(|| StreamError::Malformed {
            line: line_no,
            reason: format!("missing {} vertex", name),
        })?;
        token.parse::<VertexId>().map_err(|e| StreamError::Malformed {
            line: line_no,
            reason: format!("bad {} vertex {:?}: {}", name, token, e),
        })
    };
    let src = endpoint("source")?;
    let dst = endpoint("target")?;

    match Edge::new(src, dst) {
        Ok(edge) => Ok(Record::Edge(edge)),
        Err(_) => Ok(Record::SelfLoop(src)),
    }
}

/// Per-stream counters kept by [`EdgeListReader`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReaderStats {
    pub lines: u64,
    pub edges: u64,
    pub self_loops: u64,
    pub malformed: u64,
}

/// Iterator over the edges of a line-oriented edge list
pub struct EdgeListReader<R> {
    reader: R,
    buf: String,
    stats: ReaderStats,
}

impl EdgeListReader<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> StreamResult<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> EdgeListReader<R> {
    pub fn new(reader: R) -> Self {
        EdgeListReader {
            reader,
            buf: String::new(),
            stats: ReaderStats::default(),
        }
    }

    pub fn stats(&self) -> ReaderStats {
        self.stats
    }
}

impl<R: BufRead> Iterator for EdgeListReader<R> {
    type Item = StreamResult<Edge>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e.into())),
            }
            self.stats.lines += 1;

            match parse_edge_line(&self.buf, self.stats.lines) {
                Ok(Record::Edge(edge)) => {
                    self.stats.edges += 1;
                    return Some(Ok(edge));
                }
                Ok(Record::SelfLoop(_)) => self.stats.self_loops += 1,
                Ok(Record::Skip) => {}
                Err(e) => {
                    warn!("Skipping record: {}", e);
                    self.stats.malformed += 1;
                }
            }
        }
    }
}
