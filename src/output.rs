//! Per-vertex estimate files
//!
//! One line per vertex, `id<TAB>value`, ids ascending from 0.

use crate::stream::{StreamError, StreamResult};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Write a dense per-vertex estimate
pub fn write_local_estimates<W: Write>(mut writer: W, values: &[f64]) -> io::Result<()> {
    for (id, value) in values.iter().enumerate() {
        writeln!(writer, "{}\t{}", id, value)?;
    }
    writer.flush()
}

pub fn write_local_estimates_to_path(path: impl AsRef<Path>, values: &[f64]) -> io::Result<()> {
    let file = File::create(path)?;
    write_local_estimates(BufWriter::new(file), values)
}

/// Read `id value` lines into a dense vector; missing ids read as 0
///
/// Used for ground-truth files as well as files written by
/// [`write_local_estimates`].
pub fn read_local_values<R: BufRead>(reader: R) -> StreamResult<Vec<f64>> {
    let mut values = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx as u64 + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut fields = trimmed.split_whitespace();
        let (Some(id), Some(value)) = (fields.next(), fields.next()) else {
            return Err(StreamError::Malformed {
                line: line_no,
                reason: "expected `id value`".to_string(),
            });
        };
        let id: usize = id.parse().map_err(|e| StreamError::Malformed {
            line: line_no,
            reason: format!("bad vertex id {:?}: {}", id, e),
        })?;
        let value: f64 = value.parse().map_err(|e| StreamError::Malformed {
            line: line_no,
            reason: format!("bad value {:?}: {}", value, e),
        })?;

        if id >= values.len() {
            values.resize(id + 1, 0.0);
        }
        values[id] = value;
    }
    Ok(values)
}

pub fn read_local_values_from_path(path: impl AsRef<Path>) -> StreamResult<Vec<f64>> {
    let file = File::open(path)?;
    read_local_values(BufReader::new(file))
}
