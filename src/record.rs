//! Sequence record type and crate-wide error definitions.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while filtering or splitting sequence records.
#[derive(Error, Debug)]
pub enum FilterError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error opening {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("I/O error writing {}: {source}", path.display())]
    Sink { path: PathBuf, source: io::Error },
}

pub type Result<T> = std::result::Result<T, FilterError>;

/// Width used when re-wrapping sequence text into FASTA output.
pub const FASTA_LINE_WIDTH: usize = 60;

/// A single sequence record as read from the input stream.
///
/// `raw_text` holds the record exactly as it appeared in the input and is
/// what the filter pipeline writes to matching sinks; the parsed fields are
/// only consulted by predicates and by the window splitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    /// Primary accession or identifier.
    pub identifier: String,
    /// Versioned identifier (e.g. `AB000001.2`); used as the per-record
    /// filename for directory sinks. Falls back to `identifier` for
    /// formats that carry no version.
    pub version: String,
    /// Free-text description / definition line.
    pub description: String,
    /// The raw symbol string (nucleotide or protein letters).
    pub sequence: String,
    /// The full serialized record as originally read.
    pub raw_text: String,
}

impl SequenceRecord {
    /// Length of the sequence in symbols.
    #[inline]
    pub fn seq_len(&self) -> usize {
        self.sequence.len()
    }

    /// Serialize this record as FASTA with 60-column sequence lines.
    ///
    /// Used for records synthesized by the window splitter; records read
    /// from the input keep their original `raw_text` instead.
    pub fn to_fasta(&self) -> String {
        let mut out = String::with_capacity(self.sequence.len() + self.description.len() + 64);
        out.push('>');
        out.push_str(&self.identifier);
        if !self.description.is_empty() {
            out.push(' ');
            out.push_str(&self.description);
        }
        out.push('\n');
        let bytes = self.sequence.as_bytes();
        for chunk in bytes.chunks(FASTA_LINE_WIDTH) {
            // Sequence text is ASCII letters; chunking cannot split a char.
            out.push_str(std::str::from_utf8(chunk).unwrap_or(""));
            out.push('\n');
        }
        out
    }
}
