//! Output sinks for routed records.
//!
//! A sink is one of three destinations: a file the run appends to, a file
//! the run truncates at start, or a directory receiving one file per
//! matching record named by the record's version. File sinks hold one
//! buffered handle for the run's duration; directory sinks open and close
//! a fresh handle per record.

use crate::record::{FilterError, Result, SequenceRecord};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Buffer capacity for run-long file sinks.
const SINK_BUFFER: usize = 256 * 1024;

/// How a sink destination is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SinkKind {
    /// File, opened once in append mode.
    Append,
    /// File, truncated at run start; append behavior thereafter.
    Overwrite,
    /// Directory; one file per matching record, named by version.
    Directory,
}

/// An unopened sink destination, as resolved from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkSpec {
    pub kind: SinkKind,
    pub path: PathBuf,
}

impl SinkSpec {
    pub fn new(kind: SinkKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }
}

/// An opened sink, ready to receive record text.
#[derive(Debug)]
pub enum OpenSink {
    Stream {
        path: PathBuf,
        writer: BufWriter<File>,
    },
    Directory {
        dir: PathBuf,
    },
}

fn sink_err(path: &Path, source: std::io::Error) -> FilterError {
    FilterError::Sink {
        path: path.to_path_buf(),
        source,
    }
}

fn open_err(path: &Path, source: std::io::Error) -> FilterError {
    FilterError::Open {
        path: path.to_path_buf(),
        source,
    }
}

impl OpenSink {
    /// Open a sink from its spec. File handles are established here, before
    /// any record is routed.
    pub fn open(spec: &SinkSpec) -> Result<Self> {
        match spec.kind {
            SinkKind::Append => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&spec.path)
                    .map_err(|e| open_err(&spec.path, e))?;
                Ok(OpenSink::Stream {
                    path: spec.path.clone(),
                    writer: BufWriter::with_capacity(SINK_BUFFER, file),
                })
            }
            SinkKind::Overwrite => {
                let file = File::create(&spec.path).map_err(|e| open_err(&spec.path, e))?;
                Ok(OpenSink::Stream {
                    path: spec.path.clone(),
                    writer: BufWriter::with_capacity(SINK_BUFFER, file),
                })
            }
            SinkKind::Directory => {
                if !spec.path.is_dir() {
                    return Err(FilterError::Config(format!(
                        "sink directory does not exist: {}",
                        spec.path.display()
                    )));
                }
                Ok(OpenSink::Directory {
                    dir: spec.path.clone(),
                })
            }
        }
    }

    /// Write one matching record's raw text.
    pub fn write_record(&mut self, record: &SequenceRecord) -> Result<()> {
        match self {
            OpenSink::Stream { path, writer } => writer
                .write_all(record.raw_text.as_bytes())
                .map_err(|e| sink_err(path, e)),
            OpenSink::Directory { dir } => {
                let path = dir.join(&record.version);
                let mut file = File::create(&path).map_err(|e| sink_err(&path, e))?;
                file.write_all(record.raw_text.as_bytes())
                    .map_err(|e| sink_err(&path, e))
            }
        }
    }

    /// Flush buffered output at end of run.
    pub fn flush(&mut self) -> Result<()> {
        match self {
            OpenSink::Stream { path, writer } => writer.flush().map_err(|e| sink_err(path, e)),
            OpenSink::Directory { .. } => Ok(()),
        }
    }
}
