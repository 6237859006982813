//! Overlapping-window splitting for over-length sequences.
//!
//! Long sequences are expanded into windows that overlap like shingles:
//!
//! ```text
//!           |<-max_length->|<-overlap->|
//! window 0  |--------------|-----------|
//!                          |<-max_length->|<-overlap->|
//! window 1                 |--------------|-----------|
//! ```
//!
//! Window `i` covers `[i*max_length, (i+1)*max_length + overlap)`, clamped
//! to the sequence length, so the final window may be shorter. A sequence
//! at or under `max_length` passes through as a single unmodified window.

use crate::reader::RecordSource;
use crate::record::{FilterError, Result, SequenceRecord};
use crate::sink::OpenSink;
use std::fmt;
use std::io::{self, Write};
use std::time::Instant;

/// Derived identifier `base.<start+1>.<end>` (1-based, inclusive).
fn window_identifier(base: &str, start: usize, end: usize) -> String {
    let mut buf = itoa::Buffer::new();
    let mut id = String::with_capacity(base.len() + 24);
    id.push_str(base);
    id.push('.');
    id.push_str(buf.format(start + 1));
    id.push('.');
    id.push_str(buf.format(end));
    id
}

/// Derived description `base (<start+1>-<end>)`.
fn window_description(base: &str, start: usize, end: usize) -> String {
    let mut buf = itoa::Buffer::new();
    let mut desc = String::with_capacity(base.len() + 24);
    desc.push_str(base);
    desc.push_str(" (");
    desc.push_str(buf.format(start + 1));
    desc.push('-');
    desc.push_str(buf.format(end));
    desc.push(')');
    desc
}

/// Splits over-length sequences into overlapping windows.
#[derive(Debug, Clone, Copy)]
pub struct Windower {
    max_length: usize,
    overlap: usize,
}

impl Windower {
    /// Validate the window geometry once per run: `max_length` must be
    /// nonzero and strictly greater than `overlap`.
    pub fn new(max_length: usize, overlap: usize) -> Result<Self> {
        if max_length == 0 {
            return Err(FilterError::Config(
                "window length must be greater than zero".to_string(),
            ));
        }
        if max_length <= overlap {
            return Err(FilterError::Config(format!(
                "window length ({}) must be greater than overlap ({})",
                max_length, overlap
            )));
        }
        Ok(Self {
            max_length,
            overlap,
        })
    }

    /// Split one record into windows. Pure: identical inputs yield
    /// identical window sequences.
    ///
    /// A record whose sequence is not longer than `max_length` comes back
    /// unchanged as the only element (no coordinate suffix).
    pub fn split(&self, record: &SequenceRecord) -> Vec<SequenceRecord> {
        let len = record.seq_len();
        if len <= self.max_length {
            return vec![record.clone()];
        }

        let div = len / self.max_length;
        let modulus = len % self.max_length;
        let windows = if modulus > 0 { div + 1 } else { div };

        let mut out = Vec::with_capacity(windows);
        for i in 0..windows {
            let start = i * self.max_length;
            let end = ((i + 1) * self.max_length + self.overlap).min(len);

            let identifier = window_identifier(&record.identifier, start, end);
            let description = window_description(&record.description, start, end);
            let mut window = SequenceRecord {
                version: identifier.clone(),
                identifier,
                description,
                sequence: record.sequence[start..end].to_string(),
                raw_text: String::new(),
            };
            window.raw_text = window.to_fasta();
            out.push(window);
        }
        out
    }

    /// Stream every record from the source, splitting over-length ones,
    /// and write each resulting record to the single configured sink in
    /// emission order.
    pub fn run(&self, source: &mut dyn RecordSource, sink: &mut OpenSink) -> Result<SplitStats> {
        let start = Instant::now();
        let mut stats = SplitStats::default();

        while let Some(record) = source.read_record()? {
            stats.records += 1;
            if record.seq_len() > self.max_length {
                stats.split_records += 1;
            }
            for window in self.split(&record) {
                sink.write_record(&window)?;
                stats.windows += 1;
            }
        }

        sink.flush()?;
        stats.elapsed_secs = start.elapsed().as_secs();
        Ok(stats)
    }
}

/// End-of-run statistics for one split pass.
#[derive(Debug, Default, Clone)]
pub struct SplitStats {
    /// Total records read from the source.
    pub records: u64,
    /// Records that exceeded the length threshold.
    pub split_records: u64,
    /// Records written out (windows plus pass-throughs).
    pub windows: u64,
    /// Wall-clock run duration, whole seconds.
    pub elapsed_secs: u64,
}

impl SplitStats {
    /// Write the line-oriented run report.
    pub fn write_report<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<()> {
        writeln!(w, "Total runtime in seconds: {}", self.elapsed_secs)?;
        writeln!(w)?;
        writeln!(w, "Count statistics for split")?;
        writeln!(w, "    Total records: {}", self.records)?;
        writeln!(w, "    Records split: {}", self.split_records)?;
        writeln!(w, "    Records written: {}", self.windows)?;
        writeln!(w)?;
        Ok(())
    }
}

impl fmt::Display for SplitStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Records: {}, Split: {}, Written: {}, Elapsed: {}s",
            self.records, self.split_records, self.windows, self.elapsed_secs
        )
    }
}
