//! The read/evaluate/route loop.
//!
//! The engine drives a single pass over the record source: every pairing's
//! decider is evaluated against every record, matching records are written
//! to their paired sinks immediately, and per-pairing seen/match counters
//! accumulate for the end-of-run report. An I/O failure while writing is
//! fatal; sinks already written stay in their partial state.

use crate::reader::RecordSource;
use crate::record::Result;
use crate::router::Router;
use crate::sink::OpenSink;
use std::fmt;
use std::io::{self, Write};
use std::time::Instant;

/// Per-pairing counters reported at end of run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeciderStats {
    pub name: &'static str,
    /// Records this pairing's decider was asked about.
    pub seen: u64,
    /// Records for which the predicate was true.
    pub matched: u64,
}

/// End-of-run statistics for one filter pass.
#[derive(Debug, Clone)]
pub struct RunStats {
    /// Total records read from the source.
    pub records: u64,
    /// Wall-clock run duration, whole seconds.
    pub elapsed_secs: u64,
    /// One entry per pairing, in router order.
    pub deciders: Vec<DeciderStats>,
}

impl RunStats {
    /// Write the line-oriented run report.
    pub fn write_report<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<()> {
        writeln!(w, "Total runtime in seconds: {}", self.elapsed_secs)?;
        writeln!(w)?;
        for d in &self.deciders {
            writeln!(w, "Count statistics for {}", d.name)?;
            writeln!(w, "    Total records: {}", d.seen)?;
            writeln!(w, "    Records for this filter: {}", d.matched)?;
            writeln!(w)?;
        }
        Ok(())
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Records: {}, Pairings: {}, Elapsed: {}s",
            self.records,
            self.deciders.len(),
            self.elapsed_secs
        )
    }
}

/// Drives one filter run over a record source.
pub struct FilterEngine {
    router: Router,
}

impl FilterEngine {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    /// Run the filter to end of stream.
    ///
    /// All sink handles are established before the first record is read;
    /// none is closed until the stream is exhausted.
    pub fn run(&self, source: &mut dyn RecordSource) -> Result<RunStats> {
        let start = Instant::now();

        let mut sinks: Vec<OpenSink> = self
            .router
            .sinks()
            .iter()
            .map(OpenSink::open)
            .collect::<Result<_>>()?;

        let pairings = self.router.pairings();
        let mut counters = vec![(0u64, 0u64); pairings.len()];
        let mut records = 0u64;

        while let Some(record) = source.read_record()? {
            records += 1;
            for (pairing, counter) in pairings.iter().zip(counters.iter_mut()) {
                counter.0 += 1;
                if pairing.decider.evaluate(&record) {
                    counter.1 += 1;
                    sinks[pairing.sink].write_record(&record)?;
                }
            }
        }

        for sink in &mut sinks {
            sink.flush()?;
        }

        let deciders = pairings
            .iter()
            .zip(counters)
            .map(|(pairing, (seen, matched))| DeciderStats {
                name: pairing.decider.name,
                seen,
                matched,
            })
            .collect();

        Ok(RunStats {
            records,
            elapsed_secs: start.elapsed().as_secs(),
            deciders,
        })
    }
}
