//! SeqSift: streaming sequence record filtering and splitting.
//!
//! This library classifies sequence records (GenBank, SwissProt, FASTA)
//! against named predicates and routes matches to output sinks, and splits
//! over-length sequences into overlapping windows for bounded indexing.
//!
//! # Example
//!
//! ```rust,no_run
//! use seqsift::engine::FilterEngine;
//! use seqsift::reader::GenbankReader;
//! use seqsift::router::{parse_route_args, Router};
//!
//! let args: Vec<String> = ["--mouse", "-a", "mouse.seq"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//! let router = Router::build(parse_route_args(&args).unwrap()).unwrap();
//!
//! let stdin = std::io::stdin();
//! let mut source = GenbankReader::new(stdin.lock());
//! let stats = FilterEngine::new(router).run(&mut source).unwrap();
//! eprintln!("{}", stats);
//! ```

pub mod decider;
pub mod engine;
pub mod interrogate;
pub mod reader;
pub mod record;
pub mod router;
pub mod sink;
pub mod window;

// Re-export commonly used types
pub use engine::{FilterEngine, RunStats};
pub use reader::{FastaReader, GenbankReader, RecordSource, SwissProtReader};
pub use record::{FilterError, Result, SequenceRecord};
pub use router::Router;
pub use window::{SplitStats, Windower};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::engine::{FilterEngine, RunStats};
    pub use crate::reader::{FastaReader, GenbankReader, RecordSource, SwissProtReader};
    pub use crate::record::{FilterError, Result, SequenceRecord};
    pub use crate::router::{parse_route_args, RouteToken, Router};
    pub use crate::sink::{OpenSink, SinkKind, SinkSpec};
    pub use crate::window::{SplitStats, Windower};
}
