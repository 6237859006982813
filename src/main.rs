//! SeqSift command-line interface.
//!
//! Usage: seqsift <COMMAND> [OPTIONS]

use clap::{Parser, Subcommand, ValueEnum};
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use seqsift::engine::FilterEngine;
use seqsift::reader::{FastaReader, GenbankReader, RecordSource, SwissProtReader};
use seqsift::record::FilterError;
use seqsift::router::{parse_route_args, Router};
use seqsift::sink::{OpenSink, SinkKind, SinkSpec};
use seqsift::window::Windower;

#[derive(Parser)]
#[command(name = "seqsift")]
#[command(version)]
#[command(
    about = "SeqSift: route sequence records to outputs by named predicates, split long sequences into overlapping windows",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Input record layout.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Fasta,
    Genbank,
    Swissprot,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter records against named deciders and route matches to sinks
    Filter {
        /// Input record format
        #[arg(short, long, value_enum, default_value = "genbank")]
        format: Format,

        /// Input file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Append the run report to this file instead of stderr
        #[arg(long)]
        log: Option<PathBuf>,

        /// Routing pairs: --<decider> {-a|-o|-d} <path>, repeated
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        route: Vec<String>,
    },

    /// Split over-length FASTA sequences into overlapping windows
    Split {
        /// Input FASTA file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file, truncated at run start
        #[arg(short, long, conflicts_with = "append")]
        output: Option<PathBuf>,

        /// Output file, opened in append mode
        #[arg(short, long)]
        append: Option<PathBuf>,

        /// Maximum subsequence length
        #[arg(short = 's', long = "size")]
        max_length: usize,

        /// Overlap length between adjacent windows
        #[arg(short = 'l', long)]
        overlap: usize,

        /// Append the run report to this file instead of stderr
        #[arg(long)]
        log: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Filter {
            format,
            input,
            log,
            route,
        } => run_filter(format, input, log, route),

        Commands::Split {
            input,
            output,
            append,
            max_length,
            overlap,
            log,
        } => run_split(input, output, append, max_length, overlap, log),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Open the record input: a file path, or stdin for `-`/absent.
fn open_input(input: Option<PathBuf>) -> Result<Box<dyn Read>, FilterError> {
    match input {
        Some(path) if path.to_string_lossy() != "-" => {
            let file = File::open(&path).map_err(|e| FilterError::Open { path, source: e })?;
            Ok(Box::new(file))
        }
        _ => Ok(Box::new(io::stdin())),
    }
}

/// Write the run report to the log file (append mode) or stderr.
fn write_report(
    log: Option<PathBuf>,
    report: impl Fn(&mut dyn Write) -> io::Result<()>,
) -> Result<(), FilterError> {
    match log {
        Some(path) => {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| FilterError::Open {
                    path: path.clone(),
                    source: e,
                })?;
            report(&mut file).map_err(|e| FilterError::Sink { path, source: e })
        }
        None => {
            let stderr = io::stderr();
            let mut handle = stderr.lock();
            report(&mut handle).map_err(FilterError::Io)
        }
    }
}

fn run_filter(
    format: Format,
    input: Option<PathBuf>,
    log: Option<PathBuf>,
    route: Vec<String>,
) -> Result<(), FilterError> {
    let router = Router::build(parse_route_args(&route)?)?;

    let input = open_input(input)?;
    let mut source: Box<dyn RecordSource> = match format {
        Format::Fasta => Box::new(FastaReader::new(input)),
        Format::Genbank => Box::new(GenbankReader::new(input)),
        Format::Swissprot => Box::new(SwissProtReader::new(input)),
    };

    let stats = FilterEngine::new(router).run(source.as_mut())?;
    write_report(log, |w| stats.write_report(w))
}

fn run_split(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    append: Option<PathBuf>,
    max_length: usize,
    overlap: usize,
    log: Option<PathBuf>,
) -> Result<(), FilterError> {
    let spec = match (output, append) {
        (Some(path), None) => SinkSpec::new(SinkKind::Overwrite, path),
        (None, Some(path)) => SinkSpec::new(SinkKind::Append, path),
        _ => {
            return Err(FilterError::Config(
                "exactly one of --output or --append is required".to_string(),
            ));
        }
    };

    let windower = Windower::new(max_length, overlap)?;
    let mut sink = OpenSink::open(&spec)?;

    let input = open_input(input)?;
    let mut source = FastaReader::new(input);

    let stats = windower.run(&mut source, &mut sink)?;
    write_report(log, |w| stats.write_report(w))
}
