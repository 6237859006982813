//! End-to-end pipeline tests driving the library API.
//!
//! Covers the full filter path (reader -> router -> engine -> sinks) and
//! the split path (reader -> windower -> sink) over real files.

use seqsift::engine::FilterEngine;
use seqsift::reader::{FastaReader, GenbankReader, SwissProtReader};
use seqsift::record::FilterError;
use seqsift::router::{parse_route_args, Router};
use seqsift::sink::{OpenSink, SinkKind, SinkSpec};
use seqsift::window::Windower;
use std::fs;
use std::io::Cursor;
use tempfile::TempDir;

fn route(args: &[&str]) -> Result<Router, FilterError> {
    let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    Router::build(parse_route_args(&args)?)
}

fn genbank_record(accession: &str, division: &str, organism: &str) -> String {
    format!(
        "LOCUS       {acc}     40 bp    DNA             {div}       01-JAN-2000\n\
DEFINITION  {org} test sequence.\n\
ACCESSION   {acc}\n\
VERSION     {acc}.1\n\
  ORGANISM  {org}\n\
ORIGIN\n\
        1 acgtacgtac gtacgtacgt acgtacgtac gtacgtacgt\n\
//\n",
        acc = accession,
        div = division,
        org = organism
    )
}

#[test]
fn filter_routes_mixed_stream_to_matching_sinks() {
    let dir = TempDir::new().unwrap();
    let mouse_out = dir.path().join("mouse.seq");
    let rodent_dir = dir.path().join("rodents");
    fs::create_dir(&rodent_dir).unwrap();

    let router = route(&[
        "--mouse",
        "-o",
        mouse_out.to_str().unwrap(),
        "--rodent",
        "-d",
        rodent_dir.to_str().unwrap(),
    ])
    .unwrap();

    let mouse = genbank_record("M00001", "ROD", "Mus musculus");
    let rat = genbank_record("R00001", "ROD", "Rattus norvegicus");
    let human = genbank_record("H00001", "PRI", "Homo sapiens");
    let input = format!("{}{}{}", mouse, rat, human);

    let mut source = GenbankReader::new(Cursor::new(input));
    let stats = FilterEngine::new(router).run(&mut source).unwrap();

    assert_eq!(stats.records, 3);
    assert_eq!(stats.deciders[0].name, "mouse");
    assert_eq!(stats.deciders[0].seen, 3);
    assert_eq!(stats.deciders[0].matched, 1);
    assert_eq!(stats.deciders[1].name, "rodent");
    assert_eq!(stats.deciders[1].seen, 3);
    assert_eq!(stats.deciders[1].matched, 2);

    // File sink got the mouse record verbatim.
    assert_eq!(fs::read_to_string(&mouse_out).unwrap(), mouse);
    // Directory sink got one file per rodent, named by version.
    assert_eq!(
        fs::read_to_string(rodent_dir.join("M00001.1")).unwrap(),
        mouse
    );
    assert_eq!(fs::read_to_string(rodent_dir.join("R00001.1")).unwrap(), rat);
    assert!(!rodent_dir.join("H00001.1").exists());
}

#[test]
fn filter_is_deterministic_across_runs() {
    let input = format!(
        "{}{}",
        genbank_record("A1", "ROD", "Mus musculus"),
        genbank_record("B1", "ROD", "Rattus norvegicus")
    );

    let mut outputs = Vec::new();
    for _ in 0..2 {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("rodent.seq");
        let router = route(&["--rodent", "-a", out.to_str().unwrap()]).unwrap();
        let mut source = GenbankReader::new(Cursor::new(input.clone()));
        FilterEngine::new(router).run(&mut source).unwrap();
        outputs.push(fs::read_to_string(&out).unwrap());
    }
    assert_eq!(outputs[0], outputs[1]);
}

#[test]
fn filter_swissprot_stream() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("sprot_mouse.seq");
    let router = route(&["--mouse", "-a", out.to_str().unwrap()]).unwrap();

    let entry = "ID   ABC_MOUSE     STANDARD;      PRT;   6 AA.\n\
AC   P10000;\n\
DE   Some mouse protein.\n\
OS   Mus musculus (Mouse).\n\
SQ   SEQUENCE   6 AA;  700 MW;  0 CRC32;\n\
     MKVLAA\n\
//\n";
    let other = "ID   XYZ_YEAST     STANDARD;      PRT;   6 AA.\n\
AC   P20000;\n\
DE   Some yeast protein.\n\
OS   Saccharomyces cerevisiae (Baker's yeast).\n\
SQ   SEQUENCE   6 AA;  700 MW;  0 CRC32;\n\
     MKVLAA\n\
//\n";

    let mut source = SwissProtReader::new(Cursor::new(format!("{}{}", entry, other)));
    let stats = FilterEngine::new(router).run(&mut source).unwrap();

    assert_eq!(stats.records, 2);
    assert_eq!(stats.deciders[0].matched, 1);
    assert_eq!(fs::read_to_string(&out).unwrap(), entry);
}

#[test]
fn pairing_errors_are_detected_before_any_processing() {
    // Two selects in a row.
    let err = route(&["--mouse", "--rat", "-a", "/tmp/x.seq"]).unwrap_err();
    assert!(matches!(err, FilterError::Config(_)));

    // Sink with no preceding selection.
    let err = route(&["-a", "/tmp/x.seq"]).unwrap_err();
    assert!(matches!(err, FilterError::Config(_)));

    // Unknown decider name.
    let err = route(&["--walrus", "-a", "/tmp/x.seq"]).unwrap_err();
    assert!(matches!(err, FilterError::Config(_)));
}

#[test]
fn split_writes_three_windows_for_25_10_2() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("windows.fa");
    let mut sink = OpenSink::open(&SinkSpec::new(SinkKind::Overwrite, &out)).unwrap();

    let seq = "ACGTACGTACGTACGTACGTACGTA"; // 25 symbols
    let input = format!(">seqA assembly piece\n{}\n", seq);
    let mut source = FastaReader::new(Cursor::new(input));

    let windower = Windower::new(10, 2).unwrap();
    let stats = windower.run(&mut source, &mut sink).unwrap();

    assert_eq!(stats.records, 1);
    assert_eq!(stats.split_records, 1);
    assert_eq!(stats.windows, 3);

    let content = fs::read_to_string(&out).unwrap();
    let expected = format!(
        ">seqA.1.12 assembly piece (1-12)\n{}\n\
>seqA.11.22 assembly piece (11-22)\n{}\n\
>seqA.21.25 assembly piece (21-25)\n{}\n",
        &seq[0..12],
        &seq[10..22],
        &seq[20..25]
    );
    assert_eq!(content, expected);
}

#[test]
fn split_threshold_is_strictly_greater() {
    let windower = Windower::new(10, 2).unwrap();

    let at_threshold = ">a\nAAAAAAAAAA\n"; // len == 10
    let mut source = FastaReader::new(Cursor::new(at_threshold));
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("a.fa");
    let mut sink = OpenSink::open(&SinkSpec::new(SinkKind::Overwrite, &out)).unwrap();
    let stats = windower.run(&mut source, &mut sink).unwrap();
    assert_eq!(stats.windows, 1);
    // Unmodified pass-through, no coordinate suffix.
    assert_eq!(fs::read_to_string(&out).unwrap(), at_threshold);

    let over = ">a\nAAAAAAAAAAA\n"; // len == 11
    let mut source = FastaReader::new(Cursor::new(over));
    let out2 = dir.path().join("b.fa");
    let mut sink = OpenSink::open(&SinkSpec::new(SinkKind::Overwrite, &out2)).unwrap();
    let stats = windower.run(&mut source, &mut sink).unwrap();
    assert!(stats.windows >= 2);
}

#[test]
fn split_append_mode_accumulates_across_runs() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("acc.fa");
    let windower = Windower::new(10, 2).unwrap();

    for _ in 0..2 {
        let mut sink = OpenSink::open(&SinkSpec::new(SinkKind::Append, &out)).unwrap();
        let mut source = FastaReader::new(Cursor::new(">a\nACGT\n"));
        windower.run(&mut source, &mut sink).unwrap();
    }

    assert_eq!(fs::read_to_string(&out).unwrap(), ">a\nACGT\n>a\nACGT\n");
}

#[test]
fn unreadable_input_aborts_with_parse_error() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("x.seq");
    let router = route(&["--genbank", "-a", out.to_str().unwrap()]).unwrap();

    // A GenBank stream ending inside a record is fatal.
    let mut source = GenbankReader::new(Cursor::new("LOCUS       X1\nORIGIN\n"));
    let err = FilterEngine::new(router).run(&mut source).unwrap_err();
    assert!(matches!(err, FilterError::Parse { .. }));
}
