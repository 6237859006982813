//! Streaming sequence record readers.
//!
//! Three input layouts are supported: FASTA, GenBank flat file, and
//! SwissProt flat file. Each reader is single-pass and blocking, yielding
//! one [`SequenceRecord`] per call until end of stream. The raw text of
//! every record is preserved verbatim so the filter pipeline can write
//! matches without reconstructing them from parsed fields.

use crate::record::{FilterError, Result, SequenceRecord};
use memchr::memchr;
use std::io::{BufRead, BufReader, Read};

/// A blocking, single-pass source of sequence records.
///
/// `read_record` returns `Ok(None)` at end of stream; records are never
/// re-read and the stream cannot be rewound.
pub trait RecordSource {
    fn read_record(&mut self) -> Result<Option<SequenceRecord>>;
}

/// Split a FASTA header (without the leading `>`) into id and description.
fn split_header(header: &str) -> (&str, &str) {
    match memchr(b' ', header.as_bytes()) {
        Some(pos) => (&header[..pos], header[pos + 1..].trim_start()),
        None => (header, ""),
    }
}

/// Streaming FASTA reader.
pub struct FastaReader<R: Read> {
    reader: BufReader<R>,
    line_number: usize,
    buffer: String,
    /// Header line of the next record, already consumed from the stream.
    pending_header: Option<String>,
}

impl<R: Read> FastaReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            line_number: 0,
            buffer: String::with_capacity(1024),
            pending_header: None,
        }
    }

    /// Read the next line, trimmed of the trailing newline.
    /// Returns `Ok(false)` at end of stream.
    fn next_line(&mut self) -> Result<bool> {
        self.buffer.clear();
        let bytes_read = self.reader.read_line(&mut self.buffer)?;
        if bytes_read == 0 {
            return Ok(false);
        }
        self.line_number += 1;
        while self.buffer.ends_with('\n') || self.buffer.ends_with('\r') {
            self.buffer.pop();
        }
        Ok(true)
    }
}

impl<R: Read> RecordSource for FastaReader<R> {
    fn read_record(&mut self) -> Result<Option<SequenceRecord>> {
        let header = match self.pending_header.take() {
            Some(h) => h,
            None => loop {
                if !self.next_line()? {
                    return Ok(None);
                }
                let line = self.buffer.trim();
                if line.is_empty() {
                    continue;
                }
                if !line.starts_with('>') {
                    return Err(FilterError::Parse {
                        line: self.line_number,
                        message: format!("expected FASTA header, got: {}", line),
                    });
                }
                break line.to_string();
            },
        };

        let mut raw_text = String::with_capacity(1024);
        raw_text.push_str(&header);
        raw_text.push('\n');

        let mut sequence = String::with_capacity(1024);
        loop {
            if !self.next_line()? {
                break;
            }
            let line = self.buffer.trim();
            if line.starts_with('>') {
                self.pending_header = Some(line.to_string());
                break;
            }
            if line.is_empty() {
                continue;
            }
            raw_text.push_str(line);
            raw_text.push('\n');
            sequence.push_str(line);
        }

        let (identifier, description) = split_header(&header[1..]);
        Ok(Some(SequenceRecord {
            identifier: identifier.to_string(),
            version: identifier.to_string(),
            description: description.to_string(),
            sequence,
            raw_text,
        }))
    }
}

/// Accumulate one flat-file record (GenBank or SwissProt) terminated by a
/// line starting with `//`. Returns the raw block including the terminator.
fn read_flat_block<R: Read>(
    reader: &mut BufReader<R>,
    buffer: &mut String,
    line_number: &mut usize,
) -> Result<Option<String>> {
    let mut raw_text = String::new();
    loop {
        buffer.clear();
        let bytes_read = reader.read_line(buffer)?;
        if bytes_read == 0 {
            if raw_text.trim().is_empty() {
                return Ok(None);
            }
            // Stream ended inside an unterminated record.
            return Err(FilterError::Parse {
                line: *line_number,
                message: "unexpected end of stream inside record (missing //)".to_string(),
            });
        }
        *line_number += 1;
        while buffer.ends_with('\n') || buffer.ends_with('\r') {
            buffer.pop();
        }
        // Skip blank lines between records.
        if raw_text.is_empty() && buffer.trim().is_empty() {
            continue;
        }
        raw_text.push_str(buffer);
        raw_text.push('\n');
        if buffer.starts_with("//") {
            return Ok(Some(raw_text));
        }
    }
}

/// First whitespace-separated token of the remainder of a keyword line.
fn keyword_value<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(keyword)?;
    rest.split_whitespace().next()
}

/// Streaming GenBank flat-file reader.
///
/// Records run from `LOCUS` to the `//` terminator. The identifier comes
/// from the `ACCESSION` line (falling back to the `LOCUS` name), the
/// version from the `VERSION` line, and the description from `DEFINITION`.
pub struct GenbankReader<R: Read> {
    reader: BufReader<R>,
    line_number: usize,
    buffer: String,
}

impl<R: Read> GenbankReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            line_number: 0,
            buffer: String::with_capacity(1024),
        }
    }
}

impl<R: Read> RecordSource for GenbankReader<R> {
    fn read_record(&mut self) -> Result<Option<SequenceRecord>> {
        let raw_text =
            match read_flat_block(&mut self.reader, &mut self.buffer, &mut self.line_number)? {
                Some(raw) => raw,
                None => return Ok(None),
            };

        let mut locus_name = "";
        let mut accession = "";
        let mut version = "";
        let mut definition = "";
        let mut sequence = String::new();
        let mut in_origin = false;

        for line in raw_text.lines() {
            if line.starts_with("//") {
                break;
            }
            if in_origin {
                // ORIGIN lines carry position numbers and spaced base groups.
                sequence.extend(line.chars().filter(|c| c.is_ascii_alphabetic()));
                continue;
            }
            if line.starts_with("ORIGIN") {
                in_origin = true;
            } else if locus_name.is_empty() {
                if let Some(v) = keyword_value(line, "LOCUS") {
                    locus_name = v;
                }
            }
            if accession.is_empty() {
                if let Some(v) = keyword_value(line, "ACCESSION") {
                    accession = v;
                }
            }
            if version.is_empty() {
                if let Some(v) = keyword_value(line, "VERSION") {
                    version = v;
                }
            }
            if definition.is_empty() {
                if let Some(rest) = line.strip_prefix("DEFINITION") {
                    definition = rest.trim();
                }
            }
        }

        let identifier = if accession.is_empty() {
            locus_name
        } else {
            accession
        };
        let version = if version.is_empty() {
            identifier
        } else {
            version
        };

        Ok(Some(SequenceRecord {
            identifier: identifier.to_string(),
            version: version.to_string(),
            description: definition.to_string(),
            sequence,
            raw_text,
        }))
    }
}

/// Streaming SwissProt flat-file reader.
///
/// Records run from `ID` to the `//` terminator. The identifier is the
/// first `AC` accession (falling back to the `ID` entry name); SwissProt
/// entries carry no version, so the identifier doubles as one.
pub struct SwissProtReader<R: Read> {
    reader: BufReader<R>,
    line_number: usize,
    buffer: String,
}

impl<R: Read> SwissProtReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            line_number: 0,
            buffer: String::with_capacity(1024),
        }
    }
}

impl<R: Read> RecordSource for SwissProtReader<R> {
    fn read_record(&mut self) -> Result<Option<SequenceRecord>> {
        let raw_text =
            match read_flat_block(&mut self.reader, &mut self.buffer, &mut self.line_number)? {
                Some(raw) => raw,
                None => return Ok(None),
            };

        let mut entry_name = "";
        let mut accession = "";
        let mut description = "";
        let mut sequence = String::new();
        let mut in_sequence = false;

        for line in raw_text.lines() {
            if line.starts_with("//") {
                break;
            }
            if in_sequence {
                sequence.extend(line.chars().filter(|c| c.is_ascii_alphabetic()));
                continue;
            }
            if line.starts_with("SQ ") || line == "SQ" {
                in_sequence = true;
            } else if entry_name.is_empty() {
                if let Some(v) = keyword_value(line, "ID ") {
                    entry_name = v;
                }
            }
            if accession.is_empty() {
                if let Some(v) = keyword_value(line, "AC ") {
                    accession = v.trim_end_matches(';');
                }
            }
            if description.is_empty() {
                if let Some(rest) = line.strip_prefix("DE ") {
                    description = rest.trim();
                }
            }
        }

        let identifier = if accession.is_empty() {
            entry_name
        } else {
            accession
        };

        Ok(Some(SequenceRecord {
            identifier: identifier.to_string(),
            version: identifier.to_string(),
            description: description.to_string(),
            sequence,
            raw_text,
        }))
    }
}
