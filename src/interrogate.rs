//! Stateless annotation interrogators.
//!
//! Predicates never parse records themselves; they go through these pure
//! functions, which know where each flat-file layout keeps its organism,
//! division, and keyword fields. A field that cannot be located yields
//! `None` so callers can degrade to "predicate is false" instead of
//! failing the run.

use crate::record::SequenceRecord;

/// Case-insensitive ASCII substring test without allocating.
pub fn contains_ignore_ascii_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let h = haystack.as_bytes();
    let n = needle.as_bytes();
    if n.len() > h.len() {
        return false;
    }
    h.windows(n.len()).any(|w| w.eq_ignore_ascii_case(n))
}

/// Field extraction for the GenBank flat-file layout.
pub mod genbank {
    use super::contains_ignore_ascii_case;
    use crate::record::SequenceRecord;

    /// True if the raw text looks like a GenBank entry.
    pub fn is_genbank(record: &SequenceRecord) -> bool {
        record.raw_text.starts_with("LOCUS")
    }

    /// The `ORGANISM` field (first line only).
    pub fn organism(record: &SequenceRecord) -> Option<&str> {
        record
            .raw_text
            .lines()
            .find_map(|line| line.trim_start().strip_prefix("ORGANISM"))
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// The three-letter division code from the `LOCUS` line (e.g. ROD, HTG).
    ///
    /// The LOCUS line ends with `<division> <date>`; the division is the
    /// second-to-last whitespace-separated token.
    pub fn division(record: &SequenceRecord) -> Option<&str> {
        let locus = record
            .raw_text
            .lines()
            .find(|line| line.starts_with("LOCUS"))?;
        let tokens: Vec<&str> = locus.split_whitespace().collect();
        if tokens.len() < 4 {
            return None;
        }
        let division = tokens[tokens.len() - 2];
        if division.len() == 3 && division.bytes().all(|b| b.is_ascii_uppercase()) {
            Some(division)
        } else {
            None
        }
    }

    /// The `KEYWORDS` field (first line only).
    pub fn keywords(record: &SequenceRecord) -> Option<&str> {
        record
            .raw_text
            .lines()
            .find_map(|line| line.strip_prefix("KEYWORDS"))
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// True if the organism field matches `name` (case-insensitive).
    pub fn organism_is(record: &SequenceRecord, name: &str) -> bool {
        organism(record).is_some_and(|o| contains_ignore_ascii_case(o, name))
    }
}

/// Field extraction for the SwissProt flat-file layout.
pub mod swissprot {
    use super::contains_ignore_ascii_case;
    use crate::record::SequenceRecord;

    /// True if the raw text looks like a SwissProt entry.
    pub fn is_swissprot(record: &SequenceRecord) -> bool {
        record.raw_text.starts_with("ID ")
    }

    /// The species field from the first `OS` line.
    pub fn organism(record: &SequenceRecord) -> Option<&str> {
        record
            .raw_text
            .lines()
            .find_map(|line| line.strip_prefix("OS "))
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// True if the organism field matches `name` (case-insensitive).
    pub fn organism_is(record: &SequenceRecord, name: &str) -> bool {
        organism(record).is_some_and(|o| contains_ignore_ascii_case(o, name))
    }
}

/// The organism field of a record in either supported layout.
///
/// GenBank is consulted first, then SwissProt, so organism deciders work
/// against both stream kinds with one registry name.
pub fn organism(record: &SequenceRecord) -> Option<&str> {
    genbank::organism(record).or_else(|| swissprot::organism(record))
}

/// True if the record's organism (either layout) matches `name`.
pub fn organism_is(record: &SequenceRecord, name: &str) -> bool {
    organism(record).is_some_and(|o| contains_ignore_ascii_case(o, name))
}
