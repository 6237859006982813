//! Named boolean predicates over sequence records.
//!
//! The decider set is closed: each decider is a name paired with a pure
//! `fn(&SequenceRecord) -> bool`, selected by name at configuration time.
//! Counters are not kept here. The engine owns a seen/match pair per
//! routed pairing, so the same predicate can feed several sinks with
//! independently meaningful counts.

use crate::interrogate::{self, genbank, swissprot};
use crate::record::SequenceRecord;
use rustc_hash::FxHashMap;

/// A named boolean predicate over a [`SequenceRecord`].
#[derive(Debug, Clone, Copy)]
pub struct Decider {
    pub name: &'static str,
    predicate: fn(&SequenceRecord) -> bool,
}

impl Decider {
    /// Evaluate the predicate. Never fails: a record in which the
    /// interrogated field is absent evaluates to false.
    #[inline]
    pub fn evaluate(&self, record: &SequenceRecord) -> bool {
        (self.predicate)(record)
    }
}

fn is_mouse(record: &SequenceRecord) -> bool {
    interrogate::organism_is(record, "mus musculus")
}

fn is_rat(record: &SequenceRecord) -> bool {
    interrogate::organism_is(record, "rattus")
}

fn is_rodent(record: &SequenceRecord) -> bool {
    is_mouse(record) || is_rat(record) || genbank::division(record) == Some("ROD")
}

fn is_human(record: &SequenceRecord) -> bool {
    interrogate::organism_is(record, "homo sapiens")
}

fn is_htg(record: &SequenceRecord) -> bool {
    genbank::division(record) == Some("HTG")
}

fn is_sts_mouse(record: &SequenceRecord) -> bool {
    genbank::division(record) == Some("STS") && is_mouse(record)
}

fn is_mouse_bac(record: &SequenceRecord) -> bool {
    is_mouse(record)
        && genbank::keywords(record)
            .is_some_and(|k| interrogate::contains_ignore_ascii_case(k, "bac"))
}

fn is_genbank(record: &SequenceRecord) -> bool {
    genbank::is_genbank(record)
}

fn is_swissprot(record: &SequenceRecord) -> bool {
    swissprot::is_swissprot(record)
}

/// The full decider registry, in a stable order.
pub const REGISTRY: &[Decider] = &[
    Decider {
        name: "mouse",
        predicate: is_mouse,
    },
    Decider {
        name: "rat",
        predicate: is_rat,
    },
    Decider {
        name: "rodent",
        predicate: is_rodent,
    },
    Decider {
        name: "human",
        predicate: is_human,
    },
    Decider {
        name: "htg",
        predicate: is_htg,
    },
    Decider {
        name: "stsmouse",
        predicate: is_sts_mouse,
    },
    Decider {
        name: "mousebac",
        predicate: is_mouse_bac,
    },
    Decider {
        name: "genbank",
        predicate: is_genbank,
    },
    Decider {
        name: "sprot",
        predicate: is_swissprot,
    },
];

/// Name-to-decider lookup table over [`REGISTRY`].
pub fn by_name() -> FxHashMap<&'static str, Decider> {
    REGISTRY.iter().map(|d| (d.name, *d)).collect()
}

/// Look up a single decider by name.
pub fn lookup(name: &str) -> Option<Decider> {
    REGISTRY.iter().find(|d| d.name == name).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gb(raw: &str) -> SequenceRecord {
        SequenceRecord {
            identifier: "X".to_string(),
            version: "X.1".to_string(),
            description: String::new(),
            sequence: "acgt".to_string(),
            raw_text: raw.to_string(),
        }
    }

    const GB_MOUSE_BAC: &str = "LOCUS       AB000001     120 bp    DNA             HTG       01-JAN-2000\n\
ACCESSION   AB000001\n\
KEYWORDS    HTG; BAC.\n\
  ORGANISM  Mus musculus\n\
//\n";

    const GB_RAT_STS: &str = "LOCUS       AB000002     80 bp    DNA             STS       01-JAN-2000\n\
ACCESSION   AB000002\n\
  ORGANISM  Rattus norvegicus\n\
//\n";

    const SP_MOUSE: &str = "ID   TEST_MOUSE     STANDARD;      PRT;   3 AA.\n\
AC   P12345;\n\
OS   Mus musculus (Mouse).\n\
//\n";

    #[test]
    fn test_registry_names_are_unique() {
        let mut names: Vec<&str> = REGISTRY.iter().map(|d| d.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), REGISTRY.len());
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("mouse").unwrap().name, "mouse");
        assert!(lookup("armadillo").is_none());
        assert_eq!(by_name().len(), REGISTRY.len());
    }

    #[test]
    fn test_organism_deciders_on_genbank() {
        let mouse = gb(GB_MOUSE_BAC);
        assert!(lookup("mouse").unwrap().evaluate(&mouse));
        assert!(lookup("rodent").unwrap().evaluate(&mouse));
        assert!(!lookup("rat").unwrap().evaluate(&mouse));
        assert!(!lookup("human").unwrap().evaluate(&mouse));
    }

    #[test]
    fn test_division_and_keyword_deciders() {
        let mouse = gb(GB_MOUSE_BAC);
        assert!(lookup("htg").unwrap().evaluate(&mouse));
        assert!(lookup("mousebac").unwrap().evaluate(&mouse));
        assert!(!lookup("stsmouse").unwrap().evaluate(&mouse));

        let rat = gb(GB_RAT_STS);
        assert!(!lookup("stsmouse").unwrap().evaluate(&rat));
        assert!(lookup("rat").unwrap().evaluate(&rat));
        assert!(lookup("rodent").unwrap().evaluate(&rat));

        let sts_mouse = gb(
            "LOCUS       AB000003     80 bp    DNA             STS       01-JAN-2000\n\
ACCESSION   AB000003\n\
  ORGANISM  Mus musculus\n\
//\n",
        );
        assert!(lookup("stsmouse").unwrap().evaluate(&sts_mouse));
        assert!(!lookup("mousebac").unwrap().evaluate(&sts_mouse));
    }

    #[test]
    fn test_format_gates() {
        let gb_rec = gb(GB_MOUSE_BAC);
        let sp_rec = gb(SP_MOUSE);
        assert!(lookup("genbank").unwrap().evaluate(&gb_rec));
        assert!(!lookup("genbank").unwrap().evaluate(&sp_rec));
        assert!(lookup("sprot").unwrap().evaluate(&sp_rec));
        assert!(!lookup("sprot").unwrap().evaluate(&gb_rec));
    }

    #[test]
    fn test_organism_deciders_cross_family() {
        // One registry name works against either stream layout.
        let sp_rec = gb(SP_MOUSE);
        assert!(lookup("mouse").unwrap().evaluate(&sp_rec));
        assert!(!lookup("rat").unwrap().evaluate(&sp_rec));
        // GenBank-only deciders are simply false for SwissProt records.
        assert!(!lookup("htg").unwrap().evaluate(&sp_rec));
        assert!(!lookup("mousebac").unwrap().evaluate(&sp_rec));
    }

    #[test]
    fn test_predicates_never_fail_on_odd_records() {
        let empty = gb("");
        for d in REGISTRY {
            // Just exercising every predicate on a field-less record.
            let _ = d.evaluate(&empty);
        }
    }
}
