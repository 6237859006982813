//! Decider-to-sink routing configuration.
//!
//! A router is built once per run from an ordered token stream that must
//! alternate strictly: select a decider, then give it exactly one sink,
//! then the next selection. There is no default sink and no partial
//! pairing — any violation is a configuration error detected before the
//! first record is read.
//!
//! Two selections may name the same output path; they share one sink (and
//! later one writer handle) so concurrent pairings cannot clobber each
//! other's writes. The same path under conflicting kinds is rejected.

use crate::decider::{self, Decider};
use crate::record::{FilterError, Result};
use crate::sink::{SinkKind, SinkSpec};
use rustc_hash::FxHashMap;
use std::path::PathBuf;

/// One token of the routing grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteToken {
    /// `--<name>`: select the named decider.
    Select(String),
    /// `-a|-o|-d <path>`: pair the pending selection with a sink.
    Sink(SinkSpec),
}

/// Lex raw CLI-style routing arguments into tokens.
///
/// Grammar: `--<deciderName> {-a|-o|-d} <path>`, repeated.
pub fn parse_route_args(args: &[String]) -> Result<Vec<RouteToken>> {
    let mut tokens = Vec::with_capacity(args.len());
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if let Some(name) = arg.strip_prefix("--") {
            if name.is_empty() {
                return Err(FilterError::Config("empty decider name: --".to_string()));
            }
            tokens.push(RouteToken::Select(name.to_string()));
            continue;
        }
        let kind = match arg.as_str() {
            "-a" => SinkKind::Append,
            "-o" => SinkKind::Overwrite,
            "-d" => SinkKind::Directory,
            other => {
                return Err(FilterError::Config(format!(
                    "stray routing token: {}",
                    other
                )));
            }
        };
        let path = iter.next().ok_or_else(|| {
            FilterError::Config(format!("missing path argument for {}", arg))
        })?;
        tokens.push(RouteToken::Sink(SinkSpec::new(kind, path)));
    }
    Ok(tokens)
}

/// One resolved (decider, sink) association.
#[derive(Debug, Clone, Copy)]
pub struct Pairing {
    pub decider: Decider,
    /// Index into the router's sink table. Pairings naming the same path
    /// share an index.
    pub sink: usize,
}

/// The resolved, ordered decider-to-sink mapping for one run.
#[derive(Debug)]
pub struct Router {
    pairings: Vec<Pairing>,
    sinks: Vec<SinkSpec>,
}

impl Router {
    /// Build a router from routing tokens, validating strict alternation
    /// and decider names against the registry.
    pub fn build(tokens: Vec<RouteToken>) -> Result<Self> {
        let registry = decider::by_name();
        let mut pairings: Vec<Pairing> = Vec::new();
        let mut sinks: Vec<SinkSpec> = Vec::new();
        let mut sink_index: FxHashMap<PathBuf, usize> = FxHashMap::default();
        let mut pending: Option<Decider> = None;

        for token in tokens {
            match token {
                RouteToken::Select(name) => {
                    if let Some(prev) = pending {
                        return Err(FilterError::Config(format!(
                            "decider '{}' selected but not paired with a sink before '{}'",
                            prev.name, name
                        )));
                    }
                    let d = registry.get(name.as_str()).copied().ok_or_else(|| {
                        FilterError::Config(format!("unknown decider: {}", name))
                    })?;
                    pending = Some(d);
                }
                RouteToken::Sink(spec) => {
                    let decider = pending.take().ok_or_else(|| {
                        FilterError::Config(format!(
                            "sink {} given with no preceding decider selection",
                            spec.path.display()
                        ))
                    })?;
                    let sink = match sink_index.get(&spec.path) {
                        Some(&idx) => {
                            if sinks[idx].kind != spec.kind {
                                return Err(FilterError::Config(format!(
                                    "conflicting sink kinds for path: {}",
                                    spec.path.display()
                                )));
                            }
                            idx
                        }
                        None => {
                            let idx = sinks.len();
                            sink_index.insert(spec.path.clone(), idx);
                            sinks.push(spec);
                            idx
                        }
                    };
                    pairings.push(Pairing { decider, sink });
                }
            }
        }

        if let Some(prev) = pending {
            return Err(FilterError::Config(format!(
                "decider '{}' selected but not paired with a sink",
                prev.name
            )));
        }
        if pairings.is_empty() {
            return Err(FilterError::Config(
                "no decider/sink pairings configured".to_string(),
            ));
        }

        Ok(Self { pairings, sinks })
    }

    pub fn pairings(&self) -> &[Pairing] {
        &self.pairings
    }

    pub fn sinks(&self) -> &[SinkSpec] {
        &self.sinks
    }
}
