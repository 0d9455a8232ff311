//! The six consistency passes. Each pass is a pure function from the
//! corpus to findings: no mutation, and a missing or malformed document
//! yields fewer findings, never an error.

mod ambiguity;
mod constitution;
mod coverage;
mod duplication;
mod inconsistency;
mod underspecification;

use crate::corpus::Corpus;
use speclens_protocol::{passes, Finding};
use speclens_scanner::Lexicon;

pub(crate) type PassFn = fn(&Corpus, &Lexicon) -> Vec<Finding>;

/// Execution order is fixed; the aggregator's stable sort relies on it for
/// deterministic tie-breaking.
pub(crate) const REGISTRY: [(&str, PassFn); 6] = [
    (passes::DUPLICATION, duplication::run),
    (passes::AMBIGUITY, ambiguity::run),
    (passes::UNDERSPECIFICATION, underspecification::run),
    (passes::CONSTITUTION, constitution::run),
    (passes::COVERAGE, coverage::run),
    (passes::INCONSISTENCY, inconsistency::run),
];
