mod annotate;
mod detectors;
mod error;
mod lexicon;
mod scan;

pub use annotate::apply_answer;
pub use detectors::{marker_count, marker_ranges};
pub use error::{Result, ScanError};
pub use lexicon::{Category, Lexicon, MARKER_RE};
pub use scan::{AmbiguityCandidate, Scanner};
