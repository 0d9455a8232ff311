mod aggregate;
mod corpus;
mod engine;
mod passes;

pub use aggregate::aggregate;
pub use corpus::{keys, Corpus};
pub use engine::Analyzer;
