//! Corpus-level operations: assembling every article into one dataset
//! bundle, and counting what the bundle holds.

pub mod assembler;
pub mod stats;

pub use assembler::{ArticleFailure, CorpusAssembler};
pub use stats::CorpusStats;
