//! # genia_mrc
//!
//! Converts the GENIA nested-entity corpus into a span-extraction (MRC)
//! dataset with Python bindings.
//!
//! Each sentence's inline annotation markup is turned into a whitespace
//! tokenized passage plus a list of answers. Every answer is a mention
//! labelled with one of five categories (`DNA`, `RNA`, `protein`,
//! `cell_line`, `cell_type`) and an exact token span.
//!
//! ## Features
//!
//! - **Nested and compound mentions**: every annotation level is a mention;
//!   `(AND ...)` / `(OR ...)` tags collapse to their first subtype
//! - **Order-aware alignment**: repeated mention text is resolved to the
//!   right occurrence using a forward pointer with lookback
//! - **Validated output**: every answer is checked against its passage
//! - **Parallel assembly**: articles convert independently on Rayon
//! - **Python bindings**: JSON in, JSON out, via PyO3
//!
//! ```
//! use genia_mrc::{CorpusAssembler, CorpusConfig, Corpus};
//!
//! let corpus = Corpus::from_json(r#"{"articles": [{
//!     "medline_id": "MEDLINE:1",
//!     "title": [[{"sem": "G#cell_type", "children": ["tumour cells"]}, " of ARNHL"]],
//!     "abstract": []
//! }]}"#).unwrap();
//!
//! let assembler = CorpusAssembler::new(CorpusConfig::default()).unwrap();
//! let bundle = assembler.assemble(&corpus.articles).unwrap();
//! assert_eq!(bundle.records[0].answers[0].end_token, 2);
//! ```

pub mod align;
pub mod corpus;
pub mod document;
pub mod errors;
pub mod mention;
pub mod nlp;
pub mod pipeline;
pub mod types;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use errors::{CorpusError, Result};
pub use types::{
    Answer, CanonicalLabel, CanonicalMention, CorpusConfig, DatasetBundle, FailurePolicy,
    RawMention, Section, SentenceRecord, BUILT_TIME_FORMAT, DEFAULT_VERSION,
};

// Re-export main functionality
pub use align::{lookback, AlignState, SpanAligner};
pub use corpus::{ArticleFailure, CorpusAssembler, CorpusStats};
pub use document::{Annotation, Article, Corpus, Segment, SentenceNode};
pub use mention::{LabelGeneralizer, MentionExtractor, TypeNormalizer};
pub use nlp::tokenizer::Tokenizer;
pub use pipeline::error_code::ErrorCode;
pub use pipeline::validation::{AnswerRule, AnswerValidator, ValidationReport};
pub use pipeline::{SentenceContext, SentencePipeline};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Initialize the Python module
#[cfg(feature = "python")]
#[pymodule]
fn _rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    python::register_module(m)?;
    Ok(())
}
