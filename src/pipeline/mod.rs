//! Per-sentence pipeline: answer validation, record formatting, and the
//! runner that threads one sentence through every stage.
//!
//! ## Submodules
//!
//! - [`validation`]: rule-based answer validator
//! - [`error_code`]: stable codes for validation diagnostics
//! - [`formatter`]: sentence record assembly and ordering
//! - [`runner`]: stage orchestration for one sentence

pub mod error_code;
pub mod formatter;
pub mod runner;
pub mod validation;

pub use error_code::ErrorCode;
pub use formatter::{record_id, SentenceFormatter};
pub use runner::{SentenceContext, SentencePipeline};
pub use validation::{AnswerDiagnostic, AnswerRule, AnswerValidator, ValidationReport};
