//! Per-sentence pipeline: runs the stages for one sentence in order.
//!
//! ```text
//! SentenceNode ─► MentionExtractor ─► TypeNormalizer ─► LabelGeneralizer
//!              ─► SpanAligner (+ AnswerValidator) ─► SentenceFormatter ─► SentenceRecord
//! ```
//!
//! Every stage is sequential within a sentence; the aligner's lookback
//! depends on mentions being resolved in document order. Separate sentences
//! share nothing and may run on different threads.

use crate::align::SpanAligner;
use crate::document::SentenceNode;
use crate::errors::Result;
use crate::mention::{LabelGeneralizer, MentionExtractor, TypeNormalizer};
use crate::nlp::tokenizer::Tokenizer;
use crate::pipeline::formatter::SentenceFormatter;
use crate::types::{RawMention, Section, SentenceRecord};
use tracing::debug;

// ---------------------------------------------------------------------------
// Stage tracing
// ---------------------------------------------------------------------------

/// Enter a debug-level tracing span for a pipeline stage.
macro_rules! trace_stage {
    ($name:expr) => {
        let _span = tracing::debug_span!("pipeline_stage", stage = $name).entered();
    };
}

pub const STAGE_EXTRACT: &str = "extract";
pub const STAGE_NORMALIZE: &str = "normalize";
pub const STAGE_GENERALIZE: &str = "generalize";
pub const STAGE_ALIGN: &str = "align";
pub const STAGE_FORMAT: &str = "format";

/// Where a sentence sits in the corpus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentenceContext<'a> {
    pub article_id: &'a str,
    pub section: Section,
    /// Index within the article, counted across title and abstract
    pub sentence_index: usize,
    /// Log the sentence, its mentions and its record at debug level
    pub detailed: bool,
}

/// All stages needed to turn one sentence node into a record
#[derive(Default)]
pub struct SentencePipeline {
    tokenizer: Tokenizer,
    extractor: MentionExtractor,
    normalizer: TypeNormalizer,
    generalizer: LabelGeneralizer,
    aligner: SpanAligner,
    formatter: SentenceFormatter,
}

impl SentencePipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pipeline using a custom aligner (e.g. one with extra answer rules)
    pub fn with_aligner(aligner: SpanAligner) -> Self {
        Self {
            aligner,
            ..Self::default()
        }
    }

    /// Convert one sentence.
    ///
    /// Any failure is returned with the article id and sentence index
    /// attached; no partial record is produced.
    pub fn run(&self, ctx: SentenceContext<'_>, sentence: &SentenceNode) -> Result<SentenceRecord> {
        self.run_stages(ctx, sentence)
            .map_err(|e| e.in_sentence(ctx.article_id, ctx.sentence_index))
    }

    fn run_stages(&self, ctx: SentenceContext<'_>, sentence: &SentenceNode) -> Result<SentenceRecord> {
        let tokens = self.tokenizer.tokenize(&sentence.text_content());

        let raw = {
            trace_stage!(STAGE_EXTRACT);
            self.extractor.extract(sentence)
        };

        let normalized = {
            trace_stage!(STAGE_NORMALIZE);
            raw.iter()
                .map(|m| self.normalizer.normalize_mention(m))
                .collect::<Result<Vec<RawMention>>>()?
        };

        let candidates = {
            trace_stage!(STAGE_GENERALIZE);
            self.generalizer.generalize_all(&normalized)
        };

        let answers = {
            trace_stage!(STAGE_ALIGN);
            self.aligner.align(&tokens, &candidates)?
        };

        let record = {
            trace_stage!(STAGE_FORMAT);
            self.formatter
                .format(ctx.article_id, ctx.section, ctx.sentence_index, &tokens, answers)
        };

        if ctx.detailed {
            debug!(medline = ctx.article_id, section = %ctx.section, passage = %record.passage);
            debug!(marks = ?raw, "raw mentions");
            debug!(record = ?record, "record");
        }

        Ok(record)
    }
}
