//! Assembly of one sentence's output record.

use crate::nlp::tokenizer::Tokenizer;
use crate::types::{Answer, Section, SentenceRecord};

/// Deterministic record id: `"{article_id}-{section}-{sentence_index}"`
pub fn record_id(article_id: &str, section: Section, sentence_index: usize) -> String {
    format!("{}-{}-{}", article_id, section.as_str(), sentence_index)
}

/// Builds [`SentenceRecord`]s from validated answers
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceFormatter {
    tokenizer: Tokenizer,
}

impl SentenceFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// One record with the passage rejoined from `tokens` and `answers`
    /// sorted by `(start_token, end_token, type)`.
    pub fn format(
        &self,
        article_id: &str,
        section: Section,
        sentence_index: usize,
        tokens: &[String],
        mut answers: Vec<Answer>,
    ) -> SentenceRecord {
        answers.sort_by(Answer::span_cmp);
        SentenceRecord {
            id: record_id(article_id, section, sentence_index),
            passage: self.tokenizer.join(tokens),
            answers,
        }
    }
}
