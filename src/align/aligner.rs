//! The span aligner: positionless mentions to validated token spans

use super::lookback::lookback;
use super::search::locate;
use crate::errors::Result;
use crate::nlp::tokenizer::Tokenizer;
use crate::pipeline::validation::AnswerValidator;
use crate::types::{Answer, CanonicalMention};

/// Per-passage alignment state: the search pointer and the answers resolved
/// so far, in resolution order.
///
/// One state lives for exactly one passage; nothing carries over between
/// sentences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlignState {
    pointer: usize,
    resolved: Vec<Answer>,
}

impl AlignState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    /// Answers resolved so far, in resolution (document) order
    pub fn resolved(&self) -> &[Answer] {
        &self.resolved
    }

    /// Re-anchor the pointer for `mention` and return it
    pub fn advance(&mut self, mention: &CanonicalMention) -> usize {
        self.pointer = lookback(&self.resolved, mention.label, &mention.text, self.pointer);
        self.pointer
    }

    /// Append a validated answer; the next lookback sees it
    pub fn record(&mut self, answer: Answer) {
        self.resolved.push(answer);
    }

    pub fn into_answers(self) -> Vec<Answer> {
        self.resolved
    }
}

/// Resolves token spans for one passage's mentions, in document order
#[derive(Default)]
pub struct SpanAligner {
    tokenizer: Tokenizer,
    validator: AnswerValidator,
}

impl SpanAligner {
    /// Aligner with the default answer validator
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_validator(validator: AnswerValidator) -> Self {
        Self {
            tokenizer: Tokenizer::new(),
            validator,
        }
    }

    /// Locate one mention given the current state, without validating or
    /// recording it. Unset positions mean the text is not in the passage.
    pub fn locate(
        &self,
        state: &mut AlignState,
        tokens: &[String],
        mention: &CanonicalMention,
    ) -> CanonicalMention {
        let pointer = state.advance(mention);
        let span = locate(tokens, &mention.text, pointer);
        let mut located = mention.located(span);
        located.text = self.tokenizer.normalize(&mention.text);
        located
    }

    /// Align every mention of a passage.
    ///
    /// Mentions are resolved one at a time in the given order; each is
    /// validated before it is recorded, and the first invalid one aborts the
    /// passage. Answers come back in resolution order, unsorted.
    pub fn align(&self, tokens: &[String], mentions: &[CanonicalMention]) -> Result<Vec<Answer>> {
        let mut state = AlignState::new();
        for mention in mentions {
            let located = self.locate(&mut state, tokens, mention);
            let answer = self.validator.require(&located, tokens)?;
            state.record(answer);
        }
        Ok(state.into_answers())
    }
}
