//! Mention extraction from sentence markup
//!
//! Walks a sentence's annotation nodes in document order and turns every
//! node that carries a type attribute into a [`RawMention`].

use crate::document::SentenceNode;
use crate::nlp::tokenizer::Tokenizer;
use crate::types::RawMention;

/// Extracts raw mentions from a sentence node
#[derive(Debug, Clone, Default)]
pub struct MentionExtractor {
    tokenizer: Tokenizer,
}

impl MentionExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw mentions in pre-order document order.
    ///
    /// Nodes with a missing or empty `sem` are skipped; annotations nested
    /// inside them are still visited. Mention text is the node's text
    /// content re-tokenized on whitespace, so its token boundaries match
    /// the tokenized sentence.
    pub fn extract(&self, sentence: &SentenceNode) -> Vec<RawMention> {
        sentence
            .annotations()
            .into_iter()
            .filter_map(|node| {
                let sem = node.sem.as_deref().filter(|s| !s.is_empty())?;
                let text = self.tokenizer.normalize(&node.text_content());
                Some(RawMention::new(sem, text))
            })
            .collect()
    }
}
