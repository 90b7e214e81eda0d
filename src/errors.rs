//! Error types for genia_mrc
//!
//! This module defines the error type used throughout the library.
//! Every error carries enough context (article id, sentence index,
//! mention text) to locate the offending annotation in the corpus.

use thiserror::Error;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, CorpusError>;

/// Main error type for genia_mrc
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CorpusError {
    /// The document tree is missing a required part (section, article id)
    #[error("Malformed input in article '{article_id}': {message}")]
    MalformedInput { article_id: String, message: String },

    /// A compound `(AND ...)` / `(OR ...)` tag could not be reduced to a subtype
    #[error("Malformed compound tag '{tag}': {message}")]
    CompoundTag { tag: String, message: String },

    /// An aligned answer failed validation (unset position, empty field, bad span)
    #[error("Invalid answer '{text}' ({label}): {message}")]
    InvalidAnswer {
        label: String,
        text: String,
        message: String,
    },

    /// A sentence could not be converted; wraps the underlying failure
    #[error("Article '{article_id}', sentence {sentence_index}: {source}")]
    Sentence {
        article_id: String,
        sentence_index: usize,
        #[source]
        source: Box<CorpusError>,
    },

    /// Configuration validation failed
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl CorpusError {
    /// Create a malformed input error
    pub fn malformed_input(article_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedInput {
            article_id: article_id.into(),
            message: message.into(),
        }
    }

    /// Create a compound tag error
    pub fn compound_tag(tag: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CompoundTag {
            tag: tag.into(),
            message: message.into(),
        }
    }

    /// Create an invalid answer error
    pub fn invalid_answer(
        label: impl Into<String>,
        text: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidAnswer {
            label: label.into(),
            text: text.into(),
            message: message.into(),
        }
    }

    /// Attach article and sentence context to an error raised while
    /// processing one sentence
    pub fn in_sentence(self, article_id: impl Into<String>, sentence_index: usize) -> Self {
        Self::Sentence {
            article_id: article_id.into(),
            sentence_index,
            source: Box::new(self),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// The innermost error, with sentence context stripped
    pub fn root_cause(&self) -> &CorpusError {
        match self {
            Self::Sentence { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Check if this error came from answer validation
    /// (an annotation whose text could not be located, or an empty field)
    pub fn is_invalid_answer(&self) -> bool {
        matches!(self.root_cause(), Self::InvalidAnswer { .. })
    }

    /// Check if this error reports a malformed document tree or tag
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self.root_cause(),
            Self::MalformedInput { .. } | Self::CompoundTag { .. }
        )
    }
}

impl From<serde_json::Error> for CorpusError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}
