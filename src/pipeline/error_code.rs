//! Stable error codes for answer validation diagnostics.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Machine-readable reason an answer was rejected.
///
/// Serialized in snake_case (`"unset_position"`), which is also the
/// `Display` form, so codes can be matched in logs and in JSON reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// `text` is empty or whitespace only
    EmptyText,
    /// A position was never resolved (the text was not found)
    UnsetPosition,
    /// `start_token >= end_token`
    EmptySpan,
    /// `end_token` lies beyond the passage
    SpanOutOfBounds,
    /// The passage tokens under the span do not spell the answer text
    SpanTextMismatch,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::EmptyText => "empty_text",
            ErrorCode::UnsetPosition => "unset_position",
            ErrorCode::EmptySpan => "empty_span",
            ErrorCode::SpanOutOfBounds => "span_out_of_bounds",
            ErrorCode::SpanTextMismatch => "span_text_mismatch",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
