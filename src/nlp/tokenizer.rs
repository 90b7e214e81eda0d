//! Whitespace tokenization
//!
//! Passages and mention texts are tokenized the same way: split on any
//! Unicode whitespace, rejoin with a single ASCII space. Keeping both sides
//! on one tokenizer is what makes token-window comparison in the span
//! aligner exact.

/// A whitespace tokenizer
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer;

impl Tokenizer {
    /// Create a new tokenizer
    pub fn new() -> Self {
        Self
    }

    /// Split text into whitespace-delimited tokens
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    /// Collapse all whitespace runs to a single space and trim the ends
    pub fn normalize(&self, text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Join tokens with single spaces
    pub fn join<S: AsRef<str>>(&self, tokens: &[S]) -> String {
        let mut out = String::new();
        for (i, token) in tokens.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push_str(token.as_ref());
        }
        out
    }

    /// Join the window `tokens[start..start + len]`, truncated at the end of
    /// the slice. A start past the end yields an empty string.
    pub fn window<S: AsRef<str>>(&self, tokens: &[S], start: usize, len: usize) -> String {
        if start >= tokens.len() {
            return String::new();
        }
        let end = start.saturating_add(len).min(tokens.len());
        self.join(&tokens[start..end])
    }
}
