//! Pointer re-anchoring against already resolved answers
//!
//! The same text can be annotated more than once in one sentence: twice at
//! different positions, twice at the same position under different labels,
//! or nested inside a longer mention. Before searching for the next mention
//! the pointer is moved according to how it relates to every answer resolved
//! so far.

use crate::types::{Answer, CanonicalLabel};

/// Where the forward search for the next mention should start.
///
/// Starts from the last resolved answer's start (or `pointer` when nothing
/// is resolved yet), then walks the resolved answers in resolution order.
/// For each answer whose text contains, or is contained in, `text`:
///
/// - same text, same label: move past it (`end_token`), so a repeated
///   mention lands on the next occurrence;
/// - same text, different label: re-anchor at its start, so a second label
///   on the same span resolves to the same span;
/// - one text strictly inside the other: re-anchor at its start, so nested
///   mentions are searched from the enclosing one.
///
/// Later answers override earlier ones.
pub fn lookback(resolved: &[Answer], label: CanonicalLabel, text: &str, pointer: usize) -> usize {
    let mut pointer = match resolved.last() {
        Some(last) => last.start_token,
        None => pointer,
    };

    for prev in resolved {
        if !(prev.text.contains(text) || text.contains(prev.text.as_str())) {
            continue;
        }
        pointer = if prev.text == text && prev.label == label {
            prev.end_token
        } else {
            prev.start_token
        };
    }

    pointer
}
