//! Token-window search for mention spans

use crate::nlp::tokenizer::Tokenizer;
use tracing::debug;

/// First span at or after `pointer` whose tokens, joined with single
/// spaces, equal the joined `mention` tokens. Returns `(start, end)` with
/// `end` exclusive.
pub fn scan_forward<S: AsRef<str>>(
    tokens: &[S],
    mention: &[&str],
    pointer: usize,
) -> Option<(usize, usize)> {
    let tokenizer = Tokenizer::new();
    let target = tokenizer.join(mention);
    let len = mention.len();

    (pointer..tokens.len())
        .find(|&start| tokenizer.window(tokens, start, len) == target)
        .map(|start| (start, start + len))
}

/// Locate `text` in `tokens`, searching forward from `pointer` first.
///
/// If the forward scan finds nothing, or the window it found does not
/// reproduce the mention text, the whole passage is scanned again from the
/// start and that result is accepted as is. `None` means the text does not
/// occur in the passage.
pub fn locate<S: AsRef<str>>(tokens: &[S], text: &str, pointer: usize) -> Option<(usize, usize)> {
    let tokenizer = Tokenizer::new();
    let mention: Vec<&str> = text.split_whitespace().collect();
    let target = tokenizer.join(&mention);

    let found = scan_forward(tokens, &mention, pointer);
    let found_text = match found {
        Some((start, end)) => tokenizer.join(&tokens[start..end]),
        None => String::new(),
    };

    if found.is_some() && found_text == target {
        return found;
    }

    debug!(
        pointer,
        mention = %target,
        found = %found_text,
        "no match from pointer; rescanning passage from the start"
    );
    scan_forward(tokens, &mention, 0)
}
