//! Token span alignment.
//!
//! Mentions come out of the markup without positions. The aligner finds
//! each one in the tokenized sentence, one mention at a time in document
//! order, using a forward-moving pointer:
//!
//! 1. [`lookback`] re-anchors the pointer against the answers resolved so
//!    far (repeated, relabelled and nested mentions);
//! 2. [`search::scan_forward`] takes the first exact token-window match at
//!    or after the pointer;
//! 3. if that fails, [`search::locate`] rescans the whole sentence from the
//!    start;
//! 4. the result is validated and recorded for the next lookback.
//!
//! The order of steps decides which occurrence wins for ambiguous repeated
//! text, so it must not be rearranged.

pub mod aligner;
pub mod lookback;
pub mod search;

pub use aligner::{AlignState, SpanAligner};
pub use lookback::lookback;
