//! Text processing helpers

pub mod tokenizer;
