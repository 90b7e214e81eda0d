//! Mention extraction, compound-tag normalization and label generalization.

pub mod extraction;
pub mod labels;
pub mod normalize;

pub use extraction::MentionExtractor;
pub use labels::LabelGeneralizer;
pub use normalize::TypeNormalizer;
