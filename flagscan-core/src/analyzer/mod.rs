//! Text analysis pipeline.
//!
//! This module provides the term-matching components:
//! - **Normalizer**: Lowercases text and collapses whitespace
//! - **Terms**: Normalizes and deduplicates the flagged-term list
//! - **Matcher**: Whole-word matching of terms against abstracts

pub mod matcher;
pub mod normalizer;
pub mod terms;

pub use matcher::{DocumentMatcher, MatchVector, PreparedText};
pub use normalizer::TextNormalizer;
pub use terms::TermList;
