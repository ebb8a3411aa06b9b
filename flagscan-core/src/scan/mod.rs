//! Flag aggregation, frequency counting and the title index.
//!
//! Every operation is a pure function of (corpus, term list, configuration):
//! - [`Scanner::flag`] / [`Scanner::flags`] decide per-document flags
//! - [`Scanner::count_terms`] counts terms over the flagged subset
//! - [`Scanner::titles_for`] lists matching titles in corpus order
//! - [`Scanner::scan`] computes all of the above in one matching pass
//!
//! Threading:
//! - [`Scanner`] is `Send + Sync`; the matching pass of [`Scanner::scan`]
//!   runs on the rayon pool for corpora above [`PARALLEL_THRESHOLD`].

mod flags;
mod frequency;
mod pipeline;
mod themes;
mod titles;
mod types;

pub use types::{Scanner, PARALLEL_THRESHOLD};
