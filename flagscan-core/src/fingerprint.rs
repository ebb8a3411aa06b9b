//! Content fingerprints for scan inputs.
//!
//! A fingerprint covers everything that influences an [`Analysis`]: every
//! document field, the normalized term list, and the configuration fields
//! that shape the output. Variable-length fields are length-prefixed and the
//! hash starts with a domain tag, so `("ab", "c")` and `("a", "bc")` never
//! collide structurally.
//!
//! [`Analysis`]: flagscan_types::Analysis

use std::hash::Hasher;

use flagscan_types::{AnalysisConfig, Document, Fingerprint};
use rustc_hash::FxHasher;

use crate::analyzer::TermList;

const SCAN_DOMAIN: &[u8] = b"flagscan:scan:v1";

#[inline]
fn write_str(hasher: &mut FxHasher, s: &str) {
    hasher.write_u64(s.len() as u64);
    hasher.write(s.as_bytes());
}

const CORPUS_DOMAIN: &[u8] = b"flagscan:corpus:v1";

/// Fingerprint of a corpus alone.
///
/// Uses its own domain tag, so it never equals a [`scan_fingerprint`].
pub fn corpus_fingerprint(corpus: &[Document]) -> Fingerprint {
    let mut hasher = FxHasher::default();
    hasher.write(CORPUS_DOMAIN);
    hash_corpus(&mut hasher, corpus);
    Fingerprint(hasher.finish())
}

/// Fingerprint of (corpus, term list, configuration).
///
/// `parallel` is left out: it changes how the scan runs, not what it returns.
pub fn scan_fingerprint(
    corpus: &[Document],
    terms: &TermList,
    config: &AnalysisConfig,
) -> Fingerprint {
    let mut hasher = FxHasher::default();
    hasher.write(SCAN_DOMAIN);

    hash_corpus(&mut hasher, corpus);

    hasher.write_u64(terms.len() as u64);
    for (_, term) in terms.iter() {
        write_str(&mut hasher, term);
    }

    hasher.write_u64(config.scale.get().to_bits());
    hasher.write_u64(config.title_limit as u64);
    hasher.write_u8(config.include_unknown_theme as u8);

    Fingerprint(hasher.finish())
}

fn hash_corpus(hasher: &mut FxHasher, corpus: &[Document]) {
    hasher.write_u64(corpus.len() as u64);
    for doc in corpus {
        write_str(hasher, &doc.id);
        write_str(hasher, &doc.title);
        match &doc.abstract_text {
            Some(text) => {
                hasher.write_u8(1);
                write_str(hasher, text);
            }
            None => hasher.write_u8(0),
        }
        write_str(hasher, &doc.theme);
    }
}
