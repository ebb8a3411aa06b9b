//! Full-corpus scan.

use std::time::Instant;

use flagscan_types::{Analysis, CorpusStats, Document, DocumentFlag};
use log::debug;
use rayon::prelude::*;

use crate::analyzer::MatchVector;
use crate::scan::frequency::frequency_table;
use crate::scan::themes::breakdown;
use crate::scan::types::{Scanner, PARALLEL_THRESHOLD};

impl Scanner {
    /// Scans `corpus` and builds the complete [`Analysis`].
    ///
    /// Each abstract is normalized and matched once. Matching may run across
    /// threads; every aggregate is then assembled in corpus order, so the
    /// result is identical to a sequential scan.
    #[inline(never)]
    pub fn scan(&self, corpus: &[Document]) -> Analysis {
        let start = Instant::now();

        let vectors = self.match_vectors(corpus);
        let matched_at = start.elapsed();

        let flags: Vec<DocumentFlag> = corpus
            .iter()
            .zip(&vectors)
            .map(|(doc, matched)| DocumentFlag {
                id: doc.id.clone(),
                contains_flagged: !matched.is_empty(),
            })
            .collect();
        let flagged = flags.iter().filter(|f| f.contains_flagged).count();

        let (counts, titles) = self.tally(corpus, &vectors);
        let frequencies = frequency_table(&self.terms, &counts, titles);

        let stats = CorpusStats::new(corpus.len(), flagged, self.config.scale);
        let themes = breakdown(
            corpus.iter().zip(flags.iter().map(|f| f.contains_flagged)),
            self.config.include_unknown_theme,
        );

        debug!(
            "scanned {} docs against {} terms: {} flagged, {} terms seen (match {:?}, total {:?})",
            corpus.len(),
            self.terms.len(),
            flagged,
            frequencies.len(),
            matched_at,
            start.elapsed()
        );

        Analysis {
            flags,
            frequencies,
            stats,
            themes,
        }
    }

    /// Match vector of every document, in corpus order.
    pub fn match_vectors(&self, corpus: &[Document]) -> Vec<MatchVector> {
        if self.config.parallel && corpus.len() >= PARALLEL_THRESHOLD {
            corpus
                .par_iter()
                .map(|doc| self.matcher.match_vector(doc))
                .collect()
        } else {
            corpus
                .iter()
                .map(|doc| self.matcher.match_vector(doc))
                .collect()
        }
    }
}
