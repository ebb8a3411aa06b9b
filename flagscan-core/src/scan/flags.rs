//! Per-document flags and corpus statistics.

use flagscan_types::{CorpusStats, Document, DocumentFlag, Scale};

use crate::scan::types::Scanner;

impl Scanner {
    /// Returns `true` if at least one term occurs in the abstract.
    ///
    /// Stops at the first matching term.
    #[inline]
    pub fn flag(&self, document: &Document) -> bool {
        self.matcher.any(document)
    }

    /// Flags every document of `corpus`, in corpus order.
    pub fn flags(&self, corpus: &[Document]) -> Vec<DocumentFlag> {
        corpus
            .iter()
            .map(|doc| DocumentFlag {
                id: doc.id.clone(),
                contains_flagged: self.flag(doc),
            })
            .collect()
    }

    /// Number of flagged documents in `corpus`.
    pub fn flagged_count(&self, corpus: &[Document]) -> usize {
        corpus.iter().filter(|doc| self.flag(doc)).count()
    }

    /// Unscaled fraction of flagged documents; 0 for an empty corpus.
    pub fn flagged_fraction(&self, corpus: &[Document]) -> f64 {
        let flagged = self.flagged_count(corpus);
        CorpusStats::new(corpus.len(), flagged, Scale::IDENTITY).flagged_fraction
    }

    /// Corpus statistics, scaled by the configured factor.
    pub fn stats(&self, corpus: &[Document]) -> CorpusStats {
        CorpusStats::new(corpus.len(), self.flagged_count(corpus), self.config.scale)
    }
}
