//! Term frequency counting.
//!
//! Counting is presence-based: a flagged document adds exactly one to each
//! term it contains, however often the term repeats in the abstract.

use flagscan_types::{Document, TermFrequency, TermId};
use rustc_hash::FxHashMap;

use crate::analyzer::{MatchVector, TermList};
use crate::scan::types::Scanner;

impl Scanner {
    /// Counts, for every term, the flagged documents containing it.
    ///
    /// Terms without any matching document are left out of the mapping. An
    /// empty term list yields an empty mapping.
    pub fn count_terms(&self, corpus: &[Document]) -> FxHashMap<String, usize> {
        self.count_by_id(corpus)
            .into_iter()
            .enumerate()
            .filter(|&(_, count)| count > 0)
            .map(|(id, count)| (self.terms.as_slice()[id].clone(), count))
            .collect()
    }

    /// Per-term counts indexed by `TermId`.
    pub(crate) fn count_by_id(&self, corpus: &[Document]) -> Vec<usize> {
        let mut counts = vec![0usize; self.terms.len()];

        for doc in corpus {
            let Some(text) = self.matcher.prepare(doc) else {
                continue;
            };
            // Only the flagged subset is counted.
            if !self.matcher.any_prepared(&text) {
                continue;
            }
            for id in self.matcher.match_vector_prepared(&text) {
                counts[id as usize] += 1;
            }
        }

        counts
    }

    /// Builds the sorted frequency table with display titles.
    pub fn frequencies(&self, corpus: &[Document]) -> Vec<TermFrequency> {
        let counts = self.count_by_id(corpus);
        let titles = self.title_index(corpus);
        frequency_table(&self.terms, &counts, titles)
    }

    /// Counts and display titles from precomputed match vectors.
    ///
    /// Documents with an empty match vector are unflagged and skipped.
    pub(crate) fn tally(
        &self,
        corpus: &[Document],
        vectors: &[MatchVector],
    ) -> (Vec<usize>, Vec<Vec<String>>) {
        debug_assert_eq!(corpus.len(), vectors.len());

        let limit = self.config.title_limit;
        let mut counts = vec![0usize; self.terms.len()];
        let mut titles: Vec<Vec<String>> = vec![Vec::new(); self.terms.len()];

        for (doc, matched) in corpus.iter().zip(vectors) {
            if matched.is_empty() {
                continue;
            }
            for &id in matched {
                let id = id as usize;
                counts[id] += 1;
                if titles[id].len() < limit {
                    titles[id].push(doc.title.clone());
                }
            }
        }

        (counts, titles)
    }
}

/// Orders terms by descending count, ties broken by term-list order.
///
/// `counts` and `titles` are indexed by `TermId`. Terms with a zero count are
/// dropped.
pub(crate) fn frequency_table(
    terms: &TermList,
    counts: &[usize],
    mut titles: Vec<Vec<String>>,
) -> Vec<TermFrequency> {
    let mut order: Vec<TermId> = (0..terms.len() as TermId)
        .filter(|&id| counts[id as usize] > 0)
        .collect();

    // Stable: equal counts keep ascending id order.
    order.sort_by(|a, b| counts[*b as usize].cmp(&counts[*a as usize]));

    order
        .into_iter()
        .map(|id| {
            let i = id as usize;
            TermFrequency {
                term: terms.as_slice()[i].clone(),
                count: counts[i],
                titles: std::mem::take(&mut titles[i]),
            }
        })
        .collect()
}
