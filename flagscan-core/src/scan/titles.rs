//! Term-to-document title index.

use flagscan_types::Document;

use crate::scan::types::Scanner;

impl Scanner {
    /// Titles of every document whose abstract contains `term`, in corpus
    /// order.
    ///
    /// A term outside the list, or one matching nothing, yields an empty
    /// sequence.
    pub fn titles_for<'c>(&self, corpus: &'c [Document], term: &str) -> Vec<&'c str> {
        let Some(id) = self.terms.id_of(term) else {
            return Vec::new();
        };

        corpus
            .iter()
            .filter(|doc| self.matcher.matches(doc, id))
            .map(|doc| doc.title.as_str())
            .collect()
    }

    /// Like [`titles_for`](Self::titles_for), truncated to the configured
    /// title limit.
    pub fn display_titles<'c>(&self, corpus: &'c [Document], term: &str) -> Vec<&'c str> {
        let mut titles = self.titles_for(corpus, term);
        titles.truncate(self.config.title_limit);
        titles
    }

    /// Display titles for every term, indexed by `TermId`.
    pub(crate) fn title_index(&self, corpus: &[Document]) -> Vec<Vec<String>> {
        let limit = self.config.title_limit;
        let mut index: Vec<Vec<String>> = vec![Vec::new(); self.terms.len()];

        for doc in corpus {
            let Some(text) = self.matcher.prepare(doc) else {
                continue;
            };
            for id in self.matcher.match_vector_prepared(&text) {
                let titles = &mut index[id as usize];
                if titles.len() < limit {
                    titles.push(doc.title.clone());
                }
            }
        }

        index
    }
}
