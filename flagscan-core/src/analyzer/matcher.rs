//! Whole-word term matching against abstracts.
//!
//! Every term is escaped and wrapped in half word boundaries: the character
//! before the term and the character after it must not be word characters.
//! So `"men"` never matches inside `"women"`, `"trans"` never matches
//! `"transport"`, and terms with symbols at their edges (`"c++"`, `"(x)"`)
//! still match when surrounded by spaces or punctuation. Terms containing
//! pattern metacharacters are matched literally.
//!
//! Two compiled forms are kept:
//!
//! - one [`Regex`] per term, for single `(document, term)` questions
//! - one [`RegexSet`] over all terms, which answers "does anything match" and
//!   "which terms match" in a single pass over the abstract
//!
//! A term whose pattern fails to compile (in practice only when it exceeds the
//! regex size limit) is logged and never matches. Nothing here returns an
//! error.

use flagscan_types::{Document, TermId};
use log::warn;
use regex::{Regex, RegexBuilder, RegexSet, RegexSetBuilder};
use smallvec::SmallVec;

use crate::analyzer::normalizer::TextNormalizer;
use crate::analyzer::terms::TermList;

/// Ids of the terms matching one document, in ascending order.
///
/// Abstracts rarely match more than a handful of terms, so the inline
/// capacity avoids a heap allocation per document.
pub type MatchVector = SmallVec<[TermId; 8]>;

/// Builds the whole-word pattern for a normalized term.
///
/// ```
/// use flagscan_core::analyzer::matcher::word_pattern;
///
/// assert_eq!(word_pattern("c++"), r"\b{start-half}c\+\+\b{end-half}");
/// ```
pub fn word_pattern(term: &str) -> String {
    format!(r"\b{{start-half}}{}\b{{end-half}}", regex::escape(term))
}

/// Abstract text after normalization, ready for matching.
///
/// Produced by [`DocumentMatcher::prepare`]; lets callers ask several
/// questions about one document while normalizing its abstract once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedText(String);

impl PreparedText {
    /// Returns the normalized text.
    #[inline(always)]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Compiled matcher for a [`TermList`].
#[derive(Debug, Clone)]
pub struct DocumentMatcher {
    /// Indexed by `TermId`; `None` for terms that failed to compile.
    patterns: Vec<Option<Regex>>,
    /// Set over the compiled patterns only.
    set: Option<RegexSet>,
    /// Maps a set index back to its `TermId`.
    set_ids: Vec<TermId>,
    normalizer: TextNormalizer,
}

impl DocumentMatcher {
    /// Compiles patterns for every term in `terms`.
    pub fn new(terms: &TermList) -> Self {
        let mut patterns = Vec::with_capacity(terms.len());
        let mut set_sources = Vec::with_capacity(terms.len());
        let mut set_ids = Vec::with_capacity(terms.len());

        for (id, term) in terms.iter() {
            let source = word_pattern(term);
            match RegexBuilder::new(&source).case_insensitive(true).build() {
                Ok(re) => {
                    patterns.push(Some(re));
                    set_sources.push(source);
                    set_ids.push(id);
                }
                Err(e) => {
                    warn!("term {:?} cannot be compiled and will never match: {}", term, e);
                    patterns.push(None);
                }
            }
        }

        let set = if set_sources.is_empty() {
            None
        } else {
            match RegexSetBuilder::new(&set_sources)
                .case_insensitive(true)
                .build()
            {
                Ok(set) => Some(set),
                Err(e) => {
                    warn!(
                        "combined pattern for {} terms cannot be compiled, matching term by term: {}",
                        set_sources.len(),
                        e
                    );
                    None
                }
            }
        };

        Self {
            patterns,
            set,
            set_ids,
            normalizer: TextNormalizer::new(),
        }
    }

    /// Number of terms this matcher was built for.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns `true` if the matcher has no terms.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Normalizes the abstract of `document`.
    ///
    /// Returns `None` when the abstract is missing or blank; such a document
    /// matches nothing.
    pub fn prepare(&self, document: &Document) -> Option<PreparedText> {
        let text = self.normalizer.normalize(document.abstract_str());
        if text.is_empty() {
            None
        } else {
            Some(PreparedText(text))
        }
    }

    /// Returns `true` if term `id` occurs as a whole word in `text`.
    #[inline]
    pub fn matches_prepared(&self, text: &PreparedText, id: TermId) -> bool {
        match self.patterns.get(id as usize) {
            Some(Some(re)) => re.is_match(text.as_str()),
            _ => false,
        }
    }

    /// Returns `true` if any term occurs in `text`. Stops at the first match.
    pub fn any_prepared(&self, text: &PreparedText) -> bool {
        match &self.set {
            Some(set) => set.is_match(text.as_str()),
            None => self
                .patterns
                .iter()
                .flatten()
                .any(|re| re.is_match(text.as_str())),
        }
    }

    /// Collects the ids of every term occurring in `text`.
    pub fn match_vector_prepared(&self, text: &PreparedText) -> MatchVector {
        match &self.set {
            Some(set) => set
                .matches(text.as_str())
                .into_iter()
                .map(|i| self.set_ids[i])
                .collect(),
            None => self
                .patterns
                .iter()
                .enumerate()
                .filter_map(|(i, re)| match re {
                    Some(re) if re.is_match(text.as_str()) => Some(i as TermId),
                    _ => None,
                })
                .collect(),
        }
    }

    /// Returns `true` if term `id` occurs as a whole word in the abstract.
    pub fn matches(&self, document: &Document, id: TermId) -> bool {
        self.prepare(document)
            .is_some_and(|text| self.matches_prepared(&text, id))
    }

    /// Returns `true` if any term occurs in the abstract.
    pub fn any(&self, document: &Document) -> bool {
        self.prepare(document)
            .is_some_and(|text| self.any_prepared(&text))
    }

    /// Collects the ids of every term occurring in the abstract.
    pub fn match_vector(&self, document: &Document) -> MatchVector {
        match self.prepare(document) {
            Some(text) => self.match_vector_prepared(&text),
            None => MatchVector::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(terms: &[&str]) -> (TermList, DocumentMatcher) {
        let list = TermList::normalize(terms.iter().copied());
        let m = DocumentMatcher::new(&list);
        (list, m)
    }

    fn doc(text: &str) -> Document {
        Document::new("1", "Title", text)
    }

    #[test]
    fn whole_word_only() {
        let (terms, m) = matcher(&["men"]);
        let id = terms.id_of("men").unwrap();

        assert!(m.matches(&doc("a study of men and health"), id));
        assert!(!m.matches(&doc("this paper studies women in STEM"), id));
        assert!(!m.matches(&doc("mentorship programs"), id));
    }

    #[test]
    fn prefix_does_not_match_longer_word() {
        let (_, m) = matcher(&["trans"]);
        assert!(!m.any(&doc("transport infrastructure improves transit")));
        assert!(m.any(&doc("trans and nonbinary respondents")));
    }

    #[test]
    fn case_insensitive() {
        let (_, m) = matcher(&["Women"]);
        assert!(m.any(&doc("WOMEN in science")));
        assert!(m.any(&doc("Women in science")));
    }

    #[test]
    fn punctuation_is_a_boundary() {
        let (_, m) = matcher(&["equity"]);
        assert!(m.any(&doc("health equity.")));
        assert!(m.any(&doc("(equity)")));
        assert!(m.any(&doc("equity-focused design")));
        assert!(!m.any(&doc("inequity")));
    }

    #[test]
    fn title_is_not_matched() {
        let (_, m) = matcher(&["women"]);
        let d = Document::new("1", "Women in STEM", "a survey of engineers");
        assert!(!m.any(&d));
    }

    #[test]
    fn metacharacters_are_literal() {
        let (terms, m) = matcher(&["c++", "(x)", ".*", "a|b"]);
        assert_eq!(m.len(), 4);

        // `.*` must not act as a wildcard.
        assert!(!m.any(&doc("plain text without symbols")));
        assert!(m.matches(&doc("the pattern .* again"), terms.id_of(".*").unwrap()));

        let alt = doc("the string a|b appears here");
        assert!(m.matches(&alt, terms.id_of("a|b").unwrap()));
        assert!(!m.matches(&doc("just a here"), terms.id_of("a|b").unwrap()));
    }

    #[test]
    fn symbol_edged_terms_match_as_words() {
        let (terms, m) = matcher(&["c++", "(x)", "covid-19", "women"]);
        let d = |term: &str| doc(&format!("we study {term} in practice"));

        for term in ["c++", "(x)", "covid-19", "women"] {
            let id = terms.id_of(term).unwrap();
            assert!(m.matches(&d(term), id), "{term}");
        }

        let cpp = terms.id_of("c++").unwrap();
        assert!(m.matches(&doc("written in C++, mostly"), cpp));
        assert!(m.matches(&doc("c++"), cpp));
        assert!(!m.matches(&doc("abc++ is not c plus plus"), cpp));
        assert!(!m.matches(&doc("c++x"), cpp));

        let paren = terms.id_of("(x)").unwrap();
        assert!(!m.matches(&doc("evaluate f(x) first"), paren));
    }

    #[test]
    fn missing_or_blank_abstract_matches_nothing() {
        let (_, m) = matcher(&["women"]);
        assert!(!m.any(&Document::without_abstract("1", "Women")));
        assert!(!m.any(&doc("")));
        assert!(!m.any(&doc("   \n ")));
        assert!(m.match_vector(&doc("")).is_empty());
    }

    #[test]
    fn empty_term_list_matches_nothing() {
        let (_, m) = matcher(&[]);
        assert!(m.is_empty());
        assert!(!m.any(&doc("women trans equity")));
        assert!(m.match_vector(&doc("women trans equity")).is_empty());
    }

    #[test]
    fn multi_word_term_spans_line_breaks() {
        let (_, m) = matcher(&["climate change"]);
        assert!(m.any(&doc("effects of Climate\nChange on crops")));
        assert!(!m.any(&doc("climate changes")));
    }

    #[test]
    fn match_vector_lists_all_terms_in_id_order() {
        let (_, m) = matcher(&["women", "equity", "trans", "health"]);
        let v = m.match_vector(&doc("health equity for trans people"));
        assert_eq!(v.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn any_agrees_with_match_vector() {
        let (_, m) = matcher(&["women", "equity", "diversity"]);
        let samples = [
            "women in science",
            "nothing relevant",
            "diversity, equity",
            "",
            "womens",
        ];
        for s in samples {
            let d = doc(s);
            assert_eq!(m.any(&d), !m.match_vector(&d).is_empty(), "sample {:?}", s);
        }
    }

    #[test]
    fn unicode_word_boundaries() {
        let (_, m) = matcher(&["équité"]);
        assert!(m.any(&doc("L'ÉQUITÉ en santé")));
        assert!(!m.any(&doc("inéquité")));
    }

    #[test]
    fn prepared_text_reused_across_terms() {
        let (terms, m) = matcher(&["women", "men"]);
        let text = m.prepare(&doc("Women and MEN")).unwrap();
        assert_eq!(text.as_str(), "women and men");
        for (id, _) in terms.iter() {
            assert!(m.matches_prepared(&text, id));
        }
        assert!(!m.matches_prepared(&text, 99));
    }
}
