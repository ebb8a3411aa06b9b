//! Normalized term list.

use flagscan_types::TermId;
use rustc_hash::FxHashMap;

use crate::analyzer::normalizer::TextNormalizer;

/// Lowercased, trimmed and deduplicated list of flagged terms.
///
/// Terms keep the order in which they were first seen. That order assigns
/// each term its [`TermId`] and breaks ties when frequencies are sorted.
///
/// # Example
///
/// ```
/// use flagscan_core::analyzer::TermList;
///
/// let terms = TermList::normalize(["Women", " women ", "TRANS", ""]);
/// assert_eq!(terms.as_slice(), ["women", "trans"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermList {
    terms: Vec<String>,
    ids: FxHashMap<String, TermId>,
}

impl TermList {
    /// Creates an empty term list. Nothing is ever flagged against it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes raw terms.
    ///
    /// Entries that are blank after trimming are dropped.
    pub fn normalize<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let normalizer = TextNormalizer::new();
        let mut list = Self::new();
        let mut buf = String::new();

        for term in raw {
            normalizer.normalize_into(term.as_ref(), &mut buf);
            if buf.is_empty() || list.ids.contains_key(buf.as_str()) {
                continue;
            }

            let id = list.terms.len() as TermId;
            list.ids.insert(buf.clone(), id);
            list.terms.push(buf.clone());
        }

        list
    }

    /// Returns the number of distinct terms.
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns `true` if the list holds no terms.
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns the term with the given id.
    #[inline]
    pub fn get(&self, id: TermId) -> Option<&str> {
        self.terms.get(id as usize).map(String::as_str)
    }

    /// Looks up the id of `term`, normalizing it first.
    pub fn id_of(&self, term: &str) -> Option<TermId> {
        if let Some(&id) = self.ids.get(term) {
            return Some(id);
        }
        self.ids.get(TextNormalizer::new().normalize(term).as_str()).copied()
    }

    /// Returns `true` if `term` is part of the list after normalization.
    #[inline]
    pub fn contains(&self, term: &str) -> bool {
        self.id_of(term).is_some()
    }

    /// Iterates over `(id, term)` pairs in first-seen order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (TermId, &str)> + '_ {
        self.terms
            .iter()
            .enumerate()
            .map(|(i, t)| (i as TermId, t.as_str()))
    }

    /// Returns the terms in first-seen order.
    #[inline(always)]
    pub fn as_slice(&self) -> &[String] {
        &self.terms
    }
}

impl<S: AsRef<str>> FromIterator<S> for TermList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::normalize(iter)
    }
}
