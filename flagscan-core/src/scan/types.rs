//! Scanner type and constants.

use flagscan_types::{AnalysisConfig, ConfigError, Document, TermId};

use crate::analyzer::{DocumentMatcher, MatchVector, TermList};

/// Corpora smaller than this are matched on the calling thread even when
/// parallel matching is enabled.
pub const PARALLEL_THRESHOLD: usize = 256;

/// Flagged-term scanner.
///
/// Compiles a [`TermList`] once and answers questions about any number of
/// corpora. A scanner holds no per-corpus state: every method is a pure
/// function of its arguments, the term list and the configuration.
#[derive(Debug, Clone)]
pub struct Scanner {
    pub(crate) terms: TermList,
    pub(crate) matcher: DocumentMatcher,
    pub(crate) config: AnalysisConfig,
}

impl Scanner {
    /// Creates a scanner with the default configuration.
    pub fn new(terms: TermList) -> Self {
        Self {
            matcher: DocumentMatcher::new(&terms),
            terms,
            config: AnalysisConfig::default(),
        }
    }

    /// Creates a scanner with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns the `ConfigError` reported by [`AnalysisConfig::validate`].
    pub fn with_config(terms: TermList, config: AnalysisConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new(terms)
        })
    }

    /// Returns the normalized term list.
    #[inline(always)]
    pub fn terms(&self) -> &TermList {
        &self.terms
    }

    /// Returns the compiled matcher.
    #[inline(always)]
    pub fn matcher(&self) -> &DocumentMatcher {
        &self.matcher
    }

    /// Returns the active configuration.
    #[inline(always)]
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Returns `true` if `term` occurs as a whole word in the abstract.
    ///
    /// Only terms of this scanner's list are known; any other term never
    /// matches.
    pub fn matches(&self, document: &Document, term: &str) -> bool {
        self.terms
            .id_of(term)
            .is_some_and(|id| self.matcher.matches(document, id))
    }

    /// Returns `true` if term `id` occurs as a whole word in the abstract.
    #[inline]
    pub fn matches_id(&self, document: &Document, id: TermId) -> bool {
        self.matcher.matches(document, id)
    }

    /// Ids of every term found in the abstract, ascending.
    #[inline]
    pub fn match_vector(&self, document: &Document) -> MatchVector {
        self.matcher.match_vector(document)
    }
}
