//! Core types shared across the flagscan engine.
//!
//! Everything here is plain data: documents as loaded from a corpus, the
//! aggregate tables produced by a scan, and the configuration that shapes
//! them. Keeping them in their own crate lets a presentation layer depend on
//! the output shapes without pulling in the matching machinery.

#![warn(missing_docs)]

use core::fmt;

use serde::{Deserialize, Serialize};

/// Index of a term inside a normalized term list.
///
/// Term ids follow first-seen order, so sorting by id reproduces the order in
/// which the terms were supplied.
pub type TermId = u32;

/// Theme assigned to documents that do not carry one.
pub const UNKNOWN_THEME: &str = "Unknown";

/// Number of titles kept per term for display.
pub const DEFAULT_TITLE_LIMIT: usize = 10;

fn unknown_theme() -> String {
    UNKNOWN_THEME.to_owned()
}

/// A single entry of the corpus.
///
/// Documents are immutable once loaded. The abstract may be missing, in which
/// case the document never matches any term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Identifier supplied by the corpus loader.
    #[serde(default)]
    pub id: String,
    /// Title shown in the term-to-document index.
    #[serde(default)]
    pub title: String,
    /// Abstract text scanned for terms.
    #[serde(rename = "abstract", default)]
    pub abstract_text: Option<String>,
    /// Research theme, `"Unknown"` when absent.
    #[serde(default = "unknown_theme")]
    pub theme: String,
}

impl Document {
    /// Creates a document with an unknown theme.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        abstract_text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            abstract_text: Some(abstract_text.into()),
            theme: unknown_theme(),
        }
    }

    /// Creates a document without an abstract.
    pub fn without_abstract(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            abstract_text: None,
            theme: unknown_theme(),
        }
    }

    /// Sets the theme. Blank themes are stored as `"Unknown"`.
    #[must_use]
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self.normalize_theme();
        self
    }

    /// Replaces a blank theme with `"Unknown"`.
    pub fn normalize_theme(&mut self) {
        let trimmed = self.theme.trim();
        if trimmed.is_empty() {
            self.theme = unknown_theme();
        } else if trimmed.len() != self.theme.len() {
            self.theme = trimmed.to_owned();
        }
    }

    /// Returns the abstract, or an empty string when it is missing.
    #[inline]
    pub fn abstract_str(&self) -> &str {
        self.abstract_text.as_deref().unwrap_or("")
    }

    /// Returns `true` if the document carries a theme other than `"Unknown"`.
    #[inline]
    pub fn has_known_theme(&self) -> bool {
        self.theme != UNKNOWN_THEME
    }
}

/// Per-document flag produced by a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFlag {
    /// Document identifier.
    pub id: String,
    /// Whether at least one term matched the abstract.
    pub contains_flagged: bool,
}

/// Frequency of one term across the flagged documents.
///
/// `count` is exact. `titles` holds the first matching titles in corpus
/// order, truncated to the configured display limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermFrequency {
    /// Normalized term.
    pub term: String,
    /// Number of flagged documents containing the term.
    pub count: usize,
    /// Titles of the first matching documents.
    pub titles: Vec<String>,
}

impl TermFrequency {
    /// Joins the display titles with `separator`, e.g. `"<br>"` for tooltips.
    pub fn hover_text(&self, separator: &str) -> String {
        self.titles.join(separator)
    }

    /// Returns `true` if more documents matched than titles are shown.
    #[inline]
    pub fn is_truncated(&self) -> bool {
        self.count > self.titles.len()
    }
}

/// Flagged/unflagged split of a single research theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeBreakdown {
    /// Theme name.
    pub theme: String,
    /// Documents of this theme with at least one matching term.
    pub flagged: usize,
    /// Documents of this theme without any matching term.
    pub not_flagged: usize,
}

impl ThemeBreakdown {
    /// Total number of documents in this theme.
    #[inline]
    pub const fn total(&self) -> usize {
        self.flagged + self.not_flagged
    }
}

/// Corpus-level statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorpusStats {
    /// Number of documents scanned.
    pub total_documents: usize,
    /// Number of documents with at least one matching term.
    pub flagged_documents: usize,
    /// `flagged_documents / total_documents`, 0 for an empty corpus.
    pub flagged_fraction: f64,
    /// `flagged_fraction` multiplied by the configured scale.
    pub scaled_fraction: f64,
}

impl CorpusStats {
    /// Computes the statistics for a corpus of `total` documents of which
    /// `flagged` matched at least one term.
    pub fn new(total: usize, flagged: usize, scale: Scale) -> Self {
        debug_assert!(flagged <= total, "more flagged documents than documents");

        let flagged_fraction = if total == 0 {
            0.0
        } else {
            flagged as f64 / total as f64
        };

        Self {
            total_documents: total,
            flagged_documents: flagged,
            flagged_fraction,
            scaled_fraction: flagged_fraction * scale.get(),
        }
    }

    /// Scaled fraction expressed as a percentage.
    #[inline]
    pub fn percent(&self) -> f64 {
        self.scaled_fraction * 100.0
    }
}

impl fmt::Display for CorpusStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} docs, {} flagged, {:.2}%",
            self.total_documents,
            self.flagged_documents,
            self.percent()
        )?;

        if self.scaled_fraction != self.flagged_fraction {
            write!(f, " (scaled, raw {:.2}%)", self.flagged_fraction * 100.0)?;
        }

        Ok(())
    }
}

/// Multiplier applied to the flagged fraction.
///
/// Used to report against a reference population whose size differs from the
/// number of documents actually sampled. The identity scale reports the raw
/// fraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scale(f64);

impl Scale {
    /// Reports the raw fraction.
    pub const IDENTITY: Scale = Scale(1.0);

    /// Creates a scale from a raw multiplier.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidScale` if `factor` is not finite or not
    /// strictly positive.
    pub fn new(factor: f64) -> Result<Self, ConfigError> {
        if factor.is_finite() && factor > 0.0 {
            Ok(Self(factor))
        } else {
            Err(ConfigError::InvalidScale { value: factor })
        }
    }

    /// Creates the scale `reference / sample`.
    ///
    /// # Example
    /// ```
    /// use flagscan_types::Scale;
    ///
    /// let scale = Scale::ratio(1000.0, 488.0).unwrap();
    /// assert!((scale.get() - 2.0491803).abs() < 1e-6);
    /// ```
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidRatio` if either side is not finite and
    /// strictly positive.
    pub fn ratio(reference: f64, sample: f64) -> Result<Self, ConfigError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(reference) || !valid(sample) {
            return Err(ConfigError::InvalidRatio { reference, sample });
        }
        Self::new(reference / sample)
    }

    /// Returns the multiplier.
    #[inline(always)]
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Errors raised when validating an [`AnalysisConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Scale factor is not finite or not strictly positive.
    InvalidScale {
        /// The rejected factor.
        value: f64,
    },
    /// One side of a scale ratio is not finite or not strictly positive.
    InvalidRatio {
        /// Reference population size.
        reference: f64,
        /// Sample size.
        sample: f64,
    },
    /// Display limit for titles must be at least one.
    ZeroTitleLimit,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidScale { value } => {
                write!(f, "scale must be finite and positive, got {}", value)
            }
            ConfigError::InvalidRatio { reference, sample } => {
                write!(
                    f,
                    "scale ratio needs positive sizes, got reference={} sample={}",
                    reference, sample
                )
            }
            ConfigError::ZeroTitleLimit => write!(f, "title limit must be at least 1"),
        }
    }
}

impl core::error::Error for ConfigError {}

/// Analysis configuration options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Multiplier applied to the flagged fraction.
    pub scale: Scale,
    /// Maximum number of titles kept per term for display.
    /// Default: 10
    pub title_limit: usize,
    /// Whether documents with an unknown theme appear in the theme breakdown.
    pub include_unknown_theme: bool,
    /// Whether the matching pass may run across threads.
    pub parallel: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            scale: Scale::IDENTITY,
            title_limit: DEFAULT_TITLE_LIMIT,
            include_unknown_theme: false,
            parallel: true,
        }
    }
}

impl AnalysisConfig {
    /// Single-threaded configuration with default display settings.
    pub const fn sequential() -> Self {
        Self {
            scale: Scale::IDENTITY,
            title_limit: DEFAULT_TITLE_LIMIT,
            include_unknown_theme: false,
            parallel: false,
        }
    }

    /// Returns a copy reporting against `scale`.
    #[must_use]
    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.scale = scale;
        self
    }

    /// Checks that every field holds a usable value.
    ///
    /// # Errors
    /// Returns the first invalid field found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Scale::new(self.scale.get())?;
        if self.title_limit == 0 {
            return Err(ConfigError::ZeroTitleLimit);
        }
        Ok(())
    }
}

/// Complete result of scanning a corpus against a term list.
///
/// Handed as-is to the presentation layer. Frequencies are sorted by
/// descending count, ties in term-list order; terms that matched nothing are
/// omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// One flag per document, in corpus order.
    pub flags: Vec<DocumentFlag>,
    /// Term frequency table.
    pub frequencies: Vec<TermFrequency>,
    /// Corpus-level statistics.
    pub stats: CorpusStats,
    /// Flagged split per theme, in first-seen theme order.
    pub themes: Vec<ThemeBreakdown>,
}

impl Analysis {
    /// Iterates over the flags of documents containing at least one term.
    pub fn flagged_documents(&self) -> impl Iterator<Item = &DocumentFlag> + '_ {
        self.flags.iter().filter(|f| f.contains_flagged)
    }

    /// Returns the frequency entry for `term`, compared case-insensitively.
    pub fn frequency(&self, term: &str) -> Option<&TermFrequency> {
        let wanted = term.trim().to_lowercase();
        self.frequencies.iter().find(|f| f.term == wanted)
    }

    /// Returns `(term, count)` pairs suitable for sizing a word cloud.
    pub fn word_cloud_weights(&self) -> Vec<(&str, usize)> {
        self.frequencies
            .iter()
            .map(|f| (f.term.as_str(), f.count))
            .collect()
    }
}

/// Content fingerprint of a scan's inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Fingerprint(pub u64);

impl Fingerprint {
    /// Returns the underlying value.
    #[inline(always)]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_corpus_fraction_is_zero() {
        let stats = CorpusStats::new(0, 0, Scale::IDENTITY);
        assert_eq!(stats.flagged_fraction, 0.0);
        assert_eq!(stats.scaled_fraction, 0.0);
        assert_eq!(stats.percent(), 0.0);
    }

    #[test]
    fn stats_fraction_and_scale() {
        let stats = CorpusStats::new(4, 1, Scale::new(2.0).unwrap());
        assert_eq!(stats.flagged_fraction, 0.25);
        assert_eq!(stats.scaled_fraction, 0.5);
        assert_eq!(stats.percent(), 50.0);
    }

    #[test]
    fn stats_display() {
        let raw = CorpusStats::new(4, 1, Scale::IDENTITY);
        assert_eq!(raw.to_string(), "4 docs, 1 flagged, 25.00%");

        let scaled = CorpusStats::new(4, 1, Scale::new(2.0).unwrap());
        assert_eq!(scaled.to_string(), "4 docs, 1 flagged, 50.00% (scaled, raw 25.00%)");
    }

    #[test]
    fn scale_rejects_bad_values() {
        assert!(Scale::new(0.0).is_err());
        assert!(Scale::new(-1.0).is_err());
        assert!(Scale::new(f64::NAN).is_err());
        assert!(Scale::new(f64::INFINITY).is_err());
        assert!(Scale::new(1.5).is_ok());
    }

    #[test]
    fn scale_ratio() {
        let scale = Scale::ratio(1000.0, 488.0).unwrap();
        assert_eq!(scale.get(), 1000.0 / 488.0);

        assert!(matches!(
            Scale::ratio(1000.0, 0.0),
            Err(ConfigError::InvalidRatio { .. })
        ));
    }

    #[test]
    fn config_validation() {
        assert!(AnalysisConfig::default().validate().is_ok());
        assert!(AnalysisConfig::sequential().validate().is_ok());

        let zero_limit = AnalysisConfig {
            title_limit: 0,
            ..Default::default()
        };
        assert_eq!(zero_limit.validate(), Err(ConfigError::ZeroTitleLimit));
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: AnalysisConfig = serde_json::from_str(r#"{"scale": 2.5}"#).unwrap();
        assert_eq!(config.scale.get(), 2.5);
        assert_eq!(config.title_limit, DEFAULT_TITLE_LIMIT);
        assert!(config.parallel);

        let bad: AnalysisConfig = serde_json::from_str(r#"{"scale": -1.0}"#).unwrap();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn document_theme_defaults() {
        let doc: Document =
            serde_json::from_str(r#"{"id": "1", "title": "A", "abstract": "text"}"#).unwrap();
        assert_eq!(doc.theme, UNKNOWN_THEME);
        assert!(!doc.has_known_theme());

        let doc = Document::new("2", "B", "text").with_theme("   ");
        assert_eq!(doc.theme, UNKNOWN_THEME);

        let doc = Document::new("3", "C", "text").with_theme(" Health ");
        assert_eq!(doc.theme, "Health");
        assert!(doc.has_known_theme());
    }

    #[test]
    fn missing_abstract_reads_as_empty() {
        let doc = Document::without_abstract("1", "A");
        assert_eq!(doc.abstract_str(), "");

        let doc: Document = serde_json::from_str(r#"{"title": "A", "abstract": null}"#).unwrap();
        assert_eq!(doc.abstract_str(), "");
    }

    #[test]
    fn term_frequency_hover_text() {
        let tf = TermFrequency {
            term: "women".into(),
            count: 3,
            titles: vec!["A".into(), "B".into()],
        };
        assert_eq!(tf.hover_text("<br>"), "A<br>B");
        assert!(tf.is_truncated());
    }

    #[test]
    fn fingerprint_display_is_fixed_width() {
        assert_eq!(Fingerprint(0xab).to_string(), "00000000000000ab");
    }
}
