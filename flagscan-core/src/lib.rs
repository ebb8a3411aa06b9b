//! Flagged-term detection and aggregation for abstract corpora.
//!
//! Given a corpus of documents and a list of flagged terms, flagscan
//! produces a flag per document, a count per term over the flagged
//! documents, the titles behind each count, and corpus-level statistics.
//!
//! ```
//! use flagscan_core::{analyze, AnalysisConfig, Document};
//!
//! let corpus = vec![
//!     Document::new("1", "A", "this paper studies women in STEM"),
//!     Document::new("2", "B", "a study of men's health"),
//! ];
//! let analysis = analyze(&corpus, ["women"], AnalysisConfig::default()).unwrap();
//!
//! assert!(analysis.flags[0].contains_flagged);
//! assert!(!analysis.flags[1].contains_flagged);
//! assert_eq!(analysis.frequency("women").unwrap().titles, ["A"]);
//! ```

pub mod analyzer;
pub mod cache;
pub mod fingerprint;
pub mod loader;
pub mod scan;

pub use analyzer::TermList;
pub use cache::ReportCache;
pub use flagscan_types::{
    Analysis, AnalysisConfig, ConfigError, CorpusStats, Document, DocumentFlag, Scale,
    TermFrequency, ThemeBreakdown,
};
pub use loader::LoadError;
pub use scan::Scanner;

/// Normalizes `raw_terms`, scans `corpus` once and returns the analysis.
///
/// # Errors
///
/// Returns `ConfigError` if `config` does not validate.
pub fn analyze<I, S>(
    corpus: &[Document],
    raw_terms: I,
    config: AnalysisConfig,
) -> Result<Analysis, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let scanner = Scanner::with_config(TermList::normalize(raw_terms), config)?;
    Ok(scanner.scan(corpus))
}
