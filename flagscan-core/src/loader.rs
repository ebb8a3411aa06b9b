//! Loading corpora, term lists and configuration from disk.
//!
//! Corpus files are JSON, either an object mapping document ids to records or
//! an array of records:
//!
//! ```json
//! { "w1": { "title": "A", "abstract": "...", "theme": "Health" } }
//! [ { "id": "w1", "title": "A", "abstract": "...", "theme": "Health" } ]
//! ```
//!
//! Object order is preserved, so corpus order is file order either way.
//! Term lists are plain text with one term per line; blank lines and lines
//! starting with `#` are ignored.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use flagscan_types::{AnalysisConfig, ConfigError, Document};
use log::debug;
use serde_json::Value;
use thiserror::Error;

/// Errors raised while loading inputs.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corpus must be a JSON object or array, found {0}")]
    UnsupportedShape(&'static str),

    #[error("invalid document {id:?}: {source}")]
    InvalidDocument {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

fn read_file(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads a corpus from a JSON file.
pub fn load_corpus(path: impl AsRef<Path>) -> Result<Vec<Document>, LoadError> {
    let path = path.as_ref();
    let corpus = corpus_from_str(&read_file(path)?)?;
    debug!("loaded {} documents from {}", corpus.len(), path.display());
    Ok(corpus)
}

/// Reads a corpus from any reader.
pub fn corpus_from_reader<R: Read>(reader: R) -> Result<Vec<Document>, LoadError> {
    let value: Value = serde_json::from_reader(reader)?;
    corpus_from_value(value)
}

/// Parses a corpus from JSON text.
pub fn corpus_from_str(json: &str) -> Result<Vec<Document>, LoadError> {
    let value: Value = serde_json::from_str(json)?;
    corpus_from_value(value)
}

fn corpus_from_value(value: Value) -> Result<Vec<Document>, LoadError> {
    match value {
        Value::Object(map) => map
            .into_iter()
            .map(|(key, record)| document_from_value(record, key))
            .collect(),
        Value::Array(records) => records
            .into_iter()
            .enumerate()
            .map(|(i, record)| document_from_value(record, i.to_string()))
            .collect(),
        Value::Null => Err(LoadError::UnsupportedShape("null")),
        Value::Bool(_) => Err(LoadError::UnsupportedShape("a boolean")),
        Value::Number(_) => Err(LoadError::UnsupportedShape("a number")),
        Value::String(_) => Err(LoadError::UnsupportedShape("a string")),
    }
}

/// `fallback_id` is the object key or array index; an explicit `id` field
/// takes precedence.
fn document_from_value(record: Value, fallback_id: String) -> Result<Document, LoadError> {
    let mut doc: Document =
        serde_json::from_value(record).map_err(|source| LoadError::InvalidDocument {
            id: fallback_id.clone(),
            source,
        })?;
    if doc.id.is_empty() {
        doc.id = fallback_id;
    }
    doc.normalize_theme();
    Ok(doc)
}

/// Loads raw terms from a text file, one per line.
pub fn load_terms(path: impl AsRef<Path>) -> Result<Vec<String>, LoadError> {
    let path = path.as_ref();
    let terms = terms_from_str(&read_file(path)?);
    debug!("loaded {} raw terms from {}", terms.len(), path.display());
    Ok(terms)
}

/// Splits term-list text into raw terms.
///
/// Blank lines are skipped, as are comment lines: a `#` followed by
/// whitespace or nothing. A hashtag term such as `#metoo` is kept.
///
/// Terms are returned as written; case folding and deduplication happen in
/// [`TermList::normalize`](crate::analyzer::TermList::normalize).
pub fn terms_from_str(text: &str) -> Vec<String> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !is_comment(line))
        .map(str::to_owned)
        .collect()
}

fn is_comment(line: &str) -> bool {
    line.strip_prefix('#')
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
}

/// Loads and validates an [`AnalysisConfig`] from a JSON file.
///
/// Missing fields take their default values.
pub fn load_config(path: impl AsRef<Path>) -> Result<AnalysisConfig, LoadError> {
    let config: AnalysisConfig = serde_json::from_str(&read_file(path.as_ref())?)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flagscan_types::UNKNOWN_THEME;

    #[test]
    fn object_corpus_keeps_file_order_and_ids() {
        let json = r#"{
            "z9": {"title": "Z", "abstract": "women in STEM", "theme": "Education"},
            "a1": {"title": "A", "abstract": "men's health"}
        }"#;
        let corpus = corpus_from_str(json).unwrap();

        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus[0].id, "z9");
        assert_eq!(corpus[0].theme, "Education");
        assert_eq!(corpus[1].id, "a1");
        assert_eq!(corpus[1].theme, UNKNOWN_THEME);
    }

    #[test]
    fn array_corpus() {
        let json = r#"[
            {"id": "p1", "title": "A", "abstract": "text"},
            {"title": "B", "abstract": null, "theme": ""}
        ]"#;
        let corpus = corpus_from_reader(json.as_bytes()).unwrap();

        assert_eq!(corpus[0].id, "p1");
        assert_eq!(corpus[1].id, "1");
        assert_eq!(corpus[1].abstract_text, None);
        assert_eq!(corpus[1].theme, UNKNOWN_THEME);
    }

    #[test]
    fn empty_corpus() {
        assert!(corpus_from_str("{}").unwrap().is_empty());
        assert!(corpus_from_str("[]").unwrap().is_empty());
    }

    #[test]
    fn rejects_unsupported_shapes() {
        assert!(matches!(
            corpus_from_str("42"),
            Err(LoadError::UnsupportedShape(_))
        ));
        assert!(matches!(corpus_from_str("{"), Err(LoadError::Json(_))));
    }

    #[test]
    fn reports_bad_record_id() {
        let err = corpus_from_str(r#"{"w1": {"title": 5}}"#).unwrap_err();
        match err {
            LoadError::InvalidDocument { id, .. } => assert_eq!(id, "w1"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn term_lines() {
        let text = "\u{feff}Women\n\n# comment\n  trans  \r\nequity\n";
        assert_eq!(terms_from_str(text), vec!["Women", "trans", "equity"]);
        assert!(terms_from_str("").is_empty());
    }

    #[test]
    fn hashtag_terms_are_not_comments() {
        let text = "#\n#\tnote\n#MeToo\n  #blacklivesmatter\n# women\n";
        assert_eq!(terms_from_str(text), vec!["#MeToo", "#blacklivesmatter"]);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_terms("/definitely/not/here.txt").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.txt"));
    }
}
