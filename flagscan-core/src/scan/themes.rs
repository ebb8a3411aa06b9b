//! Flagged/unflagged breakdown per research theme.

use flagscan_types::{Document, ThemeBreakdown};
use rustc_hash::FxHashMap;

use crate::scan::types::Scanner;

impl Scanner {
    /// Splits each theme into flagged and unflagged documents.
    ///
    /// Themes appear in first-seen order. Documents with the `"Unknown"`
    /// theme are skipped unless the configuration includes them.
    pub fn themes(&self, corpus: &[Document]) -> Vec<ThemeBreakdown> {
        breakdown(
            corpus.iter().map(|doc| (doc, self.flag(doc))),
            self.config.include_unknown_theme,
        )
    }
}

pub(crate) fn breakdown<'a, I>(flagged: I, include_unknown: bool) -> Vec<ThemeBreakdown>
where
    I: IntoIterator<Item = (&'a Document, bool)>,
{
    let mut rows: Vec<ThemeBreakdown> = Vec::new();
    let mut index: FxHashMap<&'a str, usize> = FxHashMap::default();

    for (doc, is_flagged) in flagged {
        if !include_unknown && !doc.has_known_theme() {
            continue;
        }

        let slot = *index.entry(doc.theme.as_str()).or_insert_with(|| {
            rows.push(ThemeBreakdown {
                theme: doc.theme.clone(),
                flagged: 0,
                not_flagged: 0,
            });
            rows.len() - 1
        });

        let row = &mut rows[slot];
        if is_flagged {
            row.flagged += 1;
        } else {
            row.not_flagged += 1;
        }
    }

    rows
}
