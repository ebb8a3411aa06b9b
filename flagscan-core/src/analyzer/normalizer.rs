//! Text normalization shared by terms and abstracts.
//!
//! Terms and abstracts go through the same transformation so that a
//! multi-word term such as `"gender identity"` lines up with an abstract that
//! wraps it across a line break.

/// Whitespace and case normalizer.
///
/// Performs the following operations:
/// - Converts all characters to lowercase (Unicode-aware)
/// - Collapses every run of whitespace into a single ASCII space
/// - Removes leading and trailing whitespace
///
/// Punctuation, digits and symbols pass through unchanged; word boundaries
/// are decided later by the matcher.
///
/// # Examples
///
/// ```
/// use flagscan_core::analyzer::TextNormalizer;
///
/// let normalizer = TextNormalizer::new();
/// assert_eq!(normalizer.normalize("  Gender\n\tIDENTITY  "), "gender identity");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TextNormalizer;

impl TextNormalizer {
    /// Creates a new normalizer.
    pub const fn new() -> Self {
        Self
    }

    /// Normalizes text into an existing String buffer.
    ///
    /// Clears the buffer first and reuses its capacity.
    #[inline]
    pub fn normalize_into(&self, input: &str, out: &mut String) {
        out.clear();
        out.reserve(input.len());

        let mut pending_space = false;

        for ch in input.chars() {
            if ch.is_whitespace() {
                // Leading whitespace never produces a separator.
                pending_space = !out.is_empty();
                continue;
            }

            if pending_space {
                out.push(' ');
                pending_space = false;
            }

            if ch.is_ascii() {
                out.push(ch.to_ascii_lowercase());
            } else {
                out.extend(ch.to_lowercase());
            }
        }
    }

    /// Normalizes text and returns a new String.
    #[inline]
    pub fn normalize(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        self.normalize_into(input, &mut out);
        out
    }
}
