//! Case folding for matching.
//!
//! Folding uses Unicode lowercase mappings rather than any locale's rules,
//! so the same text folds the same way everywhere. Characters without an
//! alphanumeric meaning are dropped.

/// Fold `input` to its comparison key.
pub fn normalize(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Fold `input` into its words, splitting on anything non-alphanumeric.
pub fn words(input: &str) -> Vec<String> {
    input
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(normalize)
        .collect()
}

/// A folded query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    raw: String,
    key: String,
    words: Vec<String>,
}

impl Query {
    pub fn parse(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            key: normalize(raw),
            words: words(raw),
        }
    }

    /// The text as typed.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The folded comparison key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The folded words.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Whether nothing matchable was typed.
    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }
}
