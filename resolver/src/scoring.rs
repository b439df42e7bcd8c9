//! Relevance scoring.
//!
//! Scores fall into tiers so that a better kind of match always outranks a
//! worse one, whatever the bonuses inside each tier:
//!
//! ```text
//! exact name            100_000
//! name prefix            50_000 ..  99_999
//! contiguous substring   10_000 ..  49_999
//! word prefixes           5_000 ..   9_999
//! scattered subsequence   1_000 ..   4_999
//! empty query                 1
//! ```

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::normalize::{Query, normalize, words};

pub const EXACT: i64 = 100_000;
pub const PREFIX: i64 = 50_000;
pub const SUBSTRING: i64 = 10_000;
pub const WORD_PREFIX: i64 = 5_000;
pub const SUBSEQUENCE: i64 = 1_000;

/// Score given to every candidate when the query folds to nothing.
pub const BASELINE: i64 = 1;

/// Scores candidate names against queries.
pub struct Scorer {
    matcher: SkimMatcherV2,
}

impl Scorer {
    pub fn new() -> Self {
        Self {
            matcher: SkimMatcherV2::default(),
        }
    }

    /// Score `name` against `query`, or `None` when it does not match.
    pub fn score(&self, name: &str, query: &Query) -> Option<i64> {
        if query.is_empty() {
            return Some(BASELINE);
        }

        let key = normalize(name);
        if key.is_empty() {
            return None;
        }
        if key == query.key() {
            return Some(EXACT);
        }

        let query_len = char_len(query.key());
        let length_penalty = char_len(&key) - query_len;

        if let Some(byte_pos) = key.find(query.key()) {
            let position = char_len(&key[..byte_pos]);
            let bonus = 1_000 + query_len * 40 - position - length_penalty;
            return Some(if position == 0 {
                tier(PREFIX, bonus, EXACT)
            } else {
                tier(SUBSTRING, bonus, PREFIX)
            });
        }

        if words_prefix_match(name, query) {
            return Some(tier(
                WORD_PREFIX,
                1_000 + query_len * 30 - length_penalty,
                SUBSTRING,
            ));
        }

        self.matcher
            .fuzzy_match(&key, query.key())
            .map(|s| tier(SUBSEQUENCE, s, WORD_PREFIX))
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Scorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scorer").finish_non_exhaustive()
    }
}

/// Keep `bonus` inside the tier `[base, ceiling)`.
fn tier(base: i64, bonus: i64, ceiling: i64) -> i64 {
    base + bonus.clamp(0, ceiling - base - 1)
}

fn char_len(s: &str) -> i64 {
    i64::try_from(s.chars().count()).unwrap_or(i64::MAX)
}

/// Every query word starts some word of the name.
fn words_prefix_match(name: &str, query: &Query) -> bool {
    let name_words = words(name);
    !query.words().is_empty()
        && query
            .words()
            .iter()
            .all(|q| name_words.iter().any(|w| w.starts_with(q.as_str())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(name: &str, query: &str) -> Option<i64> {
        Scorer::new().score(name, &Query::parse(query))
    }

    #[test]
    fn test_exact_beats_everything() {
        assert_eq!(score("Firefox", "firefox"), Some(EXACT));
        assert_eq!(score("Fire Fox", "FIREFOX"), Some(EXACT));
    }

    #[test]
    fn test_tiers_ordered() {
        let prefix = score("Firefox Developer", "fire").unwrap();
        let substring = score("Campfire", "fire").unwrap();
        let words = score("Shows Desktop", "Show Desktop").unwrap();
        let scattered = score("Visual Studio Code", "vsc").unwrap();

        assert!((PREFIX..EXACT).contains(&prefix));
        assert!((SUBSTRING..PREFIX).contains(&substring));
        assert!((WORD_PREFIX..SUBSTRING).contains(&words));
        assert!((SUBSEQUENCE..WORD_PREFIX).contains(&scattered));
    }

    #[test]
    fn test_shorter_names_win_within_tier() {
        let short = score("Terminal", "term").unwrap();
        let long = score("Terminal Emulator Settings", "term").unwrap();
        assert!(short > long);
    }

    #[test]
    fn test_no_match() {
        assert_eq!(score("Desktop Cleanup", "Show Desktop"), None);
        assert_eq!(score("+++", "a"), None);
    }

    #[test]
    fn test_symbol_queries_match_everything() {
        assert_eq!(score("Anything", "+"), Some(BASELINE));
        assert_eq!(score("Anything", ""), Some(BASELINE));
        assert_eq!(score("", "   "), Some(BASELINE));
    }

    #[test]
    fn test_symbols_in_query_are_ignored() {
        assert_eq!(score("Notepad++", "notepad++"), Some(EXACT));
        assert!(score("C# Compiler", "c#").is_some());
    }
}
