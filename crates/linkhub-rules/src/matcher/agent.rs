//! User-agent keyword matching.
//!
//! `KeywordMatcher` wraps an Aho-Corasick automaton so classifying a
//! user agent costs O(m) in its length, independent of the keyword count.

use aho_corasick::AhoCorasick;

use crate::error::RulesError;

/// Matches when the haystack contains any registered keyword, ignoring ASCII case.
pub struct KeywordMatcher {
    ac: AhoCorasick,
    keywords: Vec<String>,
}

impl KeywordMatcher {
    /// Build a keyword matcher from a list of keywords.
    ///
    /// Blank keywords are ignored. Returns `Ok(None)` if nothing is left.
    pub fn new<I, S>(keywords: I) -> Result<Option<Self>, RulesError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lower: Vec<String> = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_ascii_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        if lower.is_empty() {
            return Ok(None);
        }
        let ac = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&lower)
            .map_err(|e| RulesError::Pattern(e.to_string()))?;
        Ok(Some(Self {
            ac,
            keywords: lower,
        }))
    }

    /// Check if the haystack contains any keyword.
    pub fn matches(&self, haystack: &str) -> bool {
        self.ac.is_match(haystack)
    }

    /// Number of keywords.
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    /// Returns true if there are no keywords.
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

impl std::fmt::Debug for KeywordMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeywordMatcher")
            .field("keywords", &self.keywords)
            .finish()
    }
}
