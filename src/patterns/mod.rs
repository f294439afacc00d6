//! Pattern matching strategy shared by every analyzer.
//!
//! Scoring code only sees the [`TextMatcher`] trait, so a different backend
//! (an Aho-Corasick automaton, a hand-written scanner) can replace the regex
//! matchers without touching any analyzer.

use crate::core::Result;
use regex::Regex;

/// Keyword containment adds this much to a raw indicator score.
pub const KEYWORD_BONUS: f64 = 2.0;

/// Raw indicator scores saturate at this value before clamping to 1.
pub const SCORE_SATURATION: f64 = 10.0;

/// One non-overlapping match inside a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMatch<'t> {
    pub start: usize,
    pub end: usize,
    pub text: &'t str,
    /// Capture groups 1..n, `""` for groups that did not participate
    pub groups: Vec<&'t str>,
}

pub trait TextMatcher: Send + Sync {
    fn count(&self, text: &str) -> usize;

    fn is_match(&self, text: &str) -> bool {
        self.count(text) > 0
    }

    fn find_all<'t>(&self, text: &'t str) -> Vec<TextMatch<'t>>;

    /// Source pattern, used for diagnostics and serialized catalogs.
    fn pattern(&self) -> &str;
}

/// Regex-backed matcher.
#[derive(Debug, Clone)]
pub struct RegexMatcher {
    regex: Regex,
}

impl RegexMatcher {
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    /// Case-insensitive variant of [`RegexMatcher::new`].
    pub fn case_insensitive(pattern: &str) -> Result<Self> {
        Self::new(&format!("(?i){pattern}"))
    }

    /// Matcher for a literal needle, case-insensitive.
    pub fn literal(needle: &str) -> Result<Self> {
        Self::case_insensitive(&regex::escape(needle))
    }

    /// Compile a catalog pattern.
    ///
    /// Catalog patterns are fixed at build time and covered by the catalog
    /// tests, so a failure here is a programming error.
    pub(crate) fn builtin(pattern: &str) -> Self {
        match Self::case_insensitive(pattern) {
            Ok(matcher) => matcher,
            Err(e) => panic!("invalid built-in pattern {pattern:?}: {e}"),
        }
    }
}

impl TextMatcher for RegexMatcher {
    fn count(&self, text: &str) -> usize {
        self.regex.find_iter(text).count()
    }

    fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    fn find_all<'t>(&self, text: &'t str) -> Vec<TextMatch<'t>> {
        self.regex
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let groups = (1..caps.len())
                    .map(|i| caps.get(i).map(|m| m.as_str()).unwrap_or(""))
                    .collect();
                Some(TextMatch {
                    start: whole.start(),
                    end: whole.end(),
                    text: whole.as_str(),
                    groups,
                })
            })
            .collect()
    }

    fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

/// Matchers plus keywords tagged with a category.
pub struct IndicatorSet {
    pub category: &'static str,
    pub description: &'static str,
    pub matchers: Vec<Box<dyn TextMatcher>>,
    pub keywords: Vec<&'static str>,
}

impl std::fmt::Debug for IndicatorSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndicatorSet")
            .field("category", &self.category)
            .field("matchers", &self.matchers.len())
            .field("keywords", &self.keywords)
            .finish()
    }
}

impl IndicatorSet {
    pub fn new(
        category: &'static str,
        description: &'static str,
        matchers: Vec<Box<dyn TextMatcher>>,
        keywords: Vec<&'static str>,
    ) -> Self {
        Self {
            category,
            description,
            matchers,
            keywords,
        }
    }

    /// Build a set from built-in regex sources.
    pub(crate) fn builtin(
        category: &'static str,
        description: &'static str,
        patterns: &[&str],
        keywords: &[&'static str],
    ) -> Self {
        Self::new(
            category,
            description,
            patterns
                .iter()
                .map(|p| Box::new(RegexMatcher::builtin(p)) as Box<dyn TextMatcher>)
                .collect(),
            keywords.to_vec(),
        )
    }

    /// Unnormalized score: pattern match counts plus a bonus per contained keyword.
    pub fn raw_score(&self, text: &str) -> f64 {
        if text.is_empty() {
            return 0.0;
        }
        let pattern_hits: usize = self.matchers.iter().map(|m| m.count(text)).sum();
        let lower = text.to_lowercase();
        let keyword_hits = self
            .keywords
            .iter()
            .filter(|k| lower.contains(*k))
            .count();
        pattern_hits as f64 + keyword_hits as f64 * KEYWORD_BONUS
    }

    /// Score in `[0, 1]`.
    pub fn score(&self, text: &str) -> f64 {
        normalize_score(self.raw_score(text))
    }
}

pub fn normalize_score(raw: f64) -> f64 {
    (raw / SCORE_SATURATION).clamp(0.0, 1.0)
}

/// Score text against several sets and return the total, clamped to `[0, 1]`.
pub fn score_sets(sets: &[IndicatorSet], text: &str) -> f64 {
    normalize_score(sets.iter().map(|s| s.raw_score(text)).sum())
}

/// Count case-insensitive occurrences of `needle` in an already lowercased haystack.
pub fn count_occurrences(lower_haystack: &str, needle: &str) -> usize {
    let needle = needle.to_lowercase();
    if needle.is_empty() {
        return 0;
    }
    lower_haystack.matches(needle.as_str()).count()
}

/// Short excerpt around `start..end`, snapped to char boundaries.
pub fn snippet(text: &str, start: usize, end: usize, radius: usize) -> String {
    let mut from = start.saturating_sub(radius);
    while from > 0 && !text.is_char_boundary(from) {
        from -= 1;
    }
    let mut to = (end + radius).min(text.len());
    while to < text.len() && !text.is_char_boundary(to) {
        to += 1;
    }
    text[from..to].split_whitespace().collect::<Vec<_>>().join(" ")
}
