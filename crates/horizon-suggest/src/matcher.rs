//! Candidate filtering and highlight annotation.
//!
//! [`MatchEngine`] decides which candidates match a query and records where
//! the match sits in each field. It never ranks: output order is input
//! order. Styling the spans is left to whoever renders the rows.
//!
//! # Example
//!
//! ```
//! use horizon_suggest::matcher::{FilterMode, MatchEngine, MatchOptions};
//! use horizon_suggest::{Candidate, HighlightSpan};
//!
//! let engine = MatchEngine::new(MatchOptions::default());
//! let candidates = vec![
//!     Candidate::new("Paris"),
//!     Candidate::new("Berlin"),
//!     Candidate::new("Madrid"),
//! ];
//!
//! let results = engine.filter("ri", &candidates, FilterMode::Standard, false);
//! let titles: Vec<_> = results.iter().map(|r| r.title()).collect();
//! assert_eq!(titles, ["Paris", "Madrid"]);
//! assert_eq!(results[0].title_span, Some(HighlightSpan::new(2, 2)));
//! assert_eq!(results[1].title_span, Some(HighlightSpan::new(3, 2)));
//! ```

use std::fmt;
use std::sync::Arc;

use unicode_segmentation::UnicodeSegmentation;

use crate::candidate::{AnnotatedResult, Candidate, HighlightSpan};

// ============================================================================
// Comparison
// ============================================================================

/// Strategy for locating a query inside a title or subtitle.
///
/// Implement this to plug in comparison rules the built-in variants of
/// [`Comparison`] don't cover. The returned span must index the original
/// `haystack`.
pub trait SubstringMatcher: Send + Sync {
    /// Find the first occurrence of `needle` in `haystack`.
    fn find(&self, haystack: &str, needle: &str) -> Option<HighlightSpan>;
}

/// How standard-mode filtering compares text.
#[derive(Clone, Default)]
pub enum Comparison {
    /// Exact, code-point-wise comparison (e.g., "Par" won't match "paris").
    CaseSensitive,
    /// Unicode lowercase folding on both sides (e.g., "PAR" matches "paris").
    #[default]
    CaseInsensitive,
    /// A caller-provided strategy.
    Custom(Arc<dyn SubstringMatcher>),
}

impl Comparison {
    /// Wrap a custom matcher.
    pub fn custom(matcher: impl SubstringMatcher + 'static) -> Self {
        Self::Custom(Arc::new(matcher))
    }
}

impl SubstringMatcher for Comparison {
    fn find(&self, haystack: &str, needle: &str) -> Option<HighlightSpan> {
        if needle.is_empty() {
            return None;
        }
        match self {
            Self::CaseSensitive => haystack
                .find(needle)
                .map(|start| HighlightSpan::new(start, needle.len())),
            Self::CaseInsensitive => find_folded(haystack, needle),
            Self::Custom(matcher) => matcher.find(haystack, needle),
        }
    }
}

impl fmt::Debug for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CaseSensitive => f.write_str("CaseSensitive"),
            Self::CaseInsensitive => f.write_str("CaseInsensitive"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Lowercase a string one `char` at a time.
///
/// Unlike [`str::to_lowercase`] this has no context-sensitive rules, so
/// every original character maps to a fixed run of folded characters.
pub(crate) fn fold(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// Case-insensitive search that reports the span in original coordinates.
///
/// Folding can change byte lengths ('İ' folds to two chars), so the search
/// runs on the folded text and the hit is widened to the original
/// characters it touches.
fn find_folded(haystack: &str, needle: &str) -> Option<HighlightSpan> {
    let folded_needle = fold(needle);
    if folded_needle.is_empty() {
        return None;
    }

    // (offset in folded text, offset in original text) per original char.
    let mut origins = Vec::with_capacity(haystack.len());
    let mut folded = String::with_capacity(haystack.len());
    for (original, ch) in haystack.char_indices() {
        origins.push((folded.len(), original));
        folded.extend(ch.to_lowercase());
    }

    let hit = folded.find(&folded_needle)?;
    let hit_end = hit + folded_needle.len();

    let first = origins.partition_point(|&(f, _)| f <= hit) - 1;
    let last = origins.partition_point(|&(f, _)| f < hit_end) - 1;
    let start = origins[first].1;
    let end = origins
        .get(last + 1)
        .map_or(haystack.len(), |&(_, original)| original);

    Some(HighlightSpan::new(start, end - start))
}

fn grapheme_len(text: &str) -> usize {
    text.graphemes(true).count()
}

// ============================================================================
// Match Engine
// ============================================================================

/// Which matching rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Substring search in title and subtitle, list presentation.
    #[default]
    Standard,
    /// Case-insensitive title prefix, ghost-text presentation.
    Inline,
}

/// Tuning knobs for [`MatchEngine`].
#[derive(Debug, Clone, Default)]
pub struct MatchOptions {
    /// Standard-mode comparison.
    pub comparison: Comparison,
    /// Queries with fewer grapheme clusters than this produce no results.
    pub min_chars: usize,
    /// Inline mode: matching restarts after the last occurrence of this.
    pub start_filtering_after: Option<String>,
    /// Inline mode: suggest as soon as the trigger is typed.
    pub suggest_immediately: bool,
}

/// Filters candidates against a query.
#[derive(Debug, Clone, Default)]
pub struct MatchEngine {
    options: MatchOptions,
}

impl MatchEngine {
    /// Create an engine with the given options.
    pub fn new(options: MatchOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut MatchOptions {
        &mut self.options
    }

    /// Filter `candidates` by `query`, keeping their order.
    ///
    /// `force_show_all` keeps every candidate in standard mode (spans are
    /// still recorded where a field happens to match). It does not bypass the
    /// minimum-length gate, and inline mode ignores it.
    pub fn filter(
        &self,
        query: &str,
        candidates: &[Candidate],
        mode: FilterMode,
        force_show_all: bool,
    ) -> Vec<AnnotatedResult> {
        if grapheme_len(query) < self.options.min_chars {
            tracing::trace!(
                target: "horizon_suggest::matcher",
                min_chars = self.options.min_chars,
                "query below minimum length"
            );
            return Vec::new();
        }

        let results = match mode {
            FilterMode::Standard => self.filter_standard(query, candidates, force_show_all),
            FilterMode::Inline => self.filter_inline(query, candidates).into_iter().collect(),
        };

        tracing::trace!(
            target: "horizon_suggest::matcher",
            ?mode,
            candidates = candidates.len(),
            matched = results.len(),
            "filter pass"
        );
        results
    }

    fn filter_standard(
        &self,
        query: &str,
        candidates: &[Candidate],
        force_show_all: bool,
    ) -> Vec<AnnotatedResult> {
        let comparison = &self.options.comparison;

        candidates
            .iter()
            .filter_map(|candidate| {
                let title_span = comparison.find(candidate.title(), query);
                let subtitle_span = candidate
                    .subtitle()
                    .and_then(|subtitle| comparison.find(subtitle, query));

                (title_span.is_some() || subtitle_span.is_some() || force_show_all).then(|| {
                    AnnotatedResult {
                        candidate: candidate.clone(),
                        title_span,
                        subtitle_span,
                        inline_suffix: None,
                    }
                })
            })
            .collect()
    }

    fn filter_inline(&self, input: &str, candidates: &[Candidate]) -> Option<AnnotatedResult> {
        let lowered = fold(input);
        let query = self.inline_query(&lowered)?;
        let skip = grapheme_len(query);

        // The query has to end on a title grapheme boundary.
        let candidate = candidates.iter().find(|candidate| {
            let head: String = candidate.title().graphemes(true).take(skip).collect();
            fold(&head) == query
        })?;

        let suffix: String = candidate.title().graphemes(true).skip(skip).collect();
        Some(AnnotatedResult {
            inline_suffix: Some(suffix),
            ..AnnotatedResult::plain(candidate.clone())
        })
    }

    /// The part of the (already folded) input that inline matching uses.
    ///
    /// Returns `None` when a trigger is configured but absent, or present
    /// with nothing after it and immediate suggestions are off.
    pub fn inline_query<'a>(&self, lowered_input: &'a str) -> Option<&'a str> {
        let trigger = self
            .options
            .start_filtering_after
            .as_deref()
            .filter(|trigger| !trigger.is_empty());

        let Some(trigger) = trigger else {
            return Some(lowered_input);
        };

        let (_, suffix) = lowered_input.rsplit_once(trigger)?;
        if suffix.is_empty() && !self.options.suggest_immediately {
            return None;
        }
        Some(suffix)
    }
}
