// Analysis core — the deterministic post-scoring pipeline.
//
// Two passes: each post is scored independently (no shared state), then
// the scored sequence is folded into the dashboard summary. No I/O and no
// randomness in here, so the same batch always produces identical output.

pub mod aggregate;
pub mod keywords;
pub mod post;
pub mod sentiment;

pub use aggregate::AnalysisResult;
pub use post::{RawPost, ScoredPost};

use crate::lexicon::Lexicon;

/// Tuning constants for severity and confidence.
///
/// These are heuristic values, not learned ones. They are carried in a
/// struct (rather than scattered literals) so tests can pin them and
/// alternate profiles can be tried without touching the scoring code.
#[derive(Debug, Clone)]
pub struct SeverityWeights {
    /// Sentiment below this counts as negative (default -0.3).
    pub negative_threshold: f64,
    /// Sentiment above this counts as positive (default 0.3).
    pub positive_threshold: f64,
    /// Added to severity when the post reads negative (default 1.2).
    /// Panicked phrasing amplifies the risk signal.
    pub negative_boost: f64,
    /// Subtracted from severity when the post reads positive, floored at
    /// zero (default 0.6). "All clear" phrasing dampens it.
    pub positive_damp: f64,
    /// Confidence assigned to a zero-severity post (default 0.4).
    pub confidence_floor: f64,
    /// Confidence never exceeds this (default 0.99).
    pub confidence_cap: f64,
    /// Severity at which confidence saturates (default 4.0).
    pub confidence_span: f64,
}

impl Default for SeverityWeights {
    fn default() -> Self {
        Self {
            negative_threshold: -0.3,
            positive_threshold: 0.3,
            negative_boost: 1.2,
            positive_damp: 0.6,
            confidence_floor: 0.4,
            confidence_cap: 0.99,
            confidence_span: 4.0,
        }
    }
}

/// The analysis entry point: an immutable lexicon plus tuning weights.
#[derive(Default)]
pub struct Analyzer {
    pub lexicon: Lexicon,
    pub weights: SeverityWeights,
}

impl Analyzer {
    /// Score a batch of raw posts and fold them into a dashboard summary.
    ///
    /// Total function: malformed posts degrade to safe defaults and an
    /// empty batch yields a zero-valued result, never an error.
    pub fn analyze(&self, posts: &[RawPost]) -> AnalysisResult {
        let scored: Vec<ScoredPost> = posts
            .iter()
            .map(|p| post::score_post(p, &self.lexicon, &self.weights))
            .collect();
        aggregate::summarize(scored, &self.lexicon, &self.weights)
    }
}

/// Round to two decimals, the precision of every severity and confidence
/// value that leaves the core.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_basics() {
        assert_eq!(round2(3.14159), 3.14);
        assert_eq!(round2(3.456), 3.46);
        assert_eq!(round2(2.0), 2.0);
    }

    #[test]
    fn default_weights_match_documented_values() {
        let w = SeverityWeights::default();
        assert_eq!(w.negative_threshold, -0.3);
        assert_eq!(w.positive_threshold, 0.3);
        assert_eq!(w.negative_boost, 1.2);
        assert_eq!(w.positive_damp, 0.6);
        assert_eq!(w.confidence_floor, 0.4);
        assert_eq!(w.confidence_cap, 0.99);
        assert_eq!(w.confidence_span, 4.0);
    }
}
