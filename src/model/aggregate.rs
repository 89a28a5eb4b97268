// Batch aggregation — folds the scored sequence into the dashboard summary.
//
// Sentiment classification here is re-derived from each post's text with
// the same thresholds as the scoring pass, not inferred from severity.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::lexicon::Lexicon;

use super::keywords::detect_keywords;
use super::post::ScoredPost;
use super::round2;
use super::sentiment::{sentiment_score, SentimentLabel};
use super::SeverityWeights;

const HOUR_MS: i64 = 3_600_000;

/// Sentiment breakdown for a batch. The three counts always sum to the
/// number of posts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentCounts {
    pub neg: u32,
    pub neu: u32,
    pub pos: u32,
}

/// One hour bucket of the severity time series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeBucket {
    /// Bucket start in epoch milliseconds.
    pub time: i64,
    /// Mean severity of the posts in the bucket, two decimals.
    #[serde(rename = "avgSeverity")]
    pub avg_severity: f64,
}

/// The full analysis summary returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Scored posts in input order.
    pub posts: Vec<ScoredPost>,
    /// Batch risk score in [0, 100].
    pub score: u32,
    /// Hourly severity series, ascending, one entry per occupied bucket.
    pub times: Vec<TimeBucket>,
    #[serde(rename = "sentimentCounts")]
    pub sentiment_counts: SentimentCounts,
    /// Count of posts containing each keyword (not weighted occurrences).
    #[serde(rename = "keywordFreq")]
    pub keyword_freq: BTreeMap<String, u32>,
}

/// Fold a scored batch into the dashboard summary.
///
/// An empty batch is valid and yields a zero-valued result — the mean is
/// guarded, not left to divide by zero.
pub fn summarize(
    posts: Vec<ScoredPost>,
    lexicon: &Lexicon,
    weights: &SeverityWeights,
) -> AnalysisResult {
    let mut sentiment_counts = SentimentCounts::default();
    let mut keyword_freq: BTreeMap<String, u32> = BTreeMap::new();
    let mut buckets: BTreeMap<i64, (f64, u32)> = BTreeMap::new();
    let mut total_severity = 0.0;

    for post in &posts {
        match SentimentLabel::from_score(sentiment_score(&post.text, lexicon), weights) {
            SentimentLabel::Negative => sentiment_counts.neg += 1,
            SentimentLabel::Neutral => sentiment_counts.neu += 1,
            SentimentLabel::Positive => sentiment_counts.pos += 1,
        }

        for (keyword, _) in detect_keywords(&post.text, lexicon) {
            *keyword_freq.entry(keyword.to_string()).or_insert(0) += 1;
        }

        let bucket = buckets
            .entry(post.timestamp.div_euclid(HOUR_MS))
            .or_insert((0.0, 0));
        bucket.0 += post.severity;
        bucket.1 += 1;

        total_severity += post.severity;
    }

    let times: Vec<TimeBucket> = buckets
        .into_iter()
        .map(|(hour, (sum, count))| TimeBucket {
            time: hour * HOUR_MS,
            avg_severity: round2(sum / f64::from(count)),
        })
        .collect();

    let score = if posts.is_empty() {
        0
    } else {
        let mean = total_severity / posts.len() as f64;
        (mean * 25.0).round().clamp(0.0, 100.0) as u32
    };

    AnalysisResult {
        posts,
        score,
        times,
        sentiment_counts,
        keyword_freq,
    }
}
