// Per-post scoring: severity, disaster type, confidence, timestamp.
//
// This pass is total: a malformed post degrades to safe defaults (empty
// text, null coordinates, current-time timestamp) rather than surfacing
// an error. One bad post must never fail the batch.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::lexicon::Lexicon;

use super::keywords::detect_keywords;
use super::round2;
use super::sentiment::sentiment_score;
use super::SeverityWeights;

/// A raw post as supplied by the caller. Every field is optional in the
/// wire format; missing text becomes the empty string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPost {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub timestamp: Option<RawTimestamp>,
}

/// A timestamp as it arrives from upstream: either epoch milliseconds
/// (integer or float) or an ISO-8601 string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    Millis(f64),
    Iso(String),
}

/// A post after the scoring pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredPost {
    pub text: String,
    /// Coordinates pass through unchanged — the core does no geocoding.
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    /// Normalized to epoch milliseconds.
    pub timestamp: i64,
    /// Non-negative heuristic risk magnitude, two decimals.
    pub severity: f64,
    /// Dominant matched keyword, or "Unknown".
    pub disaster_type: String,
    /// Certainty estimate in [0.40, 0.99], two decimals.
    pub confidence: f64,
}

/// Score a single raw post.
pub fn score_post(post: &RawPost, lexicon: &Lexicon, weights: &SeverityWeights) -> ScoredPost {
    let s = sentiment_score(&post.text, lexicon);
    let keys = detect_keywords(&post.text, lexicon);

    let mut severity: f64 = keys.iter().map(|&(_, w)| w).sum();
    if s < weights.negative_threshold {
        severity += weights.negative_boost;
    } else if s > weights.positive_threshold {
        severity = (severity - weights.positive_damp).max(0.0);
    }
    let severity = round2(severity.max(0.0));

    // Highest weight wins; on a tie the earlier lexicon entry does.
    let disaster_type = keys
        .iter()
        .copied()
        .reduce(|best, candidate| if candidate.1 > best.1 { candidate } else { best })
        .map(|(keyword, _)| keyword.to_string())
        .unwrap_or_else(|| "Unknown".to_string());

    let confidence = round2(
        (weights.confidence_floor + (severity / weights.confidence_span).min(1.0))
            .min(weights.confidence_cap),
    );

    ScoredPost {
        text: post.text.clone(),
        lat: post.lat,
        lon: post.lon,
        timestamp: normalize_timestamp(post.timestamp.as_ref()),
        severity,
        disaster_type,
        confidence,
    }
}

/// Normalize a raw timestamp to epoch milliseconds.
///
/// Numbers are taken as milliseconds directly. Strings are parsed as
/// ISO-8601 (RFC 3339 first, then offset-less forms read as UTC). Absent
/// or unparseable values substitute the current wall clock, never an
/// error to the caller.
fn normalize_timestamp(ts: Option<&RawTimestamp>) -> i64 {
    match ts {
        Some(RawTimestamp::Millis(ms)) => *ms as i64,
        Some(RawTimestamp::Iso(s)) => {
            parse_iso_millis(s).unwrap_or_else(|| Utc::now().timestamp_millis())
        }
        None => Utc::now().timestamp_millis(),
    }
}

fn parse_iso_millis(s: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc().timestamp_millis());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp_millis())
}
