// Disaster keyword detection — substring scan over the weighted lexicon.

use crate::lexicon::Lexicon;

/// Scan a text for disaster keywords.
///
/// Returns the matched (keyword, weight) pairs in lexicon order. The
/// weight is a fixed per-keyword value — a post that says "flood" three
/// times contributes the flood weight once. Substring matching means
/// "wildfire" also matches "fire"; both end up in the result.
pub fn detect_keywords<'a>(text: &str, lexicon: &'a Lexicon) -> Vec<(&'a str, f64)> {
    let lowered = text.to_lowercase();
    lexicon
        .disaster_weights
        .iter()
        .filter(|(keyword, _)| lowered.contains(keyword.as_str()))
        .map(|(keyword, weight)| (keyword.as_str(), *weight))
        .collect()
}
