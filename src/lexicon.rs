// Static lexicon tables — disaster keyword weights and sentiment cues.
//
// The keyword table is an ordered list, not a map: picking the dominant
// keyword for a post breaks weight ties by taking the first match, so the
// iteration order has to be stable.

/// Disaster keywords with their severity weights, in tie-break order.
const DISASTER_WEIGHTS: &[(&str, f64)] = &[
    ("flood", 2.0),
    ("cyclone", 2.0),
    ("earthquake", 3.0),
    ("wildfire", 2.0),
    ("landslide", 2.0),
    ("drought", 1.5),
    ("collapse", 3.0),
    ("fire", 1.8),
    ("storm", 1.5),
];

// Cues are matched as substrings, so stems like "evacu" and "injur" cover
// the whole word family ("evacuate", "evacuation", "injured", ...).
const NEGATIVE_CUES: &[&str] = &[
    "flood",
    "storm",
    "collapsed",
    "collapse",
    "evacu",
    "injur",
    "death",
    "dead",
    "missing",
    "drought",
    "fire",
    "wildfire",
    "landslide",
    "outage",
    "smoke",
    "bridge collapse",
    "destroyed",
];

const POSITIVE_CUES: &[&str] = &[
    "safe",
    "relief",
    "arriv",
    "under control",
    "cleared",
    "help",
    "volunteer",
    "minor",
];

/// Read-only lexicon injected into the scorers.
///
/// Built once at startup and never mutated afterwards. The default
/// instance carries the built-in tables above; tests can construct
/// smaller ones directly.
#[derive(Debug, Clone)]
pub struct Lexicon {
    /// (keyword, weight) pairs in tie-break order.
    pub disaster_weights: Vec<(String, f64)>,
    /// Substring cues that pull sentiment negative.
    pub negative: Vec<String>,
    /// Substring cues that pull sentiment positive.
    pub positive: Vec<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            disaster_weights: DISASTER_WEIGHTS
                .iter()
                .map(|&(k, w)| (k.to_string(), w))
                .collect(),
            negative: NEGATIVE_CUES.iter().map(|&c| c.to_string()).collect(),
            positive: POSITIVE_CUES.iter().map(|&c| c.to_string()).collect(),
        }
    }
}

impl Lexicon {
    /// Look up the weight of a keyword, if it is in the table.
    pub fn weight_of(&self, keyword: &str) -> Option<f64> {
        self.disaster_weights
            .iter()
            .find(|(k, _)| k == keyword)
            .map(|&(_, w)| w)
    }
}
