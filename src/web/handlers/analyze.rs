// POST /api/analyze, the single analysis endpoint.
//
// Direct mode: score the posts in the request body as-is.
// Live mode (real = true): assemble a fresh batch from the feed API (or
// the stream spool when no token is configured), geolocate it, then
// score. The analysis itself cannot fail; everything that can is pinned
// to the assembly step and reported as a JSON error.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use futures::stream::{self, StreamExt};
use serde::Deserialize;
use tracing::{error, warn};

use crate::geo::{random_latlon, Region};
use crate::ingest::feed::{FeedClient, FeedPost};
use crate::ingest::spool;
use crate::model::post::{RawPost, RawTimestamp};
use crate::web::{api_error, AppState};

/// How many geocoding lookups to run concurrently in live mode.
const GEOCODE_CONCURRENCY: usize = 4;

#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRequest {
    /// Posts to score directly (ignored in live mode).
    #[serde(default)]
    pub posts: Vec<RawPost>,
    /// Search keyword for live mode.
    #[serde(default = "default_keyword")]
    pub keyword: String,
    /// Region profile for the coordinate fallback.
    #[serde(default = "default_region")]
    pub region: String,
    /// When true, pull a fresh batch instead of scoring `posts`.
    #[serde(default)]
    pub real: bool,
}

fn default_keyword() -> String {
    "#flood".to_string()
}

fn default_region() -> String {
    "any".to_string()
}

/// POST /api/analyze — score a batch and return the dashboard summary.
pub async fn analyze(State(state): State<AppState>, Json(req): Json<AnalyzeRequest>) -> Response {
    let region = Region::parse(&req.region);

    let posts = if req.real {
        match assemble_live_batch(&state, &req.keyword, region).await {
            Ok(posts) if posts.is_empty() => {
                return api_error(StatusCode::NOT_FOUND, "no live data found");
            }
            Ok(posts) => posts,
            Err(e) => {
                error!(error = %e, "Live data assembly failed");
                return api_error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string());
            }
        }
    } else {
        req.posts
    };

    let result = state.analyzer.analyze(&posts);

    // The dashboard wants the sentiment counts flattened to the top level.
    Json(serde_json::json!({
        "posts": result.posts,
        "score": result.score,
        "neg": result.sentiment_counts.neg,
        "neu": result.sentiment_counts.neu,
        "pos": result.sentiment_counts.pos,
        "keywordFreq": result.keyword_freq,
        "times": result.times,
    }))
    .into_response()
}

/// Pull a live batch: the feed API when a bearer token is configured,
/// the stream spool otherwise (or when the search comes back empty).
/// Every post gets coordinates and a current timestamp.
async fn assemble_live_batch(
    state: &AppState,
    keyword: &str,
    region: Region,
) -> anyhow::Result<Vec<RawPost>> {
    if state.config.has_bearer() {
        let client = FeedClient::new(&state.config.feed_api_url, &state.config.bearer_token)?;
        let fetched = client.search_recent(keyword).await?;
        if !fetched.is_empty() {
            return Ok(locate_posts(state, fetched, region).await);
        }
        warn!(keyword = keyword, "Feed search returned nothing, trying the spool");
    }

    // Spool fallback. A missing or unreadable file is "no live data",
    // not a server error.
    let entries = match spool::read_spool(&state.config.spool_path) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(error = %e, "Spool unavailable");
            Vec::new()
        }
    };

    let now = Utc::now().timestamp_millis();
    Ok(entries
        .into_iter()
        .map(|entry| {
            let (lat, lon) = random_latlon(region);
            RawPost {
                text: entry.text,
                lat: Some(lat),
                lon: Some(lon),
                timestamp: Some(RawTimestamp::Millis(now as f64)),
            }
        })
        .collect())
}

/// Geocode each fetched post's best location hint, falling back to the
/// regional box. Lookups run concurrently; results keep input order.
async fn locate_posts(state: &AppState, fetched: Vec<FeedPost>, region: Region) -> Vec<RawPost> {
    let now = Utc::now().timestamp_millis();

    stream::iter(fetched.into_iter().map(|post| {
        let geocoder = state.geocoder.clone();
        async move {
            let hint = post.place_name.as_deref().or(post.author_location.as_deref());
            let located = match hint {
                Some(place) => geocoder.locate(place).await,
                None => None,
            };
            let (lat, lon) = located.unwrap_or_else(|| random_latlon(region));
            RawPost {
                text: post.text,
                lat: Some(lat),
                lon: Some(lon),
                timestamp: Some(RawTimestamp::Millis(now as f64)),
            }
        }
    }))
    .buffered(GEOCODE_CONCURRENCY)
    .collect()
    .await
}
