// Keyword feed client — recent search over the v2 API.
//
// Pulls a small batch of recent posts matching a keyword, with place and
// author expansions so the caller can attempt real geolocation before
// falling back to the regional generator.

use std::collections::HashMap;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

/// Default feed API endpoint.
pub const DEFAULT_FEED_API_URL: &str = "https://api.twitter.com";

/// How many posts to request per search. The dashboard only charts a
/// small recent window.
const SEARCH_LIMIT: u32 = 10;

/// A post fetched from the feed, with whatever location hints came back.
#[derive(Debug, Clone)]
pub struct FeedPost {
    pub text: String,
    /// Full name of the place tagged on the post, if any.
    pub place_name: Option<String>,
    /// The author's self-reported profile location, if any.
    pub author_location: Option<String>,
}

/// Authenticated client for the feed API's recent search endpoint.
pub struct FeedClient {
    client: reqwest::Client,
    base_url: String,
    bearer_token: String,
}

impl FeedClient {
    pub fn new(base_url: &str, bearer_token: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("ember/0.1 (disaster-dashboard)")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            bearer_token: bearer_token.to_string(),
        })
    }

    /// Search recent posts for a keyword. Reposts and non-English posts
    /// are excluded in the query itself.
    pub async fn search_recent(&self, keyword: &str) -> Result<Vec<FeedPost>> {
        let query = format!("{keyword} -is:retweet lang:en");
        let url = format!("{}/2/tweets/search/recent", self.base_url);
        let limit = SEARCH_LIMIT.to_string();

        debug!(query = %query, "Feed search");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.bearer_token)
            .query(&[
                ("query", query.as_str()),
                ("max_results", limit.as_str()),
                ("tweet.fields", "geo"),
                ("expansions", "geo.place_id,author_id"),
                ("user.fields", "location"),
                ("place.fields", "full_name"),
            ])
            .send()
            .await
            .with_context(|| format!("Feed search request failed for {keyword}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Feed search returned {status}: {body}");
        }

        let search: SearchResponse = response
            .json()
            .await
            .context("Failed to deserialize feed search response")?;

        let includes = search.includes.unwrap_or_default();
        let places: HashMap<&str, &str> = includes
            .places
            .iter()
            .map(|p| (p.id.as_str(), p.full_name.as_str()))
            .collect();
        let locations: HashMap<&str, &str> = includes
            .users
            .iter()
            .filter_map(|u| Some((u.id.as_str(), u.location.as_deref()?)))
            .collect();

        let posts: Vec<FeedPost> = search
            .data
            .unwrap_or_default()
            .into_iter()
            .map(|tweet| {
                let place_name = tweet
                    .geo
                    .as_ref()
                    .and_then(|g| g.place_id.as_deref())
                    .and_then(|id| places.get(id))
                    .map(|&name| name.to_string());
                let author_location = tweet
                    .author_id
                    .as_deref()
                    .and_then(|id| locations.get(id))
                    .map(|&loc| loc.to_string());
                FeedPost {
                    text: tweet.text,
                    place_name,
                    author_location,
                }
            })
            .collect();

        info!(count = posts.len(), keyword = keyword, "Fetched recent posts");

        Ok(posts)
    }
}

// -- Serde types for the v2 search payload --

#[derive(Debug, Deserialize)]
struct SearchResponse {
    data: Option<Vec<Tweet>>,
    includes: Option<Includes>,
}

#[derive(Debug, Deserialize)]
struct Tweet {
    text: String,
    author_id: Option<String>,
    geo: Option<TweetGeo>,
}

#[derive(Debug, Deserialize)]
struct TweetGeo {
    place_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Includes {
    #[serde(default)]
    places: Vec<PlaceRef>,
    #[serde(default)]
    users: Vec<UserRef>,
}

#[derive(Debug, Deserialize)]
struct PlaceRef {
    id: String,
    full_name: String,
}

#[derive(Debug, Deserialize)]
struct UserRef {
    id: String,
    location: Option<String>,
}
