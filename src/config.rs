use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Central configuration loaded from environment variables.
///
/// The bearer token is the only secret and comes from the environment
/// (never hardcoded). A .env file is loaded automatically at startup via
/// dotenvy.
pub struct Config {
    /// Bearer token for the feed API and the filtered stream. Empty when
    /// unset — direct and spool-based analysis work without it.
    pub bearer_token: String,
    /// Feed API endpoint (override for tests).
    pub feed_api_url: String,
    /// Nominatim endpoint (override for tests or a self-hosted instance).
    pub nominatim_url: String,
    /// Spool file written by the stream listener.
    pub spool_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables. Everything has a
    /// default except the bearer token, which stays empty until set.
    pub fn load() -> Result<Self> {
        Ok(Self {
            bearer_token: env::var("BEARER_TOKEN").unwrap_or_default(),
            feed_api_url: env::var("FEED_API_URL")
                .unwrap_or_else(|_| crate::ingest::feed::DEFAULT_FEED_API_URL.to_string()),
            nominatim_url: env::var("NOMINATIM_URL")
                .unwrap_or_else(|_| crate::geo::geocode::DEFAULT_NOMINATIM_URL.to_string()),
            spool_path: env::var("EMBER_SPOOL_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./tweets.ndjson")),
        })
    }

    /// Whether the feed API can be used at all.
    pub fn has_bearer(&self) -> bool {
        !self.bearer_token.is_empty()
    }

    /// Check that the bearer token is configured. Call this before any
    /// operation that talks to the feed API or the filtered stream.
    pub fn require_bearer(&self) -> Result<()> {
        if self.bearer_token.is_empty() {
            anyhow::bail!(
                "BEARER_TOKEN not set. Add it to your .env file.\n\
                 See .env.example for the required variables."
            );
        }
        Ok(())
    }
}
