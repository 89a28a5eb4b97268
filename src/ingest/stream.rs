// Filtered-stream listener: keeps the spool file fed.
//
// Rule lifecycle mirrors the upstream API: clear whatever rules a
// previous run left behind, install a single keyword rule, then hold the
// stream open and append each received post to the spool.

use std::path::Path;

use anyhow::{Context, Result};
use futures::StreamExt;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::output::truncate_chars;

use super::spool::{append_entry, SpoolEntry};

pub struct StreamListener {
    client: reqwest::Client,
    base_url: String,
    bearer_token: String,
}

impl StreamListener {
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

    /// Replace all active stream rules with a single keyword rule.
    pub async fn reset_rules(&self, keyword: &str) -> Result<()> {
        let url = format!("{}/2/tweets/search/stream/rules", self.base_url);

        let existing: RulesResponse = self
            .client
            .get(&url)
            .bearer_auth(&self.bearer_token)
            .send()
            .await
            .context("Failed to fetch stream rules")?
            .json()
            .await
            .context("Failed to parse stream rules")?;

        let ids: Vec<String> = existing
            .data
            .unwrap_or_default()
            .into_iter()
            .map(|rule| rule.id)
            .collect();

        if !ids.is_empty() {
            let count = ids.len();
            let response = self
                .client
                .post(&url)
                .bearer_auth(&self.bearer_token)
                .json(&json!({ "delete": { "ids": ids } }))
                .send()
                .await
                .context("Failed to delete stream rules")?;
            if !response.status().is_success() {
                anyhow::bail!("Rule delete returned {}", response.status());
            }
            info!(count = count, "Cleared old stream rules");
        }

        let value = format!("{keyword} -is:retweet lang:en");
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.bearer_token)
            .json(&json!({ "add": [{ "value": value }] }))
            .send()
            .await
            .context("Failed to add stream rule")?;
        if !response.status().is_success() {
            anyhow::bail!("Rule add returned {}", response.status());
        }

        info!(rule = %value, "Installed stream rule");
        Ok(())
    }

    /// Hold the filtered stream open, appending each received post to the
    /// spool. Returns when the stream ends. A 429 aborts immediately;
    /// reconnecting while rate limited only makes it worse.
    pub async fn listen(&self, spool_path: &Path) -> Result<()> {
        let url = format!("{}/2/tweets/search/stream", self.base_url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.bearer_token)
            .send()
            .await
            .context("Failed to open filtered stream")?;

        if response.status().as_u16() == 429 {
            anyhow::bail!("Stream connection rate limited (429) — try again later");
        }
        if !response.status().is_success() {
            anyhow::bail!("Stream connect returned {}", response.status());
        }

        info!(path = %spool_path.display(), "Listening for posts");

        // The body is newline-delimited JSON with blank keep-alive lines.
        // Chunks don't align with lines, so buffer and split manually.
        let mut buffer: Vec<u8> = Vec::new();
        let mut body = response.bytes_stream();

        while let Some(chunk) = body.next().await {
            let chunk = chunk.context("Stream read failed")?;
            buffer.extend_from_slice(&chunk);

            while let Some(newline) = buffer.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = buffer.drain(..=newline).collect();
                let line = String::from_utf8_lossy(&line);
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                match serde_json::from_str::<StreamItem>(line) {
                    Ok(item) => {
                        info!(preview = %truncate_chars(&item.data.text, 50), "Received post");
                        append_entry(spool_path, &SpoolEntry { text: item.data.text })?;
                    }
                    Err(e) => warn!(error = %e, "Skipping undecodable stream item"),
                }
            }
        }

        info!("Stream ended");
        Ok(())
    }
}

// -- Serde types for the stream payload --

#[derive(Deserialize)]
struct RulesResponse {
    data: Option<Vec<StreamRule>>,
}

#[derive(Deserialize)]
struct StreamRule {
    id: String,
}

#[derive(Deserialize)]
struct StreamItem {
    data: StreamPost,
}

#[derive(Deserialize)]
struct StreamPost {
    text: String,
}
