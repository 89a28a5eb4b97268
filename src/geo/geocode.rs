// Place-name geocoding via Nominatim.
//
// Lookups that fail for any reason collapse to None: the caller falls
// back to the random regional generator instead of failing the request.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

/// Default Nominatim endpoint.
pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

/// Resolves free-form place names to coordinates. Implementations must be
/// async because real providers are HTTP services.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve a place name to (lat, lon). None when the place is unknown
    /// or the lookup fails, never an error.
    async fn locate(&self, place: &str) -> Option<(f64, f64)>;
}

/// Nominatim-backed geocoder: a thin reqwest wrapper around the public
/// search endpoint.
pub struct NominatimGeocoder {
    client: reqwest::Client,
    base_url: String,
}

impl NominatimGeocoder {
    /// Create a geocoder pointing at the given base URL. Pass a different
    /// URL for testing or a self-hosted instance.
    pub fn new(base_url: &str) -> Result<Self> {
        // Nominatim's usage policy requires an identifying user agent.
        let client = reqwest::Client::builder()
            .user_agent("ember/0.1 (disaster-dashboard)")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn search(&self, place: &str) -> Result<Option<(f64, f64)>> {
        let url = format!("{}/search", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("q", place), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .with_context(|| format!("Geocoding request failed for {place:?}"))?;

        if !response.status().is_success() {
            anyhow::bail!("Nominatim returned {}", response.status());
        }

        let hits: Vec<NominatimPlace> = response
            .json()
            .await
            .context("Failed to parse Nominatim response")?;

        // Nominatim serializes coordinates as strings.
        Ok(hits
            .first()
            .and_then(|hit| Some((hit.lat.parse().ok()?, hit.lon.parse().ok()?))))
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn locate(&self, place: &str) -> Option<(f64, f64)> {
        if place.trim().is_empty() {
            return None;
        }
        match self.search(place).await {
            Ok(Some((lat, lon))) => {
                debug!(place = place, lat = lat, lon = lon, "Geocoded place");
                Some((lat, lon))
            }
            Ok(None) => None,
            Err(e) => {
                warn!(place = place, error = %e, "Geocoding failed, using fallback");
                None
            }
        }
    }
}

#[derive(Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}
