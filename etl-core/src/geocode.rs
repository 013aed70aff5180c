//! Forward geocoding: convert place names to coordinates.
//! Uses Nominatim (OpenStreetMap) - free, no API key required.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::model::Coordinate;
use crate::provider::truncate_body;

const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = "weather-etl/0.1.0";

/// The geocoding collaborator. `Ok(None)` means the service answered but
/// found no match; `Err` is a transport or availability failure.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, name: &str) -> Result<Option<Coordinate>>;
}

#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    http: Client,
    base_url: String,
}

// Nominatim serializes lat/lon as strings.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

impl NominatimGeocoder {
    pub fn new() -> Result<Self> {
        Self::with_base_url(NOMINATIM_URL)
    }

    /// Point the client at a different base URL (tests use this).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to create geocoding HTTP client")?;

        Ok(Self { http, base_url: base_url.into() })
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, name: &str) -> Result<Option<Coordinate>> {
        let url = format!("{}/search", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[("q", name), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .context("Failed to send request to Nominatim")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read Nominatim response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Nominatim search failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let places: Vec<NominatimPlace> =
            serde_json::from_str(&body).context("Failed to parse Nominatim JSON")?;

        let Some(place) = places.into_iter().next() else {
            tracing::debug!(name, "geocoder found no match");
            return Ok(None);
        };

        let latitude: f64 = place
            .lat
            .parse()
            .with_context(|| format!("Nominatim returned non-numeric latitude '{}'", place.lat))?;
        let longitude: f64 = place
            .lon
            .parse()
            .with_context(|| format!("Nominatim returned non-numeric longitude '{}'", place.lon))?;

        Ok(Some(Coordinate::new(latitude, longitude)))
    }
}
