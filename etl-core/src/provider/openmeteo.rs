use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{WeatherProvider, truncate_body};
use crate::model::{Coordinate, CurrentField, RawSnapshot};

const OPEN_METEO_URL: &str = "https://api.open-meteo.com";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Open-Meteo current-conditions client. No API key required.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    http: Client,
    base_url: String,
}

impl OpenMeteoProvider {
    pub fn new() -> Result<Self> {
        Self::with_base_url(OPEN_METEO_URL)
    }

    /// Point the client at a different base URL (tests use this).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to create Open-Meteo HTTP client")?;

        Ok(Self { http, base_url: base_url.into() })
    }
}

/// The `current` object carries one named entry per requested field, plus
/// bookkeeping keys like `time` and `interval` that we ignore.
#[derive(Debug, Deserialize)]
struct OmResponse {
    current: HashMap<String, serde_json::Value>,
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn current_conditions(
        &self,
        coord: Coordinate,
        fields: &[CurrentField],
    ) -> Result<RawSnapshot> {
        let url = format!("{}/v1/forecast", self.base_url);
        let field_list = fields
            .iter()
            .map(|f| f.api_name())
            .collect::<Vec<_>>()
            .join(",");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("latitude", coord.latitude.to_string()),
                ("longitude", coord.longitude.to_string()),
                ("current", field_list),
            ])
            .send()
            .await
            .context("Failed to send request to Open-Meteo")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read Open-Meteo response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Open-Meteo request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: OmResponse =
            serde_json::from_str(&body).context("Failed to parse Open-Meteo JSON")?;

        // Bind by field name, never by position in the response.
        let mut values = HashMap::with_capacity(fields.len());
        for &field in fields {
            match parsed.current.get(field.api_name()) {
                None => continue, // absent field surfaces at normalization
                Some(serde_json::Value::Null) => {
                    values.insert(field, None);
                }
                Some(v) => {
                    let num = v.as_f64().ok_or_else(|| {
                        anyhow!("Open-Meteo returned non-numeric value for '{field}': {v}")
                    })?;
                    values.insert(field, Some(num));
                }
            }
        }

        tracing::debug!(
            latitude = coord.latitude,
            longitude = coord.longitude,
            fields = values.len(),
            "fetched current conditions"
        );

        Ok(RawSnapshot::from_named(values))
    }
}
