use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument, warn};

use crate::{config::ApiKey, error::FetchError, model::CurrentWeatherPayload};

use super::WeatherProvider;

/// OpenWeatherMap "current weather by city name" client.
///
/// No timeout is configured: a hung request keeps the lookup loading.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    fn current_url(&self) -> String {
        format!("{}/weather", self.base_url)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self, api_key))]
    async fn current_by_city(
        &self,
        city: &str,
        api_key: &ApiKey,
    ) -> Result<CurrentWeatherPayload, FetchError> {
        let url = self.current_url();
        debug!(url = %url, "Fetching current weather");

        let res = self
            .http
            .get(&url)
            .query(&[("q", city), ("appid", api_key.as_str()), ("units", "metric")])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "OpenWeather request did not complete");
                FetchError::NetworkUnreachable
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            warn!(error = %e, "Failed to read OpenWeather response body");
            FetchError::UnknownError
        })?;

        if let Some(err) = status_error(status) {
            warn!(%status, body = %truncate_body(&body), "OpenWeather request failed");
            return Err(err);
        }

        serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, body = %truncate_body(&body), "Failed to parse OpenWeather JSON");
            FetchError::UnknownError
        })
    }
}

/// Error for a non-success status, `None` for 2xx.
fn status_error(status: StatusCode) -> Option<FetchError> {
    if status.is_success() {
        None
    } else if status == StatusCode::NOT_FOUND {
        Some(FetchError::CityNotFound)
    } else if status == StatusCode::UNAUTHORIZED {
        Some(FetchError::InvalidCredential)
    } else {
        Some(FetchError::UpstreamError)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
