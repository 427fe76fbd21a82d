use crate::{
    Config, config::ApiKey, error::FetchError, model::CurrentWeatherPayload,
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of current conditions for a city.
///
/// Implementations map transport and HTTP failures onto [`FetchError`];
/// normalization happens in the controller.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_by_city(
        &self,
        city: &str,
        api_key: &ApiKey,
    ) -> Result<CurrentWeatherPayload, FetchError>;
}

/// Construct the provider described by the config.
pub fn provider_from_config(config: &Config) -> Box<dyn WeatherProvider> {
    Box::new(OpenWeatherProvider::new(config.base_url()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_uses_configured_base_url() {
        let cfg = Config {
            base_url: Some("http://localhost:9999/".into()),
            ..Default::default()
        };

        let provider = provider_from_config(&cfg);
        assert!(format!("{provider:?}").contains("http://localhost:9999"));
    }

    #[test]
    fn blank_base_url_uses_public_api() {
        let cfg = Config {
            base_url: Some("   ".into()),
            ..Default::default()
        };

        let provider = provider_from_config(&cfg);
        assert!(format!("{provider:?}").contains(crate::config::DEFAULT_BASE_URL));
    }
}
