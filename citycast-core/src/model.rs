use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// Display-ready weather for the most recent successful lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city: String,
    pub country: String,
    /// Degrees Celsius.
    pub temperature: i32,
    pub feels_like: i32,
    /// Percent.
    pub humidity: u8,
    /// Metres per second.
    pub wind_speed: i32,
    pub description: String,
    pub icon_url: String,
    /// Coarse category such as "Clear" or "Rain"; only used for theming.
    pub condition: String,
}

/// Lifecycle phase of the lookup, as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchStatus {
    Idle,
    Loading,
    Success,
    Error,
}

impl FetchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchStatus::Idle => "idle",
            FetchStatus::Loading => "loading",
            FetchStatus::Success => "success",
            FetchStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the shell may display, owned by the controller.
///
/// A snapshot only exists in `Success` and an error only in `Error`, so the
/// shell can never see stale data next to an error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LookupState {
    #[default]
    Idle,
    Loading,
    Success(WeatherSnapshot),
    Error(FetchError),
}

impl LookupState {
    pub fn status(&self) -> FetchStatus {
        match self {
            LookupState::Idle => FetchStatus::Idle,
            LookupState::Loading => FetchStatus::Loading,
            LookupState::Success(_) => FetchStatus::Success,
            LookupState::Error(_) => FetchStatus::Error,
        }
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        match self {
            LookupState::Success(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            LookupState::Error(err) => Some(err),
            _ => None,
        }
    }

    /// User-facing error text, present only in the error state.
    pub fn error_message(&self) -> Option<String> {
        self.error().map(ToString::to_string)
    }
}

// OpenWeatherMap "current weather" body. Only the fields we display are
// modelled; anything missing fails deserialization.

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CurrentWeatherPayload {
    pub name: String,
    pub sys: PayloadSys,
    pub main: PayloadMain,
    pub weather: Vec<PayloadCondition>,
    pub wind: PayloadWind,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PayloadSys {
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PayloadMain {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PayloadCondition {
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PayloadWind {
    pub speed: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            city: "Kyiv".into(),
            country: "UA".into(),
            temperature: 20,
            feels_like: 20,
            humidity: 55,
            wind_speed: 3,
            description: "Clear sky".into(),
            icon_url: "https://openweathermap.org/img/wn/01d@2x.png".into(),
            condition: "Clear".into(),
        }
    }

    #[test]
    fn default_state_is_idle() {
        let state = LookupState::default();
        assert_eq!(state.status(), FetchStatus::Idle);
        assert!(state.snapshot().is_none());
        assert!(state.error_message().is_none());
    }

    #[test]
    fn snapshot_only_in_success() {
        let state = LookupState::Success(snapshot());
        assert_eq!(state.status(), FetchStatus::Success);
        assert_eq!(state.snapshot().map(|s| s.city.as_str()), Some("Kyiv"));
        assert!(state.error().is_none());

        for other in [
            LookupState::Idle,
            LookupState::Loading,
            LookupState::Error(FetchError::UnknownError),
        ] {
            assert!(other.snapshot().is_none(), "{:?} exposed a snapshot", other.status());
        }
    }

    #[test]
    fn error_message_only_in_error() {
        let state = LookupState::Error(FetchError::IncompleteData);
        assert_eq!(state.status(), FetchStatus::Error);
        assert_eq!(state.error_message().as_deref(), Some("Weather data not available."));

        assert!(LookupState::Loading.error_message().is_none());
        assert!(LookupState::Success(snapshot()).error_message().is_none());
    }

    #[test]
    fn payload_deserializes_provider_schema() {
        let body = r#"{
            "coord": {"lon": 30.52, "lat": 50.43},
            "name": "Kyiv",
            "sys": {"country": "UA", "sunrise": 1700000000},
            "main": {"temp": 20.4, "feels_like": 19.6, "humidity": 55, "pressure": 1012},
            "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
            "wind": {"speed": 3.2, "deg": 180}
        }"#;

        let payload: CurrentWeatherPayload = serde_json::from_str(body).expect("valid payload");
        assert_eq!(payload.name, "Kyiv");
        assert_eq!(payload.sys.country, "UA");
        assert_eq!(payload.main.humidity, 55);
        assert_eq!(payload.weather.len(), 1);
        assert_eq!(payload.weather[0].icon, "01d");
    }

    #[test]
    fn payload_missing_section_is_rejected() {
        let body = r#"{"name": "Kyiv", "weather": [], "wind": {"speed": 1.0}}"#;
        assert!(serde_json::from_str::<CurrentWeatherPayload>(body).is_err());
    }
}
