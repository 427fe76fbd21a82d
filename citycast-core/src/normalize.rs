//! Mapping from the provider payload to a [`WeatherSnapshot`].

use crate::{
    error::FetchError,
    model::{CurrentWeatherPayload, WeatherSnapshot},
};

/// Icon CDN template; `{icon}` is the provider's icon code.
pub const ICON_URL_TEMPLATE: &str = "https://openweathermap.org/img/wn/{icon}@2x.png";

/// Build the display record from a successful response.
///
/// Only the first entry of `weather` is used. An empty list is reported as
/// [`FetchError::IncompleteData`].
pub fn normalize(payload: &CurrentWeatherPayload) -> Result<WeatherSnapshot, FetchError> {
    let primary = payload.weather.first().ok_or(FetchError::IncompleteData)?;

    Ok(WeatherSnapshot {
        city: payload.name.clone(),
        country: payload.sys.country.clone(),
        temperature: round_to_int(payload.main.temp),
        feels_like: round_to_int(payload.main.feels_like),
        humidity: payload.main.humidity,
        wind_speed: round_to_int(payload.wind.speed),
        description: capitalize(&primary.description),
        icon_url: icon_url(&primary.icon),
        condition: primary.main.clone(),
    })
}

/// Nearest integer, halves rounded away from zero.
pub fn round_to_int(value: f64) -> i32 {
    value.round() as i32
}

/// Uppercase the first character and leave the rest untouched.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn icon_url(icon: &str) -> String {
    ICON_URL_TEMPLATE.replace("{icon}", icon)
}
