//! Text rendering of the lookup state.

use citycast_core::{LookupState, Theme, WeatherSnapshot};

pub const IDLE_PROMPT: &str = "Search for a city to see the current weather.";
pub const LOADING_LINE: &str = "⏳ Loading weather...";

/// Render exactly one region for the current state, followed by the theme.
pub fn render(state: &LookupState) -> String {
    let body = match state {
        LookupState::Idle => IDLE_PROMPT.to_string(),
        LookupState::Loading => LOADING_LINE.to_string(),
        LookupState::Error(err) => format!("⚠ {err}"),
        LookupState::Success(snapshot) => card(snapshot),
    };

    let theme = Theme::for_snapshot(state.snapshot());
    format!("{body}\n[{theme}]")
}

fn card(s: &WeatherSnapshot) -> String {
    let tiles = [
        ("Feels like", format!("{}°C", s.feels_like)),
        ("Humidity", format!("{}%", s.humidity)),
        ("Wind", format!("{} m/s", s.wind_speed)),
    ]
    .iter()
    .map(|(label, value)| format!("{label}: {value}"))
    .collect::<Vec<_>>()
    .join(" | ");

    format!(
        "{city}, {country}\n{icon}\n{temp}°C  {description}\n{tiles}",
        city = s.city,
        country = s.country,
        icon = s.icon_url,
        temp = s.temperature,
        description = s.description,
    )
}
