use crate::model::WeatherSnapshot;

/// Background theme derived from the condition label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    Clear,
    Clouds,
    Rain,
    Thunder,
    Snow,
    Fog,
    #[default]
    Default,
}

// Checked in order; the first rule with a matching keyword wins.
const RULES: &[(&[&str], Theme)] = &[
    (&["clear"], Theme::Clear),
    (&["cloud"], Theme::Clouds),
    (&["rain", "drizzle"], Theme::Rain),
    (&["thunder"], Theme::Thunder),
    (&["snow"], Theme::Snow),
    (&["mist", "fog", "haze"], Theme::Fog),
];

impl Theme {
    /// Classify a condition label such as "Rain" or "Thunderstorm".
    pub fn classify(condition: &str) -> Self {
        let lower = condition.to_lowercase();

        RULES
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
            .map(|(_, theme)| *theme)
            .unwrap_or_default()
    }

    pub fn for_snapshot(snapshot: Option<&WeatherSnapshot>) -> Self {
        snapshot
            .map(|s| Self::classify(&s.condition))
            .unwrap_or_default()
    }

    /// Page background class.
    pub fn class_name(&self) -> &'static str {
        match self {
            Theme::Clear => "theme-clear",
            Theme::Clouds => "theme-clouds",
            Theme::Rain => "theme-rain",
            Theme::Thunder => "theme-thunder",
            Theme::Snow => "theme-snow",
            Theme::Fog => "theme-fog",
            Theme::Default => "theme-default",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.class_name())
    }
}
