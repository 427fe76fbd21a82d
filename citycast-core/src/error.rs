use thiserror::Error;

/// Why a lookup ended in the error state.
///
/// The `Display` output is the exact text shown to the user. Technical
/// detail (transport errors, response bodies) is logged where the error is
/// mapped and never ends up in the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Please enter a city name.")]
    EmptyQuery,

    #[error("Missing API key. Set the OPENWEATHER_API_KEY environment variable.")]
    MissingCredential,

    #[error("No internet connection or API is unreachable.")]
    NetworkUnreachable,

    #[error("City not found. Try another name.")]
    CityNotFound,

    #[error("Invalid API key. Check your OpenWeatherMap key.")]
    InvalidCredential,

    #[error("Something went wrong. Try again later.")]
    UpstreamError,

    #[error("Weather data not available.")]
    IncompleteData,

    #[error("Unknown error occurred.")]
    UnknownError,

    /// Any failure of the automatic lookup made on activation.
    #[error("Failed to load default city weather.")]
    DefaultCityLoadFailed,
}
