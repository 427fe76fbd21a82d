//! Core library for the `citycast` weather widget.
//!
//! This crate defines:
//! - The lookup controller and its status model
//! - Normalization of the OpenWeatherMap payload into a display record
//! - Theme classification of weather conditions
//! - Configuration & credential handling
//!
//! It is used by `citycast-cli`, but any other shell can drive the same
//! controller.

pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod normalize;
pub mod provider;
pub mod theme;

pub use config::{API_KEY_ENV, ApiKey, Config, DEFAULT_CITY};
pub use controller::{RequestTicket, WeatherController};
pub use error::FetchError;
pub use model::{CurrentWeatherPayload, FetchStatus, LookupState, WeatherSnapshot};
pub use normalize::{capitalize, normalize, round_to_int};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
pub use theme::Theme;
