//! Lookup state machine.
//!
//! A lookup runs in three steps so a shell can render between them:
//! [`WeatherController::begin`] validates the query and moves to `Loading`,
//! [`WeatherController::fetch`] performs the request, and
//! [`WeatherController::complete`] applies the outcome. Every dispatched
//! lookup gets a sequence number and only the latest one may complete, so a
//! slow response can never overwrite a newer lookup.

use tracing::{debug, info, warn};

use crate::{
    Config,
    config::{API_KEY_ENV, ApiKey},
    error::FetchError,
    model::{FetchStatus, LookupState, WeatherSnapshot},
    normalize::normalize,
    provider::{WeatherProvider, provider_from_config},
    theme::Theme,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    User,
    DefaultCity,
}

/// Handle for one dispatched lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    seq: u64,
    city: String,
    api_key: ApiKey,
    origin: Origin,
}

impl RequestTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Trimmed city name sent to the provider.
    pub fn city(&self) -> &str {
        &self.city
    }
}

/// Owns the query and the lookup state; the only writer of either.
#[derive(Debug)]
pub struct WeatherController {
    provider: Box<dyn WeatherProvider>,
    api_key: Option<ApiKey>,
    default_city: String,
    query: String,
    state: LookupState,
    latest_seq: u64,
}

impl WeatherController {
    pub fn new(
        provider: Box<dyn WeatherProvider>,
        api_key: Option<ApiKey>,
        default_city: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            api_key,
            default_city: default_city.into(),
            query: String::new(),
            state: LookupState::Idle,
            latest_seq: 0,
        }
    }

    /// Controller wired from the config file and the process environment.
    pub fn from_config(config: &Config) -> Self {
        Self::from_config_with_env(config, std::env::var(API_KEY_ENV).ok())
    }

    /// Like [`WeatherController::from_config`], with the value of
    /// `OPENWEATHER_API_KEY` supplied by the caller.
    pub fn from_config_with_env(config: &Config, env_api_key: Option<String>) -> Self {
        Self::new(
            provider_from_config(config),
            config.resolve_api_key(env_api_key),
            config.default_city(),
        )
    }

    pub fn state(&self) -> &LookupState {
        &self.state
    }

    pub fn status(&self) -> FetchStatus {
        self.state.status()
    }

    pub fn theme(&self) -> Theme {
        Theme::for_snapshot(self.state.snapshot())
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn default_city(&self) -> &str {
        &self.default_city
    }

    /// Validate `raw_city` and, if accepted, enter `Loading`.
    ///
    /// Rejections put the controller in the error state and are returned so
    /// the caller knows not to fetch.
    pub fn begin(&mut self, raw_city: &str) -> Result<RequestTicket, FetchError> {
        self.dispatch(raw_city, Origin::User)
    }

    /// Start the automatic lookup of the default city.
    ///
    /// Any failure other than a missing credential is reported as
    /// [`FetchError::DefaultCityLoadFailed`].
    pub fn begin_default(&mut self) -> Result<RequestTicket, FetchError> {
        let city = self.default_city.clone();
        self.query = city.clone();

        match self.dispatch(&city, Origin::DefaultCity) {
            Err(FetchError::MissingCredential) => Err(FetchError::MissingCredential),
            Err(err) => {
                warn!(reason = ?err, city = %city, "Default city lookup rejected");
                Err(self.fail(FetchError::DefaultCityLoadFailed))
            }
            ok => ok,
        }
    }

    /// Request and normalize the weather for a dispatched lookup.
    ///
    /// Does not touch controller state, so several may be in flight.
    pub async fn fetch(&self, ticket: &RequestTicket) -> Result<WeatherSnapshot, FetchError> {
        let payload = self
            .provider
            .current_by_city(&ticket.city, &ticket.api_key)
            .await?;
        normalize(&payload)
    }

    /// Apply a lookup outcome. Returns `false` if a newer lookup has been
    /// dispatched since, in which case the outcome is dropped.
    pub fn complete(
        &mut self,
        ticket: &RequestTicket,
        outcome: Result<WeatherSnapshot, FetchError>,
    ) -> bool {
        if ticket.seq != self.latest_seq {
            debug!(
                seq = ticket.seq,
                latest = self.latest_seq,
                city = %ticket.city,
                "Dropping stale lookup result"
            );
            return false;
        }

        let outcome = match ticket.origin {
            Origin::User => outcome,
            Origin::DefaultCity => outcome.map_err(|err| {
                warn!(reason = ?err, city = %ticket.city, "Default city lookup failed");
                FetchError::DefaultCityLoadFailed
            }),
        };

        match outcome {
            Ok(snapshot) => {
                info!(seq = ticket.seq, city = %snapshot.city, "Lookup succeeded");
                self.state = LookupState::Success(snapshot);
            }
            Err(err) => {
                self.fail(err);
            }
        }
        true
    }

    /// Validate, fetch and apply a user query in one step.
    pub async fn submit_query(&mut self, raw_city: &str) -> &LookupState {
        if let Ok(ticket) = self.begin(raw_city) {
            let outcome = self.fetch(&ticket).await;
            self.complete(&ticket, outcome);
        }
        &self.state
    }

    /// First activation: look up the default city.
    pub async fn activate(&mut self) -> &LookupState {
        if let Ok(ticket) = self.begin_default() {
            let outcome = self.fetch(&ticket).await;
            self.complete(&ticket, outcome);
        }
        &self.state
    }

    fn dispatch(&mut self, raw_city: &str, origin: Origin) -> Result<RequestTicket, FetchError> {
        let city = raw_city.trim();
        if city.is_empty() {
            return Err(self.fail(FetchError::EmptyQuery));
        }

        let Some(api_key) = self.api_key.clone() else {
            return Err(self.fail(FetchError::MissingCredential));
        };

        self.latest_seq += 1;
        self.state = LookupState::Loading;
        debug!(seq = self.latest_seq, city = %city, "Lookup dispatched");

        Ok(RequestTicket {
            seq: self.latest_seq,
            city: city.to_string(),
            api_key,
            origin,
        })
    }

    fn fail(&mut self, err: FetchError) -> FetchError {
        info!(error = %err, "Lookup failed");
        self.state = LookupState::Error(err.clone());
        err
    }
}
