//! HTTP implementation of the environment client.
//!
//! Weather comes from an OpenWeatherMap-shaped endpoint (metric units), AQI
//! from an AirVisual-shaped endpoint. API keys are taken from the config or
//! from the `OPENWEATHERMAP_API_KEY` / `AIRVISUAL_API_KEY` environment
//! variables.

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info, warn};

use ecosynth_spec::Location;

use crate::client::{AqiReading, EnvironmentClient, WeatherReading};
use crate::error::{EnvError, EnvResult};
use crate::retry::RetryPolicy;

/// Environment variable holding the weather API key.
pub const WEATHER_KEY_VAR: &str = "OPENWEATHERMAP_API_KEY";

/// Environment variable holding the AQI API key.
pub const AQI_KEY_VAR: &str = "AIRVISUAL_API_KEY";

const DEFAULT_WEATHER_URL: &str = "http://api.openweathermap.org/data/2.5/weather";
const DEFAULT_AQI_URL: &str = "http://api.airvisual.com/v2/city";

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Configuration for the HTTP environment client.
#[derive(Debug, Clone)]
pub struct EnvConfig {
    /// Weather API key; falls back to [`WEATHER_KEY_VAR`] when unset.
    pub weather_api_key: Option<String>,
    /// AQI API key; falls back to [`AQI_KEY_VAR`] when unset.
    pub aqi_api_key: Option<String>,
    /// Weather endpoint URL.
    pub weather_url: String,
    /// AQI endpoint URL.
    pub aqi_url: String,
    /// Bounded timeout applied to every request.
    pub request_timeout: Duration,
    /// Retry policy shared by both data sources.
    pub retry: RetryPolicy,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            weather_api_key: None,
            aqi_api_key: None,
            weather_url: DEFAULT_WEATHER_URL.to_string(),
            aqi_url: DEFAULT_AQI_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            retry: RetryPolicy::default(),
        }
    }
}

impl EnvConfig {
    /// Sets the weather API key.
    pub fn weather_api_key(mut self, key: impl Into<String>) -> Self {
        self.weather_api_key = Some(key.into());
        self
    }

    /// Sets the AQI API key.
    pub fn aqi_api_key(mut self, key: impl Into<String>) -> Self {
        self.aqi_api_key = Some(key.into());
        self
    }

    /// Sets the retry policy for both sources.
    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

/// Blocking HTTP environment client.
pub struct HttpEnvironmentClient {
    config: EnvConfig,
    client: reqwest::blocking::Client,
}

impl HttpEnvironmentClient {
    /// Builds a client with the given configuration.
    pub fn new(config: EnvConfig) -> EnvResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(EnvError::ClientBuild)?;
        Ok(Self { config, client })
    }

    fn weather_key(&self) -> EnvResult<String> {
        match &self.config.weather_api_key {
            Some(key) => Ok(key.clone()),
            None => std::env::var(WEATHER_KEY_VAR).map_err(|_| EnvError::MissingApiKey {
                source_name: "weather",
                var: WEATHER_KEY_VAR,
            }),
        }
    }

    fn aqi_key(&self) -> EnvResult<String> {
        match &self.config.aqi_api_key {
            Some(key) => Ok(key.clone()),
            None => std::env::var(AQI_KEY_VAR).map_err(|_| EnvError::MissingApiKey {
                source_name: "air quality",
                var: AQI_KEY_VAR,
            }),
        }
    }

    fn request_weather(&self, location: &Location, key: &str) -> EnvResult<WeatherReading> {
        let response = self
            .client
            .get(&self.config.weather_url)
            .query(&[
                ("q", format!("{},{}", location.city, location.country)),
                ("appid", key.to_string()),
                ("units", "metric".to_string()),
            ])
            .send()
            .map_err(|source| EnvError::Http {
                source_name: "weather",
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(EnvError::BadStatus {
                source_name: "weather",
                status: status.as_u16(),
            });
        }

        let body: WeatherResponse = response.json().map_err(|source| EnvError::Http {
            source_name: "weather",
            source,
        })?;
        Ok(WeatherReading {
            temperature: body.main.temp,
            humidity: body.main.humidity,
            wind_speed: body.wind.speed,
        })
    }

    fn request_aqi(&self, location: &Location, state: &str, key: &str) -> EnvResult<AqiReading> {
        let response = self
            .client
            .get(&self.config.aqi_url)
            .query(&[
                ("city", location.city.as_str()),
                ("state", state),
                ("country", location.country.as_str()),
                ("key", key),
            ])
            .send()
            .map_err(|source| EnvError::Http {
                source_name: "air quality",
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(EnvError::BadStatus {
                source_name: "air quality",
                status: status.as_u16(),
            });
        }

        let body: AqiResponse = response.json().map_err(|source| EnvError::Http {
            source_name: "air quality",
            source,
        })?;
        Ok(AqiReading {
            aqi: body.data.current.pollution.aqius,
        })
    }
}

impl EnvironmentClient for HttpEnvironmentClient {
    fn fetch_weather(&self, location: &Location) -> EnvResult<WeatherReading> {
        let key = self.weather_key()?;
        info!(location = %location.label(), "fetching weather data");
        let reading = self
            .config
            .retry
            .run("weather fetch", || self.request_weather(location, &key))?;
        debug!(?reading, "weather data fetched");
        Ok(reading)
    }

    fn fetch_aqi(&self, location: &Location) -> Option<AqiReading> {
        let state = match &location.state {
            Some(state) => state.clone(),
            None => {
                debug!("no state/region for location, skipping AQI fetch");
                return None;
            }
        };
        let key = match self.aqi_key() {
            Ok(key) => key,
            Err(err) => {
                warn!("skipping AQI fetch: {}", err);
                return None;
            }
        };

        info!(location = %location.label(), "fetching AQI data");
        match self
            .config
            .retry
            .run("AQI fetch", || self.request_aqi(location, &state, &key))
        {
            Ok(reading) => Some(reading),
            Err(err) => {
                warn!("AQI unavailable, continuing without it: {}", err);
                None
            }
        }
    }
}

// Wire formats of the upstream endpoints.

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    main: WeatherMain,
    wind: WeatherWind,
}

#[derive(Debug, Deserialize)]
struct WeatherMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct WeatherWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct AqiResponse {
    data: AqiData,
}

#[derive(Debug, Deserialize)]
struct AqiData {
    current: AqiCurrent,
}

#[derive(Debug, Deserialize)]
struct AqiCurrent {
    pollution: AqiPollution,
}

#[derive(Debug, Deserialize)]
struct AqiPollution {
    aqius: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_response_wire_format() {
        let json = r#"{
            "coord": {"lon": 77.22, "lat": 28.64},
            "main": {"temp": 34.5, "feels_like": 38.0, "humidity": 48},
            "wind": {"speed": 4.6, "deg": 270}
        }"#;
        let body: WeatherResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.main.temp, 34.5);
        assert_eq!(body.main.humidity, 48.0);
        assert_eq!(body.wind.speed, 4.6);
    }

    #[test]
    fn test_aqi_response_wire_format() {
        let json = r#"{
            "status": "success",
            "data": {
                "city": "Delhi",
                "current": {
                    "pollution": {"ts": "2026-08-29T10:00:00.000Z", "aqius": 178, "mainus": "p2"}
                }
            }
        }"#;
        let body: AqiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.data.current.pollution.aqius, 178);
    }

    #[test]
    fn test_fetch_aqi_without_state_skips_request() {
        // Endpoint is never contacted for a state-less location, so an
        // unroutable URL is safe here.
        let config = EnvConfig {
            aqi_api_key: Some("key".to_string()),
            aqi_url: "http://127.0.0.1:1/v2/city".to_string(),
            retry: RetryPolicy::none(),
            ..EnvConfig::default()
        };
        let client = HttpEnvironmentClient::new(config).unwrap();
        let location = Location::new("Oslo", "Norway");
        assert!(client.fetch_aqi(&location).is_none());
    }

    #[test]
    fn test_fetch_aqi_degrades_on_request_failure() {
        let config = EnvConfig {
            aqi_api_key: Some("key".to_string()),
            aqi_url: "http://127.0.0.1:1/v2/city".to_string(),
            request_timeout: Duration::from_millis(200),
            retry: RetryPolicy::none(),
            ..EnvConfig::default()
        };
        let client = HttpEnvironmentClient::new(config).unwrap();
        let location = Location::new("Oslo", "Norway").with_state("Oslo");
        assert!(client.fetch_aqi(&location).is_none());
    }
}
