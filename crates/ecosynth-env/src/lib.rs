//! Ecosynth Environment Client
//!
//! Acquires the live environmental reading a pipeline run is derived from:
//! a mandatory weather reading (temperature, humidity, wind speed) and an
//! optional air-quality reading.
//!
//! The weather source is an OpenWeatherMap-shaped HTTP endpoint; the AQI
//! source is an AirVisual-shaped endpoint that requires a state/region for
//! the location. A missing state, or AQI failure after retries, degrades to
//! "no reading" rather than an error; only the weather reading can fail a
//! run.
//!
//! Both sources share one [`RetryPolicy`]; requests carry a bounded timeout.
//!
//! # Modules
//!
//! - [`client`]: The `EnvironmentClient` trait and reading types
//! - [`http`]: The HTTP implementation
//! - [`retry`]: The shared retry-policy helper

pub mod client;
pub mod http;
pub mod retry;

mod error;

pub use client::{assemble_sample, AqiReading, EnvironmentClient, WeatherReading};
pub use error::{EnvError, EnvResult};
pub use http::{EnvConfig, HttpEnvironmentClient, AQI_KEY_VAR, WEATHER_KEY_VAR};
pub use retry::RetryPolicy;
