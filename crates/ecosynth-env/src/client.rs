//! The environment client contract.

use ecosynth_spec::{EnvironmentalSample, Location, AQI_UNKNOWN};

use crate::error::EnvResult;

/// A weather reading for one location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherReading {
    /// Temperature in degrees Celsius.
    pub temperature: f64,
    /// Relative humidity percentage.
    pub humidity: f64,
    /// Wind speed in meters per second.
    pub wind_speed: f64,
}

/// An air-quality reading for one location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AqiReading {
    /// Air Quality Index (US scale).
    pub aqi: i32,
}

/// Supplies the environmental reading a run is derived from.
///
/// The weather reading is mandatory: its failure (after the client's own
/// retry budget) fails the run. The AQI reading is optional: `None` means
/// "no reading", never an error, and callers substitute the sentinel.
pub trait EnvironmentClient {
    /// Fetches the weather reading for a location.
    fn fetch_weather(&self, location: &Location) -> EnvResult<WeatherReading>;

    /// Fetches the AQI reading for a location, or `None` when unavailable.
    ///
    /// A location without a state/region yields `None` without any request,
    /// since the AQI provider requires one.
    fn fetch_aqi(&self, location: &Location) -> Option<AqiReading>;
}

/// Assembles a full sample from a weather reading and an optional AQI
/// reading, substituting the sentinel when the latter is absent.
pub fn assemble_sample(weather: WeatherReading, aqi: Option<AqiReading>) -> EnvironmentalSample {
    EnvironmentalSample {
        temperature: weather.temperature,
        humidity: weather.humidity,
        wind_speed: weather.wind_speed,
        aqi: aqi.map(|reading| reading.aqi).unwrap_or(AQI_UNKNOWN),
    }
}
