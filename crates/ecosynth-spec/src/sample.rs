//! Location and environmental sample types.

use serde::{Deserialize, Serialize};

/// Sentinel AQI value meaning "no reading available".
///
/// The air-quality reading is optional: when the provider cannot supply one
/// (typically because no state/region was given for the location), the
/// pipeline substitutes this value and continues rather than aborting.
pub const AQI_UNKNOWN: i32 = -1;

/// A named location for which environmental data is fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// City name, as understood by the weather provider.
    pub city: String,
    /// State or region. Required by the AQI provider; when absent the AQI
    /// reading is skipped entirely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Country name.
    pub country: String,
}

impl Location {
    /// Creates a location without a state/region.
    pub fn new(city: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            state: None,
            country: country.into(),
        }
    }

    /// Sets the state/region.
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Human-readable label, e.g. "Delhi, Delhi, India".
    pub fn label(&self) -> String {
        match &self.state {
            Some(state) => format!("{}, {}, {}", self.city, state, self.country),
            None => format!("{}, {}", self.city, self.country),
        }
    }
}

/// One environmental reading, assembled once per run and immutable after.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalSample {
    /// Temperature in degrees Celsius.
    pub temperature: f64,
    /// Relative humidity as a percentage in [0, 100].
    pub humidity: f64,
    /// Wind speed in meters per second, >= 0.
    pub wind_speed: f64,
    /// Air Quality Index, >= 0, or [`AQI_UNKNOWN`] when no reading exists.
    pub aqi: i32,
}

impl EnvironmentalSample {
    /// Creates a sample with no air-quality reading.
    pub fn without_aqi(temperature: f64, humidity: f64, wind_speed: f64) -> Self {
        Self {
            temperature,
            humidity,
            wind_speed,
            aqi: AQI_UNKNOWN,
        }
    }

    /// Whether a real air-quality reading is present.
    pub fn has_aqi(&self) -> bool {
        self.aqi != AQI_UNKNOWN
    }
}
