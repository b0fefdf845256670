use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Geographic location coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
}

/// Lunar node convention requested from the ephemeris.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeMode {
    #[default]
    Mean,
    True,
}

/// Sidereal position of one body as supplied by the ephemeris.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawPosition {
    /// Longitude in degrees (0-360)
    pub lon: f64,
    /// Latitude in degrees
    pub lat: f64,
    /// Speed in longitude (degrees per day), negative when retrograde
    pub speed_lon: f64,
}

impl RawPosition {
    pub fn new(lon: f64, lat: f64, speed_lon: f64) -> Self {
        Self { lon, lat, speed_lon }
    }
}

/// Ascendant and raw cusp list. Providers may return 12 cusps, or 13 with
/// index 0 reserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawHouses {
    pub ascendant: f64,
    pub cusps: Vec<f64>,
}

/// Sunrise and sunset for a local date. Either may be absent (circumpolar
/// days), which is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RiseSet {
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
}
