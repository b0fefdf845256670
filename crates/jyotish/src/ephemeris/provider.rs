use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;
use crate::ephemeris::types::{GeoLocation, NodeMode, RawHouses, RawPosition, RiseSet};
use crate::vedic::body::Body;

/// Errors raised by an ephemeris provider. They reach callers unmodified.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EphemerisError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
    #[error("Failed to calculate position for {body} at {instant}: {message}")]
    CalculationFailed {
        body: Body,
        instant: DateTime<Utc>,
        message: String,
    },
    #[error("House calculation failed: {message}")]
    HouseCalculationFailed { message: String },
}

/// Source of sidereal positions, house cusps and rise/set times.
///
/// Calls are synchronous; the engine neither retries nor caches them.
/// Ketu is never requested: it is derived from Rahu.
pub trait Ephemeris {
    fn position(
        &self,
        instant: DateTime<Utc>,
        body: Body,
        node_mode: NodeMode,
    ) -> Result<RawPosition, EphemerisError>;

    fn house_cusps(
        &self,
        instant: DateTime<Utc>,
        location: &GeoLocation,
        system_code: char,
    ) -> Result<RawHouses, EphemerisError>;

    fn rise_set(
        &self,
        date: NaiveDate,
        timezone: &str,
        location: &GeoLocation,
    ) -> Result<RiseSet, EphemerisError>;
}

impl<E: Ephemeris + ?Sized> Ephemeris for &E {
    fn position(
        &self,
        instant: DateTime<Utc>,
        body: Body,
        node_mode: NodeMode,
    ) -> Result<RawPosition, EphemerisError> {
        (**self).position(instant, body, node_mode)
    }

    fn house_cusps(
        &self,
        instant: DateTime<Utc>,
        location: &GeoLocation,
        system_code: char,
    ) -> Result<RawHouses, EphemerisError> {
        (**self).house_cusps(instant, location, system_code)
    }

    fn rise_set(
        &self,
        date: NaiveDate,
        timezone: &str,
        location: &GeoLocation,
    ) -> Result<RiseSet, EphemerisError> {
        (**self).rise_set(date, timezone, location)
    }
}
