//! In-memory ephemeris serving precomputed positions.

use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeMap;
use crate::ephemeris::provider::{Ephemeris, EphemerisError};
use crate::ephemeris::types::{GeoLocation, NodeMode, RawHouses, RawPosition, RiseSet};
use crate::vedic::body::Body;

/// Ephemeris backed by fixed tables. Positions are the same at every
/// instant unless an instant-specific override was registered.
#[derive(Debug, Clone, Default)]
pub struct FixedEphemeris {
    positions: BTreeMap<Body, RawPosition>,
    overrides: BTreeMap<(DateTime<Utc>, Body), RawPosition>,
    houses: Option<RawHouses>,
    rise_set: RiseSet,
}

impl FixedEphemeris {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, body: Body, lon: f64, speed_lon: f64) -> Self {
        self.positions.insert(body, RawPosition::new(lon, 0.0, speed_lon));
        self
    }

    pub fn with_position_at(mut self, instant: DateTime<Utc>, body: Body, position: RawPosition) -> Self {
        self.overrides.insert((instant, body), position);
        self
    }

    pub fn with_houses(mut self, ascendant: f64, cusps: Vec<f64>) -> Self {
        self.houses = Some(RawHouses { ascendant, cusps });
        self
    }

    pub fn with_rise_set(mut self, rise_set: RiseSet) -> Self {
        self.rise_set = rise_set;
        self
    }
}

impl Ephemeris for FixedEphemeris {
    fn position(
        &self,
        instant: DateTime<Utc>,
        body: Body,
        _node_mode: NodeMode,
    ) -> Result<RawPosition, EphemerisError> {
        self.overrides
            .get(&(instant, body))
            .or_else(|| self.positions.get(&body))
            .copied()
            .ok_or_else(|| EphemerisError::CalculationFailed {
                body,
                instant,
                message: "no fixed position registered".to_string(),
            })
    }

    fn house_cusps(
        &self,
        _instant: DateTime<Utc>,
        _location: &GeoLocation,
        _system_code: char,
    ) -> Result<RawHouses, EphemerisError> {
        self.houses.clone().ok_or_else(|| EphemerisError::HouseCalculationFailed {
            message: "no fixed houses registered".to_string(),
        })
    }

    fn rise_set(
        &self,
        _date: NaiveDate,
        _timezone: &str,
        _location: &GeoLocation,
    ) -> Result<RiseSet, EphemerisError> {
        Ok(self.rise_set)
    }
}
