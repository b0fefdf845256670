//! Vedic chart records shared across the pipeline.

use serde::{Deserialize, Serialize};
use crate::ephemeris::types::RawPosition;
use crate::vedic::body::Body;
use crate::vedic::dignity::{avastha_for, classify_dignity, is_combust, Avastha, Dignity};
use crate::vedic::nakshatra::normalize_degrees;
use crate::vedic::position::{place, to_dms, Placement};
use crate::vedic::rashi::Rashi;

/// A body resolved against every fixed table. `house` stays 0 until house
/// assignment runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyPosition {
    pub body: Body,
    pub longitude: f64,
    pub latitude: f64,
    pub speed: f64,
    pub sign: Rashi,
    pub sign_lord: Body,
    pub degree: f64,
    #[serde(rename = "degreeDMS")]
    pub degree_dms: String,
    #[serde(rename = "longitudeDMS")]
    pub longitude_dms: String,
    pub nakshatra: String,
    pub nakshatra_lord: Option<Body>,
    pub nakshatra_pada: u8,
    pub house: u8,
    #[serde(rename = "isRetrograde")]
    pub retrograde: bool,
    #[serde(rename = "isCombust")]
    pub combust: bool,
    pub dignity: Dignity,
    pub avastha: Avastha,
}

impl BodyPosition {
    pub fn from_raw(body: Body, raw: &RawPosition) -> Self {
        let placement = place(raw.lon);
        Self {
            body,
            longitude: placement.longitude,
            latitude: raw.lat,
            speed: raw.speed_lon,
            sign: placement.sign,
            sign_lord: placement.sign.lord(),
            degree: placement.degree,
            degree_dms: to_dms(placement.degree),
            longitude_dms: to_dms(placement.longitude),
            nakshatra: placement.nakshatra.name.clone(),
            nakshatra_lord: placement.nakshatra.lord,
            nakshatra_pada: placement.nakshatra.pada,
            house: 0,
            retrograde: raw.speed_lon < 0.0 && body.can_retrograde(),
            combust: false,
            dignity: classify_dignity(body, placement.sign),
            avastha: avastha_for(placement.degree, placement.sign),
        }
    }

    pub fn placement(&self) -> Placement {
        place(self.longitude)
    }
}

/// The eastern horizon point. Same sign attributes as a body, always house 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ascendant {
    pub longitude: f64,
    pub sign: Rashi,
    pub sign_lord: Body,
    pub degree: f64,
    #[serde(rename = "degreeDMS")]
    pub degree_dms: String,
    pub nakshatra: String,
    pub nakshatra_lord: Option<Body>,
    pub nakshatra_pada: u8,
    pub house: u8,
}

impl Ascendant {
    pub fn from_longitude(longitude: f64) -> Self {
        let placement = place(longitude);
        Self {
            longitude: placement.longitude,
            sign: placement.sign,
            sign_lord: placement.sign.lord(),
            degree: placement.degree,
            degree_dms: to_dms(placement.degree),
            nakshatra: placement.nakshatra.name.clone(),
            nakshatra_lord: placement.nakshatra.lord,
            nakshatra_pada: placement.nakshatra.pada,
            house: 1,
        }
    }
}

/// South node: exactly opposite Rahu, sharing its speed. Opposes the
/// normalized Rahu longitude so both records agree for any raw input.
pub fn derive_ketu(rahu: &RawPosition) -> RawPosition {
    RawPosition {
        lon: normalize_degrees(normalize_degrees(rahu.lon) + 180.0),
        lat: -rahu.lat,
        speed_lon: rahu.speed_lon,
    }
}

/// Flag combustion against the Sun in the same set. No-op without a Sun.
pub fn apply_combustion(bodies: &mut [BodyPosition]) {
    let Some(sun_lon) = bodies.iter().find(|p| p.body == Body::Sun).map(|p| p.longitude) else {
        return;
    };
    for position in bodies.iter_mut().filter(|p| p.body != Body::Sun) {
        position.combust = is_combust(position.body, position.longitude, sun_lon, position.retrograde);
    }
}
