//! Krishnamurti (KP) sub-lords.
//!
//! A nakshatra's span is cut into nine unequal parts in Vimshottari
//! proportion, starting from the nakshatra's own lord.

use serde::{Deserialize, Serialize};
use crate::vedic::body::Body;
use crate::vedic::dashas::{vimshottari_sequence_from, VIMSHOTTARI_TOTAL_YEARS};
use crate::vedic::houses::HouseTable;
use crate::vedic::nakshatra::{find_band, normalize_degrees};
use crate::vedic::rashi::Rashi;
use crate::vedic::types::BodyPosition;

/// Sub-lord ruling a longitude. `None` only for non-finite input.
pub fn kp_sub_lord(longitude: f64) -> Option<Body> {
    let lon = normalize_degrees(longitude);
    let band = find_band(lon)?;
    let span = band.end - band.start;
    let offset = lon - band.start;

    let mut accumulated = 0.0;
    let mut last = band.lord;
    for (body, years) in vimshottari_sequence_from(band.lord) {
        accumulated += span * (years / VIMSHOTTARI_TOTAL_YEARS);
        if offset < accumulated {
            return Some(body);
        }
        last = body;
    }
    Some(last)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BhavRow {
    pub bhav: u8,
    pub sign: Rashi,
    pub mid_point: f64,
    pub bodies: Vec<Body>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpBodyRow {
    pub body: Body,
    pub cusp: u8,
    pub sign: Rashi,
    pub cuspal_lord: Option<Body>,
    pub star_lord: Option<Body>,
    pub sub_lord: Option<Body>,
    pub degree: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpDetails {
    pub bhav_chalit: Vec<BhavRow>,
    pub bodies: Vec<KpBodyRow>,
}

/// Bhav chalit rows from the house table and star/sub lords per body.
pub fn kp_details(houses: &HouseTable, bodies: &[BodyPosition]) -> KpDetails {
    let bhav_chalit = houses
        .houses
        .iter()
        .map(|house| BhavRow {
            bhav: house.number,
            sign: house.sign,
            mid_point: normalize_degrees(house.degree + 15.0),
            bodies: house.bodies.clone(),
        })
        .collect();

    let rows = bodies
        .iter()
        .map(|position| KpBodyRow {
            body: position.body,
            cusp: position.house,
            sign: position.sign,
            cuspal_lord: houses.house(position.house).map(|h| h.sign_lord),
            star_lord: position.nakshatra_lord,
            sub_lord: kp_sub_lord(position.longitude),
            degree: position.degree,
        })
        .collect();

    KpDetails { bhav_chalit, bodies: rows }
}
