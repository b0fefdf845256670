//! Sign and nakshatra properties of a chosen reference point.

use serde::{Deserialize, Serialize};
use crate::vedic::position::Placement;
use crate::vedic::rashi::{Modality, Paya, Rashi, Tatva};

/// Which point the properties are read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertySource {
    #[default]
    Moon,
    Ascendant,
    /// The Moon recomputed at local sunrise.
    #[serde(alias = "sunriseMoon")]
    SunriseMoon,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VedicProperties {
    pub source: PropertySource,
    /// Only meaningful for `SunriseMoon`: false when the birth instant stood in.
    pub sunrise_used: bool,
    pub sign: Rashi,
    pub rasi_no: u8,
    pub nakshatra: String,
    pub nakshatra_number: Option<usize>,
    pub pada: u8,
    pub tatva: Tatva,
    pub paya: Paya,
    pub modality: Modality,
}

/// Properties of a placement. The ascendant always reports pada 1.
pub fn vedic_properties(source: PropertySource, placement: &Placement, sunrise_used: bool) -> VedicProperties {
    let pada = match source {
        PropertySource::Ascendant => 1,
        PropertySource::Moon | PropertySource::SunriseMoon => placement.pada(),
    };
    VedicProperties {
        source,
        sunrise_used,
        sign: placement.sign,
        rasi_no: placement.sign.number(),
        nakshatra: placement.nakshatra.name.clone(),
        nakshatra_number: placement.nakshatra.number(),
        pada,
        tatva: placement.sign.tatva(),
        paya: placement.sign.paya(),
        modality: placement.sign.modality(),
    }
}
