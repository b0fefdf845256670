//! House assignment under whole-sign and cusp-based systems.
//!
//! Whole-sign houses are zodiac signs counted from the ascendant's sign.
//! Cusp houses are half-open arcs `[cusp[i], cusp[i+1])`, wrapping at 360.

use serde::{Deserialize, Serialize};
use crate::vedic::body::Body;
use crate::vedic::dignity::{classify_dignity, Dignity, LordStatus};
use crate::vedic::nakshatra::normalize_degrees;
use crate::vedic::rashi::{Rashi, SIGN_SPAN};
use crate::vedic::types::{Ascendant, BodyPosition};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseSystem {
    #[default]
    WholeSign,
    Cusp,
}

/// Twelve cusp longitudes, house 1 first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CuspSet([f64; 12]);

impl CuspSet {
    /// Accepts a provider's raw list. With 13 or more entries index 0 is
    /// reserved and dropped; with exactly 12 they are used as-is. Anything
    /// shorter is unusable.
    pub fn from_raw(raw: &[f64]) -> Option<Self> {
        let slice = match raw.len() {
            n if n >= 13 => &raw[1..13],
            12 => &raw[0..12],
            _ => return None,
        };
        let mut cusps = [0.0; 12];
        for (slot, value) in cusps.iter_mut().zip(slice) {
            if !value.is_finite() {
                return None;
            }
            *slot = normalize_degrees(*value);
        }
        Some(Self(cusps))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Start of house `number` (1-based).
    pub fn cusp(&self, number: u8) -> f64 {
        self.0[(number as usize + 11) % 12]
    }

    /// House whose interval contains the longitude. The first matching
    /// house wins.
    pub fn house_of(&self, longitude: f64) -> Option<u8> {
        let lon = normalize_degrees(longitude);
        (0..12)
            .find(|&i| in_cusp_interval(lon, self.0[i], self.0[(i + 1) % 12]))
            .map(|i| i as u8 + 1)
    }
}

/// Half-open interval test on the circle. `end <= start` wraps through 0.
pub fn in_cusp_interval(longitude: f64, start: f64, end: f64) -> bool {
    if end > start {
        longitude >= start && longitude < end
    } else {
        longitude >= start || longitude < end
    }
}

/// Whole-sign house of `sign` counted from the ascendant's sign.
pub const fn whole_sign_house(ascendant_sign: Rashi, sign: Rashi) -> u8 {
    ascendant_sign.forward_distance(sign) as u8
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct House {
    pub number: u8,
    pub sign: Rashi,
    pub sign_lord: Body,
    /// Cusp longitude, or the sign's start under whole-sign houses.
    pub degree: f64,
    pub bodies: Vec<Body>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseTable {
    pub system: HouseSystem,
    /// Set when cusp houses were requested but whole-sign houses were used.
    pub fallback: bool,
    pub houses: Vec<House>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cusps: Option<Vec<f64>>,
}

impl HouseTable {
    pub fn house(&self, number: u8) -> Option<&House> {
        self.houses.iter().find(|h| h.number == number)
    }

    /// Bodies listed in house `number`, empty when the number is out of range.
    pub fn members(&self, number: u8) -> &[Body] {
        self.house(number).map(|h| h.bodies.as_slice()).unwrap_or(&[])
    }
}

fn whole_sign_houses(ascendant_sign: Rashi) -> Vec<House> {
    ascendant_sign
        .sequence()
        .iter()
        .enumerate()
        .map(|(i, sign)| House {
            number: i as u8 + 1,
            sign: *sign,
            sign_lord: sign.lord(),
            degree: sign.index() as f64 * SIGN_SPAN,
            bodies: Vec::new(),
        })
        .collect()
}

fn cusp_houses(cusps: &CuspSet) -> Vec<House> {
    cusps
        .as_slice()
        .iter()
        .enumerate()
        .map(|(i, cusp)| {
            let sign = Rashi::from_longitude(*cusp);
            House {
                number: i as u8 + 1,
                sign,
                sign_lord: sign.lord(),
                degree: *cusp,
                bodies: Vec::new(),
            }
        })
        .collect()
}

/// Assign a house to every body and build the house table.
///
/// Writes each body's `house` once. In cusp mode without a usable cusp set
/// the whole-sign table is produced instead and `fallback` is set.
pub fn assign_houses(
    ascendant: &Ascendant,
    bodies: &mut [BodyPosition],
    system: HouseSystem,
    raw_cusps: Option<&[f64]>,
) -> HouseTable {
    let cusps = match system {
        HouseSystem::WholeSign => None,
        HouseSystem::Cusp => {
            let parsed = raw_cusps.and_then(CuspSet::from_raw);
            if parsed.is_none() {
                log::warn!(
                    "Cusp houses requested without a usable cusp set ({} values); using whole-sign houses",
                    raw_cusps.map_or(0, |c| c.len())
                );
            }
            parsed
        }
    };

    let mut houses = match &cusps {
        Some(set) => cusp_houses(set),
        None => whole_sign_houses(ascendant.sign),
    };

    for position in bodies.iter_mut() {
        let by_sign = whole_sign_house(ascendant.sign, position.sign);
        let number = match &cusps {
            Some(set) => set.house_of(position.longitude).unwrap_or_else(|| {
                log::warn!("{} fell outside every cusp interval; using its sign house", position.body);
                by_sign
            }),
            None => by_sign,
        };
        position.house = number;
        houses[number as usize - 1].bodies.push(position.body);
    }

    HouseTable {
        system: if cusps.is_some() { HouseSystem::Cusp } else { HouseSystem::WholeSign },
        fallback: system == HouseSystem::Cusp && cusps.is_none(),
        houses,
        cusps: cusps.map(|set| set.as_slice().to_vec()),
    }
}

/// Lord of a house, where that lord sits and how it fares there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseLord {
    pub house: u8,
    pub sign: Rashi,
    pub lord: Body,
    pub lord_sign: Option<Rashi>,
    pub lord_house: Option<u8>,
    pub lord_dignity: Option<Dignity>,
    pub status: Option<LordStatus>,
}

/// Lords of the twelve whole-sign houses. Lord fields are `None` when the
/// lord's position is not among `bodies`.
pub fn house_lords(ascendant_sign: Rashi, bodies: &[BodyPosition]) -> Vec<HouseLord> {
    ascendant_sign
        .sequence()
        .iter()
        .enumerate()
        .map(|(i, sign)| {
            let lord = sign.lord();
            let placed = bodies.iter().find(|p| p.body == lord);
            let dignity = placed.map(|p| classify_dignity(lord, p.sign));
            HouseLord {
                house: i as u8 + 1,
                sign: *sign,
                lord,
                lord_sign: placed.map(|p| p.sign),
                lord_house: placed.map(|p| p.house),
                lord_dignity: dignity,
                status: dignity.map(Dignity::lord_status),
            }
        })
        .collect()
}
