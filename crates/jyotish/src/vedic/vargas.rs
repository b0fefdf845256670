//! Divisional chart (varga) helpers for Vedic astrology.
//!
//! Vargas are derived charts that divide each sign into multiple parts.
//! D2, D3, D4, D7, D9, D10 and D12 follow their classical rules; any other
//! divisor falls back to a sequential equal split and is flagged generic.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use crate::error::{Result, VedicError};
use crate::vedic::body::Body;
use crate::vedic::dignity::{classify_dignity, Dignity};
use crate::vedic::houses::whole_sign_house;
use crate::vedic::position::degree_in_sign;
use crate::vedic::rashi::{Modality, Rashi, SIGN_SPAN};
use crate::vedic::types::{Ascendant, BodyPosition};

pub const DEFAULT_VARGA_DIVISORS: &[u32] = &[1, 2, 3, 4, 7, 9, 10, 12];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassicalVarga {
    Hora,
    Drekkana,
    Chaturthamsa,
    Saptamsa,
    Navamsa,
    Dashamsa,
    Dwadasamsa,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VargaRule {
    Rasi,
    Classical(ClassicalVarga),
    Generic(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VargaMode {
    Classical,
    Generic,
}

impl VargaRule {
    pub fn for_divisor(divisor: u32) -> Result<Self> {
        let rule = match divisor {
            0 => return Err(VedicError::InvalidDivisor { divisor }),
            1 => Self::Rasi,
            2 => Self::Classical(ClassicalVarga::Hora),
            3 => Self::Classical(ClassicalVarga::Drekkana),
            4 => Self::Classical(ClassicalVarga::Chaturthamsa),
            7 => Self::Classical(ClassicalVarga::Saptamsa),
            9 => Self::Classical(ClassicalVarga::Navamsa),
            10 => Self::Classical(ClassicalVarga::Dashamsa),
            12 => Self::Classical(ClassicalVarga::Dwadasamsa),
            other => Self::Generic(other),
        };
        Ok(rule)
    }

    pub const fn divisor(self) -> u32 {
        match self {
            Self::Rasi => 1,
            Self::Classical(ClassicalVarga::Hora) => 2,
            Self::Classical(ClassicalVarga::Drekkana) => 3,
            Self::Classical(ClassicalVarga::Chaturthamsa) => 4,
            Self::Classical(ClassicalVarga::Saptamsa) => 7,
            Self::Classical(ClassicalVarga::Navamsa) => 9,
            Self::Classical(ClassicalVarga::Dashamsa) => 10,
            Self::Classical(ClassicalVarga::Dwadasamsa) => 12,
            Self::Generic(d) => d,
        }
    }

    pub const fn mode(self) -> VargaMode {
        match self {
            Self::Rasi | Self::Classical(_) => VargaMode::Classical,
            Self::Generic(_) => VargaMode::Generic,
        }
    }
}

/// Index of the equal part containing `degree` when a sign is cut into
/// `division` parts.
fn part_index(degree: f64, division: u32) -> usize {
    let step = SIGN_SPAN / division as f64;
    ((degree / step).floor().max(0.0) as usize).min(division as usize - 1)
}

/// Varga sign of a longitude under a rule.
pub fn varga_sign(longitude: f64, rule: VargaRule) -> Rashi {
    let sign = Rashi::from_longitude(longitude);
    let degree = degree_in_sign(longitude);
    let part = part_index(degree, rule.divisor());

    match rule {
        VargaRule::Rasi => sign,
        VargaRule::Classical(ClassicalVarga::Hora) => {
            let (first, second) = if sign.is_odd() {
                (Rashi::Leo, Rashi::Cancer)
            } else {
                (Rashi::Cancer, Rashi::Leo)
            };
            if degree < 15.0 { first } else { second }
        }
        VargaRule::Classical(ClassicalVarga::Drekkana) => {
            const OFFSETS: [usize; 3] = [0, 4, 8];
            sign.advance(OFFSETS[part])
        }
        VargaRule::Classical(ClassicalVarga::Chaturthamsa) => {
            let base = match sign.modality() {
                Modality::Movable => 0,
                Modality::Fixed => 3,
                Modality::Dual => 6,
            };
            sign.advance(base + part)
        }
        VargaRule::Classical(ClassicalVarga::Saptamsa) => {
            let base = if sign.is_odd() { 0 } else { 6 };
            sign.advance(base + part)
        }
        VargaRule::Classical(ClassicalVarga::Navamsa) => {
            let base = match sign.modality() {
                Modality::Movable => 0,
                Modality::Fixed => 8,
                Modality::Dual => 4,
            };
            sign.advance(base + part)
        }
        VargaRule::Classical(ClassicalVarga::Dashamsa) => {
            let base = if sign.is_odd() { 0 } else { 8 };
            sign.advance(base + part)
        }
        VargaRule::Classical(ClassicalVarga::Dwadasamsa) | VargaRule::Generic(_) => {
            sign.advance(part)
        }
    }
}

pub fn varga_sign_for_divisor(longitude: f64, divisor: u32) -> Result<Rashi> {
    Ok(varga_sign(longitude, VargaRule::for_divisor(divisor)?))
}

/// Position inside the varga sign: the remainder within the part, scaled
/// back up to a 30-degree sign.
pub fn varga_degree(longitude: f64, divisor: u32) -> f64 {
    if divisor <= 1 {
        return degree_in_sign(longitude);
    }
    let degree = degree_in_sign(longitude);
    let step = SIGN_SPAN / divisor as f64;
    let remainder = degree - part_index(degree, divisor) as f64 * step;
    (remainder * divisor as f64).clamp(0.0, SIGN_SPAN)
}

/// Traditional name and life area of a divisional chart.
pub fn varga_meta(divisor: u32) -> (String, String) {
    let known = match divisor {
        1 => Some(("Rasi", "General life")),
        2 => Some(("Hora", "Wealth")),
        3 => Some(("Drekkana", "Siblings/Co-borns")),
        4 => Some(("Chaturthamsa", "Home/Property")),
        5 => Some(("Panchamsa", "Power/Authority")),
        6 => Some(("Shashtamsa", "Health/Illness")),
        7 => Some(("Saptamsa", "Children/Progeny")),
        9 => Some(("Navamsa", "Marriage/Dharma")),
        10 => Some(("Dashamamsa", "Career/Profession")),
        12 => Some(("Dwadasamsa", "Parents/Ancestry")),
        16 => Some(("Shodasamsa", "Vehicles/Comforts")),
        20 => Some(("Vimsamsa", "Spirituality/Upasana")),
        24 => Some(("Siddhamsa", "Education/Learning")),
        27 => Some(("Nakshatramsa", "Strength/Deity")),
        30 => Some(("Trimshamsa", "Mishaps/Defects")),
        40 => Some(("Khavedamsa", "Purva Punya/Sins")),
        45 => Some(("Akshavedamsa", "Character/Spiritual Merit")),
        60 => Some(("Shashtiamsa", "Past Life/Overall")),
        _ => None,
    };
    match known {
        Some((name, focus)) => (name.to_string(), focus.to_string()),
        None => (varga_key(divisor), "Generic division".to_string()),
    }
}

pub fn varga_key(divisor: u32) -> String {
    format!("D{divisor}")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VargaAscendant {
    pub sign: Rashi,
    pub sign_lord: Body,
    pub degree: f64,
    pub varga_degree: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VargaPlacement {
    pub body: Body,
    pub sign: Rashi,
    pub house: u8,
    /// Natal degree within the natal sign.
    pub degree: f64,
    pub varga_degree: f64,
    pub dignity: Dignity,
    #[serde(rename = "isRetrograde")]
    pub retrograde: bool,
    #[serde(rename = "isCombust")]
    pub combust: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VargaChart {
    pub key: String,
    pub divisor: u32,
    pub name: String,
    pub focus: String,
    pub mode: VargaMode,
    pub ascendant: VargaAscendant,
    pub bodies: Vec<VargaPlacement>,
}

impl VargaChart {
    pub fn body(&self, body: Body) -> Option<&VargaPlacement> {
        self.bodies.iter().find(|p| p.body == body)
    }
}

/// Build one divisional chart. Houses are whole-sign from the varga
/// ascendant; D1 keeps each body's natal house.
pub fn build_varga_chart(
    ascendant: &Ascendant,
    bodies: &[BodyPosition],
    divisor: u32,
) -> Result<VargaChart> {
    let rule = VargaRule::for_divisor(divisor)?;
    let (name, focus) = varga_meta(divisor);
    let asc_sign = varga_sign(ascendant.longitude, rule);

    let placements = bodies
        .iter()
        .map(|position| {
            let sign = varga_sign(position.longitude, rule);
            let house = match rule {
                VargaRule::Rasi => position.house,
                _ => whole_sign_house(asc_sign, sign),
            };
            VargaPlacement {
                body: position.body,
                sign,
                house,
                degree: position.degree,
                varga_degree: varga_degree(position.longitude, divisor),
                dignity: classify_dignity(position.body, sign),
                retrograde: position.retrograde,
                combust: position.combust,
            }
        })
        .collect();

    Ok(VargaChart {
        key: varga_key(divisor),
        divisor,
        name,
        focus,
        mode: rule.mode(),
        ascendant: VargaAscendant {
            sign: asc_sign,
            sign_lord: asc_sign.lord(),
            degree: ascendant.degree,
            varga_degree: varga_degree(ascendant.longitude, divisor),
            longitude: ascendant.longitude,
        },
        bodies: placements,
    })
}

/// Build every requested chart keyed `"D<n>"`. Duplicate divisors collapse.
pub fn build_varga_charts(
    ascendant: &Ascendant,
    bodies: &[BodyPosition],
    divisors: &[u32],
) -> Result<BTreeMap<String, VargaChart>> {
    let mut charts = BTreeMap::new();
    for &divisor in divisors {
        let chart = build_varga_chart(ascendant, bodies, divisor)?;
        charts.insert(chart.key.clone(), chart);
    }
    Ok(charts)
}
