//! Panchang: tithi, paksha, yoga, karana and moon phase from the Sun and
//! Moon longitudes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::ephemeris::types::RiseSet;
use crate::vedic::nakshatra::{get_nakshatra_for_longitude, normalize_degrees, NAKSHATRA_SEGMENT_SIZE};

pub const TITHI_SPAN: f64 = 12.0;

pub const TITHI_NAMES: [&str; 30] = [
    "Pratipada", "Dwitiya", "Tritiya", "Chaturthi", "Panchami", "Shashthi", "Saptami", "Ashtami",
    "Navami", "Dashami", "Ekadashi", "Dwadashi", "Trayodashi", "Chaturdashi", "Purnima",
    "Pratipada", "Dwitiya", "Tritiya", "Chaturthi", "Panchami", "Shashthi", "Saptami", "Ashtami",
    "Navami", "Dashami", "Ekadashi", "Dwadashi", "Trayodashi", "Chaturdashi", "Amavasya",
];

pub const YOGA_NAMES: [&str; 27] = [
    "Vishkambha", "Priti", "Ayushman", "Saubhagya", "Shobhana", "Atiganda", "Sukarma", "Dhriti",
    "Shoola", "Ganda", "Vriddhi", "Dhruva", "Vyaghata", "Harshana", "Vajra", "Siddhi", "Vyatipata",
    "Variyan", "Parigha", "Shiva", "Siddhartha", "Sadhya", "Shubha", "Shukla", "Brahma", "Indra",
    "Vaidhriti",
];

pub const KARANA_SEQUENCE: [&str; 11] = [
    "Bava", "Balava", "Kaulava", "Taitila", "Garaja", "Vanija", "Vishti", "Shakuni", "Chatushpada",
    "Naga", "Kimstughna",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Paksha {
    Shukla,
    Krishna,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoonPhase {
    #[serde(rename = "Full Moon")]
    FullMoon,
    #[serde(rename = "New Moon")]
    NewMoon,
    Waxing,
    Waning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Panchang {
    pub tithi: String,
    pub tithi_number: u8,
    pub paksha: Paksha,
    pub nakshatra: String,
    pub nakshatra_number: Option<usize>,
    pub yoga: String,
    pub yoga_number: u8,
    pub karana: String,
    pub moon_phase: MoonPhase,
}

/// Panchang plus the instant it was evaluated at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanchangReport {
    #[serde(flatten)]
    pub panchang: Panchang,
    pub computed_at: DateTime<Utc>,
    /// False when no sunrise was available and the birth instant was used.
    pub sunrise_used: bool,
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
}

impl PanchangReport {
    pub fn new(panchang: Panchang, computed_at: DateTime<Utc>, rise_set: RiseSet) -> Self {
        Self {
            panchang,
            computed_at,
            sunrise_used: rise_set.sunrise == Some(computed_at),
            sunrise: rise_set.sunrise,
            sunset: rise_set.sunset,
        }
    }
}

pub fn moon_phase(tithi_number: u8) -> MoonPhase {
    match tithi_number {
        15 => MoonPhase::FullMoon,
        30 => MoonPhase::NewMoon,
        n if n < 15 => MoonPhase::Waxing,
        _ => MoonPhase::Waning,
    }
}

/// Panchang elements for one pair of sidereal Sun and Moon longitudes.
pub fn compute_panchang(sun_longitude: f64, moon_longitude: f64) -> Panchang {
    let elongation = normalize_degrees(moon_longitude - sun_longitude);
    let tithi_number = ((elongation / TITHI_SPAN).floor() as usize).min(29) + 1;

    let yoga_sum = normalize_degrees(sun_longitude + moon_longitude);
    let yoga_number = ((yoga_sum / NAKSHATRA_SEGMENT_SIZE).floor() as usize).min(26) + 1;

    let karana_index = ((elongation % TITHI_SPAN) / 6.0).floor() as usize;
    let karana = KARANA_SEQUENCE[karana_index.min(KARANA_SEQUENCE.len() - 1)];

    let nakshatra = get_nakshatra_for_longitude(moon_longitude);

    Panchang {
        tithi: TITHI_NAMES[tithi_number - 1].to_string(),
        tithi_number: tithi_number as u8,
        paksha: if tithi_number <= 15 { Paksha::Shukla } else { Paksha::Krishna },
        nakshatra_number: nakshatra.number(),
        nakshatra: nakshatra.name,
        yoga: YOGA_NAMES[yoga_number - 1].to_string(),
        yoga_number: yoga_number as u8,
        karana: karana.to_string(),
        moon_phase: moon_phase(tithi_number as u8),
    }
}
