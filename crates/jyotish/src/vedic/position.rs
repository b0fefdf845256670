//! Longitude normalization: sign, degree-in-sign, nakshatra and pada.

use serde::{Deserialize, Serialize};
use crate::vedic::nakshatra::{get_nakshatra_for_longitude, normalize_degrees, NakshatraPlacement};
use crate::vedic::rashi::{Rashi, SIGN_SPAN};

/// A longitude resolved against the sign and nakshatra tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub longitude: f64,
    pub sign: Rashi,
    pub degree: f64,
    pub nakshatra: NakshatraPlacement,
}

impl Placement {
    pub fn pada(&self) -> u8 {
        self.nakshatra.pada
    }
}

/// Degree within the occupied sign, in [0, 30).
pub fn degree_in_sign(longitude: f64) -> f64 {
    normalize_degrees(longitude) % SIGN_SPAN
}

/// Resolve a raw longitude. Never fails: out-of-range input is reduced
/// modulo 360 first.
pub fn place(longitude: f64) -> Placement {
    let lon = normalize_degrees(longitude);
    Placement {
        longitude: lon,
        sign: Rashi::from_longitude(lon),
        degree: degree_in_sign(lon),
        nakshatra: get_nakshatra_for_longitude(lon),
    }
}

/// Shortest arc between two longitudes, in [0, 180].
pub fn angular_distance(a: f64, b: f64) -> f64 {
    let diff = (normalize_degrees(a) - normalize_degrees(b)).abs();
    diff.min(360.0 - diff)
}

/// Format degrees as `d°m′s″`. Degrees and minutes truncate, seconds round.
pub fn to_dms(value: f64) -> String {
    let prefix = if value < 0.0 { "-" } else { "" };
    let x = value.abs();
    let degrees = x.trunc();
    let minutes = ((x - degrees) * 60.0).trunc();
    let seconds = (((x - degrees) * 60.0 - minutes) * 60.0).round();
    format!("{prefix}{}°{}′{}″", degrees as i64, minutes as i64, seconds as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_moon_in_rohini() {
        let p = place(45.0);
        assert_eq!(p.sign, Rashi::Taurus);
        assert_eq!(p.nakshatra.name, "Rohini");
        assert_eq!(p.pada(), 2);
        assert!((p.degree - 15.0).abs() < 1e-12);
    }

    #[test]
    fn test_angular_distance_wraps() {
        assert!((angular_distance(350.0, 10.0) - 20.0).abs() < 1e-12);
        assert!((angular_distance(10.0, 350.0) - 20.0).abs() < 1e-12);
        assert!((angular_distance(0.0, 180.0) - 180.0).abs() < 1e-12);
    }

    #[test]
    fn test_to_dms() {
        assert_eq!(to_dms(15.5), "15°30′0″");
        assert_eq!(to_dms(0.0), "0°0′0″");
        assert_eq!(to_dms(-1.25), "-1°15′0″");
    }
}
