//! Per-body detail rows: the ascendant first, then the classical bodies
//! and nodes in their traditional order.

use serde::{Deserialize, Serialize};
use crate::chart::data::NatalChart;
use crate::vedic::body::{Body, NATAL_BODIES};
use crate::vedic::dignity::LordStatus;
use crate::vedic::position::place;
use crate::vedic::rashi::{Rashi, SIGN_SPAN};

/// Houses in which a body counts as set (below the horizon).
const SET_HOUSES: std::ops::RangeInclusive<u8> = 1..=6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetDetail {
    /// `None` for the ascendant row.
    pub body: Option<Body>,
    pub abbreviation: String,
    pub full_name: String,
    pub local_degree: f64,
    pub global_degree: f64,
    pub progress_percent: f64,
    pub rasi_no: u8,
    pub sign: Rashi,
    pub sign_lord: Body,
    pub house: u8,
    pub speed_radians_per_day: Option<f64>,
    #[serde(rename = "isRetrograde")]
    pub retrograde: bool,
    pub nakshatra: String,
    pub nakshatra_lord: Option<Body>,
    pub nakshatra_pada: u8,
    pub nakshatra_number: Option<usize>,
    #[serde(rename = "isPlanetSet")]
    pub planet_set: bool,
    pub basic_avastha: Option<String>,
    pub lord_status: Option<LordStatus>,
    #[serde(rename = "isCombust")]
    pub combust: bool,
}

fn ascendant_row(chart: &NatalChart) -> PlanetDetail {
    let asc = &chart.ascendant;
    PlanetDetail {
        body: None,
        abbreviation: "As".to_string(),
        full_name: "Ascendant".to_string(),
        local_degree: asc.degree,
        global_degree: asc.longitude,
        progress_percent: asc.degree / SIGN_SPAN * 100.0,
        rasi_no: asc.sign.number(),
        sign: asc.sign,
        sign_lord: asc.sign_lord,
        house: asc.house,
        speed_radians_per_day: None,
        retrograde: false,
        nakshatra: asc.nakshatra.clone(),
        nakshatra_lord: asc.nakshatra_lord,
        nakshatra_pada: asc.nakshatra_pada,
        nakshatra_number: place(asc.longitude).nakshatra.number(),
        planet_set: false,
        basic_avastha: None,
        lord_status: None,
        combust: false,
    }
}

/// Detail rows for the chart. Outer bodies are left out; missing bodies
/// are skipped.
pub fn planet_details(chart: &NatalChart) -> Vec<PlanetDetail> {
    let mut rows = vec![ascendant_row(chart)];
    rows.extend(NATAL_BODIES.iter().filter_map(|body| chart.body(*body)).map(|p| PlanetDetail {
        body: Some(p.body),
        abbreviation: p.body.abbreviation().to_string(),
        full_name: p.body.name().to_string(),
        local_degree: p.degree,
        global_degree: p.longitude,
        progress_percent: p.degree / SIGN_SPAN * 100.0,
        rasi_no: p.sign.number(),
        sign: p.sign,
        sign_lord: p.sign_lord,
        house: p.house,
        speed_radians_per_day: Some(p.speed.to_radians()),
        retrograde: p.retrograde,
        nakshatra: p.nakshatra.clone(),
        nakshatra_lord: p.nakshatra_lord,
        nakshatra_pada: p.nakshatra_pada,
        nakshatra_number: p.placement().nakshatra.number(),
        planet_set: SET_HOUSES.contains(&p.house),
        basic_avastha: Some(p.avastha.compact().to_string()),
        lord_status: Some(p.dignity.lord_status()),
        combust: p.combust,
    }));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::types::{GeoLocation, RawHouses, RawPosition};
    use crate::vedic::houses::HouseSystem;
    use chrono::{TimeZone, Utc};

    fn chart() -> NatalChart {
        let raw = vec![
            (Body::Sun, RawPosition::new(10.0, 0.0, 1.0)),
            (Body::Moon, RawPosition::new(45.0, 0.0, 13.0)),
            (Body::Saturn, RawPosition::new(200.0, 0.0, -0.05)),
            (Body::Rahu, RawPosition::new(95.0, 0.0, -0.05)),
            (Body::Pluto, RawPosition::new(250.0, 0.0, 0.01)),
        ];
        NatalChart::from_raw(
            Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap(),
            GeoLocation { lat: 0.0, lon: 0.0 },
            &raw,
            &RawHouses { ascendant: 5.0, cusps: Vec::new() },
            HouseSystem::WholeSign,
        )
    }

    #[test]
    fn test_rows_in_traditional_order() {
        let rows = planet_details(&chart());
        let names: Vec<&str> = rows.iter().map(|r| r.abbreviation.as_str()).collect();
        assert_eq!(names, vec!["As", "Su", "Mo", "Sa", "Ra", "Ke"]);
        assert_eq!(rows[0].house, 1);
        assert_eq!(rows[0].nakshatra_number, Some(1));
        assert!(rows[0].lord_status.is_none());
    }

    #[test]
    fn test_body_row_fields() {
        let rows = planet_details(&chart());
        let sun = &rows[1];
        // Exalted in Aries, 10° into an odd sign
        assert_eq!(sun.lord_status, Some(LordStatus::HighlyBenefic));
        assert_eq!(sun.basic_avastha.as_deref(), Some("Kumara"));
        assert!(sun.planet_set);
        let moon = &rows[2];
        assert_eq!(moon.nakshatra_number, Some(4));
        assert_eq!(moon.rasi_no, 2);
        // Saturn in Libra: house 7, exalted, retrograde
        let saturn = &rows[3];
        assert_eq!(saturn.house, 7);
        assert!(!saturn.planet_set);
        assert!(saturn.retrograde);
        assert!((sun.speed_radians_per_day.unwrap() - 1.0_f64.to_radians()).abs() < 1e-12);
    }
}
