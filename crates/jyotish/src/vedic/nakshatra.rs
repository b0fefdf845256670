//! Nakshatra utilities for Vedic astrology.
//!
//! Nakshatras are 27 lunar mansions, each spanning 13°20' (360/27 degrees).
//! Each nakshatra is divided into 4 padas (quarters). Bands are half-open,
//! `[start, end)`.

use serde::{Deserialize, Serialize};
use crate::vedic::body::Body;

pub const NAKSHATRA_SEGMENT_SIZE: f64 = 360.0 / 27.0;
pub const PADA_SIZE: f64 = NAKSHATRA_SEGMENT_SIZE / 4.0;

pub const UNKNOWN_NAKSHATRA: &str = "Unknown";

// (slug, display_name, lord)
pub const NAKSHATRA_ORDER: &[(&str, &str, Body)] = &[
    ("ashwini", "Ashwini", Body::Ketu),
    ("bharani", "Bharani", Body::Venus),
    ("krittika", "Krittika", Body::Sun),
    ("rohini", "Rohini", Body::Moon),
    ("mrigashira", "Mrigashira", Body::Mars),
    ("ardra", "Ardra", Body::Rahu),
    ("punarvasu", "Punarvasu", Body::Jupiter),
    ("pushya", "Pushya", Body::Saturn),
    ("ashlesha", "Ashlesha", Body::Mercury),
    ("magha", "Magha", Body::Ketu),
    ("purva_phalguni", "Purva Phalguni", Body::Venus),
    ("uttara_phalguni", "Uttara Phalguni", Body::Sun),
    ("hasta", "Hasta", Body::Moon),
    ("chitra", "Chitra", Body::Mars),
    ("swati", "Swati", Body::Rahu),
    ("vishakha", "Vishakha", Body::Jupiter),
    ("anuradha", "Anuradha", Body::Saturn),
    ("jyeshtha", "Jyeshtha", Body::Mercury),
    ("mula", "Mula", Body::Ketu),
    ("purva_ashadha", "Purva Ashadha", Body::Venus),
    ("uttara_ashadha", "Uttara Ashadha", Body::Sun),
    ("shravana", "Shravana", Body::Moon),
    ("dhanishta", "Dhanishta", Body::Mars),
    ("shatabhisha", "Shatabhisha", Body::Rahu),
    ("purva_bhadrapada", "Purva Bhadrapada", Body::Jupiter),
    ("uttara_bhadrapada", "Uttara Bhadrapada", Body::Saturn),
    ("revati", "Revati", Body::Mercury),
];

#[derive(Debug, Clone, PartialEq)]
pub struct NakshatraBand {
    pub id: &'static str,
    pub name: &'static str,
    pub lord: Body,
    pub start: f64,
    pub end: f64,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NakshatraPlacement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    #[serde(rename = "nakshatraId")]
    pub nakshatra_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lord: Option<Body>,
    #[serde(rename = "startDegree")]
    pub start_degree: f64,
    #[serde(rename = "endDegree")]
    pub end_degree: f64,
    pub offset: f64,
    pub progress: f64,
    pub pada: u8,
    #[serde(rename = "padaFraction")]
    pub pada_fraction: f64,
    pub resolved: bool,
}

impl NakshatraPlacement {
    /// Neutral placement returned when a longitude falls outside every band.
    pub fn unresolved() -> Self {
        Self {
            index: None,
            nakshatra_id: UNKNOWN_NAKSHATRA.to_lowercase(),
            name: UNKNOWN_NAKSHATRA.to_string(),
            lord: None,
            start_degree: 0.0,
            end_degree: 0.0,
            offset: 0.0,
            progress: 0.0,
            pada: 1,
            pada_fraction: 0.0,
            resolved: false,
        }
    }

    /// 1-based nakshatra number, when resolved.
    pub fn number(&self) -> Option<usize> {
        self.index.map(|i| i + 1)
    }
}

fn build_nakshatra_table() -> Vec<NakshatraBand> {
    let last = NAKSHATRA_ORDER.len() - 1;
    NAKSHATRA_ORDER
        .iter()
        .enumerate()
        .map(|(idx, (slug, display_name, lord))| NakshatraBand {
            id: slug,
            name: display_name,
            lord: *lord,
            start: idx as f64 * NAKSHATRA_SEGMENT_SIZE,
            end: if idx == last { 360.0 } else { (idx + 1) as f64 * NAKSHATRA_SEGMENT_SIZE },
            index: idx,
        })
        .collect()
}

lazy_static::lazy_static! {
    static ref NAKSHATRA_TABLE: Vec<NakshatraBand> = build_nakshatra_table();
}

/// Normalize degrees to [0, 360).
pub fn normalize_degrees(value: f64) -> f64 {
    let mut normalized = value % 360.0;
    if normalized < 0.0 {
        normalized += 360.0;
    }
    // -1e-15 + 360.0 rounds to 360.0
    if normalized >= 360.0 {
        normalized -= 360.0;
    }
    normalized
}

/// The fixed 27-band table.
pub fn nakshatra_table() -> &'static [NakshatraBand] {
    &NAKSHATRA_TABLE
}

/// Linear scan for the band whose `[start, end)` contains the longitude.
pub fn find_band(longitude: f64) -> Option<&'static NakshatraBand> {
    let lon = normalize_degrees(longitude);
    NAKSHATRA_TABLE.iter().find(|band| lon >= band.start && lon < band.end)
}

/// Pada (1..=4) for an offset into a band of the given span.
pub fn pada_for_offset(offset: f64, span: f64) -> u8 {
    let quarter = ((offset / span) * 4.0).floor();
    (quarter as i64 + 1).clamp(1, 4) as u8
}

/// Return the placement for the nakshatra containing the given longitude.
///
/// Carries id, name, lord, index, start/end degrees, within-nakshatra
/// offset and progress, pada number, and pada fraction. Longitudes that
/// fail every band yield [`NakshatraPlacement::unresolved`].
pub fn get_nakshatra_for_longitude(longitude: f64) -> NakshatraPlacement {
    let lon = normalize_degrees(longitude);
    let Some(entry) = find_band(lon) else {
        log::warn!("No nakshatra band contains longitude {longitude}; using placeholder");
        return NakshatraPlacement::unresolved();
    };

    let span = entry.end - entry.start;
    let offset = lon - entry.start;
    let pada = pada_for_offset(offset, span);
    let pada_offset = offset - ((pada - 1) as f64 * PADA_SIZE);

    NakshatraPlacement {
        index: Some(entry.index),
        nakshatra_id: entry.id.to_string(),
        name: entry.name.to_string(),
        lord: Some(entry.lord),
        start_degree: entry.start,
        end_degree: entry.end,
        offset,
        progress: offset / span,
        pada,
        pada_fraction: (pada_offset / PADA_SIZE).clamp(0.0, 1.0),
        resolved: true,
    }
}
