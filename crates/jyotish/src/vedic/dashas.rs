//! Vimshottari dasha calculations and the period tree shared by every dasha
//! system.
//!
//! Dashas are time periods ruled by planets (or signs), nested three levels
//! deep: mahadasha, antardasha, pratyantardasha. Calendar boundaries are
//! computed from the birth instant as `round(offset_years * 365.25)` days,
//! so consecutive periods share their boundary instant exactly.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use crate::error::{Result, VedicError};
use crate::vedic::body::Body;
use crate::vedic::chara::SignLordDistance;
use crate::vedic::nakshatra::get_nakshatra_for_longitude;
use crate::vedic::rashi::Rashi;
use crate::vedic::types::BodyPosition;

pub const VIMSHOTTARI_TOTAL_YEARS: f64 = 120.0;
pub const DAYS_PER_YEAR: f64 = 365.25;
/// Slack allowed when closing the 120-year cycle.
pub const CYCLE_TOLERANCE_YEARS: f64 = 0.01;
/// Allowed gap between a period's years and the sum of its children.
pub const SUM_TOLERANCE_YEARS: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashaLevel {
    Mahadasha,
    Antardasha,
    Pratyantardasha,
}

impl DashaLevel {
    pub const fn child(self) -> Option<Self> {
        match self {
            Self::Mahadasha => Some(Self::Antardasha),
            Self::Antardasha => Some(Self::Pratyantardasha),
            Self::Pratyantardasha => None,
        }
    }

    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::Mahadasha => "MD",
            Self::Antardasha => "AD",
            Self::Pratyantardasha => "PD",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashaSystem {
    Vimshottari,
    Chara,
}

impl DashaSystem {
    pub const fn key(self) -> &'static str {
        match self {
            Self::Vimshottari => "vimshottari",
            Self::Chara => "chara",
        }
    }
}

/// Owner of a period: a body (Vimshottari) or a sign (Chara).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DashaRuler {
    Body(Body),
    Sign(Rashi),
}

impl fmt::Display for DashaRuler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Body(body) => fmt::Display::fmt(body, f),
            Self::Sign(sign) => fmt::Display::fmt(sign, f),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashaPeriod {
    pub ruler: DashaRuler,
    pub level: DashaLevel,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub years: f64,
    pub duration_days: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DashaPeriod>,
}

impl DashaPeriod {
    /// Half-open containment, `[start, end)`.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    fn summary(&self) -> PeriodSummary {
        PeriodSummary {
            ruler: self.ruler,
            level: self.level,
            start: self.start,
            end: self.end,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    pub ruler: DashaRuler,
    pub level: DashaLevel,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Periods running at an instant. Each level is absent when nothing at that
/// level contains the instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivePeriods {
    pub mahadasha: Option<PeriodSummary>,
    pub antardasha: Option<PeriodSummary>,
    pub pratyantardasha: Option<PeriodSummary>,
}

/// Where the Moon's nakshatra left the first mahadasha at birth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashaBalance {
    pub lord: Body,
    pub nakshatra: String,
    pub elapsed_fraction: f64,
    pub elapsed_years: f64,
    pub balance_years: f64,
}

/// Sum and continuity findings. Reported as data, never raised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashaValidation {
    pub sub_sum: bool,
    pub sub_sub_sum: bool,
    pub continuity: bool,
    pub issues: Vec<String>,
}

impl DashaValidation {
    pub fn is_valid(&self) -> bool {
        self.sub_sum && self.sub_sub_sum && self.continuity
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashaSchedule {
    pub system: DashaSystem,
    pub birth_date_time: DateTime<Utc>,
    pub depth: DashaLevel,
    pub periods: Vec<DashaPeriod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<DashaBalance>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sign_lords: Vec<SignLordDistance>,
    pub validation: DashaValidation,
}

impl DashaSchedule {
    /// Years covered by the mahadashas, from birth.
    pub fn total_years(&self) -> f64 {
        self.periods.iter().map(|p| p.years).sum()
    }

    /// First mahadasha, antardasha and pratyantardasha containing `instant`.
    pub fn current_at(&self, instant: DateTime<Utc>) -> ActivePeriods {
        let major = self.periods.iter().find(|p| p.contains(instant));
        let sub = major.and_then(|m| m.children.iter().find(|p| p.contains(instant)));
        let sub_sub = sub.and_then(|s| s.children.iter().find(|p| p.contains(instant)));
        ActivePeriods {
            mahadasha: major.map(DashaPeriod::summary),
            antardasha: sub.map(DashaPeriod::summary),
            pratyantardasha: sub_sub.map(DashaPeriod::summary),
        }
    }
}

/// Ordered rulers with their years, for one level of a tree.
pub(crate) type Allotment = Vec<(DashaRuler, f64)>;

pub(crate) fn offset_instant(origin: DateTime<Utc>, offset_years: f64) -> DateTime<Utc> {
    origin + Duration::days((offset_years * DAYS_PER_YEAR).round() as i64)
}

/// Lays out nested periods from a birth instant. `split` yields the
/// children of a period from its ruler, level and years.
pub(crate) struct TreeLayout<'a> {
    pub origin: DateTime<Utc>,
    pub deepest: DashaLevel,
    pub split: &'a dyn Fn(DashaRuler, DashaLevel, f64) -> Allotment,
}

impl TreeLayout<'_> {
    /// Consecutive periods starting at `start_offset` years from the origin.
    /// With `end_offset` the last period is closed exactly on it.
    pub(crate) fn periods(
        &self,
        allotment: Allotment,
        level: DashaLevel,
        start_offset: f64,
        end_offset: Option<f64>,
    ) -> Vec<DashaPeriod> {
        let count = allotment.len();
        let (_, periods) = allotment.into_iter().enumerate().fold(
            (start_offset, Vec::with_capacity(count)),
            |(cursor, mut acc), (i, (ruler, years))| {
                let end = match end_offset {
                    Some(end) if i + 1 == count => end,
                    _ => cursor + years,
                };
                acc.push(self.period(ruler, level, years, cursor, end));
                (end, acc)
            },
        );
        periods
    }

    fn period(
        &self,
        ruler: DashaRuler,
        level: DashaLevel,
        years: f64,
        start_offset: f64,
        end_offset: f64,
    ) -> DashaPeriod {
        let children = match level.child() {
            Some(next) if level < self.deepest => {
                self.periods((self.split)(ruler, level, years), next, start_offset, Some(end_offset))
            }
            _ => Vec::new(),
        };
        DashaPeriod {
            ruler,
            level,
            start: offset_instant(self.origin, start_offset),
            end: offset_instant(self.origin, end_offset),
            years,
            duration_days: years * DAYS_PER_YEAR,
            children,
        }
    }
}

/// Check that every period's children sum to it and that all siblings are
/// contiguous.
pub fn validate_periods(periods: &[DashaPeriod]) -> DashaValidation {
    let mut validation = DashaValidation {
        sub_sum: true,
        sub_sub_sum: true,
        continuity: true,
        issues: Vec::new(),
    };

    for pair in periods.windows(2) {
        if pair[0].end != pair[1].start {
            validation.continuity = false;
            validation.issues.push(format!(
                "MD continuity break: {} -> {}",
                pair[0].end, pair[1].start
            ));
        }
    }

    for major in periods {
        check_children(major, &major.ruler.to_string(), &mut validation);
        for sub in &major.children {
            check_children(sub, &format!("{}/{}", major.ruler, sub.ruler), &mut validation);
        }
    }

    if !validation.issues.is_empty() {
        log::warn!("Dasha validation found {} issue(s)", validation.issues.len());
    }
    validation
}

fn check_children(parent: &DashaPeriod, path: &str, validation: &mut DashaValidation) {
    let Some(child_level) = parent.children.first().map(|c| c.level) else {
        return;
    };
    let label = child_level.abbreviation();

    let mut previous_end = parent.start;
    for child in &parent.children {
        if child.start != previous_end {
            validation.continuity = false;
            validation.issues.push(format!(
                "{label} continuity break in {path}: {previous_end} -> {}",
                child.start
            ));
        }
        previous_end = child.end;
    }
    if previous_end != parent.end {
        validation.continuity = false;
        validation.issues.push(format!(
            "{label} end mismatch in {path}: {previous_end} vs {}",
            parent.end
        ));
    }

    let sum: f64 = parent.children.iter().map(|c| c.years).sum();
    if (sum - parent.years).abs() > SUM_TOLERANCE_YEARS {
        match child_level {
            DashaLevel::Pratyantardasha => validation.sub_sub_sum = false,
            _ => validation.sub_sum = false,
        }
        validation.issues.push(format!(
            "{label} sum mismatch in {path}: {sum} vs {}",
            parent.years
        ));
    }
}

/// Vimshottari order and full allocations in years.
pub const VIMSHOTTARI_SEQUENCE: [(Body, f64); 9] = [
    (Body::Ketu, 7.0),
    (Body::Venus, 20.0),
    (Body::Sun, 6.0),
    (Body::Moon, 10.0),
    (Body::Mars, 7.0),
    (Body::Rahu, 18.0),
    (Body::Jupiter, 16.0),
    (Body::Saturn, 19.0),
    (Body::Mercury, 17.0),
];

pub fn vimshottari_years(body: Body) -> Option<f64> {
    VIMSHOTTARI_SEQUENCE
        .iter()
        .find(|(b, _)| *b == body)
        .map(|(_, years)| *years)
}

/// The nine-body sequence rotated to start at `lord`. Bodies outside the
/// sequence start from Ketu.
pub fn vimshottari_sequence_from(lord: Body) -> impl Iterator<Item = (Body, f64)> + Clone {
    let start = VIMSHOTTARI_SEQUENCE
        .iter()
        .position(|(b, _)| *b == lord)
        .unwrap_or(0);
    (0..VIMSHOTTARI_SEQUENCE.len()).map(move |i| VIMSHOTTARI_SEQUENCE[(start + i) % VIMSHOTTARI_SEQUENCE.len()])
}

fn vimshottari_split(ruler: DashaRuler, _level: DashaLevel, years: f64) -> Allotment {
    let DashaRuler::Body(lord) = ruler else {
        return Vec::new();
    };
    vimshottari_sequence_from(lord)
        .map(|(body, allocation)| {
            (DashaRuler::Body(body), years * (allocation / VIMSHOTTARI_TOTAL_YEARS))
        })
        .collect()
}

/// Compute Vimshottari dasha periods based on the Moon's sidereal longitude.
///
/// The first mahadasha carries only the balance left by the Moon's progress
/// through its nakshatra; the rest follow in order until the cycle, counted
/// from the first period's true start, reaches 120 years.
pub fn compute_vimshottari_dasha(
    birth_datetime: DateTime<Utc>,
    moon_longitude: f64,
    depth: DashaLevel,
) -> Result<DashaSchedule> {
    let moon_meta = get_nakshatra_for_longitude(moon_longitude);
    let Some(start_lord) = moon_meta.lord else {
        return Err(VedicError::MissingBody { body: Body::Moon });
    };
    let full_years = vimshottari_years(start_lord).unwrap_or(0.0);
    let elapsed_years = moon_meta.progress * full_years;
    let balance_years = full_years - elapsed_years;

    let mut majors: Allotment = Vec::with_capacity(VIMSHOTTARI_SEQUENCE.len());
    let mut cumulative = elapsed_years;
    for (i, (lord, years)) in vimshottari_sequence_from(start_lord).cycle().enumerate() {
        if cumulative >= VIMSHOTTARI_TOTAL_YEARS - CYCLE_TOLERANCE_YEARS {
            break;
        }
        let effective = if i == 0 { balance_years } else { years };
        majors.push((DashaRuler::Body(lord), effective));
        cumulative += effective;
    }

    let layout = TreeLayout {
        origin: birth_datetime,
        deepest: depth,
        split: &vimshottari_split,
    };
    let periods = layout.periods(majors, DashaLevel::Mahadasha, 0.0, None);
    let validation = validate_periods(&periods);
    log::debug!(
        "Vimshottari: {} mahadashas from {} (balance {:.4}y)",
        periods.len(),
        start_lord,
        balance_years
    );

    Ok(DashaSchedule {
        system: DashaSystem::Vimshottari,
        birth_date_time: birth_datetime,
        depth,
        periods,
        balance: Some(DashaBalance {
            lord: start_lord,
            nakshatra: moon_meta.name,
            elapsed_fraction: moon_meta.progress,
            elapsed_years,
            balance_years,
        }),
        sign_lords: Vec::new(),
        validation,
    })
}

/// Vimshottari from a resolved body list. Fails when the Moon is absent.
pub fn compute_vimshottari_for_bodies(
    birth_datetime: DateTime<Utc>,
    bodies: &[BodyPosition],
    depth: DashaLevel,
) -> Result<DashaSchedule> {
    let moon = bodies
        .iter()
        .find(|p| p.body == Body::Moon)
        .ok_or(VedicError::MissingBody { body: Body::Moon })?;
    compute_vimshottari_dasha(birth_datetime, moon.longitude, depth)
}
