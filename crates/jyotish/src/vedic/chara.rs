//! Jaimini chara dasha: sign-based periods sized by lord distance.
//!
//! Mahadashas run through the twelve signs from the ascendant sign. A
//! sign's years are the inclusive forward count from the sign to the sign
//! its lord occupies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use crate::vedic::body::Body;
use crate::vedic::dashas::{
    validate_periods, Allotment, DashaLevel, DashaRuler, DashaSchedule, DashaSystem, TreeLayout,
};
use crate::vedic::rashi::{Rashi, ALL_RASHIS};
use crate::vedic::types::BodyPosition;

/// How an antardasha's share of its mahadasha is sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharaSubPeriodRule {
    /// Each sub-sign's lord distance over the total of all twelve.
    #[default]
    Normalized,
    /// Twelve equal parts.
    FixedTwelfths,
}

/// Lord distance of one sign, as used for its period length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignLordDistance {
    pub sign: Rashi,
    pub lord: Body,
    pub lord_sign: Rashi,
    pub distance: u32,
    /// The lord had no position, so the sign counted to itself.
    pub lord_missing: bool,
}

/// Lord distances for all twelve signs against a set of positions.
pub fn sign_lord_distances(bodies: &[BodyPosition]) -> BTreeMap<Rashi, SignLordDistance> {
    ALL_RASHIS
        .iter()
        .map(|&sign| {
            let lord = sign.lord();
            let lord_sign = bodies.iter().find(|p| p.body == lord).map(|p| p.sign);
            if lord_sign.is_none() {
                log::warn!("{lord} missing for chara dasha; {sign} counts to itself");
            }
            let target = lord_sign.unwrap_or(sign);
            let entry = SignLordDistance {
                sign,
                lord,
                lord_sign: target,
                distance: sign.forward_distance(target),
                lord_missing: lord_sign.is_none(),
            };
            (sign, entry)
        })
        .collect()
}

fn sub_period_allotment(
    sign: Rashi,
    years: f64,
    distances: &BTreeMap<Rashi, SignLordDistance>,
    rule: CharaSubPeriodRule,
) -> Allotment {
    let sequence = sign.sequence();
    let distance_of = |s: &Rashi| distances.get(s).map_or(1, |d| d.distance) as f64;
    let total: f64 = sequence.iter().map(distance_of).sum();

    sequence
        .iter()
        .map(|s| {
            let share = match rule {
                CharaSubPeriodRule::Normalized if total > 0.0 => distance_of(s) / total,
                _ => 1.0 / 12.0,
            };
            (DashaRuler::Sign(*s), years * share)
        })
        .collect()
}

fn equal_twelfths(sign: Rashi, years: f64) -> Allotment {
    sign.sequence()
        .iter()
        .map(|s| (DashaRuler::Sign(*s), years / 12.0))
        .collect()
}

/// Compute the chara dasha tree from the ascendant sign.
pub fn compute_chara_dasha(
    birth_datetime: DateTime<Utc>,
    ascendant_sign: Rashi,
    bodies: &[BodyPosition],
    rule: CharaSubPeriodRule,
    depth: DashaLevel,
) -> DashaSchedule {
    let distances = sign_lord_distances(bodies);
    let majors: Allotment = ascendant_sign
        .sequence()
        .iter()
        .map(|sign| {
            let years = distances.get(sign).map_or(1, |d| d.distance) as f64;
            (DashaRuler::Sign(*sign), years)
        })
        .collect();

    let split = |ruler: DashaRuler, level: DashaLevel, years: f64| -> Allotment {
        let DashaRuler::Sign(sign) = ruler else {
            return Vec::new();
        };
        match level {
            DashaLevel::Mahadasha => sub_period_allotment(sign, years, &distances, rule),
            _ => equal_twelfths(sign, years),
        }
    };
    let layout = TreeLayout {
        origin: birth_datetime,
        deepest: depth,
        split: &split,
    };
    let periods = layout.periods(majors, DashaLevel::Mahadasha, 0.0, None);
    let validation = validate_periods(&periods);
    log::debug!(
        "Chara: {} mahadashas from {} totalling {} years",
        periods.len(),
        ascendant_sign,
        periods.iter().map(|p| p.years).sum::<f64>()
    );

    DashaSchedule {
        system: DashaSystem::Chara,
        birth_date_time: birth_datetime,
        depth,
        periods,
        balance: None,
        sign_lords: ascendant_sign
            .sequence()
            .iter()
            .filter_map(|s| distances.get(s).copied())
            .collect(),
        validation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::types::RawPosition;
    use chrono::TimeZone;

    fn at(body: Body, lon: f64) -> BodyPosition {
        BodyPosition::from_raw(body, &RawPosition::new(lon, 0.0, 1.0))
    }

    fn sample_bodies() -> Vec<BodyPosition> {
        vec![
            at(Body::Sun, 15.0),
            at(Body::Moon, 95.0),
            at(Body::Mars, 100.0),
            at(Body::Mercury, 200.0),
            at(Body::Jupiter, 250.0),
            at(Body::Venus, 330.0),
            at(Body::Saturn, 290.0),
        ]
    }

    #[test]
    fn test_lord_distance() {
        let distances = sign_lord_distances(&sample_bodies());
        // Aries -> Mars in Cancer: 4 signs inclusive
        assert_eq!(distances[&Rashi::Aries].distance, 4);
        // Cancer -> Moon in Cancer
        assert_eq!(distances[&Rashi::Cancer].distance, 1);
        // Leo -> Sun in Aries
        assert_eq!(distances[&Rashi::Leo].distance, 9);
    }

    #[test]
    fn test_missing_lord_counts_to_itself() {
        let distances = sign_lord_distances(&[at(Body::Sun, 15.0)]);
        assert_eq!(distances[&Rashi::Aries].distance, 1);
        assert!(distances[&Rashi::Aries].lord_missing);
        assert!(!distances[&Rashi::Leo].lord_missing);
    }

    #[test]
    fn test_chara_majors_follow_ascendant() {
        let birth = Utc.with_ymd_and_hms(1990, 5, 15, 9, 0, 0).unwrap();
        let schedule = compute_chara_dasha(
            birth,
            Rashi::Libra,
            &sample_bodies(),
            CharaSubPeriodRule::Normalized,
            DashaLevel::Pratyantardasha,
        );
        assert_eq!(schedule.periods.len(), 12);
        assert_eq!(schedule.periods[0].ruler, DashaRuler::Sign(Rashi::Libra));
        // Libra -> Venus in Pisces
        assert_eq!(schedule.periods[0].years, 6.0);
        assert_eq!(schedule.periods[0].start, birth);
        assert!(schedule.validation.is_valid(), "{:?}", schedule.validation.issues);
        assert_eq!(schedule.sign_lords[0].sign, Rashi::Libra);
    }

    #[test]
    fn test_fixed_twelfths_rule() {
        let birth = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
        let schedule = compute_chara_dasha(
            birth,
            Rashi::Aries,
            &sample_bodies(),
            CharaSubPeriodRule::FixedTwelfths,
            DashaLevel::Antardasha,
        );
        let major = &schedule.periods[0];
        for sub in &major.children {
            assert!((sub.years - major.years / 12.0).abs() < 1e-12);
        }
        assert!(schedule.validation.is_valid());
    }
}
