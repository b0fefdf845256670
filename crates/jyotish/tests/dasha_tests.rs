use chrono::{DateTime, Duration, TimeZone, Utc};
use jyotish::ephemeris::RawPosition;
use jyotish::vedic::body::Body;
use jyotish::vedic::chara::{compute_chara_dasha, CharaSubPeriodRule};
use jyotish::vedic::dashas::{compute_vimshottari_dasha, DashaLevel, DashaRuler, VIMSHOTTARI_TOTAL_YEARS};
use jyotish::vedic::rashi::{Rashi, ALL_RASHIS};
use jyotish::vedic::types::BodyPosition;

fn birth() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(1985, 11, 3, 4, 30, 0).unwrap()
}

fn bodies() -> Vec<BodyPosition> {
    [
        (Body::Sun, 200.0),
        (Body::Moon, 45.0),
        (Body::Mars, 310.0),
        (Body::Mercury, 215.0),
        (Body::Jupiter, 290.0),
        (Body::Venus, 170.0),
        (Body::Saturn, 225.0),
        (Body::Rahu, 20.0),
        (Body::Ketu, 200.0),
    ]
    .iter()
    .map(|(body, lon)| BodyPosition::from_raw(*body, &RawPosition::new(*lon, 0.0, 1.0)))
    .collect()
}

#[test]
fn test_vimshottari_closes_the_cycle() {
    for moon in [0.0, 13.0, 45.0, 123.4, 200.0, 359.5] {
        let schedule = compute_vimshottari_dasha(birth(), moon, DashaLevel::Pratyantardasha).unwrap();
        let balance = schedule.balance.as_ref().unwrap();
        assert_eq!(schedule.periods.len(), 9, "moon {moon}");
        assert!(
            (balance.elapsed_years + schedule.total_years() - VIMSHOTTARI_TOTAL_YEARS).abs() < 0.02,
            "moon {moon}"
        );
        assert_eq!(schedule.periods[0].ruler, DashaRuler::Body(balance.lord));
        assert!(schedule.validation.is_valid(), "{:?}", schedule.validation.issues);
    }
}

#[test]
fn test_vimshottari_children_sum_to_parent() {
    let schedule = compute_vimshottari_dasha(birth(), 123.4, DashaLevel::Pratyantardasha).unwrap();
    for major in &schedule.periods {
        assert_eq!(major.children.len(), 9);
        let sum: f64 = major.children.iter().map(|c| c.years).sum();
        assert!((sum - major.years).abs() < 1e-6);
        assert_eq!(major.children[0].ruler, major.ruler);
        assert_eq!(major.children.first().unwrap().start, major.start);
        assert_eq!(major.children.last().unwrap().end, major.end);
        for sub in &major.children {
            let sum: f64 = sub.children.iter().map(|c| c.years).sum();
            assert!((sum - sub.years).abs() < 1e-6);
        }
    }
}

#[test]
fn test_depth_limits_nesting() {
    let schedule = compute_vimshottari_dasha(birth(), 45.0, DashaLevel::Mahadasha).unwrap();
    assert!(schedule.periods.iter().all(|p| p.children.is_empty()));
    let schedule = compute_vimshottari_dasha(birth(), 45.0, DashaLevel::Antardasha).unwrap();
    assert!(schedule.periods[0].children.iter().all(|p| p.children.is_empty()));
}

#[test]
fn test_current_periods_at_instant() {
    let schedule = compute_vimshottari_dasha(birth(), 45.0, DashaLevel::Pratyantardasha).unwrap();
    let active = schedule.current_at(birth() + Duration::days(30));
    let major = active.mahadasha.unwrap();
    assert_eq!(major.ruler, DashaRuler::Body(Body::Moon));
    assert!(active.antardasha.is_some());
    assert!(active.pratyantardasha.is_some());

    let before_birth = schedule.current_at(birth() - Duration::days(1));
    assert!(before_birth.mahadasha.is_none());
}

#[test]
fn test_non_finite_moon_is_rejected() {
    assert!(compute_vimshottari_dasha(birth(), f64::NAN, DashaLevel::Mahadasha).is_err());
}

#[test]
fn test_chara_valid_for_every_ascendant() {
    let positions = bodies();
    for asc in ALL_RASHIS {
        for rule in [CharaSubPeriodRule::Normalized, CharaSubPeriodRule::FixedTwelfths] {
            let schedule = compute_chara_dasha(birth(), asc, &positions, rule, DashaLevel::Pratyantardasha);
            assert_eq!(schedule.periods.len(), 12);
            assert_eq!(schedule.periods[0].ruler, DashaRuler::Sign(asc));
            assert_eq!(schedule.periods[0].start, birth());
            assert!(schedule.validation.is_valid(), "{asc}: {:?}", schedule.validation.issues);
            for major in &schedule.periods {
                assert!((1.0..=12.0).contains(&major.years));
            }
        }
    }
}

#[test]
fn test_chara_years_are_lord_distances() {
    let schedule = compute_chara_dasha(
        birth(),
        Rashi::Aries,
        &bodies(),
        CharaSubPeriodRule::Normalized,
        DashaLevel::Mahadasha,
    );
    // Mars sits in Aquarius: Aries counts 11 signs to it
    assert_eq!(schedule.periods[0].years, 11.0);
    // Venus in Virgo: Taurus counts 5
    assert_eq!(schedule.periods[1].years, 5.0);
    assert_eq!(schedule.sign_lords.len(), 12);
}
