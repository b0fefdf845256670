use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use jyotish::ephemeris::{EphemerisError, RawPosition, RiseSet};
use jyotish::vedic::body::Body;
use jyotish::vedic::houses::HouseSystem;
use jyotish::vedic::properties::PropertySource;
use jyotish::vedic::rashi::Rashi;
use jyotish::{BirthRequest, EngineSettings, FixedEphemeris, GeoLocation, VedicEngine, VedicError};

fn birth() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(1985, 11, 3, 4, 30, 0).unwrap()
}

fn sunrise() -> DateTime<Utc> {
    birth() - Duration::hours(2)
}

fn request() -> BirthRequest {
    BirthRequest::new(birth(), GeoLocation { lat: 28.61, lon: 77.21 }, "Asia/Kolkata")
}

fn ephemeris() -> FixedEphemeris {
    let cusps = (0..12).map(|i| (95.0 + i as f64 * 30.0) % 360.0).collect();
    FixedEphemeris::new()
        .with_body(Body::Sun, 200.0, 1.0)
        .with_body(Body::Moon, 45.0, 13.2)
        .with_body(Body::Mars, 310.0, 0.7)
        .with_body(Body::Mercury, 215.0, -0.3)
        .with_body(Body::Jupiter, 290.0, 0.1)
        .with_body(Body::Venus, 170.0, 1.2)
        .with_body(Body::Saturn, 225.0, 0.05)
        .with_body(Body::Rahu, 20.0, -0.05)
        .with_body(Body::Uranus, 100.0, 0.02)
        .with_body(Body::Neptune, 270.0, 0.01)
        .with_body(Body::Pluto, 210.0, 0.01)
        .with_houses(95.0, cusps)
        .with_rise_set(RiseSet { sunrise: Some(sunrise()), sunset: Some(birth() + Duration::hours(9)) })
}

#[test]
fn test_full_report() {
    let engine = VedicEngine::new(ephemeris(), EngineSettings::default());
    let report = engine.report(&request()).unwrap();

    assert_eq!(report.chart.ascendant.sign, Rashi::Cancer);
    assert_eq!(report.chart.bodies.len(), 12);
    let ketu = report.chart.body(Body::Ketu).unwrap();
    assert!((ketu.longitude - 200.0).abs() < 1e-9);
    assert_eq!(report.chart.body(Body::Mars).unwrap().house, 8);
    assert!(report.chart.body(Body::Mercury).unwrap().retrograde);

    assert_eq!(report.vargas.len(), 8);
    assert!(report.vargas.contains_key("D9"));
    assert_eq!(report.dashas.keys().collect::<Vec<_>>(), vec!["chara", "vimshottari"]);
    assert!(report.dashas.values().all(|d| d.validation.is_valid()));

    assert_eq!(report.planet_details.len(), 10);
    assert_eq!(report.planet_details[0].full_name, "Ascendant");
    assert!(report.planet_details.iter().all(|row| row.body.map_or(true, |b| !b.is_outer())));

    assert_eq!(report.kp.bodies.len(), 12);
    assert_eq!(report.kp.bhav_chalit.len(), 12);

    assert_eq!(report.findings[0].name, "Gajakesari Yoga");
    let doshas: Vec<_> = report.findings.iter().rev().take(3).map(|f| (f.name.as_str(), f.present)).collect();
    assert_eq!(doshas[2], ("Mangal Dosha", true));
    assert_eq!(doshas[0], ("Pitra Dosha", true));

    assert!(report.panchang.sunrise_used);
    assert_eq!(report.panchang.computed_at, sunrise());
    assert_eq!(report.properties.sign, Rashi::Taurus);
    assert_eq!(report.properties.nakshatra, "Rohini");
    assert_eq!(report.properties.pada, 2);
}

#[test]
fn test_outer_planets_optional() {
    let settings = EngineSettings { include_outer_planets: false, ..EngineSettings::default() };
    let engine = VedicEngine::new(ephemeris(), settings);
    let chart = engine.natal_chart(&request()).unwrap();
    assert_eq!(chart.bodies.len(), 9);
    assert!(chart.body(Body::Pluto).is_none());
}

#[test]
fn test_ephemeris_failure_surfaces_unchanged() {
    let engine = VedicEngine::new(FixedEphemeris::new().with_body(Body::Sun, 10.0, 1.0), EngineSettings::default());
    let err = engine.report(&request()).unwrap_err();
    assert!(matches!(
        err,
        VedicError::Ephemeris(EphemerisError::CalculationFailed { body: Body::Moon, .. })
    ));
}

#[test]
fn test_missing_sunrise_uses_birth_instant() {
    let engine = VedicEngine::new(ephemeris().with_rise_set(RiseSet::default()), EngineSettings::default());
    let report = engine.report(&request()).unwrap();
    assert!(!report.panchang.sunrise_used);
    assert_eq!(report.panchang.computed_at, birth());
    assert!(report.panchang.sunrise.is_none());
}

#[test]
fn test_sunrise_moon_properties() {
    let settings = EngineSettings { property_source: PropertySource::SunriseMoon, ..EngineSettings::default() };
    let eph = ephemeris().with_position_at(sunrise(), Body::Moon, RawPosition::new(44.0, 0.0, 13.2));
    let engine = VedicEngine::new(eph, settings);
    let report = engine.report(&request()).unwrap();
    assert!(report.properties.sunrise_used);
    assert_eq!(report.properties.nakshatra, "Rohini");
    assert_eq!(report.properties.pada, 2);
    // Birth chart keeps the birth-instant Moon
    assert_eq!(report.chart.body(Body::Moon).unwrap().longitude, 45.0);
}

#[test]
fn test_cusp_mode_with_short_cusp_list_falls_back() {
    let settings = EngineSettings { house_system: HouseSystem::Cusp, ..EngineSettings::default() };
    let eph = ephemeris().with_houses(95.0, vec![95.0, 125.0]);
    let chart = VedicEngine::new(eph, settings).natal_chart(&request()).unwrap();
    assert!(chart.houses.fallback);
    assert_eq!(chart.houses.system, HouseSystem::WholeSign);
}

#[test]
fn test_wire_names() {
    let engine = VedicEngine::new(ephemeris(), EngineSettings::default());
    let report = engine.report(&request()).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    let sun = &json["chart"]["bodies"][0];
    assert_eq!(sun["body"], "sun");
    assert_eq!(sun["dignity"], "Debilitated");
    assert!(sun.get("isRetrograde").is_some());
    assert!(sun.get("degreeDMS").is_some());
    assert!(sun.get("nakshatraPada").is_some());

    assert_eq!(json["vargas"]["D9"]["mode"], "classical");
    assert_eq!(json["panchang"]["sunriseUsed"], true);
    assert!(json["panchang"].get("tithi").is_some());
    assert_eq!(json["dashas"]["vimshottari"]["periods"][0]["level"], "mahadasha");
    assert_eq!(json["dashas"]["chara"]["periods"][0]["ruler"], "Cancer");
}

#[test]
fn test_local_date_overrides_utc_date() {
    let request = request();
    assert_eq!(request.date(), NaiveDate::from_ymd_opt(1985, 11, 3).unwrap());
    let shifted = request.with_local_date(NaiveDate::from_ymd_opt(1985, 11, 2).unwrap());
    assert_eq!(shifted.date(), NaiveDate::from_ymd_opt(1985, 11, 2).unwrap());
    assert_eq!(shifted.instant, birth());
}
