//! Yoga and dosha detection helpers for Vedic astrology.
//!
//! Each rule is a fixed pattern match over resolved bodies and houses.
//! Identical inputs always yield identical findings.

use serde::{Deserialize, Serialize};
use crate::vedic::body::Body;
use crate::vedic::dignity::{classify_dignity, Dignity};
use crate::vedic::types::BodyPosition;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingKind {
    Yoga,
    Dosha,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strength {
    Strong,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub name: String,
    pub kind: FindingKind,
    pub present: bool,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<Strength>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remedies: Vec<String>,
}

impl Finding {
    fn yoga(name: &str, present: bool, description: String, strength: Strength) -> Self {
        Self {
            name: name.to_string(),
            kind: FindingKind::Yoga,
            present,
            description,
            strength: Some(strength),
            remedies: Vec::new(),
        }
    }

    fn dosha(name: &str, present: bool, description: &str, remedies: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            kind: FindingKind::Dosha,
            present,
            description: description.to_string(),
            strength: None,
            remedies: remedies.iter().map(|r| r.to_string()).collect(),
        }
    }
}

const KENDRAS: [u8; 4] = [1, 4, 7, 10];
const MANGAL_HOUSES: [u8; 5] = [1, 4, 7, 8, 12];

fn find(bodies: &[BodyPosition], body: Body) -> Option<&BodyPosition> {
    bodies.iter().find(|p| p.body == body)
}

/// Gajakesari and simplified Neecha Bhanga.
///
/// Gajakesari is always reported with its presence flag. Neecha Bhanga is
/// reported once per debilitated body.
pub fn detect_yogas(bodies: &[BodyPosition]) -> Vec<Finding> {
    let mut findings = Vec::new();

    let gajakesari = match (find(bodies, Body::Moon), find(bodies, Body::Jupiter)) {
        (Some(moon), Some(jupiter)) => {
            KENDRAS.contains(&moon.house) && KENDRAS.contains(&jupiter.house)
        }
        _ => false,
    };
    findings.push(Finding::yoga(
        "Gajakesari Yoga",
        gajakesari,
        "Moon and Jupiter in kendras from ascendant".to_string(),
        Strength::Strong,
    ));

    for position in bodies {
        if classify_dignity(position.body, position.sign) != Dignity::Debilitated {
            continue;
        }
        let lord = position.sign.lord();
        let cancelled = find(bodies, lord)
            .map(|l| classify_dignity(lord, l.sign) == Dignity::Exalted)
            .unwrap_or(false);
        let description = if cancelled {
            format!("{} debilitation cancelled by exalted {}", position.body, lord)
        } else {
            format!("{} debilitated; {} not exalted", position.body, lord)
        };
        findings.push(Finding::yoga(
            "Neecha Bhanga (simplified)",
            cancelled,
            description,
            Strength::Medium,
        ));
    }

    findings
}

/// Whether every classical body sits inside the closed span between the
/// nodes, or every one sits outside it. Both count as Kaal Sarp.
fn kaal_sarp(bodies: &[BodyPosition]) -> bool {
    let (Some(rahu), Some(ketu)) = (find(bodies, Body::Rahu), find(bodies, Body::Ketu)) else {
        return false;
    };
    let lo = rahu.longitude.min(ketu.longitude);
    let hi = rahu.longitude.max(ketu.longitude);
    let classical: Vec<f64> = bodies
        .iter()
        .filter(|p| p.body.is_classical())
        .map(|p| p.longitude)
        .collect();
    if classical.is_empty() {
        return false;
    }
    let within = |lon: &f64| (lo..=hi).contains(lon);
    classical.iter().all(within) || !classical.iter().any(within)
}

/// Mangal, Kaal Sarp and Pitra doshas, always reported with presence flags.
pub fn detect_doshas(bodies: &[BodyPosition]) -> Vec<Finding> {
    let mangal = find(bodies, Body::Mars)
        .map(|mars| MANGAL_HOUSES.contains(&mars.house))
        .unwrap_or(false);

    let pitra = find(bodies, Body::Sun)
        .map(|sun| {
            [Body::Rahu, Body::Ketu]
                .iter()
                .filter_map(|node| find(bodies, *node))
                .any(|node| node.sign == sun.sign)
        })
        .unwrap_or(false);

    vec![
        Finding::dosha(
            "Mangal Dosha",
            mangal,
            "Mars in 1/4/7/8/12 (simplified)",
            &["Hanuman Chalisa", "Kumbh Vivah"],
        ),
        Finding::dosha(
            "Kaal Sarp Dosha",
            kaal_sarp(bodies),
            "All planets confined between Rahu and Ketu (simplified)",
            &["Rahu-Ketu Shanti"],
        ),
        Finding::dosha(
            "Pitra Dosha",
            pitra,
            "Sun afflicted by nodes (sign-conjunction)",
            &["Pitru Tarpan", "Rahu/Ketu Shanti"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::types::RawPosition;

    fn at(body: Body, lon: f64, house: u8) -> BodyPosition {
        let mut p = BodyPosition::from_raw(body, &RawPosition::new(lon, 0.0, 1.0));
        p.house = house;
        p
    }

    #[test]
    fn test_gajakesari_in_kendras() {
        let bodies = vec![at(Body::Moon, 10.0, 1), at(Body::Jupiter, 100.0, 4)];
        assert!(detect_yogas(&bodies)[0].present);
        let bodies = vec![at(Body::Moon, 10.0, 2), at(Body::Jupiter, 100.0, 4)];
        assert!(!detect_yogas(&bodies)[0].present);
    }

    #[test]
    fn test_neecha_bhanga() {
        // Mars debilitated in Cancer; Moon (lord of Cancer) exalted in Taurus
        let bodies = vec![at(Body::Mars, 100.0, 4), at(Body::Moon, 40.0, 2)];
        let findings = detect_yogas(&bodies);
        let neecha: Vec<_> = findings.iter().filter(|f| f.name.starts_with("Neecha")).collect();
        assert_eq!(neecha.len(), 1);
        assert!(neecha[0].present);
        assert_eq!(neecha[0].description, "Mars debilitation cancelled by exalted Moon");
    }

    #[test]
    fn test_mangal_dosha_houses() {
        for (house, expected) in [(1, true), (2, false), (8, true), (12, true), (0, false)] {
            let doshas = detect_doshas(&[at(Body::Mars, 0.0, house)]);
            assert_eq!(doshas[0].present, expected, "house {house}");
        }
    }

    #[test]
    fn test_kaal_sarp_inside_or_outside() {
        let mut bodies = vec![at(Body::Rahu, 10.0, 1), at(Body::Ketu, 190.0, 7)];
        for (body, lon) in [(Body::Sun, 20.0), (Body::Moon, 50.0), (Body::Saturn, 190.0)] {
            bodies.push(at(body, lon, 0));
        }
        assert!(detect_doshas(&bodies)[1].present);

        let mut outside = vec![at(Body::Rahu, 10.0, 1), at(Body::Ketu, 190.0, 7)];
        outside.push(at(Body::Sun, 200.0, 0));
        outside.push(at(Body::Moon, 5.0, 0));
        assert!(detect_doshas(&outside)[1].present);

        bodies.push(at(Body::Mars, 250.0, 0));
        assert!(!detect_doshas(&bodies)[1].present);
    }

    #[test]
    fn test_pitra_dosha_sign_conjunction() {
        let bodies = vec![at(Body::Sun, 15.0, 1), at(Body::Rahu, 200.0, 7), at(Body::Ketu, 20.0, 1)];
        assert!(detect_doshas(&bodies)[2].present);
    }
}
