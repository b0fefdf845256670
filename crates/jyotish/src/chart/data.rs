use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::ephemeris::types::{GeoLocation, RawHouses, RawPosition};
use crate::vedic::body::Body;
use crate::vedic::houses::{assign_houses, house_lords, HouseLord, HouseSystem, HouseTable};
use crate::vedic::types::{apply_combustion, derive_ketu, Ascendant, BodyPosition};

/// Resolved natal chart: bodies with houses, ascendant and house table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NatalChart {
    pub birth_date_time: DateTime<Utc>,
    pub location: GeoLocation,
    pub ascendant: Ascendant,
    pub bodies: Vec<BodyPosition>,
    pub houses: HouseTable,
    pub house_lords: Vec<HouseLord>,
}

impl NatalChart {
    /// Assemble from raw ephemeris output. Ketu is derived from Rahu when
    /// not supplied.
    pub fn from_raw(
        birth_date_time: DateTime<Utc>,
        location: GeoLocation,
        raw_positions: &[(Body, RawPosition)],
        raw_houses: &RawHouses,
        house_system: HouseSystem,
    ) -> Self {
        let mut bodies: Vec<BodyPosition> = raw_positions
            .iter()
            .filter(|(body, _)| *body != Body::Ketu)
            .map(|(body, raw)| BodyPosition::from_raw(*body, raw))
            .collect();
        if let Some((_, rahu)) = raw_positions.iter().find(|(body, _)| *body == Body::Rahu) {
            bodies.push(BodyPosition::from_raw(Body::Ketu, &derive_ketu(rahu)));
        }
        apply_combustion(&mut bodies);

        let ascendant = Ascendant::from_longitude(raw_houses.ascendant);
        let houses = assign_houses(&ascendant, &mut bodies, house_system, Some(&raw_houses.cusps));
        let house_lords = house_lords(ascendant.sign, &bodies);

        Self {
            birth_date_time,
            location,
            ascendant,
            bodies,
            houses,
            house_lords,
        }
    }

    pub fn body(&self, body: Body) -> Option<&BodyPosition> {
        self.bodies.iter().find(|p| p.body == body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_ketu_derived_and_housed() {
        let birth = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        let raw = vec![
            (Body::Sun, RawPosition::new(280.0, 0.0, 1.0)),
            (Body::Rahu, RawPosition::new(95.0, 0.0, -0.05)),
        ];
        let houses = RawHouses { ascendant: 5.0, cusps: Vec::new() };
        let chart = NatalChart::from_raw(
            birth,
            GeoLocation { lat: 0.0, lon: 0.0 },
            &raw,
            &houses,
            HouseSystem::WholeSign,
        );
        let ketu = chart.body(Body::Ketu).unwrap();
        assert_eq!(ketu.longitude, 275.0);
        assert_eq!(ketu.house, 10);
        assert_eq!(chart.body(Body::Rahu).unwrap().house, 4);
        assert_eq!(chart.house_lords.len(), 12);
    }

    #[test]
    fn test_ketu_opposes_stored_rahu_for_unreduced_input() {
        let birth = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        let houses = RawHouses { ascendant: 5.0, cusps: Vec::new() };
        for raw_rahu in [-0.1, -12.3456789, 360.7, 719.99] {
            let raw = vec![(Body::Rahu, RawPosition::new(raw_rahu, 0.0, -0.05))];
            let chart = NatalChart::from_raw(
                birth,
                GeoLocation { lat: 0.0, lon: 0.0 },
                &raw,
                &houses,
                HouseSystem::WholeSign,
            );
            let rahu = chart.body(Body::Rahu).unwrap().longitude;
            let ketu = chart.body(Body::Ketu).unwrap().longitude;
            assert_eq!(ketu, (rahu + 180.0) % 360.0, "raw {raw_rahu}");
        }
    }
}
