//! The Vedic pipeline: ephemeris reads, natal chart assembly and every
//! derived computation.

pub mod data;
pub mod details;
pub mod settings;

pub use data::NatalChart;
pub use details::{planet_details, PlanetDetail};
pub use settings::EngineSettings;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use crate::ephemeris::provider::Ephemeris;
use crate::ephemeris::types::{GeoLocation, RawPosition, RiseSet};
use crate::error::{Result, VedicError};
use crate::vedic::body::{Body, CLASSICAL_BODIES, OUTER_BODIES};
use crate::vedic::chara::compute_chara_dasha;
use crate::vedic::dashas::{compute_vimshottari_for_bodies, DashaSchedule, DashaSystem};
use crate::vedic::kp::{kp_details, KpDetails};
use crate::vedic::panchang::{compute_panchang, PanchangReport};
use crate::vedic::position::place;
use crate::vedic::properties::{vedic_properties, PropertySource, VedicProperties};
use crate::vedic::vargas::{build_varga_charts, VargaChart};
use crate::vedic::yogas::{detect_doshas, detect_yogas, Finding};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthRequest {
    pub instant: DateTime<Utc>,
    pub location: GeoLocation,
    /// IANA zone name, forwarded to the ephemeris for rise/set.
    pub timezone: String,
    /// Local calendar date of birth. Defaults to the UTC date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_date: Option<NaiveDate>,
}

impl BirthRequest {
    pub fn new(instant: DateTime<Utc>, location: GeoLocation, timezone: impl Into<String>) -> Self {
        Self {
            instant,
            location,
            timezone: timezone.into(),
            local_date: None,
        }
    }

    pub fn with_local_date(mut self, date: NaiveDate) -> Self {
        self.local_date = Some(date);
        self
    }

    pub fn date(&self) -> NaiveDate {
        self.local_date.unwrap_or_else(|| self.instant.date_naive())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VedicReport {
    pub chart: NatalChart,
    pub planet_details: Vec<PlanetDetail>,
    pub vargas: BTreeMap<String, VargaChart>,
    /// Keyed by system name ("vimshottari", "chara").
    pub dashas: BTreeMap<String, DashaSchedule>,
    pub kp: KpDetails,
    pub findings: Vec<Finding>,
    pub panchang: PanchangReport,
    pub properties: VedicProperties,
}

pub struct VedicEngine<E: Ephemeris> {
    ephemeris: E,
    settings: EngineSettings,
}

impl<E: Ephemeris> VedicEngine<E> {
    pub fn new(ephemeris: E, settings: EngineSettings) -> Self {
        Self { ephemeris, settings }
    }

    /// Bodies requested from the ephemeris. Ketu is derived, never requested.
    pub fn requested_bodies(&self) -> Vec<Body> {
        let mut bodies: Vec<Body> = CLASSICAL_BODIES.to_vec();
        bodies.push(Body::Rahu);
        if self.settings.include_outer_planets {
            bodies.extend(OUTER_BODIES);
        }
        bodies
    }

    pub fn natal_chart(&self, request: &BirthRequest) -> Result<NatalChart> {
        let raw_positions = self
            .requested_bodies()
            .into_iter()
            .map(|body| {
                self.ephemeris
                    .position(request.instant, body, self.settings.node_mode)
                    .map(|raw| (body, raw))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let raw_houses = self.ephemeris.house_cusps(
            request.instant,
            &request.location,
            self.settings.effective_house_code(),
        )?;

        let chart = NatalChart::from_raw(
            request.instant,
            request.location,
            &raw_positions,
            &raw_houses,
            self.settings.house_system,
        );
        log::debug!(
            "Natal chart: {} bodies, {} rising, {:?} houses{}",
            chart.bodies.len(),
            chart.ascendant.sign,
            chart.houses.system,
            if chart.houses.fallback { " (fallback)" } else { "" }
        );
        Ok(chart)
    }

    /// Rise/set for the birth date. Provider failures count as unavailable.
    pub fn rise_set(&self, request: &BirthRequest) -> RiseSet {
        match self.ephemeris.rise_set(request.date(), &request.timezone, &request.location) {
            Ok(rise_set) => rise_set,
            Err(err) => {
                log::warn!("Rise/set unavailable: {err}");
                RiseSet::default()
            }
        }
    }

    fn position_at(&self, instant: DateTime<Utc>, body: Body, chart: &NatalChart) -> Result<RawPosition> {
        if instant == chart.birth_date_time {
            return chart
                .body(body)
                .map(|p| RawPosition::new(p.longitude, p.latitude, p.speed))
                .ok_or(VedicError::MissingBody { body });
        }
        Ok(self.ephemeris.position(instant, body, self.settings.node_mode)?)
    }

    /// Panchang at sunrise when available, otherwise at the birth instant.
    pub fn panchang(&self, chart: &NatalChart, rise_set: RiseSet) -> Result<PanchangReport> {
        let at = rise_set.sunrise.unwrap_or_else(|| {
            log::warn!("No sunrise available; panchang uses the birth instant");
            chart.birth_date_time
        });
        let sun = self.position_at(at, Body::Sun, chart)?;
        let moon = self.position_at(at, Body::Moon, chart)?;
        Ok(PanchangReport::new(compute_panchang(sun.lon, moon.lon), at, rise_set))
    }

    pub fn properties(&self, chart: &NatalChart, rise_set: RiseSet) -> Result<VedicProperties> {
        let source = self.settings.property_source;
        let properties = match source {
            PropertySource::Ascendant => vedic_properties(source, &place(chart.ascendant.longitude), false),
            PropertySource::Moon => {
                let moon = self.position_at(chart.birth_date_time, Body::Moon, chart)?;
                vedic_properties(source, &place(moon.lon), false)
            }
            PropertySource::SunriseMoon => {
                let at = rise_set.sunrise.unwrap_or(chart.birth_date_time);
                let moon = self.position_at(at, Body::Moon, chart)?;
                vedic_properties(source, &place(moon.lon), rise_set.sunrise.is_some())
            }
        };
        Ok(properties)
    }

    /// Both dasha trees keyed by system name.
    pub fn dashas(&self, chart: &NatalChart) -> Result<BTreeMap<String, DashaSchedule>> {
        let depth = self.settings.dasha_depth;
        let vimshottari = compute_vimshottari_for_bodies(chart.birth_date_time, &chart.bodies, depth)?;
        let chara = compute_chara_dasha(
            chart.birth_date_time,
            chart.ascendant.sign,
            &chart.bodies,
            self.settings.chara_sub_period_rule,
            depth,
        );
        Ok(BTreeMap::from([
            (DashaSystem::Vimshottari.key().to_string(), vimshottari),
            (DashaSystem::Chara.key().to_string(), chara),
        ]))
    }

    pub fn report(&self, request: &BirthRequest) -> Result<VedicReport> {
        let chart = self.natal_chart(request)?;
        let rise_set = self.rise_set(request);

        let details = planet_details(&chart);
        let vargas = build_varga_charts(&chart.ascendant, &chart.bodies, &self.settings.varga_divisors)?;
        let dashas = self.dashas(&chart)?;
        let kp = kp_details(&chart.houses, &chart.bodies);
        let mut findings = detect_yogas(&chart.bodies);
        findings.extend(detect_doshas(&chart.bodies));
        let panchang = self.panchang(&chart, rise_set)?;
        let properties = self.properties(&chart, rise_set)?;

        log::debug!(
            "Report: {} vargas, {} dasha systems, {} findings",
            vargas.len(),
            dashas.len(),
            findings.len()
        );

        Ok(VedicReport {
            chart,
            planet_details: details,
            vargas,
            dashas,
            kp,
            findings,
            panchang,
            properties,
        })
    }
}
