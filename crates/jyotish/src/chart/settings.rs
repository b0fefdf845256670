use serde::{Deserialize, Serialize};
use crate::ephemeris::types::NodeMode;
use crate::vedic::chara::CharaSubPeriodRule;
use crate::vedic::dashas::DashaLevel;
use crate::vedic::houses::HouseSystem;
use crate::vedic::properties::PropertySource;
use crate::vedic::vargas::DEFAULT_VARGA_DIVISORS;

/// House code sent to the ephemeris when whole-sign houses are in use.
pub const WHOLE_SIGN_CODE: char = 'W';

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    // Houses
    pub house_system: HouseSystem,
    /// Cusp convention requested from the ephemeris in cusp mode.
    pub house_system_code: char,

    // Bodies
    pub node_mode: NodeMode,
    pub include_outer_planets: bool,

    // Dashas
    pub chara_sub_period_rule: CharaSubPeriodRule,
    pub dasha_depth: DashaLevel,

    // Vargas
    pub varga_divisors: Vec<u32>,

    pub property_source: PropertySource,
}

impl EngineSettings {
    /// Code passed to the ephemeris's house call.
    pub fn effective_house_code(&self) -> char {
        match self.house_system {
            HouseSystem::WholeSign => WHOLE_SIGN_CODE,
            HouseSystem::Cusp => self.house_system_code,
        }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            house_system: HouseSystem::WholeSign,
            house_system_code: 'P', // Placidus

            node_mode: NodeMode::Mean,
            include_outer_planets: true,

            chara_sub_period_rule: CharaSubPeriodRule::Normalized,
            dasha_depth: DashaLevel::Pratyantardasha,

            varga_divisors: DEFAULT_VARGA_DIVISORS.to_vec(),

            property_source: PropertySource::Moon,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_sign_requests_w_code() {
        let mut settings = EngineSettings::default();
        assert_eq!(settings.effective_house_code(), 'W');
        settings.house_system = HouseSystem::Cusp;
        assert_eq!(settings.effective_house_code(), 'P');
    }

    #[test]
    fn test_default_divisors() {
        let settings = EngineSettings::default();
        assert_eq!(settings.varga_divisors, vec![1, 2, 3, 4, 7, 9, 10, 12]);
        assert!(settings.include_outer_planets);
    }
}
