use jyotish::chart::EngineSettings;
use jyotish::vedic::houses::HouseSystem;
use serde::Deserialize;
use std::fs;

const CONFIG_PATHS: [&str; 2] = ["configs/jyotish.toml", "../../configs/jyotish.toml"];

#[derive(Debug, Clone, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    engine: Option<EngineSettings>,
}

/// Try the usual relative locations of `configs/jyotish.toml`.
pub fn read_jyotish_toml_text() -> anyhow::Result<String> {
    for p in &CONFIG_PATHS {
        if let Ok(c) = fs::read_to_string(p) {
            return Ok(c);
        }
    }
    anyhow::bail!("Could not load jyotish.toml from {:?}", CONFIG_PATHS);
}

/// Parse and validate the `[engine]` table. A missing table yields defaults.
pub fn parse_engine_settings(text: &str) -> anyhow::Result<EngineSettings> {
    let root: RootConfigToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse jyotish.toml engine settings: {e}"))?;
    let settings = root.engine.unwrap_or_default();
    validate_engine_settings(&settings)?;
    Ok(settings)
}

pub fn validate_engine_settings(settings: &EngineSettings) -> anyhow::Result<()> {
    if settings.varga_divisors.is_empty() {
        anyhow::bail!("engine.varga_divisors must list at least one divisor");
    }
    if let Some(bad) = settings.varga_divisors.iter().find(|d| **d == 0) {
        anyhow::bail!("engine.varga_divisors contains {bad}; divisors start at 1");
    }
    if settings.house_system == HouseSystem::Cusp && !settings.house_system_code.is_ascii_alphabetic() {
        anyhow::bail!(
            "engine.house_system_code must be an ASCII letter, got {:?}",
            settings.house_system_code
        );
    }
    Ok(())
}

/// Settings from `configs/jyotish.toml`, or defaults when no file is found.
/// A file that exists but fails to parse or validate is an error.
pub fn load_engine_settings() -> anyhow::Result<EngineSettings> {
    match read_jyotish_toml_text() {
        Ok(text) => parse_engine_settings(&text),
        Err(e) => {
            log::debug!("{e}; using default engine settings");
            Ok(EngineSettings::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jyotish::vedic::chara::CharaSubPeriodRule;
    use jyotish::vedic::dashas::DashaLevel;
    use jyotish::vedic::properties::PropertySource;

    #[test]
    fn test_empty_file_gives_defaults() {
        assert_eq!(parse_engine_settings("").unwrap(), EngineSettings::default());
    }

    #[test]
    fn test_partial_engine_table() {
        let text = r#"
[engine]
house_system = "cusp"
house_system_code = "K"
chara_sub_period_rule = "fixed_twelfths"
dasha_depth = "antardasha"
property_source = "sunriseMoon"
varga_divisors = [1, 9, 60]
"#;
        let settings = parse_engine_settings(text).unwrap();
        assert_eq!(settings.house_system, HouseSystem::Cusp);
        assert_eq!(settings.house_system_code, 'K');
        assert_eq!(settings.chara_sub_period_rule, CharaSubPeriodRule::FixedTwelfths);
        assert_eq!(settings.dasha_depth, DashaLevel::Antardasha);
        assert_eq!(settings.property_source, PropertySource::SunriseMoon);
        assert_eq!(settings.varga_divisors, vec![1, 9, 60]);
        assert!(settings.include_outer_planets);
    }

    #[test]
    fn test_zero_divisor_rejected() {
        let err = parse_engine_settings("[engine]\nvarga_divisors = [1, 0]\n").unwrap_err();
        assert!(err.to_string().contains("divisors start at 1"));
    }

    #[test]
    fn test_bad_house_code_rejected() {
        let text = "[engine]\nhouse_system = \"cusp\"\nhouse_system_code = \"7\"\n";
        assert!(parse_engine_settings(text).is_err());
    }

    #[test]
    fn test_unknown_rule_is_parse_error() {
        let text = "[engine]\nchara_sub_period_rule = \"sideways\"\n";
        assert!(parse_engine_settings(text).is_err());
    }
}
