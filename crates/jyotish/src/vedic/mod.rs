pub mod body;
pub mod chara;
pub mod dashas;
pub mod dignity;
pub mod houses;
pub mod kp;
pub mod nakshatra;
pub mod panchang;
pub mod position;
pub mod properties;
pub mod rashi;
pub mod types;
pub mod vargas;
pub mod yogas;

pub use body::{Body, CLASSICAL_BODIES, NATAL_BODIES, OUTER_BODIES};
pub use chara::{compute_chara_dasha, CharaSubPeriodRule, SignLordDistance};
pub use dashas::{
    compute_vimshottari_dasha, compute_vimshottari_for_bodies, validate_periods, ActivePeriods,
    DashaBalance, DashaLevel, DashaPeriod, DashaRuler, DashaSchedule, DashaSystem, DashaValidation,
};
pub use dignity::{avastha_for, classify_dignity, is_combust, Avastha, Dignity, LordStatus};
pub use houses::{assign_houses, house_lords, CuspSet, HouseLord, HouseSystem, HouseTable};
pub use kp::{kp_details, kp_sub_lord, KpDetails};
pub use nakshatra::{get_nakshatra_for_longitude, normalize_degrees, NakshatraPlacement};
pub use panchang::{compute_panchang, Panchang, PanchangReport};
pub use position::{angular_distance, place, to_dms, Placement};
pub use properties::{vedic_properties, PropertySource, VedicProperties};
pub use rashi::{Modality, Paya, Rashi, Tatva, ALL_RASHIS};
pub use types::{apply_combustion, derive_ketu, Ascendant, BodyPosition};
pub use vargas::{build_varga_chart, build_varga_charts, varga_sign, VargaChart, VargaMode, VargaRule};
pub use yogas::{detect_doshas, detect_yogas, Finding, FindingKind};
