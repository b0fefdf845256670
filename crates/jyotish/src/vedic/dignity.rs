//! Dignities, avasthas and combustion for Vedic astrology.
//!
//! Classification precedence is fixed: exalted, debilitated, own sign,
//! mooltrikona, friendly, enemy, neutral. Only the seven classical bodies
//! carry a dignity table; nodes and outer planets are always neutral.

use serde::{Deserialize, Serialize};
use std::fmt;
use crate::vedic::body::Body;
use crate::vedic::position::angular_distance;
use crate::vedic::rashi::Rashi;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dignity {
    Exalted,
    Debilitated,
    #[serde(rename = "Own Sign")]
    OwnSign,
    Mooltrikona,
    Friendly,
    Enemy,
    Neutral,
}

impl Dignity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Exalted => "Exalted",
            Self::Debilitated => "Debilitated",
            Self::OwnSign => "Own Sign",
            Self::Mooltrikona => "Mooltrikona",
            Self::Friendly => "Friendly",
            Self::Enemy => "Enemy",
            Self::Neutral => "Neutral",
        }
    }

    pub const fn lord_status(self) -> LordStatus {
        match self {
            Self::Exalted => LordStatus::HighlyBenefic,
            Self::OwnSign | Self::Mooltrikona | Self::Friendly => LordStatus::Benefic,
            Self::Enemy | Self::Debilitated => LordStatus::Malefic,
            Self::Neutral => LordStatus::Neutral,
        }
    }
}

impl fmt::Display for Dignity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Benefic/malefic reading of a house lord, derived from its dignity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LordStatus {
    #[serde(rename = "Highly Benefic")]
    HighlyBenefic,
    Benefic,
    Malefic,
    Neutral,
}

#[derive(Debug, Clone, Copy)]
pub struct DignityTable {
    pub exalted: Rashi,
    pub debilitated: Rashi,
    pub own: &'static [Rashi],
    pub mooltrikona: Rashi,
    pub friends: &'static [Body],
    pub enemies: &'static [Body],
}

/// Per-body dignity table, `None` for nodes and outer planets.
pub const fn dignity_table(body: Body) -> Option<DignityTable> {
    use Rashi::*;
    let table = match body {
        Body::Sun => DignityTable {
            exalted: Aries,
            debilitated: Libra,
            own: &[Leo],
            mooltrikona: Leo,
            friends: &[Body::Moon, Body::Mars, Body::Jupiter],
            enemies: &[Body::Venus, Body::Saturn],
        },
        Body::Moon => DignityTable {
            exalted: Taurus,
            debilitated: Scorpio,
            own: &[Cancer],
            mooltrikona: Taurus,
            friends: &[Body::Sun, Body::Mercury],
            enemies: &[],
        },
        Body::Mars => DignityTable {
            exalted: Capricorn,
            debilitated: Cancer,
            own: &[Aries, Scorpio],
            mooltrikona: Aries,
            friends: &[Body::Sun, Body::Moon, Body::Jupiter],
            enemies: &[Body::Mercury],
        },
        Body::Mercury => DignityTable {
            exalted: Virgo,
            debilitated: Pisces,
            own: &[Gemini, Virgo],
            mooltrikona: Virgo,
            friends: &[Body::Sun, Body::Venus],
            enemies: &[Body::Moon, Body::Mars],
        },
        Body::Jupiter => DignityTable {
            exalted: Cancer,
            debilitated: Capricorn,
            own: &[Sagittarius, Pisces],
            mooltrikona: Sagittarius,
            friends: &[Body::Sun, Body::Moon, Body::Mars],
            enemies: &[Body::Mercury, Body::Venus],
        },
        Body::Venus => DignityTable {
            exalted: Pisces,
            debilitated: Virgo,
            own: &[Taurus, Libra],
            mooltrikona: Libra,
            friends: &[Body::Mercury, Body::Saturn],
            enemies: &[Body::Sun, Body::Moon],
        },
        Body::Saturn => DignityTable {
            exalted: Libra,
            debilitated: Aries,
            own: &[Capricorn, Aquarius],
            mooltrikona: Aquarius,
            friends: &[Body::Mercury, Body::Venus],
            enemies: &[Body::Sun, Body::Moon, Body::Mars],
        },
        Body::Rahu | Body::Ketu | Body::Uranus | Body::Neptune | Body::Pluto => return None,
    };
    Some(table)
}

/// Classify a body's relationship to the sign it occupies.
pub fn classify_dignity(body: Body, sign: Rashi) -> Dignity {
    let Some(table) = dignity_table(body) else {
        return Dignity::Neutral;
    };
    let sign_lord = sign.lord();

    if sign == table.exalted {
        Dignity::Exalted
    } else if sign == table.debilitated {
        Dignity::Debilitated
    } else if table.own.contains(&sign) {
        Dignity::OwnSign
    } else if sign == table.mooltrikona {
        Dignity::Mooltrikona
    } else if table.friends.contains(&sign_lord) {
        Dignity::Friendly
    } else if table.enemies.contains(&sign_lord) {
        Dignity::Enemy
    } else {
        Dignity::Neutral
    }
}

/// Five-fold life stage by degree within the sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Avastha {
    #[serde(rename = "Infant (Bala)")]
    Bala,
    #[serde(rename = "Young (Kumara)")]
    Kumara,
    #[serde(rename = "Youth (Yuva)")]
    Yuva,
    #[serde(rename = "Old (Vriddha)")]
    Vriddha,
    #[serde(rename = "Dead (Mrita)")]
    Mrita,
}

const ODD_SIGN_AVASTHAS: [Avastha; 5] = [
    Avastha::Bala,
    Avastha::Kumara,
    Avastha::Yuva,
    Avastha::Vriddha,
    Avastha::Mrita,
];

impl Avastha {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bala => "Infant (Bala)",
            Self::Kumara => "Young (Kumara)",
            Self::Yuva => "Youth (Yuva)",
            Self::Vriddha => "Old (Vriddha)",
            Self::Mrita => "Dead (Mrita)",
        }
    }

    /// Short form used in tabular reports.
    pub const fn compact(self) -> &'static str {
        match self {
            Self::Bala => "Bala",
            Self::Kumara => "Kumara",
            Self::Yuva => "Yuva",
            Self::Vriddha => "Vriddha",
            Self::Mrita => "Mritya",
        }
    }
}

/// Avastha from 6-degree bands. Even signs read the order backwards.
pub fn avastha_for(degree_in_sign: f64, sign: Rashi) -> Avastha {
    let band = (degree_in_sign / 6.0).floor().clamp(0.0, 4.0) as usize;
    if sign.is_odd() {
        ODD_SIGN_AVASTHAS[band]
    } else {
        ODD_SIGN_AVASTHAS[4 - band]
    }
}

/// Orb below which a body is combust. `None` for bodies that never combust.
pub const fn combustion_threshold(body: Body, retrograde: bool) -> Option<f64> {
    match body {
        Body::Moon => Some(12.0),
        Body::Mars => Some(17.0),
        Body::Mercury => Some(if retrograde { 12.0 } else { 14.0 }),
        Body::Jupiter => Some(11.0),
        Body::Venus => Some(if retrograde { 8.0 } else { 10.0 }),
        Body::Saturn => Some(15.0),
        Body::Sun | Body::Rahu | Body::Ketu | Body::Uranus | Body::Neptune | Body::Pluto => None,
    }
}

pub fn is_combust(body: Body, longitude: f64, sun_longitude: f64, retrograde: bool) -> bool {
    match combustion_threshold(body, retrograde) {
        Some(orb) => angular_distance(longitude, sun_longitude) < orb,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_exalted_before_own() {
        assert_eq!(classify_dignity(Body::Mercury, Rashi::Virgo), Dignity::Exalted);
        assert_eq!(classify_dignity(Body::Sun, Rashi::Leo), Dignity::OwnSign);
        assert_eq!(classify_dignity(Body::Moon, Rashi::Taurus), Dignity::Exalted);
    }

    #[test]
    fn test_friend_enemy_neutral() {
        // Gemini is ruled by Mercury, a friend of the Moon
        assert_eq!(classify_dignity(Body::Moon, Rashi::Gemini), Dignity::Friendly);
        // Mars is neither friend nor enemy of the Moon
        assert_eq!(classify_dignity(Body::Moon, Rashi::Aries), Dignity::Neutral);
        // Gemini is ruled by Mercury, an enemy of Mars
        assert_eq!(classify_dignity(Body::Mars, Rashi::Gemini), Dignity::Enemy);
        // Libra is ruled by Venus, neutral to Mars
        assert_eq!(classify_dignity(Body::Mars, Rashi::Libra), Dignity::Neutral);
        assert_eq!(classify_dignity(Body::Rahu, Rashi::Gemini), Dignity::Neutral);
    }

    #[test]
    fn test_debilitated_maps_to_malefic() {
        let dignity = classify_dignity(Body::Saturn, Rashi::Aries);
        assert_eq!(dignity, Dignity::Debilitated);
        assert_eq!(dignity.lord_status(), LordStatus::Malefic);
    }

    #[test]
    fn test_avastha_orders() {
        assert_eq!(avastha_for(0.0, Rashi::Aries), Avastha::Bala);
        assert_eq!(avastha_for(29.9, Rashi::Aries), Avastha::Mrita);
        assert_eq!(avastha_for(0.0, Rashi::Taurus), Avastha::Mrita);
        assert_eq!(avastha_for(13.0, Rashi::Taurus), Avastha::Yuva);
        assert_eq!(avastha_for(30.0, Rashi::Gemini), Avastha::Mrita);
        assert_eq!(Avastha::Mrita.compact(), "Mritya");
    }

    #[test]
    fn test_combustion_thresholds() {
        assert!(is_combust(Body::Mercury, 13.0, 0.0, false));
        assert!(!is_combust(Body::Mercury, 13.0, 0.0, true));
        assert!(is_combust(Body::Venus, 355.0, 2.0, true));
        assert!(!is_combust(Body::Saturn, 15.0, 0.0, false));
        assert!(!is_combust(Body::Rahu, 0.0, 0.0, false));
        assert!(!is_combust(Body::Sun, 0.0, 0.0, false));
    }
}
