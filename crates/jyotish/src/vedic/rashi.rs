//! Zodiac signs (rashis) and their fixed attributes.
//!
//! Each sign spans 30 degrees of sidereal longitude and carries a single
//! traditional lord, a modality (`index mod 3`), an element and a paya.

use serde::{Deserialize, Serialize};
use std::fmt;
use crate::vedic::body::Body;
use crate::vedic::nakshatra::normalize_degrees;

pub const SIGN_SPAN: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rashi {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

pub const ALL_RASHIS: [Rashi; 12] = [
    Rashi::Aries,
    Rashi::Taurus,
    Rashi::Gemini,
    Rashi::Cancer,
    Rashi::Leo,
    Rashi::Virgo,
    Rashi::Libra,
    Rashi::Scorpio,
    Rashi::Sagittarius,
    Rashi::Capricorn,
    Rashi::Aquarius,
    Rashi::Pisces,
];

// Traditional rulerships, Aries..Pisces.
const SIGN_LORDS: [Body; 12] = [
    Body::Mars,
    Body::Venus,
    Body::Mercury,
    Body::Moon,
    Body::Sun,
    Body::Mercury,
    Body::Venus,
    Body::Mars,
    Body::Jupiter,
    Body::Saturn,
    Body::Saturn,
    Body::Jupiter,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modality {
    Movable,
    Fixed,
    Dual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tatva {
    Fire,
    Earth,
    Air,
    Water,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Paya {
    Gold,
    Silver,
    Copper,
    Iron,
}

impl Rashi {
    /// Sign at `index mod 12`.
    pub const fn from_index(index: usize) -> Self {
        ALL_RASHIS[index % 12]
    }

    /// Sign containing a longitude, after reduction modulo 360.
    ///
    /// A non-finite longitude lands on Aries rather than failing, so that
    /// downstream dignity and avastha logic always has a sign to work with.
    pub fn from_longitude(longitude: f64) -> Self {
        let lon = normalize_degrees(longitude);
        Self::from_index((lon / SIGN_SPAN) as usize)
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    /// 1-based sign number (Aries = 1).
    pub const fn number(self) -> u8 {
        self as u8 + 1
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Aries => "Aries",
            Self::Taurus => "Taurus",
            Self::Gemini => "Gemini",
            Self::Cancer => "Cancer",
            Self::Leo => "Leo",
            Self::Virgo => "Virgo",
            Self::Libra => "Libra",
            Self::Scorpio => "Scorpio",
            Self::Sagittarius => "Sagittarius",
            Self::Capricorn => "Capricorn",
            Self::Aquarius => "Aquarius",
            Self::Pisces => "Pisces",
        }
    }

    pub const fn lord(self) -> Body {
        SIGN_LORDS[self.index()]
    }

    pub const fn modality(self) -> Modality {
        match self.index() % 3 {
            0 => Modality::Movable,
            1 => Modality::Fixed,
            _ => Modality::Dual,
        }
    }

    /// Odd signs in the 1-based sense: Aries, Gemini, Leo, ...
    pub const fn is_odd(self) -> bool {
        self.index() % 2 == 0
    }

    pub const fn tatva(self) -> Tatva {
        match self.index() % 4 {
            0 => Tatva::Fire,
            1 => Tatva::Earth,
            2 => Tatva::Air,
            _ => Tatva::Water,
        }
    }

    pub const fn paya(self) -> Paya {
        match self {
            Self::Aries | Self::Virgo | Self::Aquarius => Paya::Gold,
            Self::Taurus | Self::Libra | Self::Sagittarius => Paya::Silver,
            Self::Gemini | Self::Leo | Self::Capricorn => Paya::Copper,
            Self::Cancer | Self::Scorpio | Self::Pisces => Paya::Iron,
        }
    }

    /// Sign `steps` places forward in zodiac order.
    pub const fn advance(self, steps: usize) -> Self {
        Self::from_index(self.index() + steps % 12)
    }

    /// Inclusive forward distance to `target`, in the range 1..=12.
    pub const fn forward_distance(self, target: Rashi) -> u32 {
        ((target.index() + 12 - self.index()) % 12) as u32 + 1
    }

    /// The 12 signs starting at this one, in zodiac order.
    pub fn sequence(self) -> [Rashi; 12] {
        let mut out = ALL_RASHIS;
        for (offset, slot) in out.iter_mut().enumerate() {
            *slot = self.advance(offset);
        }
        out
    }
}

impl fmt::Display for Rashi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
