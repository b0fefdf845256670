//! Sidereal chart computation: positions, houses, divisional charts,
//! dashas, KP lords, yogas, panchang and birth-chart properties.

pub mod chart;
pub mod ephemeris;
pub mod error;
pub mod vedic;

pub use chart::{BirthRequest, EngineSettings, NatalChart, VedicEngine, VedicReport};
pub use ephemeris::{Ephemeris, EphemerisError, FixedEphemeris, GeoLocation, NodeMode};
pub use error::{Result, VedicError};
