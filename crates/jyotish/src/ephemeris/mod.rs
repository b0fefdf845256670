pub mod fixed;
pub mod provider;
pub mod types;

pub use fixed::FixedEphemeris;
pub use provider::{Ephemeris, EphemerisError};
pub use types::{GeoLocation, NodeMode, RawHouses, RawPosition, RiseSet};
