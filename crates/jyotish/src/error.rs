use thiserror::Error;
use crate::ephemeris::EphemerisError;
use crate::vedic::body::Body;

/// Errors surfaced by the engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VedicError {
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
    #[error("{body} position required but not available")]
    MissingBody { body: Body },
    #[error("Invalid varga divisor: {divisor}. Divisors start at 1")]
    InvalidDivisor { divisor: u32 },
}

pub type Result<T, E = VedicError> = std::result::Result<T, E>;
