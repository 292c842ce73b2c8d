//! Ephemeris providers: geocentric positions of the physical grahas
//!
//! A provider answers one question: where is this body, seen from the
//! Earth's centre, at this instant? Answers are ecliptic coordinates referred
//! to the mean equinox of date. Two providers are available:
//!
//! - [`SpkEphemeris`] reads a JPL Development Ephemeris kernel (`.bsp`)
//! - [`AnalyticEphemeris`] needs no data files, using Keplerian mean
//!   elements for the planets and a truncated lunar theory for the Moon
//!
//! The lunar nodes are not physical bodies and are never asked of a provider.

use thiserror::Error;

use crate::coordinates::EclipticCoordinates;
use crate::jplephem::JplephemError;
use crate::time::Instant;
use crate::vedic::Graha;

pub mod analytic;
pub mod kepler;
pub mod kernel;
pub mod moon;

pub use analytic::AnalyticEphemeris;
pub use kernel::SpkEphemeris;

/// Error type for ephemeris lookups
#[derive(Debug, Error)]
pub enum EphemerisError {
    #[error("{provider}: JD {jd:.4} is outside the supported range (JD {start:.1}..{end:.1})")]
    OutOfRange {
        provider: String,
        jd: f64,
        start: f64,
        end: f64,
    },

    #[error("{0} is not available from this ephemeris")]
    UnsupportedBody(Graha),

    #[error("Kernel error: {0}")]
    Kernel(#[from] JplephemError),
}

/// Result type for ephemeris lookups
pub type Result<T> = std::result::Result<T, EphemerisError>;

/// Source of geocentric ecliptic positions
pub trait EphemerisProvider: Send + Sync {
    /// Short human-readable name, used in logs and output
    fn name(&self) -> &str;

    /// Geocentric ecliptic state of `graha`, mean equinox of date
    ///
    /// Longitude is in `[0, 360)` and speed in degrees per day.
    fn ecliptic_state(&self, graha: Graha, instant: &Instant) -> Result<EclipticCoordinates>;
}

impl<E: EphemerisProvider + ?Sized> EphemerisProvider for Box<E> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn ecliptic_state(&self, graha: Graha, instant: &Instant) -> Result<EclipticCoordinates> {
        (**self).ecliptic_state(graha, instant)
    }
}

impl<E: EphemerisProvider + ?Sized> EphemerisProvider for &E {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn ecliptic_state(&self, graha: Graha, instant: &Instant) -> Result<EclipticCoordinates> {
        (**self).ecliptic_state(graha, instant)
    }
}
