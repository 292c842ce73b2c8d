//! Grahaghadi: sidereal planetary positions for Vedic astronomy
//!
//! Given a civil timestamp (IST by default) this crate computes the sidereal
//! ecliptic longitudes of the Sun, Moon, five classical planets and the lunar
//! nodes, and places each one in its rashi, nakshatra and pada. The tithi,
//! vaar, disha shool and choghadiya of the moment are reported alongside.
//!
//! Positions come from a JPL SPK kernel when one is available, or from
//! built-in analytic series (1800 to 2050) otherwise.
//!
//! ```no_run
//! use grahaghadi::{AnalyticEphemeris, CalculatorSettings, CivilTime, SiderealCalculator};
//!
//! let calculator = SiderealCalculator::new(AnalyticEphemeris::new(), CalculatorSettings::default());
//! let time = CivilTime::parse("2024-03-15", Some("06:45"), 330)?;
//! let snapshot = calculator.snapshot(&time)?;
//! for position in &snapshot.positions {
//!     println!("{} {:.2}° {}", position.graha, position.longitude, position.nakshatra);
//! }
//! # Ok::<(), grahaghadi::GrahaError>(())
//! ```

use thiserror::Error;

pub mod calculator;
pub mod config;
pub mod constants;
pub mod coordinates;
pub mod ephemeris;
pub mod framelib;
pub mod jplephem;
pub mod time;
pub mod vedic;

// Re-export commonly used types
pub use calculator::{CalculatorSettings, Position, SiderealCalculator, Snapshot};
pub use config::Config;
pub use ephemeris::{AnalyticEphemeris, EphemerisProvider, SpkEphemeris};
pub use time::{CivilTime, Instant};
pub use vedic::{AyanamshaSystem, Graha, Nakshatra, NodeMode, Rashi};

/// Main error type for the grahaghadi library
#[derive(Debug, Error)]
pub enum GrahaError {
    #[error("Time error: {0}")]
    Time(#[from] time::TimeError),

    #[error("Ephemeris error: {0}")]
    Ephemeris(#[from] ephemeris::EphemerisError),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Result type for grahaghadi operations
pub type Result<T> = std::result::Result<T, GrahaError>;
