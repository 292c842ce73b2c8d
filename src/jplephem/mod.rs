//! JPL Ephemeris module for high-precision planetary positions
//!
//! This module reads JPL Development Ephemerides (DE) distributed as binary
//! SPK (Spacecraft Planet Kernel) files in the SPICE DAF container.
//!
//! # Main Components
//!
//! - `daf`: Double Array File format reader (underlying format of SPK files)
//! - `spk`: Spacecraft Planet Kernel segments and Chebyshev evaluation
//! - `chebyshev`: Chebyshev series evaluation
//! - `names`: Mappings between body names and NAIF ID numbers
//! - `calendar`: Julian day arithmetic shared with the time module

pub mod calendar;
pub mod chebyshev;
pub mod daf;
pub mod errors;
pub mod names;
pub mod spk;

// Re-export primary types for convenience
pub use self::errors::JplephemError;
pub use self::spk::SPK;
