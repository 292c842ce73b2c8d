//! Ephemeris computed from series, without data files
//!
//! Planets come from Keplerian mean elements ([`super::kepler`]) and the Moon
//! from a truncated lunar theory ([`super::moon`]). Heliocentric vectors are
//! differenced to geocentric with one light-time correction, reduced to
//! longitude and latitude in the J2000 ecliptic, and carried to the mean
//! equinox of date by adding the general precession in longitude.
//!
//! Speeds are centred finite differences of the longitude.

use log::debug;
use nalgebra::Vector3;

use crate::constants::{AU_KM, C_AUDAY, J2000, JULIAN_CENTURY, RAD2DEG};
use crate::coordinates::angle::{angular_difference, normalize_degrees};
use crate::coordinates::EclipticCoordinates;
use crate::ephemeris::kepler::Orbit;
use crate::ephemeris::moon::lunar_position;
use crate::ephemeris::{EphemerisError, EphemerisProvider, Result};
use crate::framelib::general_precession_deg;
use crate::time::Instant;
use crate::vedic::Graha;

/// 1800-01-01 0h, start of the mean elements' validity
pub const ANALYTIC_START_JD: f64 = 2_378_496.5;
/// 2051-01-01 0h, end of the mean elements' validity (exclusive)
pub const ANALYTIC_END_JD: f64 = 2_470_172.5;

/// Earth/Moon mass ratio (DE440)
const EARTH_MOON_MASS_RATIO: f64 = 81.300_568_94;

/// Half-width of the speed finite difference, in days
const SPEED_STEP_DAYS: f64 = 0.125;

/// Self-contained ephemeris valid from 1800 through 2050
#[derive(Debug, Clone, Default)]
pub struct AnalyticEphemeris;

impl AnalyticEphemeris {
    pub fn new() -> Self {
        Self
    }

    /// Supported Julian date range `[start, end)` (TDB)
    pub fn coverage(&self) -> (f64, f64) {
        (ANALYTIC_START_JD, ANALYTIC_END_JD)
    }

    fn check_range(&self, jd: f64) -> Result<()> {
        if (ANALYTIC_START_JD..ANALYTIC_END_JD).contains(&jd) {
            Ok(())
        } else {
            Err(EphemerisError::OutOfRange {
                provider: self.name().to_string(),
                jd,
                start: ANALYTIC_START_JD,
                end: ANALYTIC_END_JD,
            })
        }
    }

    /// Longitude, latitude (degrees, mean equinox of date) and distance (AU)
    pub fn mean_of_date(&self, graha: Graha, jd_tdb: f64) -> Result<(f64, f64, f64)> {
        let t = (jd_tdb - J2000) / JULIAN_CENTURY;
        let precession = general_precession_deg(t);

        let orbit = match graha {
            Graha::Moon => {
                let moon = lunar_position(t);
                return Ok((moon.longitude, moon.latitude, moon.distance_km / AU_KM));
            }
            Graha::Sun => None,
            Graha::Mercury => Some(Orbit::Mercury),
            Graha::Venus => Some(Orbit::Venus),
            Graha::Mars => Some(Orbit::Mars),
            Graha::Jupiter => Some(Orbit::Jupiter),
            Graha::Saturn => Some(Orbit::Saturn),
            Graha::Rahu | Graha::Ketu => return Err(EphemerisError::UnsupportedBody(graha)),
        };

        let earth = earth_heliocentric(t, precession);
        let geocentric = match orbit {
            None => -earth,
            Some(orbit) => {
                // One light-time pass moves the planet back by ~distance/c.
                let geometric = orbit.heliocentric_position(t) - earth;
                let tau_centuries = geometric.norm() / C_AUDAY / JULIAN_CENTURY;
                orbit.heliocentric_position(t - tau_centuries) - earth
            }
        };

        let distance = geocentric.norm();
        let longitude = geocentric.y.atan2(geocentric.x) * RAD2DEG;
        let latitude = (geocentric.z / distance).asin() * RAD2DEG;
        Ok((normalize_degrees(longitude + precession), latitude, distance))
    }
}

/// Heliocentric Earth in AU, J2000 ecliptic
///
/// The Earth-Moon barycenter is offset by the Moon's share of the geocentric
/// lunar vector. The lunar theory is of date, so its longitude is first
/// brought back to J2000.
fn earth_heliocentric(t: f64, precession: f64) -> Vector3<f64> {
    let emb = Orbit::EarthMoonBarycenter.heliocentric_position(t);
    let moon = lunar_position(t);
    let lon = (moon.longitude - precession).to_radians();
    let lat = moon.latitude.to_radians();
    let r = moon.distance_km / AU_KM;
    let moon_vec = Vector3::new(r * lat.cos() * lon.cos(), r * lat.cos() * lon.sin(), r * lat.sin());
    emb - moon_vec / (1.0 + EARTH_MOON_MASS_RATIO)
}

impl EphemerisProvider for AnalyticEphemeris {
    fn name(&self) -> &str {
        "analytic"
    }

    fn ecliptic_state(&self, graha: Graha, instant: &Instant) -> Result<EclipticCoordinates> {
        self.check_range(instant.jd_tdb)?;

        let (longitude, latitude, distance) = self.mean_of_date(graha, instant.jd_tdb)?;
        let (before, _, _) = self.mean_of_date(graha, instant.jd_tdb - SPEED_STEP_DAYS)?;
        let (after, _, _) = self.mean_of_date(graha, instant.jd_tdb + SPEED_STEP_DAYS)?;
        let speed = angular_difference(before, after) / (2.0 * SPEED_STEP_DAYS);

        debug!("analytic {graha}: λ={longitude:.6} β={latitude:.6} Δ={distance:.6} AU v={speed:.6}°/d");
        Ok(EclipticCoordinates {
            longitude,
            latitude,
            distance_au: Some(distance),
            speed,
        })
    }
}
