//! Ephemeris backed by a JPL SPK kernel
//!
//! States are chained to the solar system barycenter, differenced against
//! the Earth with a light-time iteration, rotated from ICRF into the J2000
//! ecliptic and finally precessed in longitude to the mean equinox of date.

use std::path::Path;

use log::{debug, info};
use nalgebra::{Rotation3, Vector3};

use crate::constants::{AU_KM, C, DAY_S, JULIAN_CENTURY};
use crate::coordinates::ecliptic::{icrf_to_ecliptic_j2000, spherical_from_state};
use crate::coordinates::angle::normalize_degrees;
use crate::coordinates::EclipticCoordinates;
use crate::ephemeris::{EphemerisError, EphemerisProvider, Result};
use crate::framelib::general_precession_deg;
use crate::jplephem::names::{target_name, targets};
use crate::jplephem::spk::{seconds_to_jd, State};
use crate::jplephem::{JplephemError, SPK};
use crate::time::Instant;
use crate::vedic::Graha;

/// Speed of light in km/s
const C_KMS: f64 = C / 1000.0;

/// Light-time iterations; the third changes nothing at double precision
const LIGHT_TIME_ITERATIONS: usize = 3;

/// Rate of general precession in longitude near J2000, degrees per day
const PRECESSION_RATE_DEG_PER_DAY: f64 = 5028.796195 / 3600.0 / JULIAN_CENTURY;

/// NAIF ids tried in order for each physical graha
///
/// Planet centres (x99) come first; the system barycenters stand in when a
/// kernel (such as de440s) only carries those.
pub fn naif_candidates(graha: Graha) -> &'static [i32] {
    match graha {
        Graha::Sun => &[targets::SUN],
        Graha::Moon => &[targets::MOON],
        Graha::Mercury => &[targets::MERCURY, targets::MERCURY_BARYCENTER],
        Graha::Venus => &[targets::VENUS, targets::VENUS_BARYCENTER],
        Graha::Mars => &[targets::MARS, targets::MARS_BARYCENTER],
        Graha::Jupiter => &[targets::JUPITER_BARYCENTER],
        Graha::Saturn => &[targets::SATURN_BARYCENTER],
        Graha::Rahu | Graha::Ketu => &[],
    }
}

/// Provider reading a JPL Development Ephemeris (DE4xx) kernel
pub struct SpkEphemeris {
    spk: SPK,
    name: String,
    rotation: Rotation3<f64>,
}

impl SpkEphemeris {
    /// Open and index a `.bsp` kernel
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let spk = SPK::open(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "spk".to_string());
        info!("using SPK kernel {} ({} segments)", path.display(), spk.segments.len());
        Ok(Self::from_spk(spk, name))
    }

    pub fn from_spk(spk: SPK, name: impl Into<String>) -> Self {
        Self {
            spk,
            name: name.into(),
            rotation: icrf_to_ecliptic_j2000(),
        }
    }

    pub fn spk(&self) -> &SPK {
        &self.spk
    }

    /// NAIF id used for `graha`, the first candidate the kernel carries
    pub fn target_for(&self, graha: Graha) -> Result<i32> {
        naif_candidates(graha)
            .iter()
            .copied()
            .find(|&id| self.spk.has_target(id))
            .ok_or(EphemerisError::UnsupportedBody(graha))
    }

    /// Geometric geocentric state of `target` in km and km/s (ICRF),
    /// corrected for light time
    pub fn geocentric_state(&self, target: i32, tdb_seconds: f64) -> Result<State> {
        let (earth_pos, earth_vel) = self.barycentric(targets::EARTH, tdb_seconds)?;

        let (mut pos, mut vel) = self.barycentric(target, tdb_seconds)?;
        for _ in 0..LIGHT_TIME_ITERATIONS {
            let light_time = (pos - earth_pos).norm() / C_KMS;
            let (p, v) = self.barycentric(target, tdb_seconds - light_time)?;
            pos = p;
            vel = v;
        }
        Ok((pos - earth_pos, vel - earth_vel))
    }

    fn barycentric(&self, target: i32, tdb_seconds: f64) -> Result<State> {
        self.spk
            .barycentric_state(target, tdb_seconds)
            .map_err(|e| match e {
                JplephemError::OutOfRangeError { jd, start_jd, end_jd } => EphemerisError::OutOfRange {
                    provider: self.name.clone(),
                    jd,
                    start: start_jd,
                    end: end_jd,
                },
                other => EphemerisError::Kernel(other),
            })
    }
}

impl EphemerisProvider for SpkEphemeris {
    fn name(&self) -> &str {
        &self.name
    }

    fn ecliptic_state(&self, graha: Graha, instant: &Instant) -> Result<EclipticCoordinates> {
        let target = self.target_for(graha)?;
        let tdb_seconds = instant.seconds_tdb_since_j2000();
        let (pos_km, vel_kms) = self.geocentric_state(target, tdb_seconds)?;

        let position: Vector3<f64> = self.rotation * (pos_km / AU_KM);
        let velocity: Vector3<f64> = self.rotation * (vel_kms * DAY_S / AU_KM);
        let mut state = spherical_from_state(&position, &velocity);

        state.longitude = normalize_degrees(state.longitude + general_precession_deg(instant.centuries_tdb()));
        state.speed += PRECESSION_RATE_DEG_PER_DAY;

        debug!(
            "{} {graha} via {} at JD {:.5}: λ={:.6} β={:.6} v={:.6}°/d",
            self.name,
            target_name(target).unwrap_or("?"),
            seconds_to_jd(tdb_seconds),
            state.longitude,
            state.latitude,
            state.speed
        );
        Ok(state)
    }
}
