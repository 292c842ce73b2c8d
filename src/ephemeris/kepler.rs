//! Keplerian mean elements for the major planets
//!
//! Elements and rates are those of E.M. Standish, "Keplerian Elements for
//! Approximate Positions of the Major Planets" (JPL SSD), Table 1, valid
//! 1800 AD to 2050 AD. They give heliocentric positions referred to the
//! mean ecliptic and equinox of J2000 with errors of a few arcminutes at
//! worst (Mars), and much better for the other planets.

use nalgebra::Vector3;

use crate::constants::DEG2RAD;
use crate::coordinates::angle::normalize_signed_degrees;

/// Bodies with tabulated mean elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orbit {
    Mercury,
    Venus,
    EarthMoonBarycenter,
    Mars,
    Jupiter,
    Saturn,
}

/// Osculating-style elements at an epoch
///
/// Angles are in degrees, `a` in AU.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    /// Semi-major axis
    pub a: f64,
    /// Eccentricity
    pub e: f64,
    /// Inclination
    pub i: f64,
    /// Mean longitude
    pub l: f64,
    /// Longitude of perihelion
    pub varpi: f64,
    /// Longitude of the ascending node
    pub node: f64,
}

/// `[a, e, I, L, ϖ, Ω]` at J2000 followed by their rates per Julian century
#[rustfmt::skip]
static ELEMENTS: [[f64; 12]; 6] = [
    // Mercury
    [0.38709927, 0.20563593, 7.00497902, 252.25032350, 77.45779628, 48.33076593,
     0.00000037, 0.00001906, -0.00594749, 149472.67411175, 0.16047689, -0.12534081],
    // Venus
    [0.72333566, 0.00677672, 3.39467605, 181.97909950, 131.60246718, 76.67984255,
     0.00000390, -0.00004107, -0.00078890, 58517.81538729, 0.00268329, -0.27769418],
    // Earth-Moon barycenter
    [1.00000261, 0.01671123, -0.00001531, 100.46457166, 102.93768193, 0.0,
     0.00000562, -0.00004392, -0.01294668, 35999.37244981, 0.32327364, 0.0],
    // Mars
    [1.52371034, 0.09339410, 1.84969142, -4.55343205, -23.94362959, 49.55953891,
     0.00001847, 0.00007882, -0.00813131, 19140.30268499, 0.44441088, -0.29257343],
    // Jupiter
    [5.20288700, 0.04838624, 1.30439695, 34.39644051, 14.72847983, 100.47390909,
     -0.00011607, -0.00013253, -0.00183714, 3034.74612775, 0.21252668, 0.20469106],
    // Saturn
    [9.53667594, 0.05386179, 2.48599187, 49.95424423, 92.59887831, 113.66242448,
     -0.00125060, -0.00050991, 0.00193609, 1222.49362201, -0.41897216, -0.28867794],
];

const KEPLER_TOLERANCE: f64 = 1e-12;
const KEPLER_MAX_ITERATIONS: usize = 30;

impl Orbit {
    /// Mean elements at `t` Julian centuries TDB since J2000.0
    pub fn elements(self, t: f64) -> OrbitalElements {
        let row = &ELEMENTS[self as usize];
        let at = |k: usize| row[k] + row[k + 6] * t;
        OrbitalElements {
            a: at(0),
            e: at(1),
            i: at(2),
            l: at(3),
            varpi: at(4),
            node: at(5),
        }
    }

    /// Heliocentric position in AU, mean ecliptic and equinox of J2000
    pub fn heliocentric_position(self, t: f64) -> Vector3<f64> {
        self.elements(t).position()
    }
}

impl OrbitalElements {
    /// Position in the ecliptic frame of the elements, in AU
    pub fn position(&self) -> Vector3<f64> {
        let omega = (self.varpi - self.node) * DEG2RAD;
        let node = self.node * DEG2RAD;
        let incl = self.i * DEG2RAD;
        let mean_anomaly = normalize_signed_degrees(self.l - self.varpi) * DEG2RAD;

        let ecc_anomaly = solve_kepler(mean_anomaly, self.e);
        let xp = self.a * (ecc_anomaly.cos() - self.e);
        let yp = self.a * (1.0 - self.e * self.e).sqrt() * ecc_anomaly.sin();

        let (so, co) = omega.sin_cos();
        let (sn, cn) = node.sin_cos();
        let (si, ci) = incl.sin_cos();

        Vector3::new(
            (co * cn - so * sn * ci) * xp + (-so * cn - co * sn * ci) * yp,
            (co * sn + so * cn * ci) * xp + (-so * sn + co * cn * ci) * yp,
            so * si * xp + co * si * yp,
        )
    }
}

/// Eccentric anomaly from mean anomaly (radians) by Newton iteration
///
/// Converges for every `0 <= e < 1`. The starting guess `M + e sin M` is
/// within a few iterations of the root for planetary eccentricities.
pub fn solve_kepler(mean_anomaly: f64, e: f64) -> f64 {
    let mut ecc = if e < 0.8 {
        mean_anomaly + e * mean_anomaly.sin()
    } else {
        std::f64::consts::PI.copysign(mean_anomaly)
    };
    for _ in 0..KEPLER_MAX_ITERATIONS {
        let delta = (ecc - e * ecc.sin() - mean_anomaly) / (1.0 - e * ecc.cos());
        ecc -= delta;
        if delta.abs() < KEPLER_TOLERANCE {
            break;
        }
    }
    ecc
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_kepler_solution_satisfies_equation() {
        for &e in &[0.0, 0.0167, 0.2056, 0.6, 0.95] {
            for k in -12..=12 {
                let m = k as f64 * 0.25;
                let ecc = solve_kepler(m, e);
                assert_relative_eq!(ecc - e * ecc.sin(), m, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn test_orbit_radii_within_apsides() {
        for orbit in [
            Orbit::Mercury,
            Orbit::Venus,
            Orbit::EarthMoonBarycenter,
            Orbit::Mars,
            Orbit::Jupiter,
            Orbit::Saturn,
        ] {
            let el = orbit.elements(0.0);
            for k in 0..40 {
                let t = -2.0 + k as f64 * 0.1;
                let r = orbit.heliocentric_position(t).norm();
                let el_t = orbit.elements(t);
                assert!(r >= el_t.a * (1.0 - el_t.e) - 1e-9, "{orbit:?} r={r}");
                assert!(r <= el_t.a * (1.0 + el_t.e) + 1e-9, "{orbit:?} r={r}");
            }
            assert!(el.e < 0.21);
        }
    }

    #[test]
    fn test_earth_at_j2000() {
        // The Earth-Moon barycenter sits near ecliptic longitude 100.4°, 0.983 AU
        let p = Orbit::EarthMoonBarycenter.heliocentric_position(0.0);
        let lon = p.y.atan2(p.x).to_degrees().rem_euclid(360.0);
        assert_relative_eq!(lon, 100.38, epsilon = 0.02);
        assert_relative_eq!(p.norm(), 0.9833, epsilon = 1e-3);
        assert!(p.z.abs() < 1e-6);
    }
}
