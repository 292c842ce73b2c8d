//! Ecliptic spherical coordinates and the equator-to-ecliptic rotation
//!
//! Kernel states arrive as ICRF (equatorial) Cartesian vectors. They are
//! rotated about the x axis by the J2000 mean obliquity into the ecliptic
//! frame and then reduced to longitude, latitude, distance and the rate of
//! change of longitude.

use nalgebra::{Rotation3, Vector3};
use serde::Serialize;

use crate::constants::{ASEC2RAD, OBLIQUITY_J2000_ASEC, RAD2DEG};
use crate::coordinates::angle::normalize_degrees;

/// Geocentric ecliptic position of a body plus its daily motion in longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EclipticCoordinates {
    /// Longitude in degrees, `[0, 360)`
    pub longitude: f64,
    /// Latitude in degrees
    pub latitude: f64,
    /// Distance in AU (`None` for mathematical points such as the lunar nodes)
    pub distance_au: Option<f64>,
    /// Rate of change of longitude in degrees per day
    pub speed: f64,
}

/// Rotation taking ICRF vectors into the mean ecliptic and equinox of J2000
pub fn icrf_to_ecliptic_j2000() -> Rotation3<f64> {
    let epsilon = OBLIQUITY_J2000_ASEC * ASEC2RAD;
    // Frame rotation by +ε is a vector rotation by -ε about x.
    Rotation3::from_axis_angle(&Vector3::x_axis(), -epsilon)
}

/// Converts an ecliptic Cartesian position and velocity to spherical form
///
/// `position` is in AU and `velocity` in AU/day. The longitude speed is
/// `(x·vy − y·vx) / (x² + y²)`, returned in degrees per day.
pub fn spherical_from_state(position: &Vector3<f64>, velocity: &Vector3<f64>) -> EclipticCoordinates {
    let (x, y, z) = (position.x, position.y, position.z);
    let rho_sq = x * x + y * y;
    let distance = position.norm();

    let longitude = normalize_degrees(y.atan2(x) * RAD2DEG);
    let latitude = z.atan2(rho_sq.sqrt()) * RAD2DEG;

    let speed = if rho_sq > 0.0 {
        (x * velocity.y - y * velocity.x) / rho_sq * RAD2DEG
    } else {
        0.0
    };

    EclipticCoordinates {
        longitude,
        latitude,
        distance_au: Some(distance),
        speed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_equinox_direction_is_fixed() {
        // The x axis (vernal equinox) is shared by both frames
        let rotated = icrf_to_ecliptic_j2000() * Vector3::new(1.0, 0.0, 0.0);
        assert_relative_eq!(rotated, Vector3::new(1.0, 0.0, 0.0), epsilon = 1e-15);
    }

    #[test]
    fn test_celestial_pole_tilts_by_obliquity() {
        let pole = icrf_to_ecliptic_j2000() * Vector3::new(0.0, 0.0, 1.0);
        let state = spherical_from_state(&pole, &Vector3::zeros());
        // The celestial pole sits at ecliptic longitude 90°, latitude 90° − ε
        assert_relative_eq!(state.longitude, 90.0, epsilon = 1e-9);
        assert_relative_eq!(state.latitude, 90.0 - 23.439_279_4, epsilon = 1e-6);
    }

    #[test]
    fn test_longitude_speed_of_circular_motion() {
        // Unit circle motion at 1 rad/day seen from the centre
        let position = Vector3::new(0.0, 2.0, 0.0);
        let velocity = Vector3::new(-2.0, 0.0, 0.0);
        let state = spherical_from_state(&position, &velocity);
        assert_relative_eq!(state.longitude, 90.0, epsilon = 1e-12);
        assert_relative_eq!(state.speed, RAD2DEG, epsilon = 1e-9);
        assert_eq!(state.distance_au, Some(2.0));
    }
}
