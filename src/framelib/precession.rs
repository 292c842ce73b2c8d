//! General precession and mean obliquity (IAU 2006)
//!
//! `t` is Julian centuries of TDB since J2000.0 throughout.

use crate::constants::OBLIQUITY_J2000_ASEC;

/// Accumulated general precession in ecliptic longitude, p_A, in arcseconds
///
/// Capitaine et al. (2003), adopted by IAU 2006. Adding p_A to a longitude
/// referred to the J2000 equinox gives the longitude referred to the mean
/// equinox of date.
pub fn general_precession_arcsec(t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let t5 = t4 * t;
    5028.796195 * t + 1.1054348 * t2 + 0.00007964 * t3 - 0.000023857 * t4 - 0.0000000383 * t5
}

/// General precession in longitude in degrees
pub fn general_precession_deg(t: f64) -> f64 {
    general_precession_arcsec(t) / 3600.0
}

/// Mean obliquity of the ecliptic of date in arcseconds
pub fn mean_obliquity_arcsec(t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let t5 = t4 * t;
    OBLIQUITY_J2000_ASEC - 46.836769 * t - 0.0001831 * t2 + 0.00200340 * t3
        - 0.000000576 * t4
        - 0.0000000434 * t5
}
