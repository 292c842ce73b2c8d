//! Geocentric Moon from the principal terms of the ELP-2000/82 theory
//!
//! Uses the periodic terms tabulated by Meeus (Astronomical Algorithms,
//! 2nd ed., ch. 47), truncated to the largest thirty in longitude and
//! distance and fourteen in latitude. Accuracy is of order 0.01° in
//! longitude over the analytic provider's range.

use crate::coordinates::angle::normalize_degrees;
use crate::constants::DEG2RAD;

/// Geocentric lunar position, mean equinox of date
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LunarPosition {
    /// Ecliptic longitude in degrees, `[0, 360)`
    pub longitude: f64,
    /// Ecliptic latitude in degrees
    pub latitude: f64,
    /// Earth-Moon distance in km
    pub distance_km: f64,
}

/// `[D, M, M', F, Σl (1e-6°), Σr (1e-3 km)]`
#[rustfmt::skip]
static LONGITUDE_DISTANCE_TERMS: [[i32; 6]; 30] = [
    [0,  0,  1,  0, 6288774, -20905355],
    [2,  0, -1,  0, 1274027,  -3699111],
    [2,  0,  0,  0,  658314,  -2955968],
    [0,  0,  2,  0,  213618,   -569925],
    [0,  1,  0,  0, -185116,     48888],
    [0,  0,  0,  2, -114332,     -3149],
    [2,  0, -2,  0,   58793,    246158],
    [2, -1, -1,  0,   57066,   -152138],
    [2,  0,  1,  0,   53322,   -170733],
    [2, -1,  0,  0,   45758,   -204586],
    [0,  1, -1,  0,  -40923,   -129620],
    [1,  0,  0,  0,  -34720,    108743],
    [0,  1,  1,  0,  -30383,    104755],
    [2,  0,  0, -2,   15327,     10321],
    [0,  0,  1,  2,  -12528,         0],
    [0,  0,  1, -2,   10980,     79661],
    [4,  0, -1,  0,   10675,    -34782],
    [0,  0,  3,  0,   10034,    -23210],
    [4,  0, -2,  0,    8548,    -21636],
    [2,  1, -1,  0,   -7888,     24208],
    [2,  1,  0,  0,   -6766,     30824],
    [1,  0, -1,  0,   -5163,     -8379],
    [1,  1,  0,  0,    4987,    -16675],
    [2, -1,  1,  0,    4036,    -12831],
    [2,  0,  2,  0,    3994,    -10445],
    [4,  0,  0,  0,    3861,    -11650],
    [2,  0, -3,  0,    3665,     14403],
    [0,  1, -2,  0,   -2689,     -7003],
    [2,  0, -1,  2,   -2602,         0],
    [2, -1, -2,  0,    2390,     10056],
];

/// `[D, M, M', F, Σb (1e-6°)]`
#[rustfmt::skip]
static LATITUDE_TERMS: [[i32; 5]; 14] = [
    [0,  0,  0,  1, 5128122],
    [0,  0,  1,  1,  280602],
    [0,  0,  1, -1,  277693],
    [2,  0,  0, -1,  173237],
    [2,  0, -1,  1,   55413],
    [2,  0, -1, -1,   46271],
    [2,  0,  0,  1,   32573],
    [0,  0,  2,  1,   17198],
    [2,  0,  1, -1,    9266],
    [0,  0,  2, -1,    8822],
    [2, -1,  0, -1,    8216],
    [2,  0, -2, -1,    4324],
    [2,  0,  1,  1,    4200],
    [2,  1,  0, -1,   -3359],
];

/// Mean distance of the Moon in km, to which Σr is added
const MEAN_DISTANCE_KM: f64 = 385_000.56;

/// Mean elongation, Sun's and Moon's anomalies and argument of latitude
/// (degrees), plus the Moon's mean longitude and the eccentricity factor `E`
struct Arguments {
    l_prime: f64,
    d: f64,
    m: f64,
    m_prime: f64,
    f: f64,
    e: f64,
}

impl Arguments {
    fn at(t: f64) -> Self {
        let t2 = t * t;
        let t3 = t2 * t;
        let t4 = t3 * t;
        Self {
            l_prime: 218.3164477 + 481267.88123421 * t - 0.0015786 * t2 + t3 / 538841.0
                - t4 / 65194000.0,
            d: 297.8501921 + 445267.1114034 * t - 0.0018819 * t2 + t3 / 545868.0 - t4 / 113065000.0,
            m: 357.5291092 + 35999.0502909 * t - 0.0001536 * t2 + t3 / 24490000.0,
            m_prime: 134.9633964 + 477198.8675055 * t + 0.0087414 * t2 + t3 / 69699.0
                - t4 / 14712000.0,
            f: 93.2720950 + 483202.0175233 * t - 0.0036539 * t2 - t3 / 3526000.0
                + t4 / 863310000.0,
            e: 1.0 - 0.002516 * t - 0.0000074 * t2,
        }
    }

    /// Argument `dD + mM + m'M' + fF` in radians, and its `E^|m|` factor
    fn combine(&self, d: i32, m: i32, mp: i32, f: i32) -> (f64, f64) {
        let angle = d as f64 * self.d + m as f64 * self.m + mp as f64 * self.m_prime + f as f64 * self.f;
        (angle * DEG2RAD, self.e.powi(m.abs()))
    }
}

/// Geocentric Moon at `t` Julian centuries TDB since J2000.0
pub fn lunar_position(t: f64) -> LunarPosition {
    let args = Arguments::at(t);

    let mut sum_l = 0.0;
    let mut sum_r = 0.0;
    for row in LONGITUDE_DISTANCE_TERMS.iter() {
        let (angle, factor) = args.combine(row[0], row[1], row[2], row[3]);
        sum_l += factor * row[4] as f64 * angle.sin();
        sum_r += factor * row[5] as f64 * angle.cos();
    }

    let mut sum_b = 0.0;
    for row in LATITUDE_TERMS.iter() {
        let (angle, factor) = args.combine(row[0], row[1], row[2], row[3]);
        sum_b += factor * row[4] as f64 * angle.sin();
    }

    // Venus, Jupiter and flattening corrections
    let a1 = (119.75 + 131.849 * t) * DEG2RAD;
    let a2 = (53.09 + 479264.290 * t) * DEG2RAD;
    let a3 = (313.45 + 481266.484 * t) * DEG2RAD;
    let l_prime = args.l_prime * DEG2RAD;
    let m_prime = args.m_prime * DEG2RAD;
    let f = args.f * DEG2RAD;

    sum_l += 3958.0 * a1.sin() + 1962.0 * (l_prime - f).sin() + 318.0 * a2.sin();
    sum_b += -2235.0 * l_prime.sin()
        + 382.0 * a3.sin()
        + 175.0 * (a1 - f).sin()
        + 175.0 * (a1 + f).sin()
        + 127.0 * (l_prime - m_prime).sin()
        - 115.0 * (l_prime + m_prime).sin();

    LunarPosition {
        longitude: normalize_degrees(args.l_prime + sum_l / 1e6),
        latitude: sum_b / 1e6,
        distance_km: MEAN_DISTANCE_KM + sum_r / 1000.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{J2000, JULIAN_CENTURY};
    use approx::assert_relative_eq;

    #[test]
    fn test_meeus_example_47a() {
        // 1992 April 12, 0h TD
        let t = (2448724.5 - J2000) / JULIAN_CENTURY;
        let moon = lunar_position(t);
        assert_relative_eq!(moon.longitude, 133.162655, epsilon = 0.05);
        assert_relative_eq!(moon.latitude, -3.229126, epsilon = 0.05);
        assert_relative_eq!(moon.distance_km, 368409.7, epsilon = 200.0);
    }

    #[test]
    fn test_distance_and_latitude_bounds() {
        for k in 0..500 {
            let t = -1.0 + k as f64 * 0.004;
            let moon = lunar_position(t);
            assert!((356_000.0..407_000.0).contains(&moon.distance_km), "{}", moon.distance_km);
            assert!(moon.latitude.abs() < 5.4);
            assert!((0.0..360.0).contains(&moon.longitude));
        }
    }
}
