//! Rahu and Ketu, the Moon's ascending and descending nodes
//!
//! The mean node is the fifth Delaunay argument Ω. The true node adds the
//! principal periodic terms given by Meeus (Astronomical Algorithms, ch. 47).
//! Both are referred to the mean equinox of date.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::JULIAN_CENTURY;
use crate::coordinates::angle::{angular_difference, normalize_degrees};
use crate::coordinates::ecliptic::EclipticCoordinates;
use crate::framelib::fundamental_arguments;

/// Mean or true (perturbed) node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeMode {
    #[default]
    Mean,
    True,
}

impl fmt::Display for NodeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mean => f.write_str("mean"),
            Self::True => f.write_str("true"),
        }
    }
}

impl FromStr for NodeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mean" | "mean_node" => Ok(Self::Mean),
            "true" | "true_node" => Ok(Self::True),
            other => Err(format!("unknown node mode '{other}' (expected mean or true)")),
        }
    }
}

/// `[nl, nl', nF, nD, nΩ, amplitude°]` over the Delaunay arguments
#[rustfmt::skip]
static PERTURBATIONS: [[f64; 6]; 5] = [
    [0.0, 0.0, -2.0, 2.0, 0.0, -1.4979],
    [0.0, 1.0,  0.0, 0.0, 0.0, -0.1500],
    [0.0, 0.0,  0.0, 2.0, 0.0,  0.1226],
    [0.0, 0.0,  2.0, 0.0, 0.0, -0.1176],
    [2.0, 0.0, -2.0, 0.0, 0.0,  0.0801],
];

/// Step for the true node's finite-difference speed, in days
const TRUE_NODE_STEP_DAYS: f64 = 0.5;

/// Mean Rahu longitude in degrees, `t` in Julian centuries TDB since J2000.0
pub fn mean_rahu_deg(t: f64) -> f64 {
    normalize_degrees(fundamental_arguments(t)[4].to_degrees())
}

/// True Rahu longitude in degrees
pub fn true_rahu_deg(t: f64) -> f64 {
    let args = fundamental_arguments(t);
    let correction: f64 = PERTURBATIONS
        .iter()
        .map(|row| {
            let angle = (0..5).map(|i| row[i] * args[i]).sum::<f64>();
            row[5] * angle.sin()
        })
        .sum();
    normalize_degrees(args[4].to_degrees() + correction)
}

pub fn rahu_deg(t: f64, mode: NodeMode) -> f64 {
    match mode {
        NodeMode::Mean => mean_rahu_deg(t),
        NodeMode::True => true_rahu_deg(t),
    }
}

/// Daily motion of Rahu in degrees per day (negative: the nodes regress)
pub fn rahu_speed_deg_per_day(t: f64, mode: NodeMode) -> f64 {
    match mode {
        NodeMode::Mean => {
            let arcsec_per_century =
                -6962890.5431 + 2.0 * 7.4722 * t + 3.0 * 0.007702 * t * t - 4.0 * 0.00005939 * t.powi(3);
            arcsec_per_century / 3600.0 / JULIAN_CENTURY
        }
        NodeMode::True => {
            let h = TRUE_NODE_STEP_DAYS / JULIAN_CENTURY;
            angular_difference(true_rahu_deg(t - h), true_rahu_deg(t + h)) / (2.0 * TRUE_NODE_STEP_DAYS)
        }
    }
}

/// The point opposite a node: `(L + 180) mod 360`
pub fn opposite_node(longitude: f64) -> f64 {
    normalize_degrees(longitude + 180.0)
}

/// Rahu as an ecliptic state (latitude 0, no distance)
pub fn rahu_state(t: f64, mode: NodeMode) -> EclipticCoordinates {
    EclipticCoordinates {
        longitude: rahu_deg(t, mode),
        latitude: 0.0,
        distance_au: None,
        speed: rahu_speed_deg_per_day(t, mode),
    }
}
