//! Constants module for astronomical and sidereal calculations

use std::f64::consts::PI;

// Astronomical distances
/// Astronomical Unit in meters (per IAU 2012 Resolution B2)
pub const AU_M: f64 = 149_597_870_700.0;
/// Astronomical Unit in kilometers
pub const AU_KM: f64 = 149_597_870.700;

// Time constants
/// Seconds in a day
pub const DAY_S: f64 = 86_400.0;
/// J2000.0 epoch as Julian date
pub const J2000: f64 = 2_451_545.0;
/// Days in a Julian century
pub const JULIAN_CENTURY: f64 = 36_525.0;

// Angles
/// Arcseconds in a complete circle
pub const ASEC360: f64 = 1_296_000.0;
/// Arcseconds to radians conversion factor
pub const ASEC2RAD: f64 = 4.848_136_811_095_36e-6;
/// Degrees to radians conversion factor
pub const DEG2RAD: f64 = PI / 180.0;
/// Radians to degrees conversion factor
pub const RAD2DEG: f64 = 180.0 / PI;

/// Mean obliquity of the ecliptic at J2000.0 (IAU 2006), arcseconds
pub const OBLIQUITY_J2000_ASEC: f64 = 84_381.406;

// Physics
/// Speed of light in m/s
pub const C: f64 = 299_792_458.0;
/// Speed of light in AU/day
pub const C_AUDAY: f64 = C * DAY_S / AU_M;

// Sidereal sectors
/// Width of a rashi (zodiac sign) in degrees
pub const RASHI_SPAN: f64 = 30.0;
/// Width of a nakshatra in degrees (13°20′)
pub const NAKSHATRA_SPAN: f64 = 360.0 / 27.0;
/// Width of a tithi in degrees of Moon-Sun elongation
pub const TITHI_SPAN: f64 = 12.0;

// Civil time
/// Indian Standard Time offset from UTC, in minutes (UTC+5:30)
pub const IST_OFFSET_MINUTES: i32 = 330;
