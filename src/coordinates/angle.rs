//! # Angle Helpers
//!
//! Every longitude that leaves this crate is wrapped into `[0, 360)`. The
//! helpers here do that wrapping, measure signed differences across the
//! 0°/360° seam, and split decimal degrees into degrees, arcminutes and
//! arcseconds for display.
//!
//! ## Examples
//!
//! ```rust
//! use grahaghadi::coordinates::angle::{normalize_degrees, Dms};
//!
//! assert_eq!(normalize_degrees(-30.0), 330.0);
//! assert_eq!(normalize_degrees(725.0), 5.0);
//!
//! let dms = Dms::from_degrees(23.5);
//! assert_eq!((dms.degrees, dms.minutes), (23, 30));
//! ```

use serde::Serialize;
use std::fmt;

/// Wraps an angle in degrees into the half-open range `[0, 360)`
///
/// Values that land exactly on 360 after floating-point wrapping (for
/// example `-1e-17`) are folded back to 0 so the result never equals 360.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Wraps an angle in degrees into `[-180, 180)`
pub fn normalize_signed_degrees(degrees: f64) -> f64 {
    let wrapped = normalize_degrees(degrees);
    if wrapped >= 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Shortest signed angular distance from `from` to `to`, in degrees
///
/// The result lies in `[-180, 180)`, so a body moving from 359° to 1° has
/// travelled +2°, not -358°.
pub fn angular_difference(from: f64, to: f64) -> f64 {
    normalize_signed_degrees(to - from)
}

/// An angle split into whole degrees, arcminutes and arcseconds
///
/// The sign is carried separately so that `-0°30′` is representable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dms {
    pub negative: bool,
    pub degrees: u32,
    pub minutes: u32,
    pub seconds: f64,
}

impl Dms {
    /// Splits decimal degrees into degrees, arcminutes and arcseconds
    ///
    /// Seconds that round up to 60.0 at display precision carry into
    /// the minutes, and minutes carry into the degrees.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use grahaghadi::coordinates::angle::Dms;
    ///
    /// let dms = Dms::from_degrees(193.5);
    /// assert_eq!(dms.degrees, 193);
    /// assert_eq!(dms.minutes, 30);
    /// assert!(dms.seconds.abs() < 1e-9);
    /// ```
    pub fn from_degrees(value: f64) -> Self {
        let negative = value < 0.0;
        let total_seconds = (value.abs() * 3600.0 * 100.0).round() / 100.0;

        let mut degrees = (total_seconds / 3600.0).floor();
        let mut minutes = ((total_seconds - degrees * 3600.0) / 60.0).floor();
        let mut seconds = total_seconds - degrees * 3600.0 - minutes * 60.0;

        if seconds >= 60.0 {
            seconds -= 60.0;
            minutes += 1.0;
        }
        if minutes >= 60.0 {
            minutes -= 60.0;
            degrees += 1.0;
        }

        Self {
            negative,
            degrees: degrees as u32,
            minutes: minutes as u32,
            seconds: seconds.max(0.0),
        }
    }

    /// Converts back to signed decimal degrees
    pub fn to_degrees(&self) -> f64 {
        let magnitude =
            self.degrees as f64 + self.minutes as f64 / 60.0 + self.seconds / 3600.0;
        if self.negative {
            -magnitude
        } else {
            magnitude
        }
    }
}

impl fmt::Display for Dms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.negative { "-" } else { "" };
        write!(
            f,
            "{}{}°{:02}′{:05.2}″",
            sign, self.degrees, self.minutes, self.seconds
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(-720.5), 359.5);
        assert_relative_eq!(normalize_degrees(1234.5), 154.5, epsilon = 1e-12);

        // Tiny negative values must not produce 360.0
        let tiny = normalize_degrees(-1e-18);
        assert!((0.0..360.0).contains(&tiny));
    }

    #[test]
    fn test_angular_difference_across_seam() {
        assert_relative_eq!(angular_difference(359.0, 1.0), 2.0, epsilon = 1e-12);
        assert_relative_eq!(angular_difference(1.0, 359.0), -2.0, epsilon = 1e-12);
        assert_relative_eq!(angular_difference(10.0, 100.0), 90.0, epsilon = 1e-12);
    }

    #[test]
    fn test_dms_round_trip() {
        for &value in &[0.0, 12.345678, 193.5, 359.999, -23.4392911] {
            let dms = Dms::from_degrees(value);
            assert_relative_eq!(dms.to_degrees(), value, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_dms_carry() {
        // 29.9999999° rounds to 30°00′00.00″ rather than 29°59′60″
        let dms = Dms::from_degrees(29.999_999_9);
        assert_eq!(dms.degrees, 30);
        assert_eq!(dms.minutes, 0);
        assert_eq!(format!("{}", dms), "30°00′00.00″");
    }
}
