//! Time module for converting civil timestamps to astronomical time scales
//!
//! A query starts as a wall-clock reading in a fixed-offset zone (IST by
//! default). That reading is converted to a Julian date in Universal Time,
//! then to Terrestrial Time via ΔT, and finally to Barycentric Dynamical
//! Time, which is the argument JPL kernels are tabulated against.

use chrono::{Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc, Weekday};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::constants::{DAY_S, IST_OFFSET_MINUTES, J2000, JULIAN_CENTURY};
use crate::jplephem::calendar::compute_julian_date;

/// Error type for time operations
#[derive(Debug, Error)]
pub enum TimeError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid time of day: {0}")]
    InvalidTime(String),

    #[error("UTC offset of {0} minutes is outside ±24h")]
    InvalidOffset(i32),
}

/// Result type for time operations
pub type Result<T> = std::result::Result<T, TimeError>;

const IST: FixedOffset = match FixedOffset::east_opt(IST_OFFSET_MINUTES * 60) {
    Some(offset) => offset,
    None => panic!("IST offset out of range"),
};

/// Build a fixed UTC offset from a signed number of minutes east of Greenwich
pub fn fixed_offset(minutes: i32) -> Result<FixedOffset> {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or(TimeError::InvalidOffset(minutes))
}

/// A wall-clock reading in a fixed-offset zone
///
/// There is no timezone database: the offset is constant, which is exact for
/// IST (no daylight saving since 1945).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CivilTime {
    local: NaiveDateTime,
    offset: FixedOffset,
}

impl CivilTime {
    pub fn new(local: NaiveDateTime, offset: FixedOffset) -> Self {
        Self { local, offset }
    }

    /// A wall-clock reading in Indian Standard Time (UTC+5:30)
    pub fn ist(local: NaiveDateTime) -> Self {
        Self { local, offset: IST }
    }

    /// Build from calendar fields, validating each one
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        offset_minutes: i32,
    ) -> Result<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| TimeError::InvalidDate(format!("{year:04}-{month:02}-{day:02}")))?;
        let time = NaiveTime::from_hms_opt(hour, minute, second)
            .ok_or_else(|| TimeError::InvalidTime(format!("{hour:02}:{minute:02}:{second:02}")))?;
        Ok(Self::new(date.and_time(time), fixed_offset(offset_minutes)?))
    }

    /// Parse `YYYY-MM-DD` and an optional `HH:MM[:SS]` (midnight when absent)
    pub fn parse(date: &str, time: Option<&str>, offset_minutes: i32) -> Result<Self> {
        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map_err(|e| TimeError::InvalidDate(format!("{date}: {e}")))?;

        let time = match time.map(str::trim) {
            None | Some("") => NaiveTime::MIN,
            Some(text) => NaiveTime::parse_from_str(text, "%H:%M:%S")
                .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M"))
                .map_err(|e| TimeError::InvalidTime(format!("{text}: {e}")))?,
        };

        Ok(Self::new(date.and_time(time), fixed_offset(offset_minutes)?))
    }

    /// The current system time, read in the given offset
    pub fn now(offset_minutes: i32) -> Result<Self> {
        let offset = fixed_offset(offset_minutes)?;
        let local = Utc::now().with_timezone(&offset).naive_local();
        Ok(Self::new(local, offset))
    }

    pub fn local(&self) -> NaiveDateTime {
        self.local
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn offset_minutes(&self) -> i32 {
        self.offset.local_minus_utc() / 60
    }

    /// The same instant expressed in UTC
    pub fn utc(&self) -> NaiveDateTime {
        self.local - chrono::Duration::seconds(self.offset.local_minus_utc() as i64)
    }

    /// Weekday of the local civil date
    pub fn weekday(&self) -> Weekday {
        self.local.weekday()
    }

    /// Local civil hour, 0..=23
    pub fn hour(&self) -> u32 {
        self.local.hour()
    }

    /// Julian date (UT) of this reading
    pub fn julian_date_ut(&self) -> f64 {
        let utc = self.utc();
        let seconds = utc.num_seconds_from_midnight() as f64 + utc.nanosecond() as f64 * 1e-9;
        compute_julian_date(utc.year(), utc.month(), utc.day(), seconds)
    }

    /// Convert to an astronomical instant
    pub fn to_instant(&self) -> Instant {
        Instant::from_jd_ut(self.julian_date_ut())
    }
}

impl fmt::Display for CivilTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.local.format("%Y-%m-%d %H:%M:%S"), self.offset)
    }
}

impl Serialize for CivilTime {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let stamp = self.local.and_local_timezone(self.offset).single();
        match stamp {
            Some(dt) => serializer.serialize_str(&dt.to_rfc3339()),
            None => serializer.serialize_str(&self.to_string()),
        }
    }
}

/// One moment expressed on the time scales the ephemerides need
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Instant {
    /// Julian date, Universal Time
    pub jd_ut: f64,
    /// TT − UT in seconds
    pub delta_t: f64,
    /// Julian date, Terrestrial Time
    pub jd_tt: f64,
    /// Julian date, Barycentric Dynamical Time
    pub jd_tdb: f64,
}

impl Instant {
    pub fn from_jd_ut(jd_ut: f64) -> Self {
        let delta_t = delta_t(decimal_year(jd_ut));
        let jd_tt = jd_ut + delta_t / DAY_S;
        let jd_tdb = jd_tt + tdb_minus_tt(jd_tt) / DAY_S;
        Self {
            jd_ut,
            delta_t,
            jd_tt,
            jd_tdb,
        }
    }

    /// The instant `days` later (negative for earlier)
    pub fn offset_days(&self, days: f64) -> Self {
        Self::from_jd_ut(self.jd_ut + days)
    }

    /// Julian centuries of TDB since J2000.0
    pub fn centuries_tdb(&self) -> f64 {
        (self.jd_tdb - J2000) / JULIAN_CENTURY
    }

    /// TDB seconds since J2000.0, the time argument of SPK segments
    pub fn seconds_tdb_since_j2000(&self) -> f64 {
        (self.jd_tdb - J2000) * DAY_S
    }
}

/// Decimal year of a Julian date, accurate enough for ΔT lookup
pub fn decimal_year(jd: f64) -> f64 {
    2000.0 + (jd - J2000) / 365.25
}

/// ΔT = TT − UT1 in seconds (Espenak & Meeus polynomial expressions)
pub fn delta_t(year: f64) -> f64 {
    if year < -500.0 {
        let u = (year - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u
    } else if year < 500.0 {
        let t = year / 100.0;
        10583.6 - 1014.41 * t + 33.78311 * t * t - 5.952053 * t.powi(3) - 0.1798452 * t.powi(4)
            + 0.022174192 * t.powi(5)
            + 0.0090316521 * t.powi(6)
    } else if year < 1600.0 {
        let t = (year - 1000.0) / 100.0;
        1574.2 - 556.01 * t + 71.23472 * t * t + 0.319781 * t.powi(3)
            - 0.8503463 * t.powi(4)
            - 0.005050998 * t.powi(5)
            + 0.0083572073 * t.powi(6)
    } else if year < 1700.0 {
        let t = year - 1600.0;
        120.0 - 0.9808 * t - 0.01532 * t * t + t.powi(3) / 7129.0
    } else if year < 1800.0 {
        let t = year - 1700.0;
        8.83 + 0.1603 * t - 0.0059285 * t * t + 0.00013336 * t.powi(3) - t.powi(4) / 1174000.0
    } else if year < 1860.0 {
        let t = year - 1800.0;
        13.72 - 0.332447 * t + 0.0068612 * t * t + 0.0041116 * t.powi(3)
            - 0.00037436 * t.powi(4)
            + 0.0000121272 * t.powi(5)
            - 0.0000001699 * t.powi(6)
            + 0.000000000875 * t.powi(7)
    } else if year < 1900.0 {
        let t = year - 1860.0;
        7.62 + 0.5737 * t - 0.251754 * t * t + 0.01680668 * t.powi(3) - 0.0004473624 * t.powi(4)
            + t.powi(5) / 233174.0
    } else if year < 1920.0 {
        let t = year - 1900.0;
        -2.79 + 1.494119 * t - 0.0598939 * t * t + 0.0061966 * t.powi(3) - 0.000197 * t.powi(4)
    } else if year < 1941.0 {
        let t = year - 1920.0;
        21.20 + 0.84493 * t - 0.076100 * t * t + 0.0020936 * t.powi(3)
    } else if year < 1961.0 {
        let t = year - 1950.0;
        29.07 + 0.407 * t - t * t / 233.0 + t.powi(3) / 2547.0
    } else if year < 1986.0 {
        let t = year - 1975.0;
        45.45 + 1.067 * t - t * t / 260.0 - t.powi(3) / 718.0
    } else if year < 2005.0 {
        let t = year - 2000.0;
        63.86 + 0.3345 * t - 0.060374 * t * t
            + 0.0017275 * t.powi(3)
            + 0.000651814 * t.powi(4)
            + 0.00002373599 * t.powi(5)
    } else if year < 2050.0 {
        let t = year - 2000.0;
        62.92 + 0.32217 * t + 0.005589 * t * t
    } else if year < 2150.0 {
        let u = (year - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u - 0.5628 * (2150.0 - year)
    } else {
        let u = (year - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u
    }
}

/// TDB − TT in seconds (USNO Circular 179, eq. 2.6)
pub fn tdb_minus_tt(jd_tt: f64) -> f64 {
    let t = (jd_tt - J2000) / JULIAN_CENTURY;

    0.001657 * f64::sin(628.3076 * t + 6.2401)
        + 0.000022 * f64::sin(575.3385 * t + 4.2970)
        + 0.000014 * f64::sin(1256.6152 * t + 6.1969)
        + 0.000005 * f64::sin(606.9777 * t + 4.0212)
        + 0.000005 * f64::sin(52.9691 * t + 0.4444)
        + 0.000002 * f64::sin(21.3299 * t + 5.5431)
        + 0.000010 * t * f64::sin(628.3076 * t + 4.2490)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ist_to_universal_time() {
        // 17:30 IST is 12:00 UT
        let civil = CivilTime::from_ymd_hms(2000, 1, 1, 17, 30, 0, 330).unwrap();
        assert_eq!(civil.utc().hour(), 12);
        assert_relative_eq!(civil.julian_date_ut(), J2000, epsilon = 1e-9);
    }

    #[test]
    fn test_offset_crosses_midnight() {
        // 03:00 IST on Jan 2 is still Jan 1 in UT
        let civil = CivilTime::from_ymd_hms(2024, 1, 2, 3, 0, 0, 330).unwrap();
        assert_eq!(civil.utc().day(), 1);
        assert_eq!(civil.weekday(), Weekday::Tue);
        assert_relative_eq!(civil.julian_date_ut(), 2460311.5 - 2.5 / 24.0, epsilon = 1e-9);
    }

    #[test]
    fn test_parse_accepts_short_and_long_times() {
        let a = CivilTime::parse("2024-03-15", Some("06:45"), 330).unwrap();
        let b = CivilTime::parse("2024-03-15", Some("06:45:00"), 330).unwrap();
        assert_eq!(a, b);

        let midnight = CivilTime::parse("2024-03-15", None, 330).unwrap();
        assert_eq!(midnight.hour(), 0);

        assert!(CivilTime::parse("2024-02-30", None, 330).is_err());
        assert!(CivilTime::parse("2024-03-15", Some("25:00"), 330).is_err());
        assert!(matches!(
            CivilTime::parse("2024-03-15", None, 24 * 60 + 1),
            Err(TimeError::InvalidOffset(_))
        ));
    }

    #[test]
    fn test_extreme_offsets_are_rejected() {
        assert!(matches!(fixed_offset(i32::MAX), Err(TimeError::InvalidOffset(i32::MAX))));
        assert!(matches!(fixed_offset(i32::MIN), Err(TimeError::InvalidOffset(i32::MIN))));
        assert_eq!(fixed_offset(-330).unwrap().local_minus_utc(), -330 * 60);
    }

    #[test]
    fn test_delta_t_modern_values() {
        // Observed ΔT: ~63.8 s in 2000, ~69 s in 2020
        assert_relative_eq!(delta_t(2000.0), 63.86, epsilon = 0.01);
        assert_relative_eq!(delta_t(2020.0), 71.6, epsilon = 3.0);
        assert!(delta_t(1900.0) < 0.0);
    }

    #[test]
    fn test_instant_scales_are_ordered() {
        let instant = Instant::from_jd_ut(J2000);
        assert!(instant.jd_tt > instant.jd_ut);
        assert_relative_eq!((instant.jd_tt - instant.jd_ut) * DAY_S, instant.delta_t, epsilon = 1e-4);
        // TDB − TT stays within ±2 ms
        assert!(((instant.jd_tdb - instant.jd_tt) * DAY_S).abs() < 0.002);
    }

    #[test]
    fn test_offset_days() {
        let instant = Instant::from_jd_ut(J2000);
        let later = instant.offset_days(1.5);
        assert_relative_eq!(later.jd_ut - instant.jd_ut, 1.5, epsilon = 1e-12);
    }
}
