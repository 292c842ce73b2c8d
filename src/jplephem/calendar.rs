//! Calendar date and Julian date conversion functions
//!
//! Proleptic Gregorian throughout. The algorithms are the integer forms from
//! the Explanatory Supplement to the Astronomical Almanac, 15.11.

/// Convert a Julian day number to a calendar date (year, month, day)
pub fn compute_calendar_date(jd_integer: i64) -> (i32, u32, u32) {
    let f = jd_integer + 1401 + ((4 * jd_integer + 274277) / 146097 * 3 / 4 - 38);
    let e = 4 * f + 3;
    let g = (e % 1461) / 4;
    let h = 5 * g + 2;
    let day = (h % 153) / 5 + 1;
    let month = (h / 153 + 2) % 12 + 1;
    let year = e / 1461 - 4716 + (12 + 2 - month) / 12;

    (year as i32, month as u32, day as u32)
}

/// Convert (year, month, day) to the Julian day number of that day's noon
pub fn compute_julian_day(year: i32, month: u32, day: u32) -> i64 {
    let (year, month, day) = (year as i64, month as i64, day as i64);
    let janfeb = if month < 3 { 1 } else { 0 };

    1461 * (year + 4800 - janfeb) / 4 + 367 * (month - 2 + 12 * janfeb) / 12
        - 3 * ((year + 4900 - janfeb) / 100) / 4
        - 32075
        + day
}

/// Julian date of a calendar instant given as a date plus seconds into the day
///
/// Julian dates begin at noon, so midnight is `.5` and noon is `.0`.
pub fn compute_julian_date(year: i32, month: u32, day: u32, seconds_of_day: f64) -> f64 {
    compute_julian_day(year, month, day) as f64 - 0.5 + seconds_of_day / 86_400.0
}

/// Calendar date (year, month, day) containing the given Julian date
pub fn calendar_date_of(jd: f64) -> (i32, u32, u32) {
    compute_calendar_date((jd + 0.5).floor() as i64)
}

/// Format a Julian date as a calendar date string (YYYY-MM-DD)
pub fn format_date(jd: f64) -> String {
    let (year, month, day) = calendar_date_of(jd);
    format!("{:04}-{:02}-{:02}", year, month, day)
}
