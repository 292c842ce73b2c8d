//! Panchang elements derived alongside the planetary positions
//!
//! Tithi and paksha come from the Moon-Sun elongation. Vaar, disha shool
//! and the hourly choghadiya depend only on the local civil time.

use chrono::Weekday;
use serde::Serialize;
use std::fmt;

use crate::constants::TITHI_SPAN;
use crate::coordinates::angle::normalize_degrees;
use crate::time::CivilTime;

/// Waxing or waning half of the lunar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Paksha {
    Shukla,
    Krishna,
}

impl fmt::Display for Paksha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shukla => f.write_str("Shukla"),
            Self::Krishna => f.write_str("Krishna"),
        }
    }
}

const TITHI_NAMES: [&str; 14] = [
    "Pratipada",
    "Dwitiya",
    "Tritiya",
    "Chaturthi",
    "Panchami",
    "Shashthi",
    "Saptami",
    "Ashtami",
    "Navami",
    "Dashami",
    "Ekadashi",
    "Dwadashi",
    "Trayodashi",
    "Chaturdashi",
];

/// One of the thirty lunar days
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tithi {
    /// 1..=30, counted from the new moon
    pub number: u8,
    pub name: &'static str,
    pub paksha: Paksha,
    /// Moon minus Sun, degrees in `[0, 360)`
    pub elongation: f64,
}

impl Tithi {
    /// Tithi for a Moon-Sun elongation in degrees (any range)
    pub fn from_elongation(elongation: f64) -> Self {
        let elongation = normalize_degrees(elongation);
        let number = ((elongation / TITHI_SPAN).floor() as u8 + 1).clamp(1, 30);
        let paksha = if number <= 15 {
            Paksha::Shukla
        } else {
            Paksha::Krishna
        };
        let name = match number {
            15 => "Purnima",
            30 => "Amavasya",
            n => TITHI_NAMES[((n - 1) % 15) as usize],
        };
        Self {
            number,
            name,
            paksha,
            elongation,
        }
    }

    /// Tithi from the Moon's and Sun's longitudes (same zodiac for both)
    pub fn from_longitudes(moon: f64, sun: f64) -> Self {
        Self::from_elongation(moon - sun)
    }

    /// Fraction of this tithi already elapsed, `[0, 1)`
    pub fn elapsed_fraction(&self) -> f64 {
        (self.elongation / TITHI_SPAN).fract()
    }
}

impl fmt::Display for Tithi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} Paksha)", self.name, self.paksha)
    }
}

/// Compass direction inauspicious for travel on a given weekday
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    East,
    North,
    NorthWest,
    South,
    West,
    SouthEast,
    NorthEast,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::East => "East",
            Self::North => "North",
            Self::NorthWest => "North-West",
            Self::South => "South",
            Self::West => "West",
            Self::SouthEast => "South-East",
            Self::NorthEast => "North-East",
        })
    }
}

/// Disha shool direction for a weekday
pub fn disha_shool(weekday: Weekday) -> Direction {
    match weekday {
        Weekday::Mon => Direction::East,
        Weekday::Tue => Direction::North,
        Weekday::Wed => Direction::NorthWest,
        Weekday::Thu => Direction::South,
        Weekday::Fri => Direction::West,
        Weekday::Sat => Direction::SouthEast,
        Weekday::Sun => Direction::NorthEast,
    }
}

/// Sanskrit weekday name
pub fn vaar(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "Ravivara",
        Weekday::Mon => "Somavara",
        Weekday::Tue => "Mangalavara",
        Weekday::Wed => "Budhavara",
        Weekday::Thu => "Guruvara",
        Weekday::Fri => "Shukravara",
        Weekday::Sat => "Shanivara",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Choghadiya {
    Amrit,
    Shubh,
    Labh,
    Char,
    Rog,
    Kaal,
    Udveg,
}

const CHOGHADIYA_CYCLE: [Choghadiya; 7] = [
    Choghadiya::Amrit,
    Choghadiya::Shubh,
    Choghadiya::Labh,
    Choghadiya::Char,
    Choghadiya::Rog,
    Choghadiya::Kaal,
    Choghadiya::Udveg,
];

impl Choghadiya {
    /// Period for a local civil hour, cycling through the seven names
    pub fn for_hour(hour: u32) -> Self {
        CHOGHADIYA_CYCLE[(hour % 7) as usize]
    }

    /// Amrit, Shubh, Labh and Char are taken as favourable
    pub fn is_auspicious(self) -> bool {
        matches!(self, Self::Amrit | Self::Shubh | Self::Labh | Self::Char)
    }
}

impl fmt::Display for Choghadiya {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// The panchang fields reported with every snapshot
#[derive(Debug, Clone, Serialize)]
pub struct Panchang {
    pub tithi: Tithi,
    pub vaar: &'static str,
    pub disha_shool: Direction,
    pub choghadiya: Choghadiya,
}

impl Panchang {
    pub fn new(time: &CivilTime, moon_longitude: f64, sun_longitude: f64) -> Self {
        let weekday = time.weekday();
        Self {
            tithi: Tithi::from_longitudes(moon_longitude, sun_longitude),
            vaar: vaar(weekday),
            disha_shool: disha_shool(weekday),
            choghadiya: Choghadiya::for_hour(time.hour()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 1, "Pratipada", Paksha::Shukla)]
    #[case(11.999, 1, "Pratipada", Paksha::Shukla)]
    #[case(12.0, 2, "Dwitiya", Paksha::Shukla)]
    #[case(170.0, 15, "Purnima", Paksha::Shukla)]
    #[case(180.0, 16, "Pratipada", Paksha::Krishna)]
    #[case(354.0, 30, "Amavasya", Paksha::Krishna)]
    #[case(-6.0, 30, "Amavasya", Paksha::Krishna)]
    fn test_tithi_from_elongation(
        #[case] elongation: f64,
        #[case] number: u8,
        #[case] name: &str,
        #[case] paksha: Paksha,
    ) {
        let tithi = Tithi::from_elongation(elongation);
        assert_eq!(tithi.number, number);
        assert_eq!(tithi.name, name);
        assert_eq!(tithi.paksha, paksha);
    }

    #[test]
    fn test_tithi_always_in_range() {
        for i in 0..3600 {
            let tithi = Tithi::from_longitudes(i as f64 * 0.1, 359.95);
            assert!((1..=30).contains(&tithi.number));
            assert!((0.0..1.0).contains(&tithi.elapsed_fraction()));
        }
    }

    #[test]
    fn test_disha_shool_table() {
        assert_eq!(disha_shool(Weekday::Mon), Direction::East);
        assert_eq!(disha_shool(Weekday::Wed), Direction::NorthWest);
        assert_eq!(disha_shool(Weekday::Sun), Direction::NorthEast);
        assert_eq!(Direction::SouthEast.to_string(), "South-East");
    }

    #[test]
    fn test_choghadiya_cycle() {
        assert_eq!(Choghadiya::for_hour(0), Choghadiya::Amrit);
        assert_eq!(Choghadiya::for_hour(6), Choghadiya::Udveg);
        assert_eq!(Choghadiya::for_hour(7), Choghadiya::Amrit);
        assert_eq!(Choghadiya::for_hour(23), Choghadiya::Kaal);
        assert!(!Choghadiya::Rog.is_auspicious());
    }

    #[test]
    fn test_panchang_uses_local_calendar() {
        // 2024-01-02 03:00 IST is a Tuesday locally (Monday in UT)
        let time = CivilTime::from_ymd_hms(2024, 1, 2, 3, 0, 0, 330).unwrap();
        let panchang = Panchang::new(&time, 100.0, 10.0);
        assert_eq!(panchang.vaar, "Mangalavara");
        assert_eq!(panchang.disha_shool, Direction::North);
        assert_eq!(panchang.choghadiya, Choghadiya::Char);
        assert_eq!(panchang.tithi.number, 8);
    }
}
