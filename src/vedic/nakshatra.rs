//! Nakshatras: the 27 lunar mansions of 13°20′ each, and their padas
//!
//! Each nakshatra is ruled by a graha, cycling through the Vimshottari
//! sequence Ketu, Venus, Sun, Moon, Mars, Rahu, Jupiter, Saturn, Mercury
//! three times around the zodiac.

use serde::Serialize;
use std::fmt;

use crate::constants::NAKSHATRA_SPAN;
use crate::coordinates::angle::normalize_degrees;
use crate::vedic::graha::Graha;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Nakshatra {
    Ashwini,
    Bharani,
    Krittika,
    Rohini,
    Mrigashira,
    Ardra,
    Punarvasu,
    Pushya,
    Ashlesha,
    Magha,
    PurvaPhalguni,
    UttaraPhalguni,
    Hasta,
    Chitra,
    Swati,
    Vishakha,
    Anuradha,
    Jyeshtha,
    Mula,
    PurvaAshadha,
    UttaraAshadha,
    Shravana,
    Dhanishta,
    Shatabhisha,
    PurvaBhadrapada,
    UttaraBhadrapada,
    Revati,
}

pub const ALL_NAKSHATRAS: [Nakshatra; 27] = [
    Nakshatra::Ashwini,
    Nakshatra::Bharani,
    Nakshatra::Krittika,
    Nakshatra::Rohini,
    Nakshatra::Mrigashira,
    Nakshatra::Ardra,
    Nakshatra::Punarvasu,
    Nakshatra::Pushya,
    Nakshatra::Ashlesha,
    Nakshatra::Magha,
    Nakshatra::PurvaPhalguni,
    Nakshatra::UttaraPhalguni,
    Nakshatra::Hasta,
    Nakshatra::Chitra,
    Nakshatra::Swati,
    Nakshatra::Vishakha,
    Nakshatra::Anuradha,
    Nakshatra::Jyeshtha,
    Nakshatra::Mula,
    Nakshatra::PurvaAshadha,
    Nakshatra::UttaraAshadha,
    Nakshatra::Shravana,
    Nakshatra::Dhanishta,
    Nakshatra::Shatabhisha,
    Nakshatra::PurvaBhadrapada,
    Nakshatra::UttaraBhadrapada,
    Nakshatra::Revati,
];

const LORD_SEQUENCE: [Graha; 9] = [
    Graha::Ketu,
    Graha::Venus,
    Graha::Sun,
    Graha::Moon,
    Graha::Mars,
    Graha::Rahu,
    Graha::Jupiter,
    Graha::Saturn,
    Graha::Mercury,
];

const NAMES: [(&str, &str); 27] = [
    ("Ashwini", "अश्विनी"),
    ("Bharani", "भरणी"),
    ("Krittika", "कृत्तिका"),
    ("Rohini", "रोहिणी"),
    ("Mrigashira", "मृगशिरा"),
    ("Ardra", "आर्द्रा"),
    ("Punarvasu", "पुनर्वसु"),
    ("Pushya", "पुष्य"),
    ("Ashlesha", "आश्लेषा"),
    ("Magha", "मघा"),
    ("Purva Phalguni", "पूर्व फाल्गुनी"),
    ("Uttara Phalguni", "उत्तर फाल्गुनी"),
    ("Hasta", "हस्त"),
    ("Chitra", "चित्रा"),
    ("Swati", "स्वाति"),
    ("Vishakha", "विशाखा"),
    ("Anuradha", "अनुराधा"),
    ("Jyeshtha", "ज्येष्ठा"),
    ("Mula", "मूला"),
    ("Purva Ashadha", "पूर्वाषाढा"),
    ("Uttara Ashadha", "उत्तराषाढा"),
    ("Shravana", "श्रवण"),
    ("Dhanishta", "धनिष्ठा"),
    ("Shatabhisha", "शतभिषा"),
    ("Purva Bhadrapada", "पूर्वभाद्रपदा"),
    ("Uttara Bhadrapada", "उत्तरभाद्रपदा"),
    ("Revati", "रेवती"),
];

impl Nakshatra {
    pub const fn all() -> &'static [Nakshatra] {
        &ALL_NAKSHATRAS
    }

    /// Nakshatra for a 0-based index; indices wrap modulo 27
    pub const fn from_index(index: u8) -> Self {
        ALL_NAKSHATRAS[(index % 27) as usize]
    }

    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        NAMES[self as usize].0
    }

    pub const fn hindi_name(self) -> &'static str {
        NAMES[self as usize].1
    }

    /// Ruling graha (Vimshottari dasha lord)
    pub const fn lord(self) -> Graha {
        LORD_SEQUENCE[self as usize % 9]
    }

    /// Sidereal longitude where this nakshatra begins
    pub fn start_longitude(self) -> f64 {
        self as u8 as f64 * NAKSHATRA_SPAN
    }
}

impl fmt::Display for Nakshatra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Nakshatra placement of a sidereal longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NakshatraInfo {
    pub nakshatra: Nakshatra,
    /// Quarter of the nakshatra, 1..=4
    pub pada: u8,
    /// Degrees elapsed since the start of the nakshatra
    pub degrees_in_nakshatra: f64,
}

/// Position of a longitude measured in nakshatra spans, split into index and fraction
fn span_position(longitude: f64) -> (u8, f64) {
    let q = normalize_degrees(longitude) / NAKSHATRA_SPAN;
    let whole = q.floor();
    let index = (whole as u8).min(26);
    // When clamped at the top end the fraction is pinned just below 1.
    let fraction = if whole >= 27.0 { 1.0 - f64::EPSILON } else { q - whole };
    (index, fraction)
}

/// Nakshatra index `floor(L / (360/27)) mod 27`, always in `0..=26`
pub fn nakshatra_index(longitude: f64) -> u8 {
    span_position(longitude).0
}

/// Pada `floor((L mod span) / (span/4)) + 1`, always in `1..=4`
pub fn pada(longitude: f64) -> u8 {
    let (_, fraction) = span_position(longitude);
    ((fraction * 4.0).floor() as u8 + 1).clamp(1, 4)
}

pub fn nakshatra_from_longitude(longitude: f64) -> NakshatraInfo {
    let (index, fraction) = span_position(longitude);
    NakshatraInfo {
        nakshatra: Nakshatra::from_index(index),
        pada: ((fraction * 4.0).floor() as u8 + 1).clamp(1, 4),
        degrees_in_nakshatra: fraction * NAKSHATRA_SPAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 0, 1)]
    #[case(3.333, 0, 1)]
    #[case(3.334, 0, 2)]
    #[case(13.334, 1, 1)]
    #[case(193.5, 14, 3)]
    #[case(359.999, 26, 4)]
    #[case(-0.001, 26, 4)]
    fn test_index_and_pada(#[case] longitude: f64, #[case] index: u8, #[case] expected_pada: u8) {
        assert_eq!(nakshatra_index(longitude), index);
        assert_eq!(pada(longitude), expected_pada);
    }

    #[test]
    fn test_bounds_hold_everywhere() {
        for i in 0..=36_000 {
            let longitude = i as f64 * 0.01;
            let index = nakshatra_index(longitude);
            let p = pada(longitude);
            assert!(index < 27, "index {index} at {longitude}");
            assert!((1..=4).contains(&p), "pada {p} at {longitude}");
        }
    }

    #[test]
    fn test_lords_cycle() {
        assert_eq!(Nakshatra::Ashwini.lord(), Graha::Ketu);
        assert_eq!(Nakshatra::Magha.lord(), Graha::Ketu);
        assert_eq!(Nakshatra::Mula.lord(), Graha::Ketu);
        assert_eq!(Nakshatra::Chitra.lord(), Graha::Mars);
        assert_eq!(Nakshatra::Revati.lord(), Graha::Mercury);
    }

    #[test]
    fn test_info_of_spica_region() {
        let info = nakshatra_from_longitude(180.0);
        assert_eq!(info.nakshatra, Nakshatra::Chitra);
        assert_eq!(info.pada, 3);
        assert!((info.degrees_in_nakshatra - 6.666_666).abs() < 1e-5);
        assert_eq!(info.nakshatra.hindi_name(), "चित्रा");
        assert!((info.nakshatra.start_longitude() + info.degrees_in_nakshatra - 180.0).abs() < 1e-9);
    }
}
