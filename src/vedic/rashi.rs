//! Rashis: the twelve 30° signs of the sidereal zodiac

use serde::Serialize;
use std::fmt;

use crate::constants::RASHI_SPAN;
use crate::coordinates::angle::normalize_degrees;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Rashi {
    Mesha,
    Vrishabha,
    Mithuna,
    Karka,
    Simha,
    Kanya,
    Tula,
    Vrishchika,
    Dhanu,
    Makara,
    Kumbha,
    Meena,
}

pub const ALL_RASHIS: [Rashi; 12] = [
    Rashi::Mesha,
    Rashi::Vrishabha,
    Rashi::Mithuna,
    Rashi::Karka,
    Rashi::Simha,
    Rashi::Kanya,
    Rashi::Tula,
    Rashi::Vrishchika,
    Rashi::Dhanu,
    Rashi::Makara,
    Rashi::Kumbha,
    Rashi::Meena,
];

impl Rashi {
    pub const fn all() -> &'static [Rashi] {
        &ALL_RASHIS
    }

    /// Sign for a 0-based index; indices wrap modulo 12
    pub const fn from_index(index: u8) -> Self {
        ALL_RASHIS[(index % 12) as usize]
    }

    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Mesha => "Mesha",
            Self::Vrishabha => "Vrishabha",
            Self::Mithuna => "Mithuna",
            Self::Karka => "Karka",
            Self::Simha => "Simha",
            Self::Kanya => "Kanya",
            Self::Tula => "Tula",
            Self::Vrishchika => "Vrishchika",
            Self::Dhanu => "Dhanu",
            Self::Makara => "Makara",
            Self::Kumbha => "Kumbha",
            Self::Meena => "Meena",
        }
    }

    pub const fn western_name(self) -> &'static str {
        match self {
            Self::Mesha => "Aries",
            Self::Vrishabha => "Taurus",
            Self::Mithuna => "Gemini",
            Self::Karka => "Cancer",
            Self::Simha => "Leo",
            Self::Kanya => "Virgo",
            Self::Tula => "Libra",
            Self::Vrishchika => "Scorpio",
            Self::Dhanu => "Sagittarius",
            Self::Makara => "Capricorn",
            Self::Kumbha => "Aquarius",
            Self::Meena => "Pisces",
        }
    }

    pub const fn hindi_name(self) -> &'static str {
        match self {
            Self::Mesha => "मेष",
            Self::Vrishabha => "वृषभ",
            Self::Mithuna => "मिथुन",
            Self::Karka => "कर्क",
            Self::Simha => "सिंह",
            Self::Kanya => "कन्या",
            Self::Tula => "तुला",
            Self::Vrishchika => "वृश्चिक",
            Self::Dhanu => "धनु",
            Self::Makara => "मकर",
            Self::Kumbha => "कुंभ",
            Self::Meena => "मीन",
        }
    }
}

impl fmt::Display for Rashi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.western_name())
    }
}

/// Sign index `floor(L / 30)` in `0..=11` for any longitude
pub fn sign_index(longitude: f64) -> u8 {
    let index = (normalize_degrees(longitude) / RASHI_SPAN).floor() as u8;
    index.min(11)
}

/// Sign of a longitude and the degrees elapsed within it
pub fn rashi_from_longitude(longitude: f64) -> (Rashi, f64) {
    let index = sign_index(longitude);
    let within = normalize_degrees(longitude) - index as f64 * RASHI_SPAN;
    (Rashi::from_index(index), within.clamp(0.0, RASHI_SPAN))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 0)]
    #[case(29.999_999, 0)]
    #[case(30.0, 1)]
    #[case(193.5, 6)]
    #[case(359.999, 11)]
    #[case(-0.5, 11)]
    #[case(720.0 + 45.0, 1)]
    fn test_sign_index(#[case] longitude: f64, #[case] expected: u8) {
        assert_eq!(sign_index(longitude), expected);
    }

    #[test]
    fn test_sign_index_is_stable_under_renormalization() {
        for i in 0..360 {
            let longitude = i as f64 + 0.25;
            assert_eq!(sign_index(longitude), sign_index(longitude + 360.0));
            assert_eq!(sign_index(longitude), (longitude / 30.0).floor() as u8);
        }
    }

    #[test]
    fn test_rashi_from_longitude() {
        let (rashi, within) = rashi_from_longitude(193.5);
        assert_eq!(rashi, Rashi::Tula);
        assert_relative_eq!(within, 13.5, epsilon = 1e-12);
        assert_eq!(rashi.hindi_name(), "तुला");
        assert_eq!(rashi.to_string(), "Tula (Libra)");
    }
}
