//! NAIF body ID numbers and names
//!
//! The first name listed for an ID is its display name; every name is
//! accepted for lookup, case-insensitively.

use lazy_static::lazy_static;
use std::collections::HashMap;

lazy_static! {
    /// Map from target ID numbers to display names
    static ref TARGET_NAMES: HashMap<i32, &'static str> = {
        let mut m = HashMap::new();
        for &(id, name) in TARGET_NAME_PAIRS.iter() {
            m.entry(id).or_insert(name);
        }
        m
    };

    /// Map from lowercase target names to ID numbers
    static ref TARGET_IDS: HashMap<String, i32> = {
        let mut m = HashMap::new();
        for &(id, name) in TARGET_NAME_PAIRS.iter() {
            m.insert(name.to_lowercase(), id);
        }
        m
    };
}

/// Get the display name of a target given its ID number
pub fn target_name(id: i32) -> Option<&'static str> {
    TARGET_NAMES.get(&id).copied()
}

/// Get the ID number of a target given any of its names
pub fn target_id(name: &str) -> Option<i32> {
    TARGET_IDS.get(&name.trim().to_lowercase()).copied()
}

/// Pairs of (id, name) for the bodies carried by the DE kernels
const TARGET_NAME_PAIRS: &[(i32, &str)] = &[
    (0, "SOLAR SYSTEM BARYCENTER"),
    (0, "SSB"),
    (1, "MERCURY BARYCENTER"),
    (2, "VENUS BARYCENTER"),
    (3, "EARTH-MOON BARYCENTER"),
    (3, "EMB"),
    (3, "EARTH BARYCENTER"),
    (4, "MARS BARYCENTER"),
    (5, "JUPITER BARYCENTER"),
    (6, "SATURN BARYCENTER"),
    (7, "URANUS BARYCENTER"),
    (8, "NEPTUNE BARYCENTER"),
    (9, "PLUTO BARYCENTER"),
    (10, "SUN"),
    (199, "MERCURY"),
    (299, "VENUS"),
    (301, "MOON"),
    (399, "EARTH"),
    (499, "MARS"),
    (599, "JUPITER"),
    (699, "SATURN"),
    (799, "URANUS"),
    (899, "NEPTUNE"),
    (999, "PLUTO"),
];

/// Common target IDs
pub mod targets {
    pub const SOLAR_SYSTEM_BARYCENTER: i32 = 0;
    pub const MERCURY_BARYCENTER: i32 = 1;
    pub const VENUS_BARYCENTER: i32 = 2;
    pub const EARTH_MOON_BARYCENTER: i32 = 3;
    pub const MARS_BARYCENTER: i32 = 4;
    pub const JUPITER_BARYCENTER: i32 = 5;
    pub const SATURN_BARYCENTER: i32 = 6;
    pub const SUN: i32 = 10;
    pub const MERCURY: i32 = 199;
    pub const VENUS: i32 = 299;
    pub const MOON: i32 = 301;
    pub const EARTH: i32 = 399;
    pub const MARS: i32 = 499;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_is_first_listed() {
        assert_eq!(target_name(0), Some("SOLAR SYSTEM BARYCENTER"));
        assert_eq!(target_name(3), Some("EARTH-MOON BARYCENTER"));
        assert_eq!(target_name(301), Some("MOON"));
        assert_eq!(target_name(12345), None);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(target_id("emb"), Some(targets::EARTH_MOON_BARYCENTER));
        assert_eq!(target_id(" Earth "), Some(targets::EARTH));
        assert_eq!(target_id("vulcan"), None);
    }
}
