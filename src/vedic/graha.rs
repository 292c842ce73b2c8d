//! The nine grahas: seven physical bodies and the two lunar nodes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A graha tracked by the calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Graha {
    Sun,
    Moon,
    Mars,
    Mercury,
    Jupiter,
    Venus,
    Saturn,
    /// Ascending lunar node
    Rahu,
    /// Descending lunar node, always opposite Rahu
    Ketu,
}

/// All grahas in traditional weekday order
pub const ALL_GRAHAS: [Graha; 9] = [
    Graha::Sun,
    Graha::Moon,
    Graha::Mars,
    Graha::Mercury,
    Graha::Jupiter,
    Graha::Venus,
    Graha::Saturn,
    Graha::Rahu,
    Graha::Ketu,
];

impl Graha {
    pub const fn all() -> &'static [Graha] {
        &ALL_GRAHAS
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    /// English name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Moon => "Moon",
            Self::Mars => "Mars",
            Self::Mercury => "Mercury",
            Self::Jupiter => "Jupiter",
            Self::Venus => "Venus",
            Self::Saturn => "Saturn",
            Self::Rahu => "Rahu",
            Self::Ketu => "Ketu",
        }
    }

    /// Romanized Sanskrit name
    pub const fn sanskrit_name(self) -> &'static str {
        match self {
            Self::Sun => "Surya",
            Self::Moon => "Chandra",
            Self::Mars => "Mangala",
            Self::Mercury => "Budha",
            Self::Jupiter => "Brihaspati",
            Self::Venus => "Shukra",
            Self::Saturn => "Shani",
            Self::Rahu => "Rahu",
            Self::Ketu => "Ketu",
        }
    }

    /// Devanagari name
    pub const fn hindi_name(self) -> &'static str {
        match self {
            Self::Sun => "सूर्य",
            Self::Moon => "चन्द्र",
            Self::Mars => "मंगल",
            Self::Mercury => "बुध",
            Self::Jupiter => "बृहस्पति",
            Self::Venus => "शुक्र",
            Self::Saturn => "शनि",
            Self::Rahu => "राहु",
            Self::Ketu => "केतु",
        }
    }

    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Sun => "🜚",
            Self::Moon => "☽",
            Self::Mars => "♂",
            Self::Mercury => "☿",
            Self::Jupiter => "♃",
            Self::Venus => "♀",
            Self::Saturn => "♄",
            Self::Rahu => "☊",
            Self::Ketu => "☋",
        }
    }

    /// Rahu and Ketu are mathematical points, not bodies in a kernel
    pub const fn is_node(self) -> bool {
        matches!(self, Self::Rahu | Self::Ketu)
    }
}

impl fmt::Display for Graha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Graha {
    type Err = String;

    /// Accepts English, Sanskrit or Devanagari names, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        let alias = match wanted.as_str() {
            "guru" => Some(Self::Jupiter),
            "mangal" => Some(Self::Mars),
            "budh" => Some(Self::Mercury),
            "north node" => Some(Self::Rahu),
            "south node" => Some(Self::Ketu),
            _ => None,
        };
        alias
            .or_else(|| {
                ALL_GRAHAS.iter().copied().find(|g| {
                    g.name().to_lowercase() == wanted
                        || g.sanskrit_name().to_lowercase() == wanted
                        || g.hindi_name() == wanted
                })
            })
            .ok_or_else(|| format!("unknown graha '{}'", s.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_follow_table_order() {
        for (i, graha) in Graha::all().iter().enumerate() {
            assert_eq!(graha.index(), i);
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("sun".parse::<Graha>().unwrap(), Graha::Sun);
        assert_eq!("Chandra".parse::<Graha>().unwrap(), Graha::Moon);
        assert_eq!("guru".parse::<Graha>().unwrap(), Graha::Jupiter);
        assert_eq!("शनि".parse::<Graha>().unwrap(), Graha::Saturn);
        assert_eq!(" KETU ".parse::<Graha>().unwrap(), Graha::Ketu);
        assert!("pluto".parse::<Graha>().is_err());
    }

    #[test]
    fn test_nodes() {
        let nodes: Vec<_> = Graha::all().iter().filter(|g| g.is_node()).collect();
        assert_eq!(nodes, vec![&Graha::Rahu, &Graha::Ketu]);
    }
}
