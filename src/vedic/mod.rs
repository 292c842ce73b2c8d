//! Sidereal (Vedic) astronomy: reference systems, sectors and panchang

pub mod ayanamsha;
pub mod graha;
pub mod lunar_nodes;
pub mod nakshatra;
pub mod panchang;
pub mod rashi;

pub use ayanamsha::{ayanamsha_deg, to_sidereal, to_tropical, AyanamshaSystem};
pub use graha::Graha;
pub use lunar_nodes::{opposite_node, NodeMode};
pub use nakshatra::{nakshatra_from_longitude, nakshatra_index, pada, Nakshatra, NakshatraInfo};
pub use panchang::{Choghadiya, Direction, Panchang, Paksha, Tithi};
pub use rashi::{rashi_from_longitude, sign_index, Rashi};
