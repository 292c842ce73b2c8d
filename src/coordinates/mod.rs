pub mod angle;
pub mod ecliptic;

pub use angle::{angular_difference, normalize_degrees, Dms};
pub use ecliptic::EclipticCoordinates;
