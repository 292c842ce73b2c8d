//! Reference-frame models: precession of the equinox and nutation

pub mod nutation;
pub mod precession;

pub use nutation::{fundamental_arguments, nutation_arcsec, nutation_longitude_deg};
pub use precession::{general_precession_deg, mean_obliquity_arcsec};
