//! Error types for the jplephem module

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for kernel reading
#[derive(Error, Debug)]
pub enum JplephemError {
    /// Error when a file I/O operation fails
    #[error("File I/O error on {path:?}: {source}")]
    FileError {
        /// The path of the file that caused the error
        path: PathBuf,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// Error when a date is outside the range covered by the ephemeris
    #[error("Date JD {jd:.4} is outside ephemeris range (JD {start_jd:.1}..{end_jd:.1})")]
    OutOfRangeError {
        /// The Julian date (TDB) that was requested
        jd: f64,
        /// The start of the covered range
        start_jd: f64,
        /// The end of the covered range
        end_jd: f64,
    },

    /// Error when the file format is invalid or unsupported
    #[error("Invalid file format: {0}")]
    InvalidFormat(String),

    /// Error when no segment chain links the target to the solar system barycenter
    #[error("Body not found: center={center}, target={target}")]
    BodyNotFound {
        /// The center body ID
        center: i32,
        /// The target body ID
        target: i32,
    },

    /// Error when the segment data type is not supported
    #[error("Unsupported SPK data type: {0}")]
    UnsupportedDataType(i32),
}

/// Extension of the Result type for jplephem operations
pub type Result<T> = std::result::Result<T, JplephemError>;

/// Helper function to convert a std::io::Error to JplephemError
pub fn io_err(path: impl Into<PathBuf>, err: std::io::Error) -> JplephemError {
    JplephemError::FileError {
        path: path.into(),
        source: err,
    }
}
