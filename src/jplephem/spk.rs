//! Spacecraft Planet Kernel (SPK) format handling
//!
//! Reads the Chebyshev segment types used by the JPL DE series:
//! type 2 (position coefficients, velocity by differentiation) and type 3
//! (separate position and velocity coefficients).
//!
//! The SPK format is described in:
//! http://naif.jpl.nasa.gov/pub/naif/toolkit_docs/FORTRAN/req/spk.html

use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;

use log::{debug, warn};
use nalgebra::Vector3;

use crate::constants::{DAY_S, J2000};
use crate::jplephem::chebyshev::{normalize_time, ChebyshevSeries};
use crate::jplephem::daf::DAF;
use crate::jplephem::errors::{JplephemError, Result};

/// Convert seconds since J2000 to Julian date
pub fn seconds_to_jd(seconds: f64) -> f64 {
    J2000 + seconds / DAY_S
}

/// A directory word holding a record size or count, if it is a whole number
/// that fits in memory
fn word_count(value: f64) -> Option<usize> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64 {
        Some(value as usize)
    } else {
        None
    }
}

/// Position in km and velocity in km/s relative to a segment's center
pub type State = (Vector3<f64>, Vector3<f64>);

/// Spacecraft Planet Kernel (SPK) file reader
pub struct SPK {
    /// The underlying DAF file
    pub daf: DAF,
    /// Segments in file order
    pub segments: Vec<Segment>,
}

/// Record layout trailer of a Chebyshev segment
#[derive(Debug, Clone, Copy)]
struct Directory {
    /// Initial epoch of the first record (TDB seconds past J2000)
    init: f64,
    /// Length of each record's interval in seconds
    intlen: f64,
    /// Record size in double-precision words
    rsize: usize,
    /// Number of records
    n: usize,
}

/// A segment in an SPK file covering one (center, target) pair over a time span
#[derive(Debug)]
pub struct Segment {
    /// Source of the segment (e.g., "DE-0440LE-0440")
    pub source: String,
    /// Initial epoch in seconds since J2000
    pub start_second: f64,
    /// Final epoch in seconds since J2000
    pub end_second: f64,
    /// Target body ID
    pub target: i32,
    /// Center body ID
    pub center: i32,
    /// Reference frame ID (1 = J2000/ICRF)
    pub frame: i32,
    /// Data type (2: position only, 3: position and velocity)
    pub data_type: i32,
    /// First word address of the segment data
    pub start_i: usize,
    /// Last word address of the segment data
    pub end_i: usize,
    /// Start Julian date (TDB)
    pub start_jd: f64,
    /// End Julian date (TDB)
    pub end_jd: f64,
    directory: OnceLock<Directory>,
}

impl SPK {
    /// Open an SPK file and index its segments
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let daf = DAF::open(path)?;
        if !daf.locidw.starts_with("DAF/SPK") && daf.locidw != "NAIF/DAF" {
            return Err(JplephemError::InvalidFormat(format!(
                "{} is a {} file, not an SPK kernel",
                daf.path.display(),
                daf.locidw
            )));
        }
        if daf.nd != 2 || daf.ni != 6 {
            return Err(JplephemError::InvalidFormat(format!(
                "SPK summaries must have ND=2, NI=6 (found ND={}, NI={})",
                daf.nd, daf.ni
            )));
        }

        let segments = daf
            .summaries()?
            .into_iter()
            .map(|summary| {
                let (start_second, end_second) = (summary.doubles[0], summary.doubles[1]);
                let address = |word: i32| {
                    usize::try_from(word).map_err(|_| {
                        JplephemError::InvalidFormat(format!(
                            "segment {} -> {} has a negative array address {word}",
                            summary.integers[1], summary.integers[0]
                        ))
                    })
                };
                Ok(Segment {
                    start_i: address(summary.integers[4])?,
                    end_i: address(summary.integers[5])?,
                    source: summary.name,
                    start_second,
                    end_second,
                    target: summary.integers[0],
                    center: summary.integers[1],
                    frame: summary.integers[2],
                    data_type: summary.integers[3],
                    start_jd: seconds_to_jd(start_second),
                    end_jd: seconds_to_jd(end_second),
                    directory: OnceLock::new(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        for segment in segments.iter().filter(|s| s.frame != 1) {
            warn!(
                "segment {} -> {} uses frame {}, treating it as J2000",
                segment.center, segment.target, segment.frame
            );
        }
        debug!("{}: {} SPK segments", daf.path.display(), segments.len());
        Ok(Self { daf, segments })
    }

    /// File comment area
    pub fn comments(&self) -> Result<String> {
        self.daf.comments()
    }

    /// Whether any segment has this body as its target
    pub fn has_target(&self, target: i32) -> bool {
        self.segments.iter().any(|s| s.target == target)
    }

    /// Every body that appears as a target
    pub fn targets(&self) -> HashSet<i32> {
        self.segments.iter().map(|s| s.target).collect()
    }

    /// Earliest and latest Julian dates covered by segments for `target`
    pub fn coverage(&self, target: i32) -> Option<(f64, f64)> {
        self.segments
            .iter()
            .filter(|s| s.target == target)
            .fold(None, |acc, s| match acc {
                None => Some((s.start_jd, s.end_jd)),
                Some((lo, hi)) => Some((lo.min(s.start_jd), hi.max(s.end_jd))),
            })
    }

    /// State of `target` relative to its segment center at `tdb_seconds`
    ///
    /// Returns the center alongside the state so callers can chain segments.
    pub fn segment_state(&self, target: i32, tdb_seconds: f64) -> Result<(i32, State)> {
        if !self.has_target(target) {
            return Err(JplephemError::BodyNotFound { center: 0, target });
        }

        // Later segments take precedence, as in the SPICE toolkit.
        let segment = self
            .segments
            .iter()
            .rev()
            .filter(|s| s.target == target)
            .find(|s| s.start_second <= tdb_seconds && tdb_seconds <= s.end_second);

        match segment {
            Some(segment) => Ok((segment.center, segment.compute(&self.daf, tdb_seconds)?)),
            None => {
                let (start_jd, end_jd) = self.coverage(target).unwrap_or((f64::NAN, f64::NAN));
                Err(JplephemError::OutOfRangeError {
                    jd: seconds_to_jd(tdb_seconds),
                    start_jd,
                    end_jd,
                })
            }
        }
    }

    /// State of `target` relative to the solar system barycenter (body 0)
    pub fn barycentric_state(&self, target: i32, tdb_seconds: f64) -> Result<State> {
        let mut position = Vector3::zeros();
        let mut velocity = Vector3::zeros();
        let mut body = target;
        let mut hops = 0;

        while body != 0 {
            hops += 1;
            if hops > 16 {
                return Err(JplephemError::BodyNotFound { center: 0, target });
            }
            let (center, (p, v)) = self.segment_state(body, tdb_seconds).map_err(|e| match e {
                JplephemError::BodyNotFound { .. } => JplephemError::BodyNotFound {
                    center: body,
                    target,
                },
                other => other,
            })?;
            position += p;
            velocity += v;
            body = center;
        }

        Ok((position, velocity))
    }
}

impl Segment {
    fn directory(&self, daf: &DAF) -> Result<Directory> {
        if let Some(directory) = self.directory.get() {
            return Ok(*directory);
        }

        let inconsistent = || {
            JplephemError::InvalidFormat(format!(
                "segment {} -> {} has an inconsistent directory",
                self.center, self.target
            ))
        };

        if self.start_i.checked_add(3).map_or(true, |last| self.end_i < last) {
            return Err(JplephemError::InvalidFormat(format!(
                "segment {} -> {} is too short to hold a directory",
                self.center, self.target
            )));
        }
        let trailer = daf.read_array(self.end_i - 3, self.end_i)?;
        let directory = Directory {
            init: trailer[0],
            intlen: trailer[1],
            rsize: word_count(trailer[2]).ok_or_else(inconsistent)?,
            n: word_count(trailer[3]).ok_or_else(inconsistent)?,
        };

        let components = match self.data_type {
            2 => 3,
            3 => 6,
            other => return Err(JplephemError::UnsupportedDataType(other)),
        };
        let extent = directory
            .n
            .checked_mul(directory.rsize)
            .and_then(|words| words.checked_add(self.start_i));
        if directory.n == 0
            || directory.intlen.is_nan()
            || directory.intlen <= 0.0
            || directory.rsize < 2 + components
            || (directory.rsize - 2) % components != 0
            || extent.map_or(true, |end| end > self.end_i + 1)
        {
            return Err(JplephemError::InvalidFormat(format!(
                "segment {} -> {} has an inconsistent directory {:?}",
                self.center, self.target, directory
            )));
        }

        debug!(
            "segment {} -> {} type {}: {} records of {} words, {} s each",
            self.center, self.target, self.data_type, directory.n, directory.rsize, directory.intlen
        );
        // A racing thread computes the same value; either copy is fine.
        let _ = self.directory.set(directory);
        Ok(directory)
    }

    /// Position (km) and velocity (km/s) at `tdb_seconds`
    pub fn compute(&self, daf: &DAF, tdb_seconds: f64) -> Result<State> {
        let directory = self.directory(daf)?;
        let offset = ((tdb_seconds - directory.init) / directory.intlen).floor();
        let index = (offset.max(0.0) as usize).min(directory.n - 1);

        let first = self.start_i + index * directory.rsize;
        let record = daf.read_array(first, first + directory.rsize - 1)?;
        let (mid, radius) = (record[0], record[1]);
        let x = normalize_time(tdb_seconds, mid, radius)?;

        let components = if self.data_type == 3 { 6 } else { 3 };
        let ncoef = (directory.rsize - 2) / components;
        let series = |k: usize| ChebyshevSeries::new(&record[2 + k * ncoef..2 + (k + 1) * ncoef]);

        let mut position = Vector3::zeros();
        let mut velocity = Vector3::zeros();
        for axis in 0..3 {
            let (value, derivative) = series(axis).evaluate_with_derivative(x);
            position[axis] = value;
            velocity[axis] = if self.data_type == 3 {
                series(axis + 3).evaluate(x)
            } else {
                derivative / radius
            };
        }

        Ok((position, velocity))
    }
}
