//! Double Array File format module for reading SPICE DAF files
//!
//! A DAF is a sequence of 1024-byte records. Record 1 is the file record,
//! records 2..FWARD hold free-form comments, and a doubly linked list of
//! summary records (each followed by a name record) describes the arrays
//! stored in the rest of the file. Array data is addressed in 1-based
//! 8-byte words.

use std::fs::File;
use std::path::{Path, PathBuf};

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use log::debug;
use memmap2::Mmap;

use crate::jplephem::errors::{io_err, JplephemError, Result};

/// Size of a DAF record (bytes)
pub const RECORD_SIZE: usize = 1024;
/// Size of a double-precision word (bytes)
const WORD_SIZE: usize = 8;
/// Characters of comment text per comment record
const COMMENT_CHARS: usize = 1000;

/// DAF file endianness
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endian {
    Big,
    Little,
}

/// One array descriptor read from a summary record
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Name stored in the matching name record
    pub name: String,
    /// The ND double-precision components
    pub doubles: Vec<f64>,
    /// The NI integer components
    pub integers: Vec<i32>,
}

/// Double Array File (DAF) reader backed by a read-only memory map
pub struct DAF {
    /// Path to the DAF file
    pub path: PathBuf,
    /// File identification word, e.g. `DAF/SPK`
    pub locidw: String,
    /// Number of double-precision components per summary
    pub nd: usize,
    /// Number of integer components per summary
    pub ni: usize,
    /// Internal file name
    pub ifname: String,
    /// Record number of the first summary record
    pub fward: usize,
    /// Record number of the last summary record
    pub bward: usize,
    /// First free address
    pub free: usize,
    /// Byte order (endianness)
    pub endian: Endian,
    map: Mmap,
}

impl DAF {
    /// Open and validate a DAF file at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|e| io_err(&path, e))?;
        // SAFETY: the map is read-only and the kernel is not expected to be
        // modified while open.
        let map = unsafe { Mmap::map(&file) }.map_err(|e| io_err(&path, e))?;

        if map.len() < RECORD_SIZE {
            return Err(JplephemError::InvalidFormat(format!(
                "{} is {} bytes, shorter than one DAF record",
                path.display(),
                map.len()
            )));
        }

        let header = &map[..RECORD_SIZE];
        let locidw = String::from_utf8_lossy(&header[0..8]).trim_end().to_string();
        if !locidw.starts_with("DAF/") && locidw != "NAIF/DAF" {
            return Err(JplephemError::InvalidFormat(format!(
                "unrecognized file identification word {locidw:?}"
            )));
        }

        let endian = detect_endian(header)?;
        let read_int = |offset: usize| -> i32 {
            match endian {
                Endian::Little => LittleEndian::read_i32(&header[offset..offset + 4]),
                Endian::Big => BigEndian::read_i32(&header[offset..offset + 4]),
            }
        };

        let nd = read_int(8);
        let ni = read_int(12);
        let ifname = String::from_utf8_lossy(&header[16..76]).trim_end().to_string();
        let fward = read_int(76);
        let bward = read_int(80);
        let free = read_int(84);

        if !(0..=124).contains(&nd) || !(2..=250).contains(&ni) || fward < 1 || bward < 1 {
            return Err(JplephemError::InvalidFormat(format!(
                "implausible DAF header: ND={nd}, NI={ni}, FWARD={fward}, BWARD={bward}"
            )));
        }

        debug!(
            "Opened {} ({locidw}, {endian:?}): ND={nd} NI={ni} FWARD={fward} BWARD={bward}",
            path.display()
        );

        Ok(Self {
            path,
            locidw,
            nd: nd as usize,
            ni: ni as usize,
            ifname,
            fward: fward as usize,
            bward: bward as usize,
            free: free.max(0) as usize,
            endian,
            map,
        })
    }

    /// Size of one summary in double-precision words
    pub fn summary_size(&self) -> usize {
        self.nd + (self.ni + 1) / 2
    }

    /// Raw bytes of a 1-based record
    fn record(&self, record_number: usize) -> Result<&[u8]> {
        let start = record_number
            .checked_sub(1)
            .ok_or_else(|| JplephemError::InvalidFormat("record number 0".to_string()))?;
        start
            .checked_mul(RECORD_SIZE)
            .and_then(|start| self.map.get(start..start.checked_add(RECORD_SIZE)?))
            .ok_or_else(|| {
                JplephemError::InvalidFormat(format!(
                    "record {record_number} lies past the end of the file"
                ))
            })
    }

    /// A count or record number stored as a double in a summary record
    fn control_word(&self, bytes: &[u8]) -> Result<usize> {
        let value = self.f64_at(bytes);
        if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64 {
            Ok(value as usize)
        } else {
            Err(JplephemError::InvalidFormat(format!(
                "summary control word {value} is not a record count"
            )))
        }
    }

    fn f64_at(&self, bytes: &[u8]) -> f64 {
        match self.endian {
            Endian::Little => LittleEndian::read_f64(bytes),
            Endian::Big => BigEndian::read_f64(bytes),
        }
    }

    fn i32_at(&self, bytes: &[u8]) -> i32 {
        match self.endian {
            Endian::Little => LittleEndian::read_i32(bytes),
            Endian::Big => BigEndian::read_i32(bytes),
        }
    }

    /// Read the doubles at 1-based word addresses `start..=end`
    pub fn read_array(&self, start: usize, end: usize) -> Result<Vec<f64>> {
        if start == 0 || end < start {
            return Err(JplephemError::InvalidFormat(format!(
                "bad array address range {start}..={end}"
            )));
        }
        let past_end = || {
            JplephemError::InvalidFormat(format!(
                "array {start}..={end} lies past the end of the file"
            ))
        };
        let first = (start - 1).checked_mul(WORD_SIZE).ok_or_else(past_end)?;
        let last = end.checked_mul(WORD_SIZE).ok_or_else(past_end)?;
        let bytes = self.map.get(first..last).ok_or_else(past_end)?;

        Ok(bytes.chunks_exact(WORD_SIZE).map(|w| self.f64_at(w)).collect())
    }

    /// Walk the summary record list and return every array descriptor
    pub fn summaries(&self) -> Result<Vec<Summary>> {
        let ss = self.summary_size();
        let name_len = ss * WORD_SIZE;
        let per_record = (RECORD_SIZE / WORD_SIZE - 3) / ss;
        let max_records = self.map.len() / RECORD_SIZE;

        let mut summaries = Vec::new();
        let mut record_number = self.fward;
        let mut visited = 0;

        while record_number != 0 {
            visited += 1;
            if visited > max_records {
                return Err(JplephemError::InvalidFormat(
                    "summary record list does not terminate".to_string(),
                ));
            }

            let record = self.record(record_number)?;
            let names = self.record(record_number.saturating_add(1))?;

            let next = self.control_word(&record[0..8])?;
            let count = self.control_word(&record[16..24])?;
            if count > per_record {
                return Err(JplephemError::InvalidFormat(format!(
                    "summary record {record_number} claims {count} summaries (max {per_record})"
                )));
            }

            for i in 0..count {
                let base = 3 * WORD_SIZE + i * ss * WORD_SIZE;
                let doubles = (0..self.nd)
                    .map(|k| self.f64_at(&record[base + k * 8..base + k * 8 + 8]))
                    .collect();
                let int_base = base + self.nd * WORD_SIZE;
                let integers = (0..self.ni)
                    .map(|k| self.i32_at(&record[int_base + k * 4..int_base + k * 4 + 4]))
                    .collect();
                let name = String::from_utf8_lossy(&names[i * name_len..(i + 1) * name_len])
                    .trim_end()
                    .to_string();

                summaries.push(Summary {
                    name,
                    doubles,
                    integers,
                });
            }

            record_number = next;
        }

        debug!("{}: {} array summaries", self.path.display(), summaries.len());
        Ok(summaries)
    }

    /// Comment area text, with NUL line separators turned into newlines
    pub fn comments(&self) -> Result<String> {
        let mut text = Vec::new();
        for record_number in 2..self.fward {
            let record = self.record(record_number)?;
            let chunk = &record[..COMMENT_CHARS];
            match chunk.iter().position(|&b| b == 0x04) {
                Some(eot) => {
                    text.extend_from_slice(&chunk[..eot]);
                    break;
                }
                None => text.extend_from_slice(chunk),
            }
        }

        Ok(String::from_utf8_lossy(&text).replace('\0', "\n"))
    }
}

/// Byte order from LOCFMT, falling back to a sanity check on ND
fn detect_endian(header: &[u8]) -> Result<Endian> {
    match &header[88..96] {
        b"LTL-IEEE" => return Ok(Endian::Little),
        b"BIG-IEEE" => return Ok(Endian::Big),
        _ => {}
    }

    // Pre-N0050 files carry no LOCFMT; ND is small in the native order.
    let nd_little = LittleEndian::read_i32(&header[8..12]);
    let nd_big = BigEndian::read_i32(&header[8..12]);
    if (1..=124).contains(&nd_little) {
        Ok(Endian::Little)
    } else if (1..=124).contains(&nd_big) {
        Ok(Endian::Big)
    } else {
        Err(JplephemError::InvalidFormat(
            "cannot determine DAF byte order".to_string(),
        ))
    }
}
