//! Shared helpers for integration tests
//!
//! `KernelBuilder` writes a little-endian DAF/SPK file made of type 2
//! segments, each holding a single Chebyshev record of degree 1. That is
//! enough to describe bodies at rest or in uniform linear motion.

#![allow(dead_code)]

use std::io::Write;

use byteorder::{ByteOrder, LittleEndian};
use tempfile::NamedTempFile;

const RECORD: usize = 1024;
const WORDS_PER_RECORD: usize = RECORD / 8;

/// Each segment: mid, radius, 3 × 2 coefficients, then the 4-word directory
const RSIZE: usize = 2 + 3 * 2;
const WORDS_PER_SEGMENT: usize = RSIZE + 4;

/// Ten Julian years either side of J2000, in seconds
pub const HALF_SPAN_S: f64 = 10.0 * 365.25 * 86_400.0;

pub struct LinearSegment {
    pub target: i32,
    pub center: i32,
    /// Position at J2000 in km
    pub position: [f64; 3],
    /// Velocity in km/s
    pub velocity: [f64; 3],
}

#[derive(Default)]
pub struct KernelBuilder {
    segments: Vec<LinearSegment>,
    comment: Option<String>,
}

impl KernelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fixed(self, target: i32, center: i32, position: [f64; 3]) -> Self {
        self.moving(target, center, position, [0.0; 3])
    }

    pub fn moving(mut self, target: i32, center: i32, position: [f64; 3], velocity: [f64; 3]) -> Self {
        self.segments.push(LinearSegment {
            target,
            center,
            position,
            velocity,
        });
        self
    }

    pub fn comment(mut self, text: &str) -> Self {
        self.comment = Some(text.to_string());
        self
    }

    /// Record number of the summary record and first word address of segment data
    fn layout(&self) -> (usize, usize) {
        let summary_record = 2 + usize::from(self.comment.is_some());
        (summary_record, (summary_record + 1) * WORDS_PER_RECORD + 1)
    }

    /// Byte offset of directory word `word` (init, intlen, rsize, n) of a segment
    pub fn directory_word_offset(&self, segment: usize, word: usize) -> usize {
        let (_, data_start_word) = self.layout();
        (data_start_word - 1 + segment * WORDS_PER_SEGMENT + RSIZE + word) * 8
    }

    /// Byte offset of the summary record (next, previous, count, summaries)
    pub fn summary_record_offset(&self) -> usize {
        let (summary_record, _) = self.layout();
        (summary_record - 1) * RECORD
    }

    /// Byte offset of integer `k` in a segment's summary
    pub fn summary_int_offset(&self, segment: usize, k: usize) -> usize {
        self.summary_record_offset() + 24 + segment * 40 + 16 + k * 4
    }

    /// Lay out the file: header, optional comment record, summary record,
    /// name record, then the segment data
    pub fn to_bytes(&self) -> Vec<u8> {
        let (summary_record, data_start_word) = self.layout();
        let (rsize, words_per_segment) = (RSIZE, WORDS_PER_SEGMENT);

        let mut data: Vec<f64> = Vec::new();
        let mut summaries: Vec<(i32, i32, usize, usize)> = Vec::new();
        for segment in &self.segments {
            let start = data_start_word + data.len();
            data.push(0.0);
            data.push(HALF_SPAN_S);
            for axis in 0..3 {
                data.push(segment.position[axis]);
                data.push(segment.velocity[axis] * HALF_SPAN_S);
            }
            data.extend_from_slice(&[-HALF_SPAN_S, 2.0 * HALF_SPAN_S, rsize as f64, 1.0]);
            summaries.push((segment.target, segment.center, start, start + words_per_segment - 1));
        }

        let data_records = (data.len() * 8).div_ceil(RECORD);
        let total_records = summary_record + 1 + data_records;
        let mut bytes = vec![0u8; total_records * RECORD];

        // File record
        bytes[0..8].copy_from_slice(b"DAF/SPK ");
        LittleEndian::write_i32(&mut bytes[8..12], 2);
        LittleEndian::write_i32(&mut bytes[12..16], 6);
        let ifname = format!("{:<60}", "SYNTHETIC TEST KERNEL");
        bytes[16..76].copy_from_slice(ifname.as_bytes());
        LittleEndian::write_i32(&mut bytes[76..80], summary_record as i32);
        LittleEndian::write_i32(&mut bytes[80..84], summary_record as i32);
        LittleEndian::write_i32(&mut bytes[84..88], (data_start_word + data.len()) as i32);
        bytes[88..96].copy_from_slice(b"LTL-IEEE");

        if let Some(comment) = &self.comment {
            let area = &mut bytes[RECORD..2 * RECORD];
            let text = comment.as_bytes();
            area[..text.len()].copy_from_slice(text);
            area[text.len()] = 0x04;
        }

        // Summary record: next, previous, count, then ND=2 doubles + NI=6 ints each
        let base = (summary_record - 1) * RECORD;
        LittleEndian::write_f64(&mut bytes[base..base + 8], 0.0);
        LittleEndian::write_f64(&mut bytes[base + 8..base + 16], 0.0);
        LittleEndian::write_f64(&mut bytes[base + 16..base + 24], summaries.len() as f64);
        for (i, &(target, center, start, end)) in summaries.iter().enumerate() {
            let at = base + 24 + i * 40;
            LittleEndian::write_f64(&mut bytes[at..at + 8], -HALF_SPAN_S);
            LittleEndian::write_f64(&mut bytes[at + 8..at + 16], HALF_SPAN_S);
            let ints = [target, center, 1, 2, start as i32, end as i32];
            for (k, value) in ints.iter().enumerate() {
                let p = at + 16 + k * 4;
                LittleEndian::write_i32(&mut bytes[p..p + 4], *value);
            }

            let name = format!("{:<40}", format!("SYNTH {target}"));
            let name_at = summary_record * RECORD + i * 40;
            bytes[name_at..name_at + 40].copy_from_slice(name.as_bytes());
        }

        let data_at = (data_start_word - 1) * 8;
        for (i, value) in data.iter().enumerate() {
            LittleEndian::write_f64(&mut bytes[data_at + i * 8..data_at + i * 8 + 8], *value);
        }
        bytes
    }

    pub fn write(&self) -> NamedTempFile {
        self.write_patched(|_| {})
    }

    /// Write the file after letting `patch` corrupt the raw bytes
    pub fn write_patched(&self, patch: impl FnOnce(&mut [u8])) -> NamedTempFile {
        let mut bytes = self.to_bytes();
        patch(&mut bytes);
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&bytes).unwrap();
        file.flush().unwrap();
        file
    }
}
