//! Fixed-length segmentation arithmetic
//!
//! Every input is padded with silence up to a whole number of segments, and the
//! padding is never empty: an input that is already aligned gains one extra,
//! fully silent segment.

use std::ffi::{OsStr, OsString};
use std::ops::Range;

use crate::error::{Result, SegmenterError};

/// Segment length for one file, derived from the configured seconds and the
/// file's own sample rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentSpec {
    pub seconds: u32,
    pub sample_rate: u32,
    /// Segment length in frames (`seconds * sample_rate`).
    pub frames: usize,
}

impl SegmentSpec {
    pub fn new(seconds: u32, sample_rate: u32) -> Result<Self> {
        if seconds == 0 {
            return Err(SegmenterError::processing("Segment length cannot be 0 seconds"));
        }
        if sample_rate == 0 {
            return Err(SegmenterError::processing("Sample rate cannot be 0"));
        }

        let frames = usize::try_from(u64::from(seconds) * u64::from(sample_rate)).map_err(|_| {
            SegmenterError::processing(format!(
                "Segment of {}s at {}Hz does not fit in memory",
                seconds, sample_rate
            ))
        })?;

        Ok(Self {
            seconds,
            sample_rate,
            frames,
        })
    }

    /// Frame count after padding: always a multiple of `frames` and always
    /// strictly greater than `total_frames`.
    pub fn padded_length(&self, total_frames: usize) -> usize {
        total_frames - (total_frames % self.frames) + self.frames
    }

    /// Silent frames appended to `total_frames`, between 1 and `frames`.
    pub fn padding(&self, total_frames: usize) -> usize {
        self.padded_length(total_frames) - total_frames
    }

    pub fn segment_count(&self, total_frames: usize) -> usize {
        total_frames / self.frames + 1
    }

    /// Frames covered by segment `index` within the padded buffer.
    pub fn frame_range(&self, index: usize) -> Range<usize> {
        let start = index * self.frames;
        start..start + self.frames
    }

    /// `(index, frame range)` for every segment of an input of `total_frames`.
    pub fn ranges(&self, total_frames: usize) -> impl Iterator<Item = (usize, Range<usize>)> + '_ {
        (0..self.segment_count(total_frames)).map(move |index| (index, self.frame_range(index)))
    }
}

/// `<base>_<index>.wav` with the index zero-padded to three digits.
pub fn segment_file_name(base_name: &OsStr, index: usize) -> OsString {
    let mut name = base_name.to_os_string();
    name.push(format!("_{:03}.wav", index));
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_creation() {
        let spec = SegmentSpec::new(10, 16000).unwrap();
        assert_eq!(spec.frames, 160_000);

        assert!(SegmentSpec::new(0, 16000).is_err());
        assert!(SegmentSpec::new(10, 0).is_err());
    }

    #[test]
    fn test_padding_invariants() {
        let spec = SegmentSpec::new(1, 7).unwrap();

        for total in 0..50 {
            let padded = spec.padded_length(total);
            assert_eq!(padded % spec.frames, 0, "total={}", total);
            assert!(padded > total, "total={}", total);
            assert!((1..=spec.frames).contains(&spec.padding(total)), "total={}", total);
            assert_eq!(spec.segment_count(total) * spec.frames, padded, "total={}", total);
        }
    }

    #[test]
    fn test_aligned_input_gets_extra_segment() {
        let spec = SegmentSpec::new(10, 16000).unwrap();

        assert_eq!(spec.segment_count(160_000), 2);
        assert_eq!(spec.padded_length(160_000), 320_000);
        assert_eq!(spec.padding(160_000), 160_000);
    }

    #[test]
    fn test_partial_tail() {
        let spec = SegmentSpec::new(10, 16000).unwrap();

        assert_eq!(spec.segment_count(240_000), 2);
        assert_eq!(spec.padding(240_000), 80_000);
    }

    #[test]
    fn test_empty_input_yields_one_segment() {
        let spec = SegmentSpec::new(10, 16000).unwrap();

        assert_eq!(spec.segment_count(0), 1);
        assert_eq!(spec.padded_length(0), 160_000);
    }

    #[test]
    fn test_ranges_tile_padded_buffer() {
        let spec = SegmentSpec::new(2, 3).unwrap();
        let ranges: Vec<_> = spec.ranges(13).collect();

        assert_eq!(ranges, vec![(0, 0..6), (1, 6..12), (2, 12..18)]);
        assert_eq!(ranges.last().map(|(_, r)| r.end), Some(spec.padded_length(13)));
    }

    #[test]
    fn test_segment_file_name() {
        assert_eq!(segment_file_name(OsStr::new("take"), 0), "take_000.wav");
        assert_eq!(segment_file_name(OsStr::new("take.v2"), 42), "take.v2_042.wav");
        assert_eq!(segment_file_name(OsStr::new("long"), 1234), "long_1234.wav");
    }
}
