//! WAV audio file processing

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, Write};
use std::ops::Range;
use std::path::Path;

use hound::{SampleFormat, WavReader, WavWriter};
use ndarray::{s, Array2, ArrayView2};

use super::sample::PcmSample;
use crate::error::{Result, SegmenterError};

/// On-disk sample encoding, carried through unchanged from input to output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Int8,
    Int16,
    Int24,
    Int32,
    Float32,
}

impl AudioFormat {
    pub fn name(&self) -> &'static str {
        match self {
            AudioFormat::Int8 => "int8",
            AudioFormat::Int16 => "int16",
            AudioFormat::Int24 => "int24",
            AudioFormat::Int32 => "int32",
            AudioFormat::Float32 => "float32",
        }
    }

    pub fn bits_per_sample(&self) -> u16 {
        match self {
            AudioFormat::Int8 => 8,
            AudioFormat::Int16 => 16,
            AudioFormat::Int24 => 24,
            AudioFormat::Int32 | AudioFormat::Float32 => 32,
        }
    }

    pub fn to_sample_format(self) -> SampleFormat {
        match self {
            AudioFormat::Float32 => SampleFormat::Float,
            _ => SampleFormat::Int,
        }
    }

    pub fn from_spec(spec: &hound::WavSpec) -> Result<Self> {
        match (spec.sample_format, spec.bits_per_sample) {
            (SampleFormat::Int, 8) => Ok(AudioFormat::Int8),
            (SampleFormat::Int, 16) => Ok(AudioFormat::Int16),
            (SampleFormat::Int, 24) => Ok(AudioFormat::Int24),
            (SampleFormat::Int, 32) => Ok(AudioFormat::Int32),
            (SampleFormat::Float, 32) => Ok(AudioFormat::Float32),
            (format, bits) => Err(SegmenterError::audio(format!(
                "Unsupported sample encoding: {} bit {:?}",
                bits, format
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AudioHeader {
    pub sample_rate: u32,
    pub channels: u16,
    pub format: AudioFormat,
    pub total_frames: usize,
    pub duration: f64,
}

impl AudioHeader {
    pub fn new(sample_rate: u32, channels: u16, format: AudioFormat, total_frames: usize) -> Self {
        let duration = if sample_rate == 0 {
            0.0
        } else {
            total_frames as f64 / sample_rate as f64
        };

        Self {
            sample_rate,
            channels,
            format,
            total_frames,
            duration,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(SegmenterError::audio("Sample rate cannot be 0"));
        }

        if self.channels == 0 {
            return Err(SegmenterError::audio("Channel count cannot be 0"));
        }

        Ok(())
    }

    pub fn to_wav_spec(&self) -> hound::WavSpec {
        hound::WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: self.format.bits_per_sample(),
            sample_format: self.format.to_sample_format(),
        }
    }
}

/// Sample matrix: one row per frame, one column per channel.
///
/// 24-bit and 32-bit integer PCM share the `Int32` storage; the header's
/// [`AudioFormat`] decides the width written back to disk.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioData {
    Int8(Array2<i8>),
    Int16(Array2<i16>),
    Int32(Array2<i32>),
    Float32(Array2<f32>),
}

impl AudioData {
    /// Allocate `frames` x `channels` of silence in the storage used for `format`.
    pub fn silence(format: AudioFormat, frames: usize, channels: usize) -> Self {
        match format {
            AudioFormat::Int8 => AudioData::Int8(silence_matrix(frames, channels)),
            AudioFormat::Int16 => AudioData::Int16(silence_matrix(frames, channels)),
            AudioFormat::Int24 | AudioFormat::Int32 => {
                AudioData::Int32(silence_matrix(frames, channels))
            }
            AudioFormat::Float32 => AudioData::Float32(silence_matrix(frames, channels)),
        }
    }

    pub fn frames(&self) -> usize {
        match self {
            AudioData::Int8(data) => data.nrows(),
            AudioData::Int16(data) => data.nrows(),
            AudioData::Int32(data) => data.nrows(),
            AudioData::Float32(data) => data.nrows(),
        }
    }

    pub fn channels(&self) -> usize {
        match self {
            AudioData::Int8(data) => data.ncols(),
            AudioData::Int16(data) => data.ncols(),
            AudioData::Int32(data) => data.ncols(),
            AudioData::Float32(data) => data.ncols(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.frames() == 0
    }

    /// Whether this storage variant is the one `format` is read into.
    pub fn stores(&self, format: AudioFormat) -> bool {
        matches!(
            (self, format),
            (AudioData::Int8(_), AudioFormat::Int8)
                | (AudioData::Int16(_), AudioFormat::Int16)
                | (AudioData::Int32(_), AudioFormat::Int24 | AudioFormat::Int32)
                | (AudioData::Float32(_), AudioFormat::Float32)
        )
    }

    /// Copy out the contiguous frame range `frames`.
    pub fn slice_frames(&self, frames: Range<usize>) -> Result<Self> {
        if frames.start > frames.end || frames.end > self.frames() {
            return Err(SegmenterError::processing(format!(
                "Frame range {}..{} out of bounds for {} frames",
                frames.start,
                frames.end,
                self.frames()
            )));
        }

        Ok(match self {
            AudioData::Int8(data) => AudioData::Int8(slice_matrix(data, frames)),
            AudioData::Int16(data) => AudioData::Int16(slice_matrix(data, frames)),
            AudioData::Int32(data) => AudioData::Int32(slice_matrix(data, frames)),
            AudioData::Float32(data) => AudioData::Float32(slice_matrix(data, frames)),
        })
    }

    /// Extend to `frames` frames: the original samples as prefix, silence after.
    pub fn padded(&self, frames: usize) -> Result<Self> {
        if frames < self.frames() {
            return Err(SegmenterError::processing(format!(
                "Cannot pad {} frames down to {}",
                self.frames(),
                frames
            )));
        }

        Ok(match self {
            AudioData::Int8(data) => AudioData::Int8(pad_matrix(data, frames)),
            AudioData::Int16(data) => AudioData::Int16(pad_matrix(data, frames)),
            AudioData::Int32(data) => AudioData::Int32(pad_matrix(data, frames)),
            AudioData::Float32(data) => AudioData::Float32(pad_matrix(data, frames)),
        })
    }

    fn read<R: Read>(reader: &mut WavReader<R>, format: AudioFormat, channels: usize) -> Result<Self> {
        Ok(match format {
            AudioFormat::Int8 => AudioData::Int8(read_matrix(reader, channels)?),
            AudioFormat::Int16 => AudioData::Int16(read_matrix(reader, channels)?),
            AudioFormat::Int24 | AudioFormat::Int32 => {
                AudioData::Int32(read_matrix(reader, channels)?)
            }
            AudioFormat::Float32 => AudioData::Float32(read_matrix(reader, channels)?),
        })
    }

    fn write<W: Write + Seek>(&self, writer: &mut WavWriter<W>) -> Result<()> {
        match self {
            AudioData::Int8(data) => write_matrix(writer, data.view()),
            AudioData::Int16(data) => write_matrix(writer, data.view()),
            AudioData::Int32(data) => write_matrix(writer, data.view()),
            AudioData::Float32(data) => write_matrix(writer, data.view()),
        }
    }
}

fn silence_matrix<S: PcmSample>(frames: usize, channels: usize) -> Array2<S> {
    Array2::from_elem((frames, channels), S::SILENCE)
}

fn slice_matrix<S: PcmSample>(data: &Array2<S>, frames: Range<usize>) -> Array2<S> {
    data.slice(s![frames.start..frames.end, ..]).to_owned()
}

fn pad_matrix<S: PcmSample>(data: &Array2<S>, frames: usize) -> Array2<S> {
    let mut padded = silence_matrix(frames, data.ncols());
    padded.slice_mut(s![..data.nrows(), ..]).assign(data);
    padded
}

fn read_matrix<S: PcmSample, R: Read>(reader: &mut WavReader<R>, channels: usize) -> Result<Array2<S>> {
    let samples = reader
        .samples::<S>()
        .collect::<std::result::Result<Vec<S>, _>>()
        .map_err(|e| SegmenterError::audio(format!("Failed to read sample: {}", e)))?;

    if samples.len() % channels != 0 {
        return Err(SegmenterError::audio(format!(
            "Sample count {} is not a whole number of {}-channel frames",
            samples.len(),
            channels
        )));
    }

    let frames = samples.len() / channels;
    Array2::from_shape_vec((frames, channels), samples)
        .map_err(|e| SegmenterError::audio(format!("Invalid sample layout: {}", e)))
}

fn write_matrix<S: PcmSample, W: Write + Seek>(writer: &mut WavWriter<W>, data: ArrayView2<S>) -> Result<()> {
    // Row-major iteration yields interleaved frames.
    for &sample in data.iter() {
        writer
            .write_sample(sample)
            .map_err(|e| SegmenterError::audio(format!("Failed to write sample: {}", e)))?;
    }
    Ok(())
}

/// A fully loaded WAV file.
#[derive(Debug, Clone, PartialEq)]
pub struct WavAudio {
    pub header: AudioHeader,
    pub data: AudioData,
}

impl WavAudio {
    pub fn new(sample_rate: u32, format: AudioFormat, data: AudioData) -> Result<Self> {
        let channels = u16::try_from(data.channels())
            .map_err(|_| SegmenterError::audio(format!("Too many channels: {}", data.channels())))?;
        let audio = WavAudio {
            header: AudioHeader::new(sample_rate, channels, format, data.frames()),
            data,
        };
        audio.validate()?;
        Ok(audio)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| {
            SegmenterError::io(format!("Cannot open audio file {}: {}", path.display(), e))
        })?;

        let mut reader = WavReader::new(BufReader::new(file)).map_err(|e| {
            SegmenterError::audio(format!("Cannot read WAV file {}: {}", path.display(), e))
        })?;

        let spec = reader.spec();
        let format = AudioFormat::from_spec(&spec)?;
        let header = AudioHeader::new(spec.sample_rate, spec.channels, format, reader.duration() as usize);
        header.validate()?;

        let data = AudioData::read(&mut reader, format, spec.channels as usize)?;

        let audio = WavAudio {
            header: AudioHeader {
                total_frames: data.frames(),
                ..header
            },
            data,
        };
        audio.validate()?;
        Ok(audio)
    }

    /// Write the whole buffer as a standalone WAV file with the same encoding.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        let file = File::create(path).map_err(|e| {
            SegmenterError::io(format!("Cannot create output file {}: {}", path.display(), e))
        })?;

        let mut writer = WavWriter::new(BufWriter::new(file), self.header.to_wav_spec())
            .map_err(|e| SegmenterError::audio(format!("Cannot create WAV writer: {}", e)))?;

        self.data.write(&mut writer)?;

        writer
            .finalize()
            .map_err(|e| SegmenterError::audio(format!("Failed to finalize WAV writing: {}", e)))?;

        Ok(())
    }

    /// Copy of this buffer extended with silence to exactly `frames` frames.
    pub fn padded(&self, frames: usize) -> Result<Self> {
        Ok(WavAudio {
            header: AudioHeader::new(self.header.sample_rate, self.header.channels, self.header.format, frames),
            data: self.data.padded(frames)?,
        })
    }

    /// Copy of the frames in `frames` as a buffer of its own.
    pub fn slice_frames(&self, frames: Range<usize>) -> Result<Self> {
        let data = self.data.slice_frames(frames)?;
        Ok(WavAudio {
            header: AudioHeader::new(self.header.sample_rate, self.header.channels, self.header.format, data.frames()),
            data,
        })
    }

    pub fn data(&self) -> &AudioData {
        &self.data
    }

    pub fn sample_rate(&self) -> u32 {
        self.header.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.header.channels
    }

    pub fn total_frames(&self) -> usize {
        self.header.total_frames
    }

    pub fn duration(&self) -> f64 {
        self.header.duration
    }

    pub fn format(&self) -> AudioFormat {
        self.header.format
    }

    pub fn validate(&self) -> Result<()> {
        self.header.validate()?;

        if self.data.frames() != self.header.total_frames {
            return Err(SegmenterError::audio(format!(
                "Data length mismatch: header shows {} frames, actual {} frames",
                self.header.total_frames,
                self.data.frames()
            )));
        }

        if self.data.channels() != self.header.channels as usize {
            return Err(SegmenterError::audio(format!(
                "Channel count mismatch: header shows {} channels, actual {} channels",
                self.header.channels,
                self.data.channels()
            )));
        }

        if !self.data.stores(self.header.format) {
            return Err(SegmenterError::audio(format!(
                "Sample storage does not match {} encoding",
                self.header.format.name()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use tempfile::TempDir;

    #[test]
    fn test_audio_format() {
        assert_eq!(AudioFormat::Int16.name(), "int16");
        assert_eq!(AudioFormat::Int16.bits_per_sample(), 16);
        assert_eq!(AudioFormat::Int24.bits_per_sample(), 24);
        assert_eq!(AudioFormat::Float32.to_sample_format(), SampleFormat::Float);
        assert_eq!(AudioFormat::Int32.to_sample_format(), SampleFormat::Int);
    }

    #[test]
    fn test_format_from_spec() {
        let mut spec = hound::WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 24,
            sample_format: SampleFormat::Int,
        };
        assert_eq!(AudioFormat::from_spec(&spec).unwrap(), AudioFormat::Int24);

        spec.bits_per_sample = 12;
        assert!(AudioFormat::from_spec(&spec).is_err());

        spec.bits_per_sample = 16;
        spec.sample_format = SampleFormat::Float;
        assert!(AudioFormat::from_spec(&spec).is_err());
    }

    #[test]
    fn test_audio_header_validation() {
        assert!(AudioHeader::new(16000, 1, AudioFormat::Int16, 0).validate().is_ok());
        assert!(AudioHeader::new(0, 1, AudioFormat::Int16, 10).validate().is_err());
        assert!(AudioHeader::new(16000, 0, AudioFormat::Int16, 10).validate().is_err());

        let header = AudioHeader::new(16000, 2, AudioFormat::Float32, 8000);
        assert!((header.duration - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_silence_allocation() {
        let data = AudioData::silence(AudioFormat::Int24, 5, 3);
        assert_eq!(data.frames(), 5);
        assert_eq!(data.channels(), 3);
        match data {
            AudioData::Int32(m) => assert!(m.iter().all(|&s| s == 0)),
            other => panic!("unexpected storage: {:?}", other),
        }
    }

    #[test]
    fn test_padded_keeps_prefix_and_zeroes_suffix() {
        let data = AudioData::Int16(array![[1, -1], [2, -2], [3, -3]]);
        let padded = data.padded(5).unwrap();

        assert_eq!(padded, AudioData::Int16(array![[1, -1], [2, -2], [3, -3], [0, 0], [0, 0]]));
        assert!(data.padded(2).is_err());
    }

    #[test]
    fn test_slice_frames() {
        let data = AudioData::Float32(array![[0.1], [0.2], [0.3], [0.4]]);

        assert_eq!(data.slice_frames(1..3).unwrap(), AudioData::Float32(array![[0.2], [0.3]]));
        assert!(data.slice_frames(3..3).unwrap().is_empty());
        assert!(data.slice_frames(2..5).is_err());
    }

    #[test]
    fn test_mismatched_storage_rejected() {
        let data = AudioData::Int16(array![[1], [2]]);
        assert!(WavAudio::new(8000, AudioFormat::Float32, data.clone()).is_err());
        assert!(WavAudio::new(8000, AudioFormat::Int16, data).is_ok());
    }

    #[test]
    fn test_stereo_int16_file_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("stereo.wav");

        let data = AudioData::Int16(array![[100, -100], [i16::MAX, i16::MIN], [0, 7]]);
        let audio = WavAudio::new(22050, AudioFormat::Int16, data).unwrap();
        audio.save_to_file(&path).unwrap();

        let loaded = WavAudio::from_file(&path).unwrap();
        assert_eq!(loaded, audio);
        assert_eq!(loaded.channels(), 2);
        assert_eq!(loaded.total_frames(), 3);
    }

    #[test]
    fn test_24_bit_encoding_preserved() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("deep.wav");

        let data = AudioData::Int32(array![[8_388_607], [-8_388_608], [12345]]);
        WavAudio::new(48000, AudioFormat::Int24, data.clone())
            .unwrap()
            .save_to_file(&path)
            .unwrap();

        let reader = WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().bits_per_sample, 24);

        let loaded = WavAudio::from_file(&path).unwrap();
        assert_eq!(loaded.format(), AudioFormat::Int24);
        assert_eq!(loaded.data(), &data);
    }

    #[test]
    fn test_8_bit_silence_survives_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("byte.wav");

        let audio = WavAudio::new(8000, AudioFormat::Int8, AudioData::silence(AudioFormat::Int8, 4, 1)).unwrap();
        audio.save_to_file(&path).unwrap();

        let loaded = WavAudio::from_file(&path).unwrap();
        assert_eq!(loaded.data(), &AudioData::Int8(Array2::zeros((4, 1))));
    }

    #[test]
    fn test_empty_file_loads() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.wav");

        let audio = WavAudio::new(16000, AudioFormat::Float32, AudioData::silence(AudioFormat::Float32, 0, 2)).unwrap();
        audio.save_to_file(&path).unwrap();

        let loaded = WavAudio::from_file(&path).unwrap();
        assert_eq!(loaded.total_frames(), 0);
        assert_eq!(loaded.channels(), 2);
        assert!(loaded.data().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("noise.wav");
        std::fs::write(&path, b"definitely not RIFF").unwrap();

        assert!(matches!(WavAudio::from_file(&path), Err(SegmenterError::Audio { .. })));
        assert!(matches!(
            WavAudio::from_file(temp_dir.path().join("missing.wav")),
            Err(SegmenterError::Io { .. })
        ));
    }
}
