//! Audio Module
//!
//! WAV reading and writing, plus the typed sample matrix used for padding and slicing.

pub mod sample;
pub mod wav;

pub use sample::PcmSample;
pub use wav::{AudioData, AudioFormat, AudioHeader, WavAudio};
