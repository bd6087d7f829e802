//! Sample types a WAV file can carry

use std::fmt::Debug;

/// A PCM sample type that can be read from and written to a WAV file.
///
/// `SILENCE` is the value used for padding. 8-bit WAV data is unsigned on disk,
/// but `hound` recentres it to `i8`, so zero is silence for every type here.
pub trait PcmSample: hound::Sample + Copy + PartialEq + Debug + Send + Sync + 'static {
    const SILENCE: Self;
}

impl PcmSample for i8 {
    const SILENCE: Self = 0;
}

impl PcmSample for i16 {
    const SILENCE: Self = 0;
}

/// Used for both 24-bit and 32-bit integer PCM.
impl PcmSample for i32 {
    const SILENCE: Self = 0;
}

impl PcmSample for f32 {
    const SILENCE: Self = 0.0;
}
