//! Error Types

use thiserror::Error;

/// Main error type
#[derive(Debug, Clone, Error)]
pub enum SegmenterError {
    #[error("Audio error: {message}")]
    Audio { message: String },
    #[error("Config error: {message}")]
    Config { message: String },
    #[error("IO error: {message}")]
    Io { message: String },
    #[error("Processing error: {message}")]
    Processing { message: String },
}

impl SegmenterError {
    pub fn audio<S: Into<String>>(msg: S) -> Self { Self::Audio { message: msg.into() } }
    pub fn config<S: Into<String>>(msg: S) -> Self { Self::Config { message: msg.into() } }
    pub fn io<S: Into<String>>(msg: S) -> Self { Self::Io { message: msg.into() } }
    pub fn processing<S: Into<String>>(msg: S) -> Self { Self::Processing { message: msg.into() } }
}

pub type Result<T> = std::result::Result<T, SegmenterError>;

impl From<std::io::Error> for SegmenterError {
    fn from(err: std::io::Error) -> Self { Self::io(err.to_string()) }
}

impl From<hound::Error> for SegmenterError {
    fn from(err: hound::Error) -> Self {
        match err {
            hound::Error::IoError(io) => Self::io(io.to_string()),
            other => Self::audio(format!("WAV: {}", other)),
        }
    }
}
