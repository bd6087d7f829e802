//! Configuration management for segmentation runs

use crate::error::{Result, SegmenterError};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_PATTERNS: &[&str] = &["./data/**/*.wav"];
pub const DEFAULT_OUTPUT_ROOT: &str = "./output";
pub const DEFAULT_SEGMENT_SECONDS: u32 = 10;

/// Immutable run configuration, built once and handed to the segmenter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Glob patterns (`**` recurses) whose matches are segmented.
    pub patterns: Vec<String>,
    /// Root under which each input's directory is mirrored.
    pub output_root: PathBuf,
    /// Length of every output segment, in seconds.
    pub segment_seconds: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            patterns: DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect(),
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            segment_seconds: DEFAULT_SEGMENT_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "wavsegmenter", about = "Split WAV files into fixed-length segments", version)]
pub struct Args {
    #[arg(short = 'c', long = "config", help = "Config file path (TOML format)")]
    pub config_file: Option<PathBuf>,

    #[arg(short = 'o', long = "output", help = "Output root directory")]
    pub output: Option<PathBuf>,

    #[arg(short = 's', long = "segment-seconds", help = "Segment length in seconds")]
    pub segment_seconds: Option<u32>,

    #[arg(short = 'v', long = "verbose", help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(value_name = "PATTERN", help = "Glob patterns to segment (replace the configured list)")]
    pub patterns: Vec<String>,
}

impl Config {
    /// Create config from command line arguments and config file
    pub fn from_args_and_config(args: Args) -> Result<Self> {
        let mut config = if let Some(config_path) = &args.config_file {
            Self::from_file(config_path)?
        } else {
            Self::default()
        };

        // Command line arguments override config file settings
        if !args.patterns.is_empty() {
            config.patterns = args.patterns;
        }
        if let Some(output) = args.output {
            config.output_root = output;
        }
        if let Some(seconds) = args.segment_seconds {
            config.segment_seconds = seconds;
        }

        config.validate()?;

        Ok(config)
    }

    /// Load config from TOML config file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SegmenterError::config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        toml::from_str(&content)
            .map_err(|e| SegmenterError::config(format!("Failed to parse config file: {}", e)))
    }

    pub fn validate(&self) -> Result<()> {
        if self.segment_seconds == 0 {
            return Err(SegmenterError::config("Segment length must be greater than 0 seconds"));
        }
        if self.output_root.as_os_str().is_empty() {
            return Err(SegmenterError::config("Output root cannot be empty"));
        }
        Ok(())
    }

    /// Save config to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SegmenterError::config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| SegmenterError::config(format!("Failed to write config file: {}", e)))
    }

    /// Create default config file
    pub fn create_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        Self::default().save_to_file(path)
    }
}
