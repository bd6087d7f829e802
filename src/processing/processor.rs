//! Segmentation pipeline

use std::path::PathBuf;
use std::time::{Duration, Instant};

use log::{debug, info, trace};

use super::plan::{build_plan, prepare_output_tree, FilePlan};
use super::segment::SegmentSpec;
use crate::audio::WavAudio;
use crate::config::Config;
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct ProcessingResult {
    pub input_path: PathBuf,
    /// Written segments in index order.
    pub segment_paths: Vec<PathBuf>,
    pub original_frames: usize,
    pub padded_frames: usize,
    pub segment_frames: usize,
    pub processing_time: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub files_processed: usize,
    pub segments_written: usize,
    pub elapsed: Duration,
}

/// Runs discovery, output-tree preparation and per-file segmentation in order.
///
/// Any failure stops the whole run; files already written are left in place.
#[derive(Debug)]
pub struct Segmenter {
    config: Config,
}

impl Segmenter {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn run(&self) -> Result<RunSummary> {
        let start_time = Instant::now();

        let plans = build_plan(&self.config)?;
        info!("Discovered {} input file(s)", plans.len());

        let dir_count = prepare_output_tree(&plans)?;
        debug!("Prepared {} output director(ies) under {}", dir_count, self.config.output_root.display());

        let mut summary = RunSummary::default();
        for plan in &plans {
            let result = self.process_file(plan)?;
            summary.files_processed += 1;
            summary.segments_written += result.segment_paths.len();
        }
        summary.elapsed = start_time.elapsed();

        info!(
            "Wrote {} segment(s) from {} file(s) in {:.2}s",
            summary.segments_written,
            summary.files_processed,
            summary.elapsed.as_secs_f64()
        );

        Ok(summary)
    }

    /// Load, pad and split one planned file. Its output directory must exist.
    pub fn process_file(&self, plan: &FilePlan) -> Result<ProcessingResult> {
        let start_time = Instant::now();

        let audio = WavAudio::from_file(&plan.source)?;
        let spec = SegmentSpec::new(self.config.segment_seconds, audio.sample_rate())?;
        let original_frames = audio.total_frames();
        let padded = audio.padded(spec.padded_length(original_frames))?;
        drop(audio);

        debug!(
            "{}: {}Hz, {}ch, {}, {} frames (+{} silent) -> {} segment(s)",
            plan.source.display(),
            padded.sample_rate(),
            padded.channels(),
            padded.format().name(),
            original_frames,
            spec.padding(original_frames),
            spec.segment_count(original_frames)
        );

        let mut segment_paths = Vec::with_capacity(spec.segment_count(original_frames));
        for (index, frames) in spec.ranges(original_frames) {
            let path = plan.segment_path(index);
            padded.slice_frames(frames)?.save_to_file(&path)?;
            trace!("Wrote {}", path.display());
            segment_paths.push(path);
        }

        Ok(ProcessingResult {
            input_path: plan.source.clone(),
            segment_paths,
            original_frames,
            padded_frames: padded.total_frames(),
            segment_frames: spec.frames,
            processing_time: start_time.elapsed(),
        })
    }
}
