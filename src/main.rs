//! WavSegmenter - split WAV files into fixed-length segments

use anyhow::Context;
use clap::Parser;
use log::debug;
use std::process;
use wavsegmenter::{init_logging, Args, Config, Segmenter};

fn main() {
    let args = Args::parse();

    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    debug!("{}", wavsegmenter::get_library_info());

    let config = Config::from_args_and_config(args).context("failed to load configuration")?;
    debug!(
        "Patterns: {:?}, output root: {}, segment length: {}s",
        config.patterns,
        config.output_root.display(),
        config.segment_seconds
    );

    let output_root = config.output_root.clone();
    Segmenter::new(config)?
        .run()
        .with_context(|| format!("segmentation into '{}' failed", output_root.display()))?;

    Ok(())
}
