//! Segmentation Pipeline
//!
//! Discovery, output-tree preparation, padding and segment writing.

pub mod discovery;
pub mod plan;
pub mod processor;
pub mod segment;

pub use discovery::discover;
pub use plan::{build_plan, mirrored_dir, prepare_output_tree, FilePlan};
pub use processor::{ProcessingResult, RunSummary, Segmenter};
pub use segment::{segment_file_name, SegmentSpec};
