//! Per-file plan and output-tree preparation

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fs;
use std::path::{Component, Path, PathBuf};

use log::debug;

use super::discovery::discover;
use super::segment::segment_file_name;
use crate::config::Config;
use crate::error::{Result, SegmenterError};

/// Where one discovered input is read from and where its segments go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePlan {
    pub source: PathBuf,
    /// Source file name without its extension.
    pub base_name: OsString,
    pub output_dir: PathBuf,
}

impl FilePlan {
    pub fn new(source: PathBuf, output_root: &Path) -> Result<Self> {
        let base_name = source
            .file_stem()
            .map(|stem| stem.to_os_string())
            .ok_or_else(|| {
                SegmenterError::processing(format!("Cannot derive a base name from {}", source.display()))
            })?;
        let output_dir = mirrored_dir(output_root, &source);

        Ok(Self {
            source,
            base_name,
            output_dir,
        })
    }

    pub fn segment_path(&self, index: usize) -> PathBuf {
        self.output_dir.join(segment_file_name(&self.base_name, index))
    }
}

/// `output_root` joined with the directory part of `source` as discovered.
///
/// Root and drive-prefix components are dropped so absolute inputs still land
/// under `output_root`; `.` components are dropped as no-ops.
pub fn mirrored_dir(output_root: &Path, source: &Path) -> PathBuf {
    let mut dir = output_root.to_path_buf();
    if let Some(parent) = source.parent() {
        for component in parent.components() {
            match component {
                Component::Normal(part) => dir.push(part),
                Component::ParentDir => dir.push(Component::ParentDir.as_os_str()),
                Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
            }
        }
    }
    dir
}

/// Discover every input named by `config` and derive its output location.
pub fn build_plan(config: &Config) -> Result<Vec<FilePlan>> {
    discover(config.patterns.as_slice())
        .into_iter()
        .map(|source| FilePlan::new(source, &config.output_root))
        .collect()
}

/// Create every planned output directory, returning how many distinct ones
/// there are. Existing directories are left alone.
pub fn prepare_output_tree(plans: &[FilePlan]) -> Result<usize> {
    let dirs: BTreeSet<&Path> = plans.iter().map(|plan| plan.output_dir.as_path()).collect();

    for dir in &dirs {
        fs::create_dir_all(dir).map_err(|e| {
            SegmenterError::io(format!("Cannot create output directory {}: {}", dir.display(), e))
        })?;
        debug!("Output directory ready: {}", dir.display());
    }

    Ok(dirs.len())
}
