//! Input discovery

use std::path::PathBuf;

use glob::MatchOptions;
use log::{debug, warn};

/// Hidden entries only match a pattern that names the leading dot itself.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: true,
};

/// Expand `patterns` into the sorted list of regular files they match.
///
/// Invalid patterns and entries that cannot be read while walking are skipped.
/// Paths are kept exactly as the glob produced them and ordered by their raw
/// bytes; a file matched by several patterns appears once.
pub fn discover<S: AsRef<str>>(patterns: &[S]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();
        let paths = match glob::glob_with(pattern, MATCH_OPTIONS) {
            Ok(paths) => paths,
            Err(e) => {
                warn!("Ignoring invalid pattern '{}': {}", pattern, e);
                continue;
            }
        };

        let before = files.len();
        for entry in paths {
            match entry {
                Ok(path) if path.is_file() => files.push(path),
                Ok(_) => {}
                Err(e) => warn!("Skipping unreadable match {}: {}", e.path().display(), e.error()),
            }
        }
        debug!("Pattern '{}' matched {} file(s)", pattern, files.len() - before);
    }

    files.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    files.dedup();
    files
}
