//! Ignore pattern handling.
//! A `.piranhitoignore` file in the processed directory lists glob patterns,
//! one per line, of paths the batch processor must leave alone.

use crate::constants::IGNORE_FILE;
use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;
use std::{fs::read_to_string, io::ErrorKind, path::Path};

/// Patterns ignored even without an ignore file.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &["**/.git/**", "**/.DS_Store"];

/// Reads the ignore file of `directory` and compiles it with the defaults.
///
/// # Notes
/// - A missing ignore file yields only the default patterns; any other read
///   failure, invalid UTF-8 included, is an error
/// - Blank lines and lines starting with `#` are skipped
///
/// # Errors
/// * `Error::IgnoreError` if the file exists but cannot be read, or a pattern
///   is not a valid glob
pub fn parse_ignore_file<P: AsRef<Path>>(directory: P) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    let invalid = |e: globset::Error| Error::IgnoreError(format!("{IGNORE_FILE} loading failed: {e}"));

    for pattern in DEFAULT_IGNORE_PATTERNS {
        builder.add(Glob::new(pattern).map_err(invalid)?);
    }

    let ignore_path = directory.as_ref().join(IGNORE_FILE);
    match read_to_string(&ignore_path) {
        Ok(contents) => {
            for line in contents.lines().map(str::trim) {
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                builder.add(Glob::new(line).map_err(invalid)?);
            }
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("{} does not exist", ignore_path.display());
        }
        Err(e) => {
            return Err(Error::IgnoreError(format!(
                "{} could not be read: {e}",
                ignore_path.display()
            )));
        }
    }

    builder.build().map_err(invalid)
}
