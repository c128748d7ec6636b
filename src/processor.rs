//! Batch processing of a tagged source tree.
//!
//! A single table maps file-name globs to the kind of file they select and
//! the pipelines that apply to it. The processor walks a directory, runs the
//! selected pipeline once per matching file and writes the result back
//! atomically. A failing file is reported and the batch goes on.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use log::{debug, info, warn};
use rand::RngCore;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::pipeline::{Engine, Pipeline};

/// Kinds of files the processor knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Source,
    Script,
    Data,
    Localization,
}

impl FileKind {
    /// Pipelines allowed to rewrite this kind of file.
    pub fn pipelines(self) -> &'static [Pipeline] {
        match self {
            FileKind::Source | FileKind::Script => &[Pipeline::Transform, Pipeline::Copyright],
            FileKind::Data | FileKind::Localization => &[Pipeline::Copyright],
        }
    }

    pub fn supports(self, pipeline: Pipeline) -> bool {
        self.pipelines().contains(&pipeline)
    }
}

/// File name globs, matched case-insensitively, and the kind they select.
pub const FILE_KINDS: [(&str, FileKind); 4] = [
    ("*.swift", FileKind::Source),
    ("*.js", FileKind::Script),
    ("*.json", FileKind::Data),
    ("*.strings", FileKind::Localization),
];

/// Compiled form of [`FILE_KINDS`].
pub struct FileMatcher {
    set: GlobSet,
}

impl FileMatcher {
    pub fn new() -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for (pattern, _) in FILE_KINDS {
            let glob = GlobBuilder::new(pattern)
                .case_insensitive(true)
                .literal_separator(true)
                .build()
                .map_err(|e| Error::ConfigError(format!("Invalid file pattern {pattern}: {e}")))?;
            builder.add(glob);
        }
        let set = builder
            .build()
            .map_err(|e| Error::ConfigError(format!("Invalid file patterns: {e}")))?;
        Ok(Self { set })
    }

    /// Kind of the file at `path`, judged by its file name only.
    pub fn kind_of<P: AsRef<Path>>(&self, path: P) -> Option<FileKind> {
        let file_name = path.as_ref().file_name()?;
        self.set
            .matches(file_name)
            .first()
            .map(|&index| FILE_KINDS[index].1)
    }
}

/// What to do with a processed file.
#[derive(Debug, PartialEq, Eq)]
pub enum FileOperation {
    /// Replace the file's content.
    Write { target: PathBuf, content: String },
    /// The pipeline produced the content the file already has.
    Unchanged,
}

#[derive(Debug)]
pub struct ProcessResult {
    pub source: PathBuf,
    /// `None` when the entry was skipped.
    pub operation: Option<FileOperation>,
}

impl ProcessResult {
    fn skipped(source: &Path) -> Self {
        Self {
            source: source.to_path_buf(),
            operation: None,
        }
    }
}

/// Counters reported at the end of a batch.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    pub processed: usize,
    pub changed: usize,
    pub failed: usize,
}

/// Options of a directory run.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    pub recursive: bool,
    pub dry_run: bool,
}

/// Runs one pipeline of one profile over the files of a directory.
pub struct Processor<'a, 'r, R: RngCore> {
    engine: Engine<'r, R>,
    profile_id: &'a str,
    pipeline: Pipeline,
    root: &'a Path,
    ignored: &'a GlobSet,
    matcher: FileMatcher,
}

impl<'a, 'r, R: RngCore> Processor<'a, 'r, R> {
    /// # Errors
    /// * `Error::UnknownProfile` if `profile_id` is not registered, before any
    ///   file is touched
    pub fn new(
        engine: Engine<'r, R>,
        profile_id: &'a str,
        pipeline: Pipeline,
        root: &'a Path,
        ignored: &'a GlobSet,
    ) -> Result<Self> {
        engine.registry().get(profile_id)?;
        Ok(Self {
            engine,
            profile_id,
            pipeline,
            root,
            ignored,
            matcher: FileMatcher::new()?,
        })
    }

    fn is_ignored(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(self.root).unwrap_or(path);
        self.ignored.is_match(relative) || self.ignored.is_match(path)
    }

    /// Runs the pipeline over the file at `path`.
    ///
    /// Directories, ignored paths and files whose kind does not take the
    /// selected pipeline are skipped.
    ///
    /// # Errors
    /// * `Error::ProcessError` wrapping the read, decode or pipeline failure
    pub fn process(&mut self, path: &Path) -> Result<ProcessResult> {
        if path.is_dir() {
            return Ok(ProcessResult::skipped(path));
        }
        if self.is_ignored(path) {
            debug!("Skipping {} (ignored)", path.display());
            return Ok(ProcessResult::skipped(path));
        }
        match self.matcher.kind_of(path) {
            Some(kind) if kind.supports(self.pipeline) => {}
            _ => return Ok(ProcessResult::skipped(path)),
        }

        info!("Processing {}", path.display());
        let wrap = |e: Error| Error::ProcessError {
            source_path: path.to_path_buf(),
            e: Box::new(e),
        };

        let original = read_source(path).map_err(wrap)?;
        let content = self
            .engine
            .run(self.pipeline, self.profile_id, &original)
            .map_err(wrap)?;

        let operation = if content == original {
            FileOperation::Unchanged
        } else {
            FileOperation::Write {
                target: path.to_path_buf(),
                content,
            }
        };

        Ok(ProcessResult {
            source: path.to_path_buf(),
            operation: Some(operation),
        })
    }

    /// Walks the root directory and processes every entry.
    ///
    /// Per-file failures are logged and counted; only a failure to walk the
    /// directory itself aborts the batch.
    pub fn run(&mut self, options: BatchOptions) -> Result<Summary> {
        let max_depth = if options.recursive { usize::MAX } else { 1 };
        let mut summary = Summary::default();

        for dir_entry in WalkDir::new(self.root).min_depth(1).max_depth(max_depth).sort_by_file_name() {
            let entry = dir_entry.map_err(|e| Error::IoError(e.into()))?;
            let outcome = self
                .process(entry.path())
                .and_then(|result| apply(result, options.dry_run));

            match outcome {
                Ok(None) => {}
                Ok(Some(changed)) => {
                    summary.processed += 1;
                    if changed {
                        summary.changed += 1;
                    }
                }
                Err(e @ Error::ProcessError { .. }) => {
                    warn!("{e}");
                    summary.failed += 1;
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            "{} done: {} file(s) processed, {} changed, {} failed",
            self.pipeline, summary.processed, summary.changed, summary.failed
        );
        Ok(summary)
    }
}

/// Carries out `result`'s operation. Returns `None` for a skipped entry,
/// otherwise whether the file changed.
fn apply(result: ProcessResult, dry_run: bool) -> Result<Option<bool>> {
    match result.operation {
        None => Ok(None),
        Some(FileOperation::Unchanged) => Ok(Some(false)),
        Some(FileOperation::Write { target, content }) => {
            if dry_run {
                info!("Would rewrite {}", target.display());
            } else {
                write_atomically(&target, &content).map_err(|e| Error::ProcessError {
                    source_path: result.source.clone(),
                    e: Box::new(e),
                })?;
                debug!("Rewrote {}", target.display());
            }
            Ok(Some(true))
        }
    }
}

/// Reads a whole file as UTF-8 text.
///
/// # Errors
/// * `Error::IoError` if the file cannot be read
/// * `Error::EncodingError` if it is not valid UTF-8
pub fn read_source(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    String::from_utf8(bytes).map_err(|e| Error::EncodingError {
        path: path.to_path_buf(),
        reason: e.utf8_error().to_string(),
    })
}

/// Replaces the content of `path` through a temporary sibling and a rename, so
/// the file holds either the old or the new content. An existing file keeps
/// its permissions.
pub fn write_atomically(path: &Path, content: &str) -> Result<()> {
    let file_name = path
        .file_name()
        .ok_or_else(|| Error::ConfigError(format!("Not a file path: {}", path.display())))?;
    let mut temp_name = std::ffi::OsString::from(".");
    temp_name.push(file_name);
    temp_name.push(".piranhito.tmp");
    let temp_path = path.with_file_name(temp_name);

    let permissions = match fs::metadata(path) {
        Ok(metadata) => Some(metadata.permissions()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => return Err(Error::IoError(e)),
    };

    let written = fs::write(&temp_path, content).and_then(|()| match permissions {
        Some(permissions) => fs::set_permissions(&temp_path, permissions),
        None => Ok(()),
    });
    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::IoError(e));
    }
    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        Error::IoError(e)
    })
}
