//! Error handling for piranhito.
//! Defines the error type shared by the engine, the profile registry and the
//! batch processor.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading profiles or transforming source text.
///
/// Every variant is terminal for the single file or invocation it concerns.
/// The batch driver reports [`Error::ProcessError`] and moves on to the next file.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    /// The requested project id has no registered profile.
    #[error("Unknown project profile '{id}' (supported: {supported})")]
    UnknownProfile { id: String, supported: String },

    /// A `@Random(N)` directive whose N is not a positive integer.
    #[error("Invalid random directive '{directive}' for '{pattern}': {reason}")]
    InvalidRandomDirective {
        pattern: String,
        directive: String,
        reason: String,
    },

    /// The file content is not valid UTF-8.
    #[error("Encoding error: '{}' is not valid UTF-8 ({reason})", .path.display())]
    EncodingError { path: PathBuf, reason: String },

    /// Represents errors in profile files or profile validation
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Represents errors in processing .piranhitoignore files
    #[error("Ignore file error: {0}")]
    IgnoreError(String),

    /// A single file failed; the rest of the batch is unaffected.
    #[error("Failed to process '{}': {e}", .source_path.display())]
    ProcessError { source_path: PathBuf, e: Box<Error> },
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
