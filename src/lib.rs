//! Piranhito turns a tagged source tree into one project variant.
//! Feature-gated regions delimited by marker comments are stripped, strings
//! are substituted, and the syntax left orphaned by stripping is tidied up.
//! The engine is a pure function of (profile, text) except for `@Random(N)`
//! rules, which draw from a random source supplied by the caller.

/// Cleanup of whitespace-only lines and blank runs
pub mod beautify;

/// Command-line interface module for the piranhito binary
pub mod cli;

/// Marker tokens, sentinels and file names
pub mod constants;

/// Error types and handling for piranhito
pub mod error;

/// `.piranhitoignore` patterns
pub mod ignore;

/// Line filtering and per-line token rewriting
pub mod lines;

/// env_logger setup for the binary
pub mod logger;

/// Start/Leave/End token grammar
pub mod marker;

/// Transform and Copyright pipelines, and the engine binding them to profiles
pub mod pipeline;

/// Directory walking and atomic write-back
pub mod processor;

/// Project profile data model
pub mod profile;

/// Removal of blank groups and empty conditionals
pub mod reformat;

/// Built-in and file-based profile registry
pub mod registry;

/// Feature block stripping
pub mod strip;

/// Ordered substitutions and the `@Random(N)` directive
pub mod substitute;

pub use pipeline::{run_copyright_pipeline, run_transform_pipeline, Engine, Pipeline};
pub use registry::ProfileRegistry;
