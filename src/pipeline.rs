//! Fixed compositions of the engine components.
//!
//! Both pipelines take a whole file as one string and return the whole new
//! content. Writing the result back is the caller's job.

use log::warn;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::fmt;

use crate::beautify::collapse_blank_runs;
use crate::error::Result;
use crate::lines::{is_forbidden, rewrite_line};
use crate::profile::ProjectProfile;
use crate::reformat::reformat;
use crate::registry::ProfileRegistry;
use crate::strip::{strip_features, StripOutcome};
use crate::substitute::substitute;

/// The two pipelines a caller can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pipeline {
    /// Strip features, substitute, reformat, filter and rewrite lines, collapse blanks.
    Transform,
    /// Strip copyright markers, substitute copyright strings, filter lines.
    Copyright,
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pipeline::Transform => write!(f, "Transformation"),
            Pipeline::Copyright => write!(f, "Copyright alignment"),
        }
    }
}

impl Pipeline {
    pub fn run<R: RngCore + ?Sized>(
        self,
        profile: &ProjectProfile,
        source: &str,
        rng: &mut R,
    ) -> Result<String> {
        match self {
            Pipeline::Transform => run_transform_pipeline(profile, source, rng),
            Pipeline::Copyright => run_copyright_pipeline(profile, source, rng),
        }
    }
}

fn warn_unbalanced(profile: &ProjectProfile, outcome: &StripOutcome) {
    if !outcome.is_balanced() {
        warn!(
            "Profile '{}': {} marker(s) without a matching end were left in place",
            profile.id,
            outcome.unbalanced.len()
        );
    }
}

/// Runs the Transform pipeline over one file's content.
///
/// # Flow
/// 1. Strips the profile's removable features
/// 2. Applies the replaceable strings
/// 3. Reformats blank groups and empty conditionals
/// 4. Drops forbidden lines and rewrites tokens on the remaining ones
/// 5. Collapses blank runs
///
/// # Errors
/// * `Error::InvalidRandomDirective` from step 2
pub fn run_transform_pipeline<R: RngCore + ?Sized>(
    profile: &ProjectProfile,
    source: &str,
    rng: &mut R,
) -> Result<String> {
    let stripped = strip_features(source, &profile.removable_features);
    warn_unbalanced(profile, &stripped);

    let substituted = substitute(&stripped.text, &profile.replaceable_strings, rng)?;
    let reformatted = reformat(&substituted);

    let rewritten = reformatted
        .split('\n')
        .filter(|line| !is_forbidden(line, &profile.removable_lines))
        .map(|line| {
            rewrite_line(line, &profile.removable_tokens, &profile.replaceable_tokens)
        })
        .collect::<Vec<_>>()
        .join("\n");

    Ok(collapse_blank_runs(&rewritten))
}

/// Runs the Copyright pipeline over one file's content.
///
/// Uses the profile's copyright markers and strings in place of the feature
/// ones, then drops forbidden lines. No reformatting takes place.
pub fn run_copyright_pipeline<R: RngCore + ?Sized>(
    profile: &ProjectProfile,
    source: &str,
    rng: &mut R,
) -> Result<String> {
    let stripped = strip_features(source, &profile.copyright_features);
    warn_unbalanced(profile, &stripped);

    let substituted = substitute(&stripped.text, &profile.copyright_strings, rng)?;

    Ok(substituted
        .split('\n')
        .filter(|line| !is_forbidden(line, &profile.removable_lines))
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Entry point binding a registry to a random source.
///
/// The random source only feeds `@Random(N)` rules; seed it for reproducible
/// output.
pub struct Engine<'r, R: RngCore> {
    registry: &'r ProfileRegistry,
    rng: R,
}

impl<'r> Engine<'r, StdRng> {
    /// Creates an engine seeded from the operating system.
    pub fn from_entropy(registry: &'r ProfileRegistry) -> Self {
        Self::new(registry, StdRng::from_entropy())
    }
}

impl<'r, R: RngCore> Engine<'r, R> {
    pub fn new(registry: &'r ProfileRegistry, rng: R) -> Self {
        Self { registry, rng }
    }

    pub fn registry(&self) -> &ProfileRegistry {
        self.registry
    }

    /// Runs `pipeline` for the profile registered as `profile_id`.
    ///
    /// # Errors
    /// * `Error::UnknownProfile` if no such profile is registered
    /// * any error of the pipeline itself
    pub fn run(&mut self, pipeline: Pipeline, profile_id: &str, source: &str) -> Result<String> {
        let registry = self.registry;
        let profile = registry.get(profile_id)?;
        pipeline.run(profile, source, &mut self.rng)
    }

    pub fn transform(&mut self, profile_id: &str, source: &str) -> Result<String> {
        self.run(Pipeline::Transform, profile_id, source)
    }

    pub fn align_copyright(&mut self, profile_id: &str, source: &str) -> Result<String> {
        self.run(Pipeline::Copyright, profile_id, source)
    }
}
