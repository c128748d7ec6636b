//! Ordered whole-text substitutions.
//!
//! Rules run in declaration order and each one sees the text left by the
//! previous ones, so a later rule may match what an earlier rule produced.
//! The `@Random(N)` directive draws from the caller's random source, which
//! keeps the engine reproducible under a seeded generator.

use log::debug;
use rand::distributions::{Alphanumeric, Distribution};
use rand::Rng;

use crate::constants::{RANDOM_DIRECTIVE_PREFIX, RANDOM_MAX_LENGTH, RANDOM_VALUE_PREFIX};
use crate::error::{Error, Result};
use crate::profile::SubstitutionRule;

/// What a rule's replacement value asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Replacement<'a> {
    Literal(&'a str),
    /// A generated identifier of the given total length.
    Random(usize),
}

impl<'a> Replacement<'a> {
    /// Interprets the replacement of `rule`.
    ///
    /// Anything starting with `@Random(` is a directive and must be of the
    /// exact form `@Random(N)` with N a positive integer no larger than
    /// [`RANDOM_MAX_LENGTH`].
    pub fn parse(rule: &'a SubstitutionRule) -> Result<Self> {
        let value = rule.replacement.as_str();
        let Some(rest) = value.strip_prefix(RANDOM_DIRECTIVE_PREFIX) else {
            return Ok(Replacement::Literal(value));
        };

        let invalid = |reason: &str| Error::InvalidRandomDirective {
            pattern: rule.pattern.clone(),
            directive: value.to_string(),
            reason: reason.to_string(),
        };

        let length = rest
            .strip_suffix(')')
            .ok_or_else(|| invalid("missing closing parenthesis"))?;
        let length: usize = length
            .trim()
            .parse()
            .map_err(|_| invalid("length is not a positive integer"))?;
        if length == 0 {
            return Err(invalid("length must be at least 1"));
        }
        if length > RANDOM_MAX_LENGTH {
            return Err(invalid("length too large"));
        }

        Ok(Replacement::Random(length))
    }
}

/// Generates an identifier of `length` characters: the `_` prefix followed by
/// characters drawn uniformly from `[a-zA-Z0-9]`.
pub fn random_identifier<R: Rng + ?Sized>(length: usize, rng: &mut R) -> String {
    let mut value = String::with_capacity(length);
    value.push_str(RANDOM_VALUE_PREFIX);
    while value.len() < length {
        value.push(char::from(Alphanumeric.sample(rng)));
    }
    value.truncate(length);
    value
}

/// Applies `rules` to `text` in order, each rule replacing every occurrence.
///
/// A `@Random(N)` rule draws one value per call and uses it for every
/// occurrence of its match string.
///
/// # Errors
/// * `Error::InvalidRandomDirective` if a directive is malformed; no partial
///   result is returned
pub fn substitute<R: Rng + ?Sized>(
    text: &str,
    rules: &[SubstitutionRule],
    rng: &mut R,
) -> Result<String> {
    let mut baseline = text.to_string();
    for rule in rules {
        if rule.pattern.is_empty() {
            continue;
        }
        match Replacement::parse(rule)? {
            Replacement::Literal(replacement) => {
                baseline = baseline.replace(&rule.pattern, replacement);
            }
            Replacement::Random(length) => {
                let value = random_identifier(length, rng);
                debug!("'{}' -> generated '{}'", rule.pattern, value);
                baseline = baseline.replace(&rule.pattern, &value);
            }
        }
    }
    Ok(baseline)
}
