//! Project profiles.
//! A profile bundles everything the engine needs to turn a tagged source tree
//! into one project variant: which features to strip, which strings to
//! substitute, and which lines and tokens to drop.

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::substitute::Replacement;

/// A removable feature, identified by id and a unique eyecatcher.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeatureMarker {
    pub id: String,
    pub eyecatcher: String,
}

impl FeatureMarker {
    pub fn new(id: impl Into<String>, eyecatcher: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            eyecatcher: eyecatcher.into(),
        }
    }
}

/// A whole-text replacement rule.
///
/// `to` is either a literal or the `@Random(N)` directive.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubstitutionRule {
    #[serde(rename = "match")]
    pub pattern: String,
    #[serde(rename = "replace")]
    pub replacement: String,
}

impl SubstitutionRule {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }
}

/// A per-line literal replacement.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenPair {
    pub from: String,
    pub to: String,
}

impl TokenPair {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Configuration of one target project variant.
///
/// All lists are applied in declared order. Profiles are read-only once
/// registered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectProfile {
    pub id: String,
    #[serde(default)]
    pub removable_features: Vec<FeatureMarker>,
    #[serde(default)]
    pub replaceable_strings: Vec<SubstitutionRule>,
    #[serde(default)]
    pub removable_lines: Vec<String>,
    #[serde(default)]
    pub removable_tokens: Vec<String>,
    #[serde(default)]
    pub replaceable_tokens: Vec<TokenPair>,
    #[serde(default)]
    pub copyright_features: Vec<FeatureMarker>,
    #[serde(default)]
    pub copyright_strings: Vec<SubstitutionRule>,
}

impl ProjectProfile {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Checks the profile for patterns the engine cannot apply safely.
    ///
    /// Empty patterns are rejected: an empty match string would be inserted
    /// between every character, an empty removable token would never stop
    /// being "found", and an empty forbidden line would drop every line.
    ///
    /// # Errors
    /// * `Error::ConfigError` naming the offending entry
    /// * `Error::InvalidRandomDirective` for a malformed `@Random(N)`
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::ConfigError("profile id must not be empty".to_string()));
        }

        for feature in self.removable_features.iter().chain(&self.copyright_features) {
            if feature.id.is_empty() || feature.eyecatcher.is_empty() {
                return Err(self.invalid(format!(
                    "feature '{}' needs both an id and an eyecatcher",
                    feature.id
                )));
            }
        }

        for rule in self.replaceable_strings.iter().chain(&self.copyright_strings) {
            if rule.pattern.is_empty() {
                return Err(self.invalid("substitution rule with an empty match".to_string()));
            }
            Replacement::parse(rule)?;
        }

        if self.removable_lines.iter().any(String::is_empty) {
            return Err(self.invalid("empty removable line".to_string()));
        }
        if self.removable_tokens.iter().any(String::is_empty) {
            return Err(self.invalid("empty removable token".to_string()));
        }
        if self.replaceable_tokens.iter().any(|pair| pair.from.is_empty()) {
            return Err(self.invalid("token pair with an empty 'from'".to_string()));
        }

        Ok(())
    }

    fn invalid(&self, reason: String) -> Error {
        Error::ConfigError(format!("profile '{}': {}", self.id, reason))
    }
}
