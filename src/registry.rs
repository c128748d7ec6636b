//! Profile registry.
//! Profiles are loaded once at startup, either from the built-in set or from a
//! JSON/YAML profile file, validated, and then only read.

use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use std::path::Path;

use crate::constants::PROFILE_FILES;
use crate::error::{Error, Result};
use crate::profile::ProjectProfile;

/// Profiles shipped with the binary.
const BUILTIN_PROFILES: &str = include_str!("../profiles/builtin.yaml");

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProfileDocument {
    profiles: Vec<ProjectProfile>,
}

/// Immutable mapping from project id to profile, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct ProfileRegistry {
    profiles: IndexMap<String, ProjectProfile>,
}

impl ProfileRegistry {
    /// Builds a registry from already constructed profiles.
    ///
    /// # Errors
    /// * `Error::ConfigError` on a duplicate id or an invalid profile
    /// * `Error::InvalidRandomDirective` on a malformed `@Random(N)`
    pub fn from_profiles(profiles: impl IntoIterator<Item = ProjectProfile>) -> Result<Self> {
        let mut registry = IndexMap::new();
        for profile in profiles {
            profile.validate()?;
            if registry.contains_key(&profile.id) {
                return Err(Error::ConfigError(format!(
                    "duplicate profile id '{}'",
                    profile.id
                )));
            }
            debug!("Registered profile '{}'", profile.id);
            registry.insert(profile.id.clone(), profile);
        }
        Ok(Self { profiles: registry })
    }

    /// The profiles shipped with piranhito.
    pub fn builtin() -> Result<Self> {
        Self::parse(BUILTIN_PROFILES)
    }

    /// Parses a profile document, trying JSON first and YAML second.
    ///
    /// # Errors
    /// * `Error::ConfigError` if the content is neither valid JSON nor valid YAML
    pub fn parse(content: &str) -> Result<Self> {
        let document: ProfileDocument = match serde_json::from_str(content) {
            Ok(document) => document,
            Err(_) => serde_yaml::from_str(content)
                .map_err(|e| Error::ConfigError(format!("Invalid profile format: {e}")))?,
        };
        Self::from_profiles(document.profiles)
    }

    /// Loads profiles from `path`.
    ///
    /// A directory is searched for `piranhito.json`, `piranhito.yml` and
    /// `piranhito.yaml`, in that order.
    ///
    /// # Errors
    /// * `Error::ConfigError` if no profile file exists or it does not parse
    /// * `Error::IoError` if the file cannot be read
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = if path.is_dir() {
            PROFILE_FILES
                .iter()
                .map(|name| path.join(name))
                .find(|candidate| candidate.is_file())
                .ok_or_else(|| {
                    Error::ConfigError(format!(
                        "No profile file found in {} (tried: {})",
                        path.display(),
                        PROFILE_FILES.join(", ")
                    ))
                })?
        } else if path.is_file() {
            path.to_path_buf()
        } else {
            return Err(Error::ConfigError(format!(
                "Invalid profile path: {}",
                path.display()
            )));
        };

        debug!("Loading profiles from {}", file.display());
        let content = std::fs::read_to_string(&file)?;
        Self::parse(&content)
    }

    /// Looks a profile up by its exact id.
    ///
    /// # Errors
    /// * `Error::UnknownProfile` listing the registered ids
    pub fn get(&self, id: &str) -> Result<&ProjectProfile> {
        self.profiles.get(id).ok_or_else(|| Error::UnknownProfile {
            id: id.to_string(),
            supported: self.ids().collect::<Vec<_>>().join(", "),
        })
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
