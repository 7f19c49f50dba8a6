use std::path::Path;

use serde::{Deserialize, Serialize};

/// Configuration for manifest discovery and scanning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// File extensions treated as manifests when walking a directory.
    ///
    /// Extensions are matched case-insensitively and without the leading dot.
    extensions: Vec<String>,

    /// Whether files that cannot be read or decoded are skipped rather than
    /// failing the scan.
    pub allow_unrecognised: bool,

    /// Whether symbolic links are followed when walking a directory.
    pub follow_links: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            allow_unrecognised: false,
            follow_links: false,
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Returns the manifest file extensions.
    #[must_use]
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Checks if a file extension is treated as a manifest.
    #[must_use]
    pub fn is_manifest_extension(&self, extension: &str) -> bool {
        self.extensions
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(extension))
    }
}

fn default_extensions() -> Vec<String> {
    ["yaml", "yml", "json"].map(String::from).to_vec()
}

/// The serialized versions of the configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_extensions")]
        extensions: Vec<String>,

        #[serde(default)]
        allow_unrecognised: bool,

        #[serde(default)]
        follow_links: bool,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                extensions,
                allow_unrecognised,
                follow_links,
            } => Self {
                extensions: extensions
                    .into_iter()
                    .map(|extension| extension.trim_start_matches('.').to_string())
                    .collect(),
                allow_unrecognised,
                follow_links,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            extensions: config.extensions,
            allow_unrecognised: config.allow_unrecognised,
            follow_links: config.follow_links,
        }
    }
}
