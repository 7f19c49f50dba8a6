use std::{
    io,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::domain::{PodGroup, POD_GROUP_KIND};

/// A PodGroup read from a manifest file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Zero-based position of the document within its file.
    pub index: usize,

    /// The decoded resource.
    pub pod_group: PodGroup,
}

/// Errors that can occur when loading a manifest file.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The manifest path.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// The file extension is not a known manifest format.
    #[error("unsupported manifest format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// A YAML document could not be decoded.
    #[error("failed to parse {} as YAML: {source}", path.display())]
    Yaml {
        /// The manifest path.
        path: PathBuf,
        /// The underlying decode error.
        source: serde_yaml::Error,
    },

    /// The JSON document could not be decoded.
    #[error("failed to parse {} as JSON: {source}", path.display())]
    Json {
        /// The manifest path.
        path: PathBuf,
        /// The underlying decode error.
        source: serde_json::Error,
    },
}

impl ManifestError {
    /// Returns the path of the manifest that failed to load.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } | Self::Yaml { path, .. } | Self::Json { path, .. } => {
                path.as_path()
            }
            Self::UnsupportedFormat(path) => path.as_path(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Yaml,
    Json,
}

impl Format {
    fn of(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        if extension.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else {
            // Every other configured extension is read as YAML.
            Some(Self::Yaml)
        }
    }
}

/// Loads every PodGroup document in a manifest file.
///
/// JSON files hold a single document. YAML files may hold several documents
/// separated by `---`; empty documents are ignored. Documents whose `kind` is
/// not `PodGroup` are skipped.
///
/// # Errors
///
/// Returns an error if the file has no extension, cannot be read, or contains
/// a document that cannot be decoded.
pub fn load_manifest(path: &Path) -> Result<Vec<Document>, ManifestError> {
    let format =
        Format::of(path).ok_or_else(|| ManifestError::UnsupportedFormat(path.to_path_buf()))?;
    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let documents = match format {
        Format::Yaml => parse_yaml(&content).map_err(|source| ManifestError::Yaml {
            path: path.to_path_buf(),
            source,
        })?,
        Format::Json => parse_json(&content).map_err(|source| ManifestError::Json {
            path: path.to_path_buf(),
            source,
        })?,
    };

    tracing::debug!(
        "Loaded {} PodGroup document(s) from {}",
        documents.len(),
        path.display()
    );
    Ok(documents)
}

fn parse_yaml(content: &str) -> Result<Vec<Document>, serde_yaml::Error> {
    let mut documents = Vec::new();
    for (index, deserializer) in serde_yaml::Deserializer::from_str(content).enumerate() {
        let value = serde_yaml::Value::deserialize(deserializer)?;
        if value.is_null() {
            continue;
        }

        let kind = value.get("kind").and_then(serde_yaml::Value::as_str);
        if kind != Some(POD_GROUP_KIND) {
            tracing::debug!("Skipping document {index} with kind {kind:?}");
            continue;
        }

        documents.push(Document {
            index,
            pod_group: serde_yaml::from_value(value)?,
        });
    }
    Ok(documents)
}

fn parse_json(content: &str) -> Result<Vec<Document>, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(content)?;

    let kind = value.get("kind").and_then(serde_json::Value::as_str);
    if kind != Some(POD_GROUP_KIND) {
        tracing::debug!("Skipping document with kind {kind:?}");
        return Ok(Vec::new());
    }

    Ok(vec![Document {
        index: 0,
        pod_group: serde_json::from_value(value)?,
    }])
}
