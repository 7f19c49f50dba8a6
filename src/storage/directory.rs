//! Discovery and bulk validation of manifest files.
//!
//! Files are loaded and validated in parallel. Each declaration is validated
//! on its own, with no state shared between validations.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use walkdir::WalkDir;

use crate::{
    domain::{Config, HierarchyError},
    storage::manifest::{load_manifest, ManifestError},
};

/// The validation outcome of one PodGroup document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// The manifest file.
    pub path: PathBuf,

    /// Zero-based position of the document within the file.
    pub document: usize,

    /// Display name of the PodGroup.
    pub name: String,

    /// Number of subgroups declared.
    pub subgroups: usize,

    /// The validation result.
    pub outcome: Result<(), HierarchyError>,
}

impl Finding {
    /// Returns `true` if the declaration was accepted.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// The result of scanning a set of manifest files.
#[derive(Debug, Default)]
pub struct Report {
    findings: Vec<Finding>,
    skipped: Vec<ManifestError>,
}

impl Report {
    /// All findings, in input path order then document order.
    #[must_use]
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Files that could not be loaded and were skipped.
    #[must_use]
    pub fn skipped(&self) -> &[ManifestError] {
        &self.skipped
    }

    /// Findings for accepted declarations.
    pub fn accepted(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|finding| finding.is_accepted())
    }

    /// Findings for rejected declarations.
    pub fn rejected(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|finding| !finding.is_accepted())
    }

    /// Returns `true` if no declaration was rejected.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.rejected().next().is_none()
    }
}

/// Errors that fail a scan outright.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// A path to scan does not exist.
    MissingRoot(PathBuf),

    /// One or more files could not be loaded.
    UnrecognisedFiles(Vec<ManifestError>),
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRoot(path) => write!(f, "No such file or directory: {}", path.display()),
            Self::UnrecognisedFiles(errors) => {
                write!(f, "Unrecognised files: ")?;
                for (i, error) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", error.path().display())?;
                }
                Ok(())
            }
        }
    }
}

/// Collects the manifest files under `root`.
///
/// A file path is returned as-is, whatever its extension. A directory is
/// walked recursively, in file name order, for files with one of the
/// configured extensions.
///
/// # Errors
///
/// Returns [`ScanError::MissingRoot`] if `root` does not exist.
pub fn collect_manifest_paths(root: &Path, config: &Config) -> Result<Vec<PathBuf>, ScanError> {
    if !root.exists() {
        return Err(ScanError::MissingRoot(root.to_path_buf()));
    }

    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let paths = WalkDir::new(root)
        .follow_links(config.follow_links)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| {
            entry
                .inspect_err(|e| tracing::debug!("Skipping unreadable entry: {e}"))
                .ok()
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .and_then(|extension| extension.to_str())
                .is_some_and(|extension| config.is_manifest_extension(extension))
        })
        .map(walkdir::DirEntry::into_path)
        .collect();
    Ok(paths)
}

/// Loads and validates every PodGroup in the given files.
///
/// # Errors
///
/// If any file cannot be loaded and `allow_unrecognised` is `false`, the scan
/// fails with every load error. Otherwise failed files are reported as
/// skipped.
pub fn scan(paths: &[PathBuf], config: &Config) -> Result<Report, ScanError> {
    let results: Vec<Result<Vec<Finding>, ManifestError>> =
        paths.par_iter().map(|path| check_file(path)).collect();

    let mut report = Report::default();
    for result in results {
        match result {
            Ok(findings) => report.findings.extend(findings),
            Err(error) => report.skipped.push(error),
        }
    }

    if !config.allow_unrecognised && !report.skipped.is_empty() {
        return Err(ScanError::UnrecognisedFiles(report.skipped));
    }

    for error in &report.skipped {
        tracing::debug!("Skipping unrecognised file: {error}");
    }

    Ok(report)
}

fn check_file(path: &Path) -> Result<Vec<Finding>, ManifestError> {
    let findings = load_manifest(path)?
        .into_iter()
        .map(|document| Finding {
            path: path.to_path_buf(),
            document: document.index,
            name: document.pod_group.display_name(),
            subgroups: document.pod_group.spec.sub_groups.len(),
            outcome: document.pod_group.validate(),
        })
        .collect();
    Ok(findings)
}
