pub mod directory;
/// Loading PodGroup documents from manifest files.
pub mod manifest;

pub use directory::{collect_manifest_paths, scan, Finding, Report, ScanError};
pub use manifest::{load_manifest, Document, ManifestError};
