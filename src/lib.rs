//! SubGroup hierarchy validation
//!
//! A PodGroup may declare a hierarchy of named subgroups, each optionally
//! nested under a parent. This crate checks such declarations at admission
//! time: names must be lowercase DNS-label-like identifiers, unique within the
//! declaration, parents must resolve, and parent links must form a forest.

pub mod domain;
pub use domain::{
    validate, Config, ErrorKind, Forest, HierarchyError, NameError, PodGroup, SubGroup,
    SubGroupName,
};

/// Filesystem adapters for loading and scanning PodGroup manifests.
pub mod storage;
pub use storage::{Finding, Report, ScanError};
