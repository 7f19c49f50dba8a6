//! Domain models for subgroup hierarchies.
//!
//! This module contains the name grammar, the subgroup record, the hierarchy
//! validator and the read-only forest view over an accepted declaration.

/// Subgroup name grammar and the validated [`SubGroupName`] type.
pub mod name;
pub use name::{check_name, NameError, SubGroupName, MAX_NAME_LENGTH};

mod subgroup;
pub use subgroup::{SubGroup, TopologyConstraint};

/// Structural validation of a subgroup declaration.
pub mod hierarchy;
pub use hierarchy::{validate, ErrorKind, HierarchyError};

mod forest;
pub use forest::Forest;

mod podgroup;
pub use podgroup::{ObjectMeta, PodGroup, PodGroupSpec, POD_GROUP_KIND};

mod config;
pub use config::Config;
