use serde::{Deserialize, Serialize};

/// One subgroup declared in a PodGroup.
///
/// The record is carried exactly as submitted. Nothing here is validated on
/// construction; see [`validate`](crate::domain::validate).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubGroup {
    /// Unique key of the subgroup within its declaration.
    pub name: String,

    /// Minimum number of members required for the subgroup to be scheduled.
    #[serde(default)]
    pub min_member: u32,

    /// Name of the enclosing subgroup, or `None` for a root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    /// Topology placement constraints. Not examined by validation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topology_constraint: Option<TopologyConstraint>,
}

impl SubGroup {
    /// Creates a root subgroup.
    #[must_use]
    pub fn new(name: impl Into<String>, min_member: u32) -> Self {
        Self {
            name: name.into(),
            min_member,
            ..Self::default()
        }
    }

    /// Sets the parent of this subgroup.
    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Returns the parent name, if any.
    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Returns `true` if the subgroup has no parent.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Placement constraints for the members of a subgroup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopologyConstraint {
    /// Name of the topology resource describing the cluster layout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topology: Option<String>,

    /// Topology level all members must share.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_topology_level: Option<String>,

    /// Topology level members should share where possible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_topology_level: Option<String>,
}
