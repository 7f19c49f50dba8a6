use serde::{Deserialize, Serialize};

use crate::domain::{hierarchy::HierarchyError, validate, SubGroup};

/// The `kind` of resources that carry subgroup declarations.
pub const POD_GROUP_KIND: &str = "PodGroup";

/// A PodGroup resource, reduced to the fields relevant to subgroup
/// validation. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodGroup {
    /// API group and version, e.g. `scheduling.run.ai/v2alpha2`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    /// Resource kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Object metadata.
    #[serde(default)]
    pub metadata: ObjectMeta,

    /// Desired state.
    #[serde(default)]
    pub spec: PodGroupSpec,
}

/// The identifying metadata of a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    /// Resource name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Resource namespace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// The scheduling requirements of a PodGroup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodGroupSpec {
    /// Minimum number of pods for the whole group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_member: Option<u32>,

    /// Scheduling queue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue: Option<String>,

    /// The subgroup declaration.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_groups: Vec<SubGroup>,
}

impl PodGroup {
    /// Validates the subgroup declaration of this PodGroup.
    ///
    /// # Errors
    ///
    /// Returns the first [`HierarchyError`] in the declaration.
    pub fn validate(&self) -> Result<(), HierarchyError> {
        validate(&self.spec.sub_groups)
    }

    /// Returns `namespace/name`, `name`, or `<unnamed>`.
    #[must_use]
    pub fn display_name(&self) -> String {
        match (&self.metadata.namespace, &self.metadata.name) {
            (Some(namespace), Some(name)) => format!("{namespace}/{name}"),
            (None, Some(name)) => name.clone(),
            (_, None) => "<unnamed>".to_string(),
        }
    }
}
