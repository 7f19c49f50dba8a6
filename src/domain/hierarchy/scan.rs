use std::collections::{hash_map::Entry, HashMap};

use super::HierarchyError;
use crate::domain::{name::check_name, SubGroup};

/// A declaration whose names are legal and unique and whose parent
/// references have all been resolved.
///
/// Records are addressed by their position in the declaration.
#[derive(Debug)]
pub(crate) struct Table<'a> {
    /// Subgroup names, by position.
    names: Vec<&'a str>,

    /// Position of each record's parent, or `None` for a root.
    parents: Vec<Option<usize>>,
}

impl<'a> Table<'a> {
    pub(crate) fn len(&self) -> usize {
        self.names.len()
    }

    pub(crate) fn name(&self, position: usize) -> &'a str {
        self.names[position]
    }

    pub(crate) fn parent(&self, position: usize) -> Option<usize> {
        self.parents[position]
    }
}

/// Checks names, uniqueness and parent references in declaration order.
pub(super) fn scan(subgroups: &[SubGroup]) -> Result<Table<'_>, HierarchyError> {
    let mut positions = HashMap::with_capacity(subgroups.len());

    for (position, subgroup) in subgroups.iter().enumerate() {
        check_name(&subgroup.name).map_err(|source| HierarchyError::InvalidName {
            name: subgroup.name.clone(),
            source,
        })?;

        match positions.entry(subgroup.name.as_str()) {
            Entry::Occupied(_) => {
                return Err(HierarchyError::DuplicateName(subgroup.name.clone()));
            }
            Entry::Vacant(slot) => {
                slot.insert(position);
            }
        }
    }

    let parents = subgroups
        .iter()
        .map(|subgroup| resolve_parent(subgroup, &positions))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Table {
        names: subgroups.iter().map(|subgroup| subgroup.name.as_str()).collect(),
        parents,
    })
}

fn resolve_parent(
    subgroup: &SubGroup,
    positions: &HashMap<&str, usize>,
) -> Result<Option<usize>, HierarchyError> {
    let Some(parent) = subgroup.parent() else {
        return Ok(None);
    };

    check_name(parent).map_err(|source| HierarchyError::InvalidParent {
        parent: parent.to_string(),
        child: subgroup.name.clone(),
        source,
    })?;

    positions
        .get(parent)
        .copied()
        .map(Some)
        .ok_or_else(|| HierarchyError::ParentNotFound {
            parent: parent.to_string(),
            child: subgroup.name.clone(),
        })
}
