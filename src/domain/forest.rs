//! Read-only view of an accepted subgroup declaration.
//!
//! The [`Forest`] is only ever built from a declaration that has passed
//! [`validate`](crate::domain::validate), so every parent resolves and there
//! are no cycles.

use petgraph::{graphmap::DiGraphMap, Direction};

use crate::domain::{
    hierarchy::{self, HierarchyError},
    SubGroup, SubGroupName,
};

/// The parent/child structure of an accepted declaration.
#[derive(Debug)]
pub struct Forest {
    /// Subgroup names, by declaration position.
    names: Vec<SubGroupName>,

    /// Minimum member counts, by declaration position.
    min_members: Vec<u32>,

    /// Edges point from parent to child. Nodes are declaration positions.
    graph: DiGraphMap<usize, ()>,
}

impl Forest {
    /// Validates a declaration and builds its forest.
    ///
    /// # Errors
    ///
    /// Returns the first [`HierarchyError`] found by validation.
    pub fn build(subgroups: &[SubGroup]) -> Result<Self, HierarchyError> {
        let table = hierarchy::resolve(subgroups)?;

        let mut graph = DiGraphMap::with_capacity(table.len(), table.len());
        let mut names = Vec::with_capacity(table.len());
        for position in 0..table.len() {
            graph.add_node(position);
            names.push(SubGroupName::new(table.name(position).to_string()).map_err(
                |source| HierarchyError::InvalidName {
                    name: table.name(position).to_string(),
                    source,
                },
            )?);
        }
        for position in 0..table.len() {
            if let Some(parent) = table.parent(position) {
                graph.add_edge(parent, position, ());
            }
        }

        Ok(Self {
            names,
            min_members: subgroups.iter().map(|subgroup| subgroup.min_member).collect(),
            graph,
        })
    }

    /// Returns the number of subgroups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if the declaration has no subgroups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns `true` if a subgroup with the given name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Returns the subgroups without a parent, in declaration order.
    pub fn roots(&self) -> impl Iterator<Item = &SubGroupName> + '_ {
        (0..self.len())
            .filter(|&position| self.parent_position(position).is_none())
            .map(|position| &self.names[position])
    }

    /// Returns the direct children of a subgroup, in declaration order.
    ///
    /// Unknown names have no children.
    #[must_use]
    pub fn children(&self, name: &str) -> Vec<&SubGroupName> {
        self.position(name)
            .map(|position| {
                let mut children: Vec<_> = self
                    .graph
                    .neighbors_directed(position, Direction::Outgoing)
                    .collect();
                children.sort_unstable();
                children
                    .into_iter()
                    .map(|child| &self.names[child])
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns the parent of a subgroup, if it has one.
    #[must_use]
    pub fn parent(&self, name: &str) -> Option<&SubGroupName> {
        let position = self.position(name)?;
        self.parent_position(position)
            .map(|parent| &self.names[parent])
    }

    /// Returns the number of ancestors of a subgroup. Roots have depth zero.
    #[must_use]
    pub fn depth(&self, name: &str) -> Option<usize> {
        let mut position = self.position(name)?;
        let mut depth = 0;
        while let Some(parent) = self.parent_position(position) {
            depth += 1;
            position = parent;
        }
        Some(depth)
    }

    /// Returns the minimum member count of a subgroup.
    #[must_use]
    pub fn min_member(&self, name: &str) -> Option<u32> {
        self.position(name).map(|position| self.min_members[position])
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|candidate| candidate.as_str() == name)
    }

    fn parent_position(&self, position: usize) -> Option<usize> {
        self.graph
            .neighbors_directed(position, Direction::Incoming)
            .next()
    }
}
