//! Structural validation of subgroup declarations.
//!
//! Validation runs in two stages over a single declaration:
//!
//! 1. a scan in declaration order that checks every name, rejects duplicates
//!    and resolves every parent reference to the index of its record
//! 2. a walk over the resolved parent links that rejects cycles
//!
//! The first violation found is returned and nothing after it is checked.

use std::fmt;

use serde::Serialize;
use tracing::instrument;

use crate::domain::{name::NameError, SubGroup};

mod cycle;
mod scan;

pub(crate) use scan::Table;

/// Errors that can occur when validating a subgroup declaration.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum HierarchyError {
    /// A subgroup name is not a legal name.
    #[error("invalid subgroup name \"{name}\": {source}")]
    InvalidName {
        /// The rejected name.
        name: String,
        /// Why the name was rejected.
        source: NameError,
    },

    /// Two subgroups share a name.
    #[error("duplicate subgroup name {0}")]
    DuplicateName(String),

    /// A parent reference is not a legal name.
    #[error("invalid parent name \"{parent}\" for subgroup \"{child}\": {source}")]
    InvalidParent {
        /// The rejected parent reference.
        parent: String,
        /// Name of the subgroup holding the reference.
        child: String,
        /// Why the parent reference was rejected.
        source: NameError,
    },

    /// A parent reference does not name any subgroup in the declaration.
    #[error("parent {parent} of {child} was not found")]
    ParentNotFound {
        /// The unresolved parent reference.
        parent: String,
        /// Name of the subgroup holding the reference.
        child: String,
    },

    /// The parent links contain a cycle.
    #[error("cycle detected in subgroups")]
    Cycle,
}

impl HierarchyError {
    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidName { source, .. } => ErrorKind::of_name_error(source),
            Self::DuplicateName(_) => ErrorKind::DuplicateName,
            Self::InvalidParent { .. } => ErrorKind::InvalidParentFormat,
            Self::ParentNotFound { .. } => ErrorKind::ParentNotFound,
            Self::Cycle => ErrorKind::CycleDetected,
        }
    }
}

/// The kinds of violation a declaration can be rejected for.
///
/// Every kind is terminal: the declaration must be fixed and resubmitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// A name is empty.
    EmptyName,
    /// A name is longer than 63 characters.
    NameTooLong,
    /// A name is only invalid because it contains upper-case letters.
    CaseViolation,
    /// A name contains characters outside the grammar.
    InvalidCharacters,
    /// Two subgroups share a name.
    DuplicateName,
    /// A parent reference does not resolve.
    ParentNotFound,
    /// A parent reference is not a legal name.
    InvalidParentFormat,
    /// The parent links contain a cycle.
    CycleDetected,
}

impl ErrorKind {
    const fn of_name_error(error: &NameError) -> Self {
        match error {
            NameError::Empty => Self::EmptyName,
            NameError::TooLong { .. } => Self::NameTooLong,
            NameError::Uppercase { .. } => Self::CaseViolation,
            NameError::InvalidCharacters => Self::InvalidCharacters,
        }
    }

    /// Returns the name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmptyName => "EmptyName",
            Self::NameTooLong => "NameTooLong",
            Self::CaseViolation => "CaseViolation",
            Self::InvalidCharacters => "InvalidCharacters",
            Self::DuplicateName => "DuplicateName",
            Self::ParentNotFound => "ParentNotFound",
            Self::InvalidParentFormat => "InvalidParentFormat",
            Self::CycleDetected => "CycleDetected",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validates a subgroup declaration.
///
/// A declaration is accepted when every name is legal and unique, every
/// parent reference names another subgroup in the declaration, and the parent
/// links form a forest. An empty declaration is accepted.
///
/// # Errors
///
/// Returns the first [`HierarchyError`] found. Names and duplicates are
/// checked in declaration order, then parent references, then cycles.
///
/// # Examples
///
/// ```
/// use subgroups::{validate, HierarchyError, SubGroup};
///
/// let subgroups = [
///     SubGroup::new("workers", 4),
///     SubGroup::new("leaders", 1).with_parent("workers"),
/// ];
/// assert!(validate(&subgroups).is_ok());
///
/// let subgroups = [SubGroup::new("a", 1).with_parent("a")];
/// assert_eq!(validate(&subgroups), Err(HierarchyError::Cycle));
/// ```
pub fn validate(subgroups: &[SubGroup]) -> Result<(), HierarchyError> {
    resolve(subgroups).map(|_| ())
}

/// Validates a declaration and returns its resolved parent links.
#[instrument(level = "debug", skip_all, fields(subgroups = subgroups.len()))]
pub(crate) fn resolve(subgroups: &[SubGroup]) -> Result<Table<'_>, HierarchyError> {
    let result = scan::scan(subgroups).and_then(|table| {
        cycle::ensure_acyclic(&table)?;
        Ok(table)
    });

    if let Err(error) = &result {
        tracing::debug!(kind = %error.kind(), "rejected subgroup declaration: {error}");
    }

    result
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn root(name: &str) -> SubGroup {
        SubGroup::new(name, 1)
    }

    fn child(name: &str, parent: &str) -> SubGroup {
        SubGroup::new(name, 1).with_parent(parent)
    }

    #[test]
    fn accepts_single_chain() {
        let subgroups = [root("a"), child("b", "a"), child("c", "b")];
        assert_eq!(validate(&subgroups), Ok(()));
    }

    #[test]
    fn accepts_multiple_roots() {
        let subgroups = [root("a"), root("b"), child("c", "a"), child("d", "b")];
        assert_eq!(validate(&subgroups), Ok(()));
    }

    #[test]
    fn accepts_lowercase_with_hyphens() {
        let subgroups = [
            SubGroup::new("decode-workers", 4),
            SubGroup::new("prefill-workers", 2).with_parent("decode-workers"),
        ];
        assert_eq!(validate(&subgroups), Ok(()));
    }

    #[test]
    fn accepts_children_declared_before_parents() {
        let subgroups = [child("c", "b"), child("b", "a"), root("a")];
        assert_eq!(validate(&subgroups), Ok(()));
    }

    #[test]
    fn accepts_empty_declaration() {
        assert_eq!(validate(&[]), Ok(()));
    }

    #[test]
    fn rejects_missing_parent() {
        let subgroups = [root("a"), child("b", "x")];
        let error = validate(&subgroups).unwrap_err();

        assert_eq!(
            error,
            HierarchyError::ParentNotFound {
                parent: "x".to_string(),
                child: "b".to_string(),
            }
        );
        assert_eq!(error.to_string(), "parent x of b was not found");
        assert_eq!(error.kind(), ErrorKind::ParentNotFound);
    }

    #[test]
    fn rejects_duplicate_name() {
        let subgroups = [root("a"), root("a")];
        let error = validate(&subgroups).unwrap_err();

        assert_eq!(error, HierarchyError::DuplicateName("a".to_string()));
        assert_eq!(error.to_string(), "duplicate subgroup name a");
    }

    #[test]
    fn duplicate_is_reported_before_cycle() {
        let subgroups = [root("a"), child("b", "a"), child("c", "b"), child("a", "c")];
        assert_eq!(
            validate(&subgroups),
            Err(HierarchyError::DuplicateName("a".to_string()))
        );
    }

    #[test]
    fn duplicate_is_reported_regardless_of_order() {
        let forward = [child("a", "b"), root("b"), child("a", "b")];
        let backward = [child("a", "b"), child("a", "b"), root("b")];

        for subgroups in [&forward[..], &backward[..]] {
            let error = validate(subgroups).unwrap_err();
            assert_eq!(error.kind(), ErrorKind::DuplicateName);
        }
    }

    #[test]
    fn duplicate_is_reported_before_missing_parent() {
        let subgroups = [child("a", "missing"), root("a")];
        assert_eq!(
            validate(&subgroups),
            Err(HierarchyError::DuplicateName("a".to_string()))
        );
    }

    #[test]
    fn self_parent_is_a_cycle() {
        let subgroups = [child("a", "a")];
        let error = validate(&subgroups).unwrap_err();

        assert_eq!(error, HierarchyError::Cycle);
        assert_eq!(error.to_string(), "cycle detected in subgroups");
        assert_eq!(error.kind(), ErrorKind::CycleDetected);
    }

    #[test]
    fn rejects_three_node_cycle() {
        let subgroups = [child("a", "c"), child("b", "a"), child("c", "b")];
        assert_eq!(validate(&subgroups), Err(HierarchyError::Cycle));
    }

    #[test]
    fn rejects_multiple_disjoint_cycles() {
        let subgroups = [
            child("a", "b"),
            child("b", "a"),
            child("c", "d"),
            child("d", "c"),
        ];
        assert_eq!(validate(&subgroups), Err(HierarchyError::Cycle));
    }

    #[test]
    fn rejects_cycle_beside_valid_tree() {
        let subgroups = [root("a"), child("b", "a"), child("c", "d"), child("d", "c")];
        assert_eq!(validate(&subgroups), Err(HierarchyError::Cycle));
    }

    #[test_case(
        "Workers",
        "invalid subgroup name \"Workers\": must consist of lowercase alphanumeric characters or '-', must start and end with an alphanumeric character (use \"workers\" instead)",
        ErrorKind::CaseViolation;
        "uppercase"
    )]
    #[test_case(
        "decodeWorkers",
        "invalid subgroup name \"decodeWorkers\": must consist of lowercase alphanumeric characters or '-', must start and end with an alphanumeric character (use \"decodeworkers\" instead)",
        ErrorKind::CaseViolation;
        "mixed case"
    )]
    #[test_case(
        "decode_workers",
        "invalid subgroup name \"decode_workers\": must consist of lowercase alphanumeric characters or '-', must start and end with an alphanumeric character",
        ErrorKind::InvalidCharacters;
        "underscore"
    )]
    #[test_case(
        "-workers",
        "invalid subgroup name \"-workers\": must consist of lowercase alphanumeric characters or '-', must start and end with an alphanumeric character",
        ErrorKind::InvalidCharacters;
        "leading hyphen"
    )]
    #[test_case(
        "workers-",
        "invalid subgroup name \"workers-\": must consist of lowercase alphanumeric characters or '-', must start and end with an alphanumeric character",
        ErrorKind::InvalidCharacters;
        "trailing hyphen"
    )]
    #[test_case(
        "",
        "invalid subgroup name \"\": name cannot be empty",
        ErrorKind::EmptyName;
        "empty"
    )]
    fn rejects_invalid_name(name: &str, message: &str, kind: ErrorKind) {
        let subgroups = [SubGroup::new(name, 4)];
        let error = validate(&subgroups).unwrap_err();

        assert_eq!(error.to_string(), message);
        assert_eq!(error.kind(), kind);
    }

    #[test]
    fn rejects_name_too_long() {
        let subgroups = [root(&"a".repeat(64))];
        let error = validate(&subgroups).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NameTooLong);
        assert!(error.to_string().contains("63 characters"));
    }

    #[test]
    fn invalid_name_stops_the_scan() {
        let subgroups = [root("Bad"), root("dup"), root("dup")];
        assert_eq!(
            validate(&subgroups).unwrap_err().kind(),
            ErrorKind::CaseViolation
        );
    }

    #[test]
    fn rejects_uppercase_parent_reference() {
        let subgroups = [
            root("workers"),
            SubGroup::new("leaders", 1).with_parent("Workers"),
        ];
        let error = validate(&subgroups).unwrap_err();

        assert_eq!(
            error.to_string(),
            "invalid parent name \"Workers\" for subgroup \"leaders\": must consist of lowercase alphanumeric characters or '-', must start and end with an alphanumeric character (use \"workers\" instead)"
        );
        assert_eq!(error.kind(), ErrorKind::InvalidParentFormat);
    }

    #[test]
    fn rejects_empty_parent_reference() {
        let subgroups = [root("a"), child("b", "")];
        let error = validate(&subgroups).unwrap_err();

        assert_eq!(
            error,
            HierarchyError::InvalidParent {
                parent: String::new(),
                child: "b".to_string(),
                source: NameError::Empty,
            }
        );
        assert_eq!(error.kind(), ErrorKind::InvalidParentFormat);
    }

    #[test]
    fn invalid_name_is_reported_before_invalid_parent() {
        let subgroups = [child("a", "Bad"), root("B")];
        assert_eq!(
            validate(&subgroups).unwrap_err().kind(),
            ErrorKind::CaseViolation
        );
    }

    #[test]
    fn missing_parent_is_reported_before_cycle() {
        let subgroups = [child("a", "a"), child("b", "x")];
        assert_eq!(
            validate(&subgroups).unwrap_err().kind(),
            ErrorKind::ParentNotFound
        );
    }

    #[test]
    fn first_missing_parent_in_order_is_reported() {
        let subgroups = [child("a", "x"), child("b", "y")];
        assert_eq!(
            validate(&subgroups),
            Err(HierarchyError::ParentNotFound {
                parent: "x".to_string(),
                child: "a".to_string(),
            })
        );
    }
}
