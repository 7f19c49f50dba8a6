use std::{fmt, ops::Deref, str::FromStr, sync::LazyLock};

use non_empty_string::NonEmptyString;
use regex::Regex;

/// The maximum length of a subgroup name, in characters.
///
/// Matches the label-length limit used elsewhere in Kubernetes.
pub const MAX_NAME_LENGTH: usize = 63;

const GRAMMAR: &str = "must consist of lowercase alphanumeric characters or '-', must start and end with an alphanumeric character";

static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").expect("subgroup name pattern is valid")
});

/// Reasons a string is not a legal subgroup name.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum NameError {
    /// The name is the empty string.
    #[error("name cannot be empty")]
    Empty,

    /// The name is longer than [`MAX_NAME_LENGTH`] characters.
    #[error("name must be no more than {max} characters", max = MAX_NAME_LENGTH)]
    TooLong {
        /// Length of the rejected name, in characters.
        length: usize,
    },

    /// The name would be legal if it were lower-cased.
    #[error("{grammar} (use \"{lowercase}\" instead)", grammar = GRAMMAR)]
    Uppercase {
        /// The lower-cased form of the rejected name.
        lowercase: String,
    },

    /// The name contains characters outside the grammar, or starts or ends
    /// with a hyphen.
    #[error("{grammar}", grammar = GRAMMAR)]
    InvalidCharacters,
}

/// Checks a candidate subgroup name against the name grammar.
///
/// Rules are applied in order and the first failing rule is reported:
///
/// 1. the name must be non-empty
/// 2. the name must be at most [`MAX_NAME_LENGTH`] characters
/// 3. the name must match `[a-z0-9]([-a-z0-9]*[a-z0-9])?`
///
/// When rule 3 fails only because of upper-case characters, the error carries
/// the lower-cased name so the caller can fix it directly.
///
/// # Errors
///
/// Returns a [`NameError`] describing the first rule the name violates.
///
/// # Examples
///
/// ```
/// use subgroups::domain::name::{check_name, NameError};
///
/// assert!(check_name("decode-workers").is_ok());
/// assert_eq!(
///     check_name("Workers"),
///     Err(NameError::Uppercase {
///         lowercase: "workers".to_string()
///     })
/// );
/// assert_eq!(check_name("decode_workers"), Err(NameError::InvalidCharacters));
/// ```
pub fn check_name(name: &str) -> Result<(), NameError> {
    if name.is_empty() {
        return Err(NameError::Empty);
    }

    let length = name.chars().count();
    if length > MAX_NAME_LENGTH {
        return Err(NameError::TooLong { length });
    }

    if NAME_PATTERN.is_match(name) {
        return Ok(());
    }

    let lowercase = name.to_lowercase();
    if lowercase != name && NAME_PATTERN.is_match(&lowercase) {
        Err(NameError::Uppercase { lowercase })
    } else {
        Err(NameError::InvalidCharacters)
    }
}

/// A subgroup name that satisfies [`check_name`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SubGroupName(NonEmptyString);

impl SubGroupName {
    /// Creates a new `SubGroupName` from a string.
    ///
    /// # Errors
    ///
    /// Returns a [`NameError`] if the string is not a legal subgroup name.
    pub fn new(name: String) -> Result<Self, NameError> {
        check_name(&name)?;
        NonEmptyString::new(name)
            .map(Self)
            .map_err(|_| NameError::Empty)
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for SubGroupName {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for SubGroupName {
    type Error = NameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

impl FromStr for SubGroupName {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl AsRef<str> for SubGroupName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl Deref for SubGroupName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0.as_str()
    }
}

impl fmt::Display for SubGroupName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("workers"; "lowercase")]
    #[test_case("decode-workers"; "with hyphen")]
    #[test_case("worker1"; "with numbers")]
    #[test_case("a"; "single char")]
    #[test_case("1"; "number only")]
    #[test_case("1worker"; "starts with number")]
    #[test_case("decode-workers-v2"; "complex")]
    #[test_case("a--b"; "consecutive hyphens")]
    fn accepts_valid_names(name: &str) {
        assert_eq!(check_name(name), Ok(()));
    }

    #[test]
    fn accepts_name_at_max_length() {
        let name = "a".repeat(MAX_NAME_LENGTH);
        assert_eq!(check_name(&name), Ok(()));
    }

    #[test]
    fn rejects_empty_name() {
        let error = check_name("").unwrap_err();
        assert_eq!(error, NameError::Empty);
        assert_eq!(error.to_string(), "name cannot be empty");
    }

    #[test]
    fn rejects_name_over_max_length() {
        let name = "a".repeat(MAX_NAME_LENGTH + 1);
        let error = check_name(&name).unwrap_err();
        assert_eq!(error, NameError::TooLong { length: 64 });
        assert_eq!(error.to_string(), "name must be no more than 63 characters");
    }

    #[test]
    fn length_is_checked_before_grammar() {
        let name = "A".repeat(MAX_NAME_LENGTH + 1);
        assert!(matches!(check_name(&name), Err(NameError::TooLong { .. })));
    }

    #[test_case("Workers", "workers"; "leading capital")]
    #[test_case("decodeWorkers", "decodeworkers"; "mixed case")]
    #[test_case("WORKERS-1", "workers-1"; "all caps")]
    fn reports_case_violation_with_lowercase_form(name: &str, lowercase: &str) {
        let error = check_name(name).unwrap_err();
        assert_eq!(
            error,
            NameError::Uppercase {
                lowercase: lowercase.to_string()
            }
        );
        let message = error.to_string();
        assert!(message.contains("must consist of lowercase alphanumeric characters"));
        assert!(message.contains(&format!("\"{lowercase}\"")));
    }

    #[test_case("decode_workers"; "underscore")]
    #[test_case("Decode_Workers"; "uppercase and underscore")]
    #[test_case("-workers"; "starts with hyphen")]
    #[test_case("workers-"; "ends with hyphen")]
    #[test_case("-Workers"; "uppercase and leading hyphen")]
    #[test_case("decode.workers"; "dot")]
    #[test_case("decode workers"; "space")]
    #[test_case("wörkers"; "non ascii")]
    #[test_case("-"; "lone hyphen")]
    fn rejects_invalid_characters(name: &str) {
        let error = check_name(name).unwrap_err();
        assert_eq!(error, NameError::InvalidCharacters);
        assert_eq!(error.to_string(), GRAMMAR);
    }


    #[test]
    fn subgroup_name_round_trips_through_display() {
        let name: SubGroupName = "leaders".parse().unwrap();
        assert_eq!(name.as_str(), "leaders");
        assert_eq!(name.to_string(), "leaders");
        assert_eq!(&*name, "leaders");
    }

    #[test]
    fn subgroup_name_rejects_invalid_input() {
        assert_eq!(
            SubGroupName::try_from("Leaders"),
            Err(NameError::Uppercase {
                lowercase: "leaders".to_string()
            })
        );
        assert_eq!(SubGroupName::try_from(String::new()), Err(NameError::Empty));
    }

    mod properties {
        use proptest::prelude::*;

        use super::*;

        fn reference_accepts(name: &str) -> bool {
            let pattern = Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").unwrap();
            pattern.is_match(name) && name.chars().count() <= MAX_NAME_LENGTH
        }

        proptest! {
            #[test]
            fn grammar_names_up_to_max_length_are_accepted(
                name in "[a-z0-9]([-a-z0-9]{0,61}[a-z0-9])?"
            ) {
                prop_assert_eq!(check_name(&name), Ok(()));
            }

            #[test]
            fn acceptance_matches_reference_grammar(name in "\\PC{0,70}") {
                prop_assert_eq!(check_name(&name).is_ok(), reference_accepts(&name));
            }

            #[test]
            fn acceptance_matches_reference_grammar_near_alphabet(
                name in "[-a-zA-Z0-9_]{0,70}"
            ) {
                prop_assert_eq!(check_name(&name).is_ok(), reference_accepts(&name));
            }

            #[test]
            fn accepted_names_are_already_lowercase(name in "\\PC{0,70}") {
                if check_name(&name).is_ok() {
                    prop_assert_eq!(name.to_lowercase(), name);
                }
            }

            #[test]
            fn ascii_case_only_failures_report_the_lowercase_form(
                name in "[a-z][-a-z0-9]{0,61}[a-z0-9]"
            ) {
                let upper = name.to_ascii_uppercase();
                prop_assert_eq!(
                    check_name(&upper),
                    Err(NameError::Uppercase { lowercase: name })
                );
            }
        }
    }
}
