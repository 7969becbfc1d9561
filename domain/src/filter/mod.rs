//! Filter selections applied to the calendar gateway.
//!
//! A [`FilterSelection`] is the resolved pair of group/category values for
//! one event query. Absence of a confident match always resolves to the
//! [`Selection::All`] sentinel rather than an empty set, so the downstream
//! request stays well-formed.

use serde::{Deserialize, Serialize};

/// How a set of filter values is applied against a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FilterMethod {
    /// Event may match ANY of the values (OR)
    #[default]
    AnyMatch,
    /// Event must match ALL of the values (AND)
    AllMatch,
}

/// Either the `All` sentinel or a specific set of canonical values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// No filtering on this dimension
    All,
    /// Filter to these canonical values (never empty)
    Values(Vec<String>),
}

impl Selection {
    /// Build a selection from resolved values. An empty vector, or one that
    /// contains the literal "All", collapses to the sentinel.
    pub fn from_values(values: Vec<String>) -> Self {
        if values.is_empty() || values.iter().any(|v| v.eq_ignore_ascii_case("all")) {
            Selection::All
        } else {
            Selection::Values(values)
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    /// Concrete values, empty for `All`.
    pub fn values(&self) -> &[String] {
        match self {
            Selection::All => &[],
            Selection::Values(v) => v,
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Selection::All
    }
}

/// The resolved group and category filters for one event lookup.
///
/// Invariant: neither side is ever an empty set — a missing or failed
/// mapping resolves to `All` on that side.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSelection {
    pub groups: Selection,
    pub categories: Selection,
}

impl FilterSelection {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new(groups: Selection, categories: Selection) -> Self {
        Self { groups, categories }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values_collapse_to_all() {
        assert!(Selection::from_values(Vec::new()).is_all());
    }

    #[test]
    fn test_all_literal_collapses_to_sentinel() {
        let sel = Selection::from_values(vec!["All".to_string(), "+DataScience (+DS)".to_string()]);
        assert!(sel.is_all());
    }

    #[test]
    fn test_concrete_values_kept() {
        let sel = Selection::from_values(vec!["Artificial Intelligence".to_string()]);
        assert_eq!(sel.values(), &["Artificial Intelligence".to_string()]);
        assert!(!sel.is_all());
    }

    #[test]
    fn test_default_selection_is_all_on_both_sides() {
        let f = FilterSelection::all();
        assert!(f.groups.is_all());
        assert!(f.categories.is_all());
    }

    #[test]
    fn test_filter_method_default_is_or() {
        assert_eq!(FilterMethod::default(), FilterMethod::AnyMatch);
    }
}
