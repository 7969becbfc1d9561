//! Format resolver.
//!
//! Maps a partial or ambiguous user term to the exact canonical spelling a
//! campus API expects. The planner is instructed to call these resolvers
//! before passing any subject, group, or category downstream.
//!
//! An empty result means "ask the user to clarify"; it is never an error.

use crate::vocab::entities::ControlledList;

/// Strip separator characters for lenient code comparison, so "ai-pi" and
/// "a i p i" both match the code `AIPI`.
fn squash(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

/// First letter of each word, for matching abbreviations like "cs" against
/// "Computer Science".
fn initials(s: &str) -> String {
    s.split(|c: char| !c.is_alphanumeric())
        .filter_map(|word| word.chars().next())
        .collect::<String>()
        .to_lowercase()
}

/// Resolve a query against a subject list with entries formatted
/// `"CODE - Description"`.
///
/// Matches fall into three tiers, all case-insensitive:
/// 1. exact: the whole canonical entry, the CODE with separators stripped,
///    or the initials of the Description ("cs" finds COMPSCI);
/// 2. `query` as a substring of the CODE segment (separator-stripped on
///    both sides) or of the whole entry;
/// 3. `query` as a substring of the Description segment.
///
/// Tiers are concatenated in list order and truncated to `limit`. Entries
/// without a `" - "` separator are skipped.
pub fn resolve_subject(query: &str, subjects: &ControlledList, limit: usize) -> Vec<String> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    let squashed_needle = squash(query);

    let mut exact_matches = Vec::new();
    let mut code_matches = Vec::new();
    let mut name_matches = Vec::new();

    for entry in subjects.iter() {
        let Some((code, description)) = entry.split_once(" - ") else {
            continue;
        };
        let entry_lc = entry.to_lowercase();
        let code_lc = code.trim().to_lowercase();

        if entry_lc == needle
            || squash(code) == squashed_needle
            || initials(description) == squashed_needle
        {
            exact_matches.push(entry.to_string());
        } else if code_lc.contains(&needle)
            || (!squashed_needle.is_empty() && squash(code).contains(&squashed_needle))
            || entry_lc.contains(&needle)
        {
            code_matches.push(entry.to_string());
        } else if description.trim().to_lowercase().contains(&needle) {
            name_matches.push(entry.to_string());
        }
    }

    exact_matches.extend(code_matches);
    exact_matches.extend(name_matches);
    exact_matches.truncate(limit);
    exact_matches
}

/// Resolve a query by case-insensitive substring against plain canonical
/// entries (groups and categories), truncated to `limit`.
pub fn resolve_plain(query: &str, list: &ControlledList, limit: usize) -> Vec<String> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    list.iter()
        .filter(|entry| entry.to_lowercase().contains(&needle))
        .map(|entry| entry.to_string())
        .take(limit)
        .collect()
}
