//! Vocabulary domain entities

use crate::core::string::normalize_key;
use std::collections::HashSet;

/// Identifier for one of the controlled lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListId {
    /// Course subjects, formatted `"CODE - Description"`
    Subjects,
    /// Event organizer/host groups
    Groups,
    /// Event thematic categories
    Categories,
}

impl ListId {
    pub fn as_str(&self) -> &str {
        match self {
            ListId::Subjects => "subjects",
            ListId::Groups => "groups",
            ListId::Categories => "categories",
        }
    }
}

impl std::fmt::Display for ListId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An ordered, immutable list of canonical filter values.
///
/// Entries are deduplicated on a case/whitespace-insensitive key at
/// construction, preserving first-seen order. An empty list is valid and
/// all callers must degrade gracefully when they receive one.
#[derive(Debug, Clone, Default)]
pub struct ControlledList {
    entries: Vec<String>,
}

impl ControlledList {
    /// Build a list from raw lines. Blank lines and duplicates (after
    /// normalization) are dropped; surrounding whitespace is trimmed.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        for line in lines {
            let entry = line.as_ref().trim();
            if entry.is_empty() {
                continue;
            }
            if seen.insert(normalize_key(entry)) {
                entries.push(entry.to_string());
            }
        }
        Self { entries }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Case-insensitive membership check against canonical entries.
    pub fn contains(&self, value: &str) -> bool {
        let key = normalize_key(value);
        self.entries.iter().any(|e| normalize_key(e) == key)
    }
}

/// Immutable holder for all three controlled lists.
///
/// Constructed once at startup and injected into every component that needs
/// vocabulary access. Read-only after construction, so it is safe to share
/// across concurrent conversations behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct VocabularyStore {
    subjects: ControlledList,
    groups: ControlledList,
    categories: ControlledList,
}

impl VocabularyStore {
    pub fn new(
        subjects: ControlledList,
        groups: ControlledList,
        categories: ControlledList,
    ) -> Self {
        Self {
            subjects,
            groups,
            categories,
        }
    }

    pub fn subjects(&self) -> &ControlledList {
        &self.subjects
    }

    pub fn groups(&self) -> &ControlledList {
        &self.groups
    }

    pub fn categories(&self) -> &ControlledList {
        &self.categories
    }

    pub fn get(&self, id: ListId) -> &ControlledList {
        match id {
            ListId::Subjects => &self.subjects,
            ListId::Groups => &self.groups,
            ListId::Categories => &self.categories,
        }
    }
}
