//! Line-oriented vocabulary file loading.
//!
//! Each controlled list lives in a UTF-8 text file, one canonical value per
//! line. A missing or unreadable file degrades to an empty list with a
//! warning; downstream matching handles empty lists without error.

use crate::config::FileVocabConfig;
use quadbot_domain::{ControlledList, DomainError, ListId, VocabularyStore};
use std::path::Path;
use tracing::{info, warn};

fn read_list(path: &Path, id: ListId) -> Result<ControlledList, DomainError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| DomainError::VocabularyLoad(id.to_string(), e.to_string()))?;
    Ok(ControlledList::from_lines(contents.lines()))
}

/// Load one controlled list from a text file.
pub fn load_list(path: impl AsRef<Path>, id: ListId) -> ControlledList {
    let path = path.as_ref();
    match read_list(path, id) {
        Ok(list) => {
            info!(list = %id, path = %path.display(), entries = list.len(), "loaded vocabulary");
            list
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "list will be empty");
            ControlledList::empty()
        }
    }
}

/// Load all three controlled lists into an immutable store.
pub fn load_vocabulary(config: &FileVocabConfig) -> VocabularyStore {
    VocabularyStore::new(
        load_list(&config.subjects_path, ListId::Subjects),
        load_list(&config.groups_path, ListId::Groups),
        load_list(&config.categories_path, ListId::Categories),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_list_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "COMPSCI - Computer Science\n\nAIPI - AI for Product Innovation").unwrap();

        let list = load_list(file.path(), ListId::Subjects);
        assert_eq!(list.len(), 2);
        assert!(list.contains("COMPSCI - Computer Science"));
    }

    #[test]
    fn test_missing_file_degrades_to_empty() {
        let list = load_list("/nonexistent/subjects.txt", ListId::Subjects);
        assert!(list.is_empty());
    }

    #[test]
    fn test_load_vocabulary_partial_failure() {
        let mut groups = tempfile::NamedTempFile::new().unwrap();
        writeln!(groups, "+DataScience (+DS)").unwrap();

        let config = FileVocabConfig {
            subjects_path: "/nonexistent/subjects.txt".to_string(),
            groups_path: groups.path().to_string_lossy().into_owned(),
            categories_path: "/nonexistent/categories.txt".to_string(),
        };
        let store = load_vocabulary(&config);
        assert!(store.subjects().is_empty());
        assert_eq!(store.groups().len(), 1);
        assert!(store.categories().is_empty());
    }
}
