//! Loads extra notice types from a YAML catalog file.
//!
//! ```yaml
//! noticeTypes:
//!   - label: Science Exhibition
//!     guidance: Invite students to present projects and parents to visit the stalls.
//! ```

use crate::catalog::NoticeTypeCatalog;
use notice_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogFile {
    #[serde(default)]
    notice_types: Vec<CatalogEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogEntry {
    label: String,
    guidance: String,
}

/// Built-in catalog, extended by `path` when given.
///
/// Entries in the file replace built-in entries with the same label.
pub fn load_catalog(path: Option<&Path>) -> AppResult<NoticeTypeCatalog> {
    let catalog = NoticeTypeCatalog::builtin();

    let Some(path) = path else {
        return Ok(catalog);
    };

    tracing::debug!("Loading notice catalog from: {:?}", path);

    let contents = std::fs::read_to_string(path).map_err(|e| {
        AppError::Prompt(format!("Failed to read catalog file {:?}: {}", path, e))
    })?;

    let file: CatalogFile = serde_yaml::from_str(&contents).map_err(|e| {
        AppError::Prompt(format!("Failed to parse catalog YAML {:?}: {}", path, e))
    })?;

    validate_entries(&file.notice_types)?;

    let added = file.notice_types.len();
    let catalog = catalog.with_entries(
        file.notice_types
            .into_iter()
            .map(|entry| (entry.label, entry.guidance)),
    );

    tracing::info!(
        "Loaded {} notice types from {:?} ({} total)",
        added,
        path,
        catalog.len()
    );

    Ok(catalog)
}

fn validate_entries(entries: &[CatalogEntry]) -> AppResult<()> {
    let mut seen = HashSet::new();

    for entry in entries {
        let label = entry.label.trim();

        if label.is_empty() {
            return Err(AppError::Prompt(
                "Catalog label cannot be empty".to_string(),
            ));
        }

        if entry.guidance.trim().is_empty() {
            return Err(AppError::Prompt(format!(
                "Catalog guidance for '{}' cannot be empty",
                label
            )));
        }

        if !seen.insert(label) {
            return Err(AppError::Prompt(format!(
                "Duplicate catalog label: {}",
                label
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_catalog(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("catalog.yaml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_no_file_gives_builtin() {
        let catalog = load_catalog(None).unwrap();
        assert_eq!(catalog, NoticeTypeCatalog::builtin());
    }

    #[test]
    fn test_file_extends_builtin() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_catalog(
            temp_dir.path(),
            r#"
noticeTypes:
  - label: Science Exhibition
    guidance: Invite students to present projects.
  - label: Holiday Notice
    guidance: Mention the festival by name.
"#,
        );

        let catalog = load_catalog(Some(&path)).unwrap();
        assert_eq!(
            catalog.guidance("Science Exhibition"),
            Some("Invite students to present projects.")
        );
        assert_eq!(
            catalog.guidance("Holiday Notice"),
            Some("Mention the festival by name.")
        );
        assert!(catalog.guidance("Sports Day").is_some());
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = load_catalog(Some(&temp_dir.path().join("absent.yaml")));
        assert!(matches!(result, Err(AppError::Prompt(_))));
    }

    #[test]
    fn test_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_catalog(temp_dir.path(), "noticeTypes: [label: :");
        assert!(load_catalog(Some(&path)).is_err());
    }

    #[test]
    fn test_rejects_blank_and_duplicate_labels() {
        let temp_dir = TempDir::new().unwrap();

        let blank = write_catalog(
            temp_dir.path(),
            "noticeTypes:\n  - label: \"  \"\n    guidance: Something.\n",
        );
        assert!(load_catalog(Some(&blank)).is_err());

        let duplicate = write_catalog(
            temp_dir.path(),
            "noticeTypes:\n  - label: Quiz\n    guidance: A.\n  - label: Quiz\n    guidance: B.\n",
        );
        assert!(load_catalog(Some(&duplicate)).is_err());
    }
}
