//! File discovery under a validation root.

use std::path::Path;

use csvcheck_model::CandidateFile;
use walkdir::WalkDir;

use crate::error::{IngestError, Result};

/// Extensions treated as CSV when no suffix set is configured.
pub const DEFAULT_CSV_SUFFIXES: &[&str] = &["csv", "CSV"];

/// Recursively lists regular files under `root`.
///
/// With `suffixes`, only files whose extension equals one of them
/// (case-sensitive) are kept; without, every regular file is returned.
/// Symlinks are not followed. Results are sorted by path.
pub fn discover_files(root: &Path, suffixes: Option<&[String]>) -> Result<Vec<CandidateFile>> {
    if !root.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: root.to_path_buf(),
        });
    }

    let mut files = Vec::new();

    for entry_result in WalkDir::new(root).follow_links(false) {
        let entry = entry_result.map_err(|e| IngestError::DirectoryWalk {
            path: e
                .path()
                .map_or_else(|| root.to_path_buf(), Path::to_path_buf),
            source: e,
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if let Some(suffixes) = suffixes
            && !has_suffix(path, suffixes)
        {
            continue;
        }

        tracing::debug!(path = %path.display(), "Found file");
        files.push(CandidateFile::new(entry.into_path()));
    }

    files.sort();
    files.dedup();

    Ok(files)
}

/// Lists files under `root` whose extension is one of `suffixes`.
pub fn list_csv_files(root: &Path, suffixes: &[String]) -> Result<Vec<CandidateFile>> {
    discover_files(root, Some(suffixes))
}

/// Lists every regular file under `root`.
pub fn list_all_files(root: &Path) -> Result<Vec<CandidateFile>> {
    discover_files(root, None)
}

/// Default suffix set as owned strings.
pub fn default_suffixes() -> Vec<String> {
    DEFAULT_CSV_SUFFIXES.iter().map(ToString::to_string).collect()
}

fn has_suffix(path: &Path, suffixes: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| suffixes.iter().any(|suffix| suffix == ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("nested/deeper")).unwrap();

        for name in &[
            "a.csv",
            "DATA.CSV",
            "notes.txt",
            "mixed.Csv",
            "nested/b.csv",
            "nested/deeper/c.csv",
            "nested/deeper/README",
        ] {
            std::fs::write(dir.path().join(name), "h1,h2\n1,2\n").unwrap();
        }

        dir
    }

    fn names(files: &[CandidateFile]) -> Vec<&str> {
        files.iter().map(CandidateFile::file_name).collect()
    }

    #[test]
    fn test_list_csv_files_recursive_case_sensitive() {
        let dir = create_test_dir();
        let files = list_csv_files(dir.path(), &default_suffixes()).unwrap();

        let mut found = names(&files);
        found.sort_unstable();
        assert_eq!(found, vec!["DATA.CSV", "a.csv", "b.csv", "c.csv"]);
    }

    #[test]
    fn test_list_csv_files_custom_suffix() {
        let dir = create_test_dir();
        let files = list_csv_files(dir.path(), &["Csv".to_string()]).unwrap();
        assert_eq!(names(&files), vec!["mixed.Csv"]);
    }

    #[test]
    fn test_list_all_files() {
        let dir = create_test_dir();
        let files = list_all_files(dir.path()).unwrap();
        assert_eq!(files.len(), 7);
        // Sorted and duplicate-free
        let mut sorted = files.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(files, sorted);
    }

    #[test]
    fn test_empty_dir() {
        let dir = TempDir::new().unwrap();
        assert!(list_all_files(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_root() {
        let dir = TempDir::new().unwrap();
        let result = list_all_files(&dir.path().join("missing"));
        assert!(matches!(
            result,
            Err(IngestError::DirectoryNotFound { .. })
        ));
    }

    #[test]
    fn test_root_is_a_file() {
        let dir = TempDir::new().unwrap();
        let file_path = dir.path().join("test.csv");
        std::fs::write(&file_path, "data").unwrap();

        let result = list_csv_files(&file_path, &default_suffixes());
        assert!(result.is_err());
    }
}
