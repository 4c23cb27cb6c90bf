//! Input path resolution for the scanner.

use log::debug;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::ScanError;

/// Resolve input paths into the ordered list of files to scan.
///
/// * no paths means the current directory
/// * a directory expands to its direct `.rs` children, sorted by name,
///   skipping hidden files and `*_test.rs` / `*_tests.rs`
/// * a file is taken as given, in caller order
/// * anything listed in `exclude` (typically the output file) is dropped
///
/// Duplicates are removed and the first occurrence wins.
pub fn collect_source_files(paths: &[PathBuf], exclude: &[PathBuf]) -> Result<Vec<PathBuf>, ScanError> {
    let current_dir = [PathBuf::from(".")];
    let paths = if paths.is_empty() { &current_dir[..] } else { paths };

    let excluded: HashSet<PathBuf> = exclude.iter().map(|p| identity(p)).collect();
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    let mut push = |file: PathBuf| {
        let key = identity(&file);
        if excluded.contains(&key) {
            debug!("skipping excluded file {}", file.display());
            return;
        }
        if seen.insert(key) {
            files.push(file);
        }
    };

    for path in paths {
        let metadata = fs::metadata(path).map_err(|source| ScanError::io(path, source))?;
        if !metadata.is_dir() {
            push(path.clone());
            continue;
        }

        for entry in WalkDir::new(path).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|err| ScanError::io(path, err.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            if is_source_file(entry.path()) {
                push(entry.into_path());
            } else {
                debug!("skipping {}", entry.path().display());
            }
        }
    }

    Ok(files)
}

fn is_source_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };

    name.ends_with(".rs") && !name.starts_with('.') && !name.ends_with("_test.rs") && !name.ends_with("_tests.rs")
}

/// Canonical form used for duplicate and exclusion checks.
fn identity(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, "").unwrap();
        path
    }

    #[test]
    fn test_is_source_file() {
        assert!(is_source_file(Path::new("src/models.rs")));
        assert!(!is_source_file(Path::new("src/models_test.rs")));
        assert!(!is_source_file(Path::new("src/models_tests.rs")));
        assert!(!is_source_file(Path::new("src/.hidden.rs")));
        assert!(!is_source_file(Path::new("src/notes.md")));
    }

    #[test]
    fn test_directory_and_file_are_deduplicated() {
        let dir = tempfile::tempdir().unwrap();
        let a = touch(dir.path(), "a.rs");
        touch(dir.path(), "b.rs");
        touch(dir.path(), "b_test.rs");
        touch(dir.path(), "readme.txt");
        fs::create_dir(dir.path().join("sub")).unwrap();
        touch(&dir.path().join("sub"), "c.rs");

        let files = collect_source_files(&[dir.path().to_path_buf(), a.clone()], &[]).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|f| f.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.rs", "b.rs"]);
    }

    #[test]
    fn test_explicit_files_keep_caller_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = touch(dir.path(), "a.rs");
        let b = touch(dir.path(), "b.rs");

        let files = collect_source_files(&[b.clone(), a.clone()], &[]).unwrap();
        assert_eq!(files, vec![b, a]);
    }

    #[test]
    fn test_output_file_is_excluded() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "models.rs");
        let output = touch(dir.path(), "scans.rs");

        let files = collect_source_files(&[dir.path().to_path_buf()], &[output]).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("models.rs"));
    }

    #[test]
    fn test_missing_path_is_an_error() {
        let err = collect_source_files(&[PathBuf::from("definitely/not/here")], &[]).unwrap_err();
        assert!(matches!(err, ScanError::Io { .. }));
    }
}
