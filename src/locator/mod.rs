//! Finding notebooks on disk.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::{Error, Result};

pub const DEFAULT_EXTENSION: &str = "ipynb";

/// List the files directly inside `dir` whose extension is `extension`
/// (with or without the leading dot), sorted by path.
pub fn find_notebooks(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let extension = extension.trim_start_matches('.');
    let mut found = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
        let path = entry.map_err(|e| Error::io(dir, e))?.path();
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some(extension) {
            found.push(path);
        }
    }
    found.sort();
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_only_matching_files() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.ipynb", "a.ipynb", "notes.md", "c.ipynb.bak"] {
            fs::write(dir.path().join(name), "{}").unwrap();
        }
        fs::create_dir(dir.path().join("sub.ipynb")).unwrap();
        fs::write(dir.path().join("sub.ipynb").join("d.ipynb"), "{}").unwrap();

        let found = find_notebooks(dir.path(), "ipynb").unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.ipynb", "b.ipynb"]);
    }

    #[test]
    fn test_leading_dot_in_extension() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("x.ipynb"), "{}").unwrap();
        assert_eq!(find_notebooks(dir.path(), ".ipynb").unwrap().len(), 1);
    }

    #[test]
    fn test_missing_directory_is_error() {
        let err = find_notebooks(Path::new("/nonexistent/nbcheck/dir"), "ipynb").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
