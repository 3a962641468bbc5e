//! Recipe file discovery

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::LintError;

/// File name of a Conan recipe
pub const RECIPE_FILE_NAME: &str = "conanfile.py";

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}

/// Expand the given paths into the list of files to lint.
///
/// Files are kept as given. Directories are walked recursively for
/// `conanfile.py`, skipping hidden directories, in file-name order.
pub fn collect_recipe_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>, LintError> {
    let mut files = Vec::new();
    for path in paths {
        let metadata = std::fs::metadata(path).map_err(|source| LintError::Io {
            path: path.clone(),
            source,
        })?;
        if !metadata.is_dir() {
            files.push(path.clone());
            continue;
        }
        collect_from_dir(path, &mut files)?;
    }
    Ok(files)
}

fn collect_from_dir(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), LintError> {
    let walker = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_hidden(entry));
    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file() && entry.file_name() == RECIPE_FILE_NAME {
            files.push(entry.into_path());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_collect_recipe_files() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "recipes/zlib/all/conanfile.py");
        touch(dir.path(), "recipes/zlib/all/test_package/conanfile.py");
        touch(dir.path(), "recipes/zlib/all/conandata.yml");
        touch(dir.path(), "recipes/bzip2/all/conanfile.py");
        touch(dir.path(), ".git/conanfile.py");

        let files = collect_recipe_files(&[dir.path().to_path_buf()]).unwrap();
        let relative: Vec<_> = files
            .iter()
            .map(|f| f.strip_prefix(dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(
            relative,
            [
                "recipes/bzip2/all/conanfile.py",
                "recipes/zlib/all/conanfile.py",
                "recipes/zlib/all/test_package/conanfile.py",
            ]
        );
    }

    #[test]
    fn test_explicit_files_are_kept() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "recipe.py");
        let file = dir.path().join("recipe.py");
        let files = collect_recipe_files(&[file.clone()]).unwrap();
        assert_eq!(files, [file]);
    }

    #[test]
    fn test_missing_path_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = collect_recipe_files(&[dir.path().join("nope")]).unwrap_err();
        assert!(matches!(err, LintError::Io { .. }));
    }
}
