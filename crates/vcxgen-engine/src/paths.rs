use std::path::{MAIN_SEPARATOR, MAIN_SEPARATOR_STR, Path, PathBuf};

use relative_path::{Component, RelativePathBuf};

use crate::error::{Error, Result};

/// Rewrite forward slashes to the platform separator.
pub fn to_native(path: &str) -> String {
    if MAIN_SEPARATOR == '/' {
        path.to_string()
    } else {
        path.replace('/', MAIN_SEPARATOR_STR)
    }
}

/// Directory of `file` relative to `root`, computed lexically.
///
/// Fails when only one of the two paths is absolute, or when the file's
/// directory does not lie under `root`.
pub fn relative_dir(root: &Path, file: &Path) -> Result<RelativePathBuf> {
    let unresolved = || Error::PathResolution {
        path: file.to_path_buf(),
        root: root.to_path_buf(),
    };

    if root.is_absolute() != file.is_absolute() {
        return Err(unresolved());
    }

    let base = without_cur_dir(root);
    let dir = without_cur_dir(file.parent().unwrap_or(Path::new("")));
    let diff = pathdiff::diff_paths(&dir, &base).ok_or_else(unresolved)?;
    let dir = RelativePathBuf::from_path(&diff)
        .map_err(|_| unresolved())?
        .normalize();
    if matches!(dir.components().next(), Some(Component::ParentDir)) {
        return Err(unresolved());
    }

    Ok(dir)
}

// `diff_paths` reads a leading `.` as a real directory to climb out of.
fn without_cur_dir(path: &Path) -> PathBuf {
    path.components()
        .filter(|component| !matches!(component, std::path::Component::CurDir))
        .collect()
}
