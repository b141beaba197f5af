use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::config::ConfigFormat;

/// Find files directly inside `dir` that match a predicate, sorted by path.
/// A missing directory yields no files.
pub fn find_files<P, F>(dir: P, predicate: &F) -> io::Result<Vec<PathBuf>>
where
    P: AsRef<Path>,
    F: Fn(&Path) -> bool + ?Sized,
{
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut result = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && predicate(&path) {
            result.push(path);
        }
    }
    result.sort();
    Ok(result)
}

/// Configuration files in `dir` whose extension maps to an enabled [`ConfigFormat`].
pub fn find_config_files<P: AsRef<Path>>(dir: P) -> io::Result<Vec<PathBuf>> {
    find_files(dir, &|p: &Path| ConfigFormat::from_path(p).is_some())
}

/// Lexically normalize a path: drop `.` segments and fold `..` into the parent.
/// The filesystem is not consulted.
pub fn normalize_path<P: AsRef<Path>>(path: P) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.as_ref().components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                // `..` at the root stays at the root.
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other.as_os_str()),
        }
    }
    if normalized.as_os_str().is_empty() {
        normalized.push(".");
    }
    normalized
}
