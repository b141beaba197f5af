use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

use crate::utils::fs::{find_config_files, find_files, normalize_path};

#[test]
fn test_normalize_path_folds_dots() {
    assert_eq!(normalize_path("/srv/app/./public"), PathBuf::from("/srv/app/public"));
    assert_eq!(normalize_path("/srv/app/../site/public"), PathBuf::from("/srv/site/public"));
    assert_eq!(normalize_path("app//public/"), PathBuf::from("app/public"));
}

#[test]
fn test_normalize_path_keeps_leading_parent_dirs() {
    assert_eq!(normalize_path("../../app"), PathBuf::from("../../app"));
    assert_eq!(normalize_path("a/../.."), PathBuf::from(".."));
    assert_eq!(normalize_path("/.."), PathBuf::from("/"));
    assert_eq!(normalize_path("./"), PathBuf::from("."));
}

#[test]
fn test_find_files_missing_dir_is_empty() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let missing = temp_dir.path().join("nope");
    let found = find_files(&missing, &|_: &Path| true).expect("find_files should not fail");
    assert!(found.is_empty());
}

#[test]
fn test_find_config_files_filters_and_sorts() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let dir = temp_dir.path();
    fs::write(dir.join("b.json"), "{}").unwrap();
    fs::write(dir.join("a.json"), "{}").unwrap();
    fs::write(dir.join("notes.txt"), "ignored").unwrap();
    fs::create_dir(dir.join("nested.json")).unwrap(); // directories never match

    let found = find_config_files(dir).expect("find_config_files failed");
    let names: Vec<String> = found
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.json".to_string(), "b.json".to_string()]);
}
