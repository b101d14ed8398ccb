#![allow(clippy::unwrap_used)]

use super::*;

#[test]
fn test_in_dir_creates_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("nested").join("data");
    let config = Config::in_dir(&dir).unwrap();
    assert!(dir.is_dir());
    assert_eq!(config.data_dir, dir);
    assert_eq!(config.db_path, dir.join("pocketbudget.db"));
    assert_eq!(config.log_path, dir.join("pocketbudget.log"));
}

#[test]
fn test_in_dir_existing_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let first = Config::in_dir(tmp.path()).unwrap();
    let second = Config::in_dir(tmp.path()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_in_dir_rejects_file_path() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    assert!(Config::in_dir(tmp.path()).is_err());
}
