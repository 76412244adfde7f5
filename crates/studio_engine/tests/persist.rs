use std::fs;

use studio_engine::{ensure_output_dir, AtomicFileWriter, PersistError};
use tempfile::TempDir;

#[test]
fn creates_missing_download_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("downloads").join("nested");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn rewriting_a_download_replaces_it() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("processed_clip1.mp4", b"first").unwrap();
    assert_eq!(first.file_name().unwrap(), "processed_clip1.mp4");

    let second = writer.write("processed_clip1.mp4", b"second").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read(&second).unwrap(), b"second");
}

#[test]
fn names_with_separators_are_refused() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().join("downloads"));

    for name in ["../escape.mp4", "a/b.mp4", "a\\b.mp4", "..", ""] {
        let err = writer.write(name, b"x").unwrap_err();
        assert!(matches!(err, PersistError::InvalidName(_)), "{name}: {err}");
    }
    assert!(!temp.path().join("escape.mp4").exists());
}

#[test]
fn file_in_place_of_the_dir_is_an_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    let err = writer.write("out.mp4", b"data").unwrap_err();
    assert!(matches!(err, PersistError::OutputDir(_)));
}
