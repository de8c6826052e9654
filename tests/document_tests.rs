//! Integration tests for loading and saving documents

use std::fs;
use tempfile::TempDir;

use splitedit::buffer::{SplitBuffer, TextBuffer};
use splitedit::document::{Document, DocumentError};

#[test]
fn test_open_existing_file() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("notes.txt");
    fs::write(&file_path, "Hello\nWorld").unwrap();

    let mut document = Document::default();
    let buffer: TextBuffer = document.open(&file_path).unwrap();

    assert_eq!(buffer.to_string(), "Hello\nWorld");
    assert_eq!(buffer.cursor(), 11);
    assert_eq!(document.name(), "notes.txt");
    assert_eq!(document.path(), Some(file_path.as_path()));
    assert!(!document.was_truncated());
}

#[test]
fn test_open_creates_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("new.txt");

    let mut document = Document::default();
    let buffer: TextBuffer = document.open(&file_path).unwrap();

    assert!(buffer.is_empty());
    assert!(file_path.exists());
    assert!(document.is_open());
}

#[test]
fn test_open_truncates_large_file() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("big.txt");
    fs::write(&file_path, "0123456789abcdef").unwrap();

    let mut document = Document::default();
    let buffer: SplitBuffer<8> = document.open(&file_path).unwrap();

    assert_eq!(buffer.to_string(), "0123456");
    assert!(document.was_truncated());

    // A file that fits exactly is not reported
    fs::write(&file_path, "0123456").unwrap();
    let buffer: SplitBuffer<8> = document.open(&file_path).unwrap();
    assert_eq!(buffer.len(), 7);
    assert!(!document.was_truncated());
}

#[test]
fn test_open_refuses_protected_file() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("splitedit.log");
    fs::write(&log_path, "log line\n").unwrap();

    let mut document = Document::new(vec![log_path.clone()]);
    let result: Result<TextBuffer, _> = document.open(&log_path);

    assert!(matches!(result, Err(DocumentError::Protected(_))));
    assert!(!document.is_open());

    // The same file reached through a different spelling
    let indirect = temp_dir.path().join(".").join("splitedit.log");
    assert!(document.is_protected(&indirect));
}

#[test]
fn test_save_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("edit.txt");
    fs::write(&file_path, "Hello World").unwrap();

    let mut document = Document::default();
    let mut buffer: TextBuffer = document.open(&file_path).unwrap();

    buffer.move_to(5).unwrap();
    buffer.append(b',').unwrap();
    document.save(&buffer).unwrap();

    assert_eq!(fs::read_to_string(&file_path).unwrap(), "Hello, World");

    // Saving shorter content must not leave old bytes behind
    buffer.reset();
    for c in b"hi" {
        buffer.append(*c).unwrap();
    }
    document.save(&buffer).unwrap();
    assert_eq!(fs::read_to_string(&file_path).unwrap(), "hi");
}

#[tokio::test]
async fn test_save_async() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("async.txt");

    let mut document = Document::default();
    let mut buffer: TextBuffer = document.open(&file_path).unwrap();
    for c in b"line one\nline two" {
        buffer.append(*c).unwrap();
    }
    buffer.ascend().unwrap();

    document.save_async(&buffer).await.unwrap();
    assert_eq!(
        fs::read_to_string(&file_path).unwrap(),
        "line one\nline two"
    );
}

#[test]
fn test_save_without_open_file() {
    let document = Document::default();
    let buffer = TextBuffer::create("orphan");

    assert!(matches!(
        document.save(&buffer),
        Err(DocumentError::NoActiveFile)
    ));
    assert!(matches!(
        tokio_test::block_on(document.save_async(&buffer)),
        Err(DocumentError::NoActiveFile)
    ));
    assert_eq!(buffer.to_string(), "orphan");
}

#[test]
fn test_save_io_failure_keeps_buffer() {
    let temp_dir = TempDir::new().unwrap();
    let dir_path = temp_dir.path().join("folder");
    let file_path = dir_path.join("inner.txt");
    fs::create_dir(&dir_path).unwrap();

    let mut document = Document::default();
    let mut buffer: TextBuffer = document.open(&file_path).unwrap();
    buffer.append(b'x').unwrap();
    let before = buffer.clone();

    // Take the directory away so the file cannot be recreated
    fs::remove_dir_all(&dir_path).unwrap();

    let result = document.save(&buffer);
    assert!(matches!(result, Err(DocumentError::Io { .. })));
    assert_eq!(buffer, before);
}

#[test]
fn test_close_and_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let first = temp_dir.path().join("first.txt");
    let second = temp_dir.path().join("second.txt");
    fs::write(&first, "one").unwrap();
    fs::write(&second, "two").unwrap();

    let mut document = Document::default();
    let _: TextBuffer = document.open(&first).unwrap();

    // Opening another file replaces the active one
    let buffer: TextBuffer = document.open(&second).unwrap();
    assert_eq!(buffer.to_string(), "two");
    assert_eq!(document.name(), "second.txt");

    document.close();
    assert!(!document.is_open());
    assert_eq!(document.name(), "untitled");

    // Closing twice is only a warning
    document.close();
    assert!(!document.is_open());
}

#[test]
fn test_failed_open_keeps_active_file() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("notes.txt");
    let log_path = temp_dir.path().join("splitedit.log");
    fs::write(&file_path, "notes").unwrap();
    fs::write(&log_path, "log").unwrap();

    let mut document = Document::new(vec![log_path.clone()]);
    let buffer: TextBuffer = document.open(&file_path).unwrap();

    let result: Result<TextBuffer, _> = document.open(&log_path);
    assert!(matches!(result, Err(DocumentError::Protected(_))));
    assert_eq!(document.path(), Some(file_path.as_path()));

    document.save(&buffer).unwrap();
    assert_eq!(fs::read_to_string(&file_path).unwrap(), "notes");
}

#[test]
fn test_delete() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("gone.txt");
    let log_path = temp_dir.path().join("splitedit.log");
    fs::write(&file_path, "bye").unwrap();
    fs::write(&log_path, "keep").unwrap();

    let mut document = Document::new(vec![log_path.clone()]);
    let _: TextBuffer = document.open(&file_path).unwrap();

    document.delete(&file_path).unwrap();
    assert!(!file_path.exists());
    assert!(!document.is_open());

    assert!(matches!(
        document.delete(&log_path),
        Err(DocumentError::Protected(_))
    ));
    assert!(log_path.exists());

    assert!(matches!(
        document.delete(&file_path),
        Err(DocumentError::Io { .. })
    ));
}

#[cfg(unix)]
#[test]
fn test_open_without_permission() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("locked.txt");
    fs::write(&file_path, "secret").unwrap();
    fs::set_permissions(&file_path, fs::Permissions::from_mode(0o444)).unwrap();

    // Root ignores permission bits, nothing to check there
    if fs::OpenOptions::new().write(true).open(&file_path).is_ok() {
        return;
    }

    let mut document = Document::default();
    let result: Result<TextBuffer, _> = document.open(&file_path);
    assert!(matches!(result, Err(DocumentError::PermissionDenied(_))));
}
