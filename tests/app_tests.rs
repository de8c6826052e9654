//! Integration tests for the editor session
//!
//! Commands go through `App` the same way key input does at runtime

use std::fs;
use tempfile::TempDir;

use splitedit::config::Config;
use splitedit::{App, EditCommand, TextBuffer};

fn type_text(app: &mut App, text: &str) {
    for b in text.bytes() {
        app.handle_command(EditCommand::Append(b));
    }
}

fn app_with_file(contents: &str) -> (TempDir, App) {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("doc.txt");
    fs::write(&file_path, contents).unwrap();

    let app =
        App::with_file(Config::default(), temp_dir.path().to_path_buf(), &file_path).unwrap();
    (temp_dir, app)
}

#[test]
fn test_app_creation() {
    let app = App::new(Config::default(), ".".into());

    assert!(app.running);
    assert!(app.buffer.is_empty());
    assert!(!app.modified);
    assert!(!app.document.is_open());
    assert_eq!(app.status_message, None);
}

#[test]
fn test_with_file_loads_content() {
    let (_dir, app) = app_with_file("Line 1\nLine 2");

    assert_eq!(app.buffer.to_string(), "Line 1\nLine 2");
    assert_eq!(app.document.name(), "doc.txt");
    assert_eq!(app.cursor_position(), (1, 6));
    assert!(!app.modified);
}

#[test]
fn test_with_file_refuses_log_file() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::default();
    let log_path = config.log_path(temp_dir.path());
    fs::write(&log_path, "log").unwrap();

    let result = App::with_file(config, temp_dir.path().to_path_buf(), &log_path);
    assert!(result.is_err());
}

#[test]
fn test_editing_commands() {
    let mut app = App::new(Config::default(), ".".into());

    type_text(&mut app, "Hello World");
    assert_eq!(app.buffer.to_string(), "Hello World");
    assert!(app.modified);

    app.handle_command(EditCommand::MoveTo(0));
    app.handle_command(EditCommand::Move(2));
    assert_eq!(app.buffer.cursor(), 2);

    app.handle_command(EditCommand::Remove);
    assert_eq!(app.buffer.to_string(), "Hllo World");
    assert_eq!(app.cursor_position(), (0, 1));
    assert_eq!(app.status_message, None);
}

#[test]
fn test_move_to_clamps_to_end() {
    let mut app = App::new(Config::default(), ".".into());
    type_text(&mut app, "abc");
    app.handle_command(EditCommand::MoveTo(0));

    app.handle_command(EditCommand::MoveTo(usize::MAX));
    assert_eq!(app.buffer.cursor(), 3);
    assert_eq!(app.status_message, None);
}

#[test]
fn test_line_commands() {
    let mut app = App::new(Config::default(), ".".into());
    type_text(&mut app, "a\nb\nc");

    app.handle_command(EditCommand::Ascend);
    app.handle_command(EditCommand::Ascend);
    assert_eq!(app.cursor_position(), (1, 0));

    app.handle_command(EditCommand::Descend);
    assert_eq!(app.cursor_position(), (2, 0));
    assert!(!app.buffer.is_empty());
}

#[test]
fn test_failures_go_to_status_line() {
    let mut app = App::new(Config::default(), ".".into());

    app.handle_command(EditCommand::Remove);
    assert_eq!(app.status_message.as_deref(), Some("buffer is empty"));
    assert!(!app.modified);

    app.clear_status_message();
    app.handle_command(EditCommand::Move(-1));
    assert!(app.status_message.is_some());

    app.clear_status_message();
    app.handle_command(EditCommand::Append(0));
    assert_eq!(
        app.status_message.as_deref(),
        Some("character must be non-null")
    );
    assert!(app.buffer.is_empty());
}

#[test]
fn test_apply_returns_errors() {
    let mut app = App::new(Config::default(), ".".into());

    assert!(app.apply(EditCommand::Remove).is_err());
    assert!(app.apply(EditCommand::Save).is_err());
    assert!(app.apply(EditCommand::Append(b'x')).is_ok());
}

#[test]
fn test_buffer_full_is_reported() {
    let mut app = App::new(Config::default(), ".".into());
    app.handle_command(EditCommand::Create(vec![b'x'; TextBuffer::MAX_LEN]));
    assert_eq!(app.status_message, None);

    app.handle_command(EditCommand::Append(b'y'));
    assert!(app
        .status_message
        .as_deref()
        .unwrap()
        .contains("buffer is full"));
    assert_eq!(app.buffer.len(), TextBuffer::MAX_LEN);
}

#[test]
fn test_create_and_destroy() {
    let mut app = App::new(Config::default(), ".".into());

    app.handle_command(EditCommand::Create(b"fresh text".to_vec()));
    assert_eq!(app.buffer.to_string(), "fresh text");
    assert!(app.modified);

    app.handle_command(EditCommand::Create(vec![b'z'; TextBuffer::MAX_LEN + 10]));
    assert_eq!(app.buffer.len(), TextBuffer::MAX_LEN);
    assert!(app.status_message.as_deref().unwrap().contains("truncated"));

    app.handle_command(EditCommand::Destroy);
    assert!(app.buffer.is_empty());
    assert_eq!(app.buffer.cursor(), 0);
}

#[test]
fn test_save_command() {
    let (dir, mut app) = app_with_file("Hello");

    type_text(&mut app, ", World!");
    assert!(app.modified);

    app.handle_command(EditCommand::Save);
    assert!(!app.modified);
    assert_eq!(
        fs::read_to_string(dir.path().join("doc.txt")).unwrap(),
        "Hello, World!"
    );
    assert!(app.status_message.as_deref().unwrap().starts_with("Wrote 13 bytes"));
}

#[test]
fn test_failed_open_keeps_editing_session() {
    let (dir, mut app) = app_with_file("Hello");
    type_text(&mut app, "!");

    let log_path = app.config.log_path(dir.path());
    fs::write(&log_path, "log").unwrap();
    assert!(app.open(&log_path).is_err());

    assert!(app.document.is_open());
    assert_eq!(app.buffer.to_string(), "Hello!");
    assert!(app.modified);

    app.handle_command(EditCommand::Save);
    assert!(!app.modified);
    assert_eq!(
        fs::read_to_string(dir.path().join("doc.txt")).unwrap(),
        "Hello!"
    );
}

#[test]
fn test_quit_command() {
    let mut app = App::new(Config::default(), ".".into());
    app.handle_command(EditCommand::Quit);
    assert!(!app.running);
}

#[test]
fn test_status_bar_update() {
    let (_dir, mut app) = app_with_file("ab\ncd");
    app.handle_command(EditCommand::Move(-1));
    app.update_status_bar();

    assert_eq!(app.status_bar.file, "doc.txt");
    assert_eq!(app.status_bar.position, "Ln 2, Col 2");
    assert_eq!(app.status_bar.size, format!("5/{}", TextBuffer::MAX_LEN));
    assert!(!app.status_bar.modified);
}
