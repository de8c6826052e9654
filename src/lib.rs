//! Terminal text editor built around a fixed-capacity split buffer

pub mod app;
pub mod buffer;
pub mod config;
pub mod document;
pub mod events;
pub mod handlers;
pub mod input_system;
pub mod logging;
pub mod ui;
pub mod widgets;

// Re-export main types for convenience
pub use app::App;
pub use buffer::{BufferError, SplitBuffer, TextBuffer};
pub use events::EditCommand;
