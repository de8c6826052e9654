pub mod editor;
pub mod status_bar;

pub use editor::Editor;
pub use status_bar::StatusBar;
