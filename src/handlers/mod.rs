/// Input handlers for the application
pub mod keyboard;

pub use keyboard::Keymap;
