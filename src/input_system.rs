use crate::events::EditCommand;
use crate::handlers::Keymap;
use anyhow::{Context, Result};
use ratatui::crossterm::event::KeyEvent;
use tokio::sync::mpsc;

/// Input system that turns raw key input into published commands
pub struct InputSystem {
    keymap: Keymap,
    sender: mpsc::UnboundedSender<EditCommand>,
}

impl InputSystem {
    /// Create a new input system
    pub fn new(keymap: Keymap, sender: mpsc::UnboundedSender<EditCommand>) -> Self {
        Self { keymap, sender }
    }

    /// Translate a key event and publish the resulting commands.
    ///
    /// Returns how many commands were published; keys with no binding
    /// publish nothing.
    pub fn handle_key_input(&mut self, key: KeyEvent) -> Result<usize> {
        let commands = self.keymap.translate(key);
        let count = commands.len();
        for command in commands {
            self.sender
                .send(command)
                .context("Failed to publish key input command")?;
        }
        Ok(count)
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }
}
