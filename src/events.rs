use anyhow::{Context, Result};
use tokio::sync::mpsc;

/// Discrete commands the editor understands.
///
/// The first group maps one-to-one onto [`SplitBuffer`](crate::buffer::SplitBuffer)
/// operations; the rest are handled by the application around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    /// Insert a byte before the cursor
    Append(u8),

    /// Delete the byte before the cursor
    Remove,

    /// Move the cursor by a signed byte distance
    Move(isize),

    /// Move the cursor to an absolute byte offset
    MoveTo(usize),

    /// Jump to the previous line start
    Ascend,

    /// Jump to the next line start
    Descend,

    /// Replace the whole document
    Create(Vec<u8>),

    /// Clear the document
    Destroy,

    /// Write the document to its file
    Save,

    /// Leave the editor
    Quit,
}

impl EditCommand {
    /// Whether applying this command can change the document content.
    pub fn is_edit(&self) -> bool {
        matches!(
            self,
            EditCommand::Append(_)
                | EditCommand::Remove
                | EditCommand::Create(_)
                | EditCommand::Destroy
        )
    }

    /// Name used when logging.
    pub fn name(&self) -> &'static str {
        match self {
            EditCommand::Append(_) => "append",
            EditCommand::Remove => "remove",
            EditCommand::Move(_) => "move",
            EditCommand::MoveTo(_) => "move_to",
            EditCommand::Ascend => "ascend",
            EditCommand::Descend => "descend",
            EditCommand::Create(_) => "create",
            EditCommand::Destroy => "destroy",
            EditCommand::Save => "save",
            EditCommand::Quit => "quit",
        }
    }
}

/// Queue between input producers and the single consumer that owns the
/// buffer.
///
/// Any number of senders can publish; only the bus owner drains, which keeps
/// every mutation on one thread.
pub struct CommandBus {
    sender: mpsc::UnboundedSender<EditCommand>,
    receiver: mpsc::UnboundedReceiver<EditCommand>,
}

impl CommandBus {
    /// Create a new command bus
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self { sender, receiver }
    }

    /// Get a sender for publishing commands
    pub fn sender(&self) -> mpsc::UnboundedSender<EditCommand> {
        self.sender.clone()
    }

    /// Publish a command
    pub fn publish(&self, command: EditCommand) -> Result<()> {
        self.sender
            .send(command)
            .context("command bus receiver dropped")
    }

    /// Take every command queued so far, without waiting.
    pub fn drain(&mut self) -> Vec<EditCommand> {
        let mut commands = Vec::new();
        while let Ok(command) = self.receiver.try_recv() {
            commands.push(command);
        }
        commands
    }

    /// Wait for the next command.
    pub async fn next(&mut self) -> Option<EditCommand> {
        self.receiver.recv().await
    }
}

impl Default for CommandBus {
    fn default() -> Self {
        Self::new()
    }
}
