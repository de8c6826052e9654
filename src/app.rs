use std::io::Stdout;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use ratatui::{
    backend::CrosstermBackend,
    crossterm::event::{self, Event},
    Terminal,
};

use crate::buffer::TextBuffer;
use crate::config::Config;
use crate::document::Document;
use crate::events::{CommandBus, EditCommand};
use crate::handlers::Keymap;
use crate::input_system::InputSystem;
use crate::widgets::StatusBar;

/// Editor session: one buffer, the file behind it, and what the UI shows
pub struct App {
    /// Whether the application is running
    pub running: bool,

    /// The document being edited
    pub buffer: TextBuffer,

    /// File backing the buffer
    pub document: Document,

    /// Loaded configuration
    pub config: Config,

    /// Whether the buffer changed since the last load or save
    pub modified: bool,

    /// Scroll position for the editor, (row, column)
    pub scroll_offset: (usize, usize),

    /// Message to display on status bar
    pub status_message: Option<String>,

    /// Directory holding config and log files
    pub user_dir: PathBuf,

    /// Status line shown under the editor
    pub status_bar: StatusBar,
}

impl App {
    pub fn new(config: Config, user_dir: PathBuf) -> Self {
        let document = Document::new(config.protected_paths(&user_dir));

        Self {
            running: true,
            buffer: TextBuffer::new(),
            document,
            config,
            modified: false,
            scroll_offset: (0, 0),
            status_message: None,
            user_dir,
            status_bar: StatusBar::new(),
        }
    }

    /// Create a session with `file_path` loaded
    pub fn with_file(
        config: Config,
        user_dir: PathBuf,
        file_path: impl AsRef<Path>,
    ) -> Result<Self> {
        let mut app = Self::new(config, user_dir);
        app.open(file_path)?;
        Ok(app)
    }

    /// Load a file into the buffer, replacing the current content
    pub fn open(&mut self, file_path: impl AsRef<Path>) -> Result<()> {
        let file_path = file_path.as_ref();
        self.buffer = self
            .document
            .open(file_path)
            .with_context(|| format!("Failed to open file '{}'", file_path.display()))?;
        self.modified = false;
        self.scroll_offset = (0, 0);

        if self.document.was_truncated() {
            self.set_status_message(format!(
                "{} truncated to {} bytes",
                self.document.name(),
                TextBuffer::MAX_LEN
            ));
        }
        tracing::info!("editing {}", file_path.display());
        Ok(())
    }

    /// Apply a command, reporting failure on the status line instead of
    /// returning it
    pub fn handle_command(&mut self, command: EditCommand) {
        let name = command.name();
        if let Err(e) = self.apply(command) {
            tracing::warn!("{} failed: {:#}", name, e);
            self.set_status_message(format!("{}", e));
        }
    }

    /// Apply a command to the session
    pub fn apply(&mut self, command: EditCommand) -> Result<()> {
        let edits = command.is_edit();

        match command {
            EditCommand::Append(c) => self.buffer.append(c)?,
            EditCommand::Remove => {
                self.buffer.remove()?;
            }
            EditCommand::Move(distance) => self.buffer.move_cursor(distance)?,
            EditCommand::MoveTo(position) => {
                self.buffer.move_to(position.min(self.buffer.len()))?
            }
            EditCommand::Ascend => self.buffer.ascend()?,
            EditCommand::Descend => self.buffer.descend()?,
            EditCommand::Create(text) => {
                if text.len() > TextBuffer::MAX_LEN {
                    self.set_status_message(format!(
                        "Text truncated to {} bytes",
                        TextBuffer::MAX_LEN
                    ));
                }
                self.buffer.replace(&text);
            }
            EditCommand::Destroy => self.buffer.reset(),
            EditCommand::Save => self.save()?,
            EditCommand::Quit => self.running = false,
        }

        if edits {
            self.modified = true;
        }
        Ok(())
    }

    /// Write the buffer to its file
    pub fn save(&mut self) -> Result<()> {
        self.document
            .save(&self.buffer)
            .with_context(|| format!("Failed to save '{}'", self.document.name()))?;
        self.modified = false;
        self.set_status_message(format!(
            "Wrote {} bytes to {}",
            self.buffer.len(),
            self.document.name()
        ));
        tracing::info!("saved {}", self.document.name());
        Ok(())
    }

    /// Run the editor until a quit command arrives
    pub async fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let mut command_bus = CommandBus::new();
        let mut input_system = InputSystem::new(
            Keymap::new(self.config.editor.tab_width),
            command_bus.sender(),
        );

        // Target frame rate
        let frame_duration = Duration::from_millis(16);
        let mut last_frame: Option<Instant> = None;
        let mut needs_redraw = true;

        while self.running {
            let frame_due = last_frame.map_or(true, |t| t.elapsed() >= frame_duration);
            if needs_redraw && frame_due {
                terminal
                    .draw(|f| self.render(f))
                    .context("Rendering error")?;
                last_frame = Some(Instant::now());
                needs_redraw = false;
            }

            // Check for events without blocking
            if event::poll(Duration::from_millis(1))? {
                match event::read()? {
                    Event::Key(key) => {
                        if let Err(e) = input_system.handle_key_input(key) {
                            tracing::error!("Error handling key input: {:#}", e);
                        }
                    }
                    Event::Resize(_, _) => needs_redraw = true,
                    _ => {}
                }
            } else {
                tokio::time::sleep(Duration::from_millis(1)).await;
            }

            for command in command_bus.drain() {
                self.handle_command(command);
                needs_redraw = true;
            }
        }

        Ok(())
    }

    /// Set a status message
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some(message);
    }

    /// Clear the status message
    pub fn clear_status_message(&mut self) {
        self.status_message = None;
    }

    /// Zero-based (line, column) of the cursor
    pub fn cursor_position(&self) -> (usize, usize) {
        self.buffer.line_and_column()
    }

    /// Update status bar fields with current application state
    pub fn update_status_bar(&mut self) {
        let (row, col) = self.cursor_position();

        self.status_bar.file = self.document.name();
        self.status_bar.position = format!("Ln {}, Col {}", row + 1, col + 1);
        self.status_bar.size = format!("{}/{}", self.buffer.len(), TextBuffer::MAX_LEN);
        self.status_bar.modified = self.modified;
        self.status_bar.message = self.status_message.clone();
    }
}
