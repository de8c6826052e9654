use crate::buffer::TextBuffer;
use crate::config::{ClipboardContext, ClipboardProvider};
use crate::events::EditCommand;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Maps key events to edit commands.
///
/// Only ASCII input reaches the buffer; other characters have no binding.
#[derive(Debug, Clone)]
pub struct Keymap {
    tab_width: usize,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new(4)
    }
}

impl Keymap {
    /// Create a keymap that expands Tab into `tab_width` spaces.
    ///
    /// The width is capped at what a buffer can hold.
    pub fn new(tab_width: usize) -> Self {
        Self {
            tab_width: tab_width.min(TextBuffer::MAX_LEN),
        }
    }

    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    /// Translate one key event into zero or more commands
    pub fn translate(&self, key: KeyEvent) -> Vec<EditCommand> {
        if key.kind == KeyEventKind::Release {
            return Vec::new();
        }

        // Check for key combinations first
        match (key.code, key.modifiers) {
            (KeyCode::Char('s'), KeyModifiers::CONTROL) => vec![EditCommand::Save],
            (KeyCode::Char('q'), KeyModifiers::CONTROL) => vec![EditCommand::Quit],
            (KeyCode::Char('l'), KeyModifiers::CONTROL) => vec![EditCommand::Destroy],
            (KeyCode::Char('v'), KeyModifiers::CONTROL) => self.paste_from_clipboard(),
            (KeyCode::Esc, _) => vec![EditCommand::Quit],
            // Movement keys
            (KeyCode::Left, _) => vec![EditCommand::Move(-1)],
            (KeyCode::Right, _) => vec![EditCommand::Move(1)],
            (KeyCode::Up, _) => vec![EditCommand::Ascend],
            (KeyCode::Down, _) => vec![EditCommand::Descend],
            (KeyCode::Home, _) => vec![EditCommand::MoveTo(0)],
            (KeyCode::End, _) => vec![EditCommand::MoveTo(usize::MAX)],
            // Text input
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                ascii_byte(c).map(EditCommand::Append).into_iter().collect()
            }
            (KeyCode::Enter, _) => vec![EditCommand::Append(b'\n')],
            (KeyCode::Tab, KeyModifiers::NONE) => self.indent(),
            (KeyCode::Backspace, _) => vec![EditCommand::Remove],
            _ => Vec::new(),
        }
    }

    fn indent(&self) -> Vec<EditCommand> {
        vec![EditCommand::Append(b' '); self.tab_width]
    }

    /// Turn pasted text into append commands.
    ///
    /// CRLF becomes LF, tabs are expanded, and anything that is not
    /// printable ASCII is dropped.
    pub fn paste_commands(&self, text: &str) -> Vec<EditCommand> {
        let mut commands = Vec::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '\r' => {}
                '\t' => commands.extend(self.indent()),
                '\n' => commands.push(EditCommand::Append(b'\n')),
                c => commands.extend(ascii_byte(c).map(EditCommand::Append)),
            }
        }
        commands
    }

    fn paste_from_clipboard(&self) -> Vec<EditCommand> {
        let contents = ClipboardContext::new().and_then(|mut ctx| ctx.get_contents());
        match contents {
            Ok(text) => self.paste_commands(&text),
            Err(e) => {
                tracing::warn!("clipboard unavailable: {}", e);
                Vec::new()
            }
        }
    }
}

fn ascii_byte(c: char) -> Option<u8> {
    if c.is_ascii() && !c.is_ascii_control() {
        Some(c as u8)
    } else {
        None
    }
}
