use crate::widgets::Editor;
use crate::App;
use ratatui::prelude::*;

impl App {
    /// Main render function for the application UI
    pub fn render(&mut self, f: &mut Frame) {
        // Create layout
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // Editor area
                Constraint::Length(1), // Status line
            ])
            .split(f.area());

        self.render_editor(f, chunks[0]);
        self.render_status_line(f, chunks[1]);
    }

    /// Render the document and place the terminal cursor
    fn render_editor(&mut self, f: &mut Frame, area: Rect) {
        let mut editor = Editor {
            buffer: &self.buffer,
            scroll_offset: self.scroll_offset,
            show_line_numbers: self.config.editor.show_line_numbers,
        };
        editor.ensure_cursor_visible(area);

        let scroll_offset = editor.scroll_offset;
        let cursor = editor.cursor_screen_position(area);
        f.render_widget(editor, area);

        self.scroll_offset = scroll_offset;
        if let Some((x, y)) = cursor {
            f.set_cursor_position((x, y));
        }
    }

    /// Render the status line
    fn render_status_line(&mut self, f: &mut Frame, area: Rect) {
        // Update status bar content before rendering
        self.update_status_bar();
        f.render_widget(self.status_bar.clone(), area);
    }
}
