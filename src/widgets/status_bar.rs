use ratatui::{
    buffer::Buffer as TuiBuffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// One-line summary under the editor: file, position, fill level and the
/// latest message
#[derive(Debug, Clone)]
pub struct StatusBar {
    pub file: String,
    pub position: String,
    pub size: String,
    pub modified: bool,
    pub message: Option<String>,
    style: Style,
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            file: String::from("untitled"),
            position: String::new(),
            size: String::new(),
            modified: false,
            message: None,
            style: Style::default().fg(Color::White).bg(Color::LightBlue),
        }
    }

    /// Text for the left-hand side
    pub fn summary(&self) -> String {
        let modified = if self.modified { "Unsaved" } else { "Saved" };
        format!(
            " {} | {} | {} | {}",
            self.file, self.position, self.size, modified
        )
    }
}

impl Widget for StatusBar {
    fn render(self, area: Rect, buf: &mut TuiBuffer) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        Paragraph::new(Line::from(Span::raw(self.summary())))
            .style(self.style)
            .render(chunks[0], buf);

        let message = self.message.as_deref().unwrap_or_default();
        Paragraph::new(Line::from(Span::raw(format!("{} ", message))).right_aligned())
            .style(self.style)
            .render(chunks[1], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_bar_summary() {
        let mut status_bar = StatusBar::new();
        status_bar.file = "notes.txt".to_string();
        status_bar.position = "Ln 2, Col 5".to_string();
        status_bar.size = "12/4095".to_string();

        assert_eq!(status_bar.summary(), " notes.txt | Ln 2, Col 5 | 12/4095 | Saved");

        status_bar.modified = true;
        assert!(status_bar.summary().ends_with("Unsaved"));
    }

    #[test]
    fn test_status_bar_renders_message() {
        let mut status_bar = StatusBar::new();
        status_bar.message = Some("buffer is full".to_string());

        let area = Rect::new(0, 0, 80, 1);
        let mut buf = TuiBuffer::empty(area);
        status_bar.render(area, &mut buf);

        let rendered: String = (0..area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect();
        assert!(rendered.contains("buffer is full"));
        assert!(rendered.contains("untitled"));
    }
}
