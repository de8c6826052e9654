use ratatui::{
    buffer::Buffer as TuiBuffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::buffer::TextBuffer;

/// Renders the materialized buffer content with an optional line-number
/// gutter
#[derive(Clone, Copy)]
pub struct Editor<'a> {
    pub buffer: &'a TextBuffer,
    pub scroll_offset: (usize, usize), // (row, col) offset for viewport scrolling
    pub show_line_numbers: bool,
}

impl<'a> Editor<'a> {
    pub fn new(buffer: &'a TextBuffer) -> Self {
        Self {
            buffer,
            scroll_offset: (0, 0),
            show_line_numbers: true,
        }
    }

    /// Number of lines in the document; an empty document has one
    pub fn line_count(&self) -> usize {
        self.buffer.prefix().iter().filter(|&&b| b == b'\n').count()
            + self.buffer.suffix().iter().filter(|&&b| b == b'\n').count()
            + 1
    }

    /// Columns taken by the gutter, separator included
    pub fn gutter_width(&self) -> usize {
        if !self.show_line_numbers {
            return 0;
        }
        // Reserve at least 4 digits so the text does not shift while typing
        let digits = self.line_count().to_string().len().max(4);
        digits + 1
    }

    /// Adjust the scroll offset so the cursor stays inside `area`
    pub fn ensure_cursor_visible(&mut self, area: Rect) {
        let (row, col) = self.buffer.line_and_column();
        let (scroll_row, scroll_col) = self.scroll_offset;

        let visible_rows = (area.height as usize).max(1);
        if row < scroll_row {
            self.scroll_offset.0 = row;
        } else if row >= scroll_row + visible_rows {
            self.scroll_offset.0 = row + 1 - visible_rows;
        }

        let visible_cols = (area.width as usize)
            .saturating_sub(self.gutter_width())
            .max(1);
        if col < scroll_col {
            self.scroll_offset.1 = col;
        } else if col >= scroll_col + visible_cols {
            self.scroll_offset.1 = col + 1 - visible_cols;
        }
    }

    /// Terminal cell for the cursor, if it is on screen.
    ///
    /// Each byte counts as one cell, which holds for the ASCII text the
    /// keymap produces. Lines with multi-byte characters place the cursor
    /// approximately.
    pub fn cursor_screen_position(&self, area: Rect) -> Option<(u16, u16)> {
        let (row, col) = self.buffer.line_and_column();
        let y = row.checked_sub(self.scroll_offset.0)?;
        let x = col.checked_sub(self.scroll_offset.1)? + self.gutter_width();

        if y < area.height as usize && x < area.width as usize {
            Some((area.x + x as u16, area.y + y as u16))
        } else {
            None
        }
    }
}

impl Widget for Editor<'_> {
    fn render(self, area: Rect, buf: &mut TuiBuffer) {
        let bytes = self.buffer.to_bytes();
        let gutter_width = self.gutter_width();
        let (start_row, h_offset) = self.scroll_offset;

        // Columns are bytes, the same unit `line_and_column` reports
        let lines: Vec<Line> = bytes
            .split(|&b| b == b'\n')
            .enumerate()
            .skip(start_row)
            .take(area.height as usize)
            .map(|(i, line)| {
                let visible = String::from_utf8_lossy(line.get(h_offset..).unwrap_or_default())
                    .into_owned();
                if self.show_line_numbers {
                    let number = format!("{:>width$}", i + 1, width = gutter_width - 1);
                    Line::from(vec![
                        Span::styled(number, Style::default().fg(Color::Rgb(100, 100, 120))),
                        Span::raw(" "),
                        Span::raw(visible),
                    ])
                } else {
                    Line::from(visible)
                }
            })
            .collect();

        Paragraph::new(lines)
            .style(Style::default().fg(Color::White).bg(Color::Black))
            .render(area, buf);
    }
}
