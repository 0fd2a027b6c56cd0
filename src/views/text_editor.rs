//! Plain-text editing surface for text documents.
//!
//! The buffer is a rope; the cursor is a `(row, col)` pair counted in chars. Every mutating
//! call returns `true` when the text changed so the caller can publish the new content.

use crate::app::theme::UiTheme;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use ropey::Rope;
use unicode_width::UnicodeWidthChar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
}

#[derive(Debug, Clone)]
pub struct TextEditor {
    rope: Rope,
    /// Content the buffer was last loaded from or published as.
    source: String,
    cursor: (usize, usize),
    scroll_row: usize,
    scroll_col: usize,
    height: usize,
    width: usize,
    area: Option<Rect>,
}

impl TextEditor {
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            source: text.to_string(),
            cursor: (0, 0),
            scroll_row: 0,
            scroll_col: 0,
            height: 20,
            width: 80,
            area: None,
        }
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    pub fn scroll_row(&self) -> usize {
        self.scroll_row
    }

    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    /// Reloads the buffer when the document changed underneath it. Returns `true` on reload.
    pub fn sync(&mut self, content: &str) -> bool {
        if self.source == content {
            return false;
        }
        self.rope = Rope::from_str(content);
        self.source = content.to_string();
        self.clamp_cursor();
        true
    }

    /// Marks the current buffer as published and returns its text.
    pub fn take_published(&mut self) -> String {
        let text = self.text();
        self.source.clone_from(&text);
        text
    }

    fn line_len(&self, row: usize) -> usize {
        if row >= self.rope.len_lines() {
            return 0;
        }
        let line = self.rope.line(row);
        let mut len = line.len_chars();
        if len > 0 && line.char(len - 1) == '\n' {
            len -= 1;
            if len > 0 && line.char(len - 1) == '\r' {
                len -= 1;
            }
        } else if len > 0 && line.char(len - 1) == '\r' {
            len -= 1;
        }
        len
    }

    fn cursor_char(&self) -> usize {
        let (row, col) = self.cursor;
        self.rope.line_to_char(row) + col.min(self.line_len(row))
    }

    fn clamp_cursor(&mut self) {
        let last = self.rope.len_lines().saturating_sub(1);
        let row = self.cursor.0.min(last);
        let col = self.cursor.1.min(self.line_len(row));
        self.cursor = (row, col);
        self.follow_cursor();
    }

    fn set_cursor_char(&mut self, char_idx: usize) {
        let char_idx = char_idx.min(self.rope.len_chars());
        let row = self.rope.char_to_line(char_idx);
        self.cursor = (row, char_idx - self.rope.line_to_char(row));
        self.follow_cursor();
    }

    pub fn insert_char(&mut self, ch: char) -> bool {
        let at = self.cursor_char();
        self.rope.insert_char(at, ch);
        self.set_cursor_char(at + 1);
        true
    }

    pub fn insert_str(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        let at = self.cursor_char();
        self.rope.insert(at, text);
        self.set_cursor_char(at + text.chars().count());
        true
    }

    pub fn insert_newline(&mut self) -> bool {
        self.insert_char('\n')
    }

    pub fn delete_backward(&mut self) -> bool {
        let at = self.cursor_char();
        if at == 0 {
            return false;
        }
        let mut start = at - 1;
        if self.rope.char(start) == '\n' && start > 0 && self.rope.char(start - 1) == '\r' {
            start -= 1;
        }
        self.rope.remove(start..at);
        self.set_cursor_char(start);
        true
    }

    pub fn delete_forward(&mut self) -> bool {
        let at = self.cursor_char();
        let len = self.rope.len_chars();
        if at >= len {
            return false;
        }
        let mut end = at + 1;
        if self.rope.char(at) == '\r' && end < len && self.rope.char(end) == '\n' {
            end += 1;
        }
        self.rope.remove(at..end);
        self.follow_cursor();
        true
    }

    pub fn move_cursor(&mut self, movement: CursorMove) {
        let (row, col) = self.cursor;
        let last = self.rope.len_lines().saturating_sub(1);
        let page = self.height.max(1);
        self.cursor = match movement {
            CursorMove::Left if col > 0 => (row, col - 1),
            CursorMove::Left if row > 0 => (row - 1, self.line_len(row - 1)),
            CursorMove::Left => (row, col),
            CursorMove::Right if col < self.line_len(row) => (row, col + 1),
            CursorMove::Right if row < last => (row + 1, 0),
            CursorMove::Right => (row, col),
            CursorMove::Up => (row.saturating_sub(1), col),
            CursorMove::Down => ((row + 1).min(last), col),
            CursorMove::Home => (row, 0),
            CursorMove::End => (row, self.line_len(row)),
            CursorMove::PageUp => (row.saturating_sub(page), col),
            CursorMove::PageDown => ((row + page).min(last), col),
        };
        self.clamp_cursor();
    }

    pub fn scroll_by(&mut self, delta: isize) {
        let max = self.rope.len_lines().saturating_sub(1);
        self.scroll_row = (self.scroll_row as isize + delta).clamp(0, max as isize) as usize;
    }

    /// Places the cursor at a screen cell inside the last rendered area.
    pub fn click(&mut self, x: u16, y: u16) -> bool {
        let Some(area) = self.area else {
            return false;
        };
        if x < area.x || y < area.y || x >= area.x + area.width || y >= area.y + area.height {
            return false;
        }
        let last = self.rope.len_lines().saturating_sub(1);
        let row = (self.scroll_row + (y - area.y) as usize).min(last);
        let target = self.scroll_col + (x - area.x) as usize;
        let col = self.col_at_width(row, target);
        self.cursor = (row, col);
        true
    }

    fn col_at_width(&self, row: usize, target: usize) -> usize {
        let mut used = 0usize;
        let line = self.rope.line(row);
        for (col, ch) in line.chars().take(self.line_len(row)).enumerate() {
            let w = UnicodeWidthChar::width(ch).unwrap_or(0);
            if used + w > target {
                return col;
            }
            used += w;
        }
        self.line_len(row)
    }

    fn width_before(&self, row: usize, col: usize) -> usize {
        self.rope
            .line(row)
            .chars()
            .take(col)
            .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(0))
            .sum()
    }

    fn follow_cursor(&mut self) {
        let (row, col) = self.cursor;
        if row < self.scroll_row {
            self.scroll_row = row;
        } else if self.height > 0 && row >= self.scroll_row + self.height {
            self.scroll_row = row + 1 - self.height;
        }

        let x = self.width_before(row, col);
        if x < self.scroll_col {
            self.scroll_col = x;
        } else if self.width > 0 && x >= self.scroll_col + self.width {
            self.scroll_col = x + 1 - self.width;
        }
    }

    /// Screen position of the cursor inside the last rendered area.
    pub fn cursor_screen_position(&self) -> Option<(u16, u16)> {
        let area = self.area?;
        let (row, col) = self.cursor;
        if row < self.scroll_row || row >= self.scroll_row + area.height as usize {
            return None;
        }
        let x = self.width_before(row, col).checked_sub(self.scroll_col)?;
        if x >= area.width as usize {
            return None;
        }
        Some((area.x + x as u16, area.y + (row - self.scroll_row) as u16))
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &UiTheme) {
        self.area = Some(area);
        let resized = self.height != area.height as usize || self.width != area.width as usize;
        self.height = area.height as usize;
        self.width = area.width as usize;
        if resized {
            self.follow_cursor();
        }

        let end = (self.scroll_row + self.height).min(self.rope.len_lines());
        let lines: Vec<Line> = (self.scroll_row..end)
            .map(|row| {
                let text: String = self
                    .rope
                    .line(row)
                    .chars()
                    .take(self.line_len(row))
                    .map(|ch| if ch == '\t' { ' ' } else { ch })
                    .collect();
                Line::from(visible_slice(&text, self.scroll_col, self.width))
            })
            .collect();

        let mut paragraph = Paragraph::new(lines);
        if self.rope.len_chars() == 0 {
            paragraph = Paragraph::new(Line::from(Span::styled(
                "(empty)",
                Style::default().fg(theme.muted_fg),
            )));
        }
        frame.render_widget(paragraph, area);
    }
}

fn visible_slice(text: &str, skip: usize, width: usize) -> String {
    let mut out = String::new();
    let mut x = 0usize;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if x >= skip + width {
            break;
        }
        if x >= skip && x + w <= skip + width {
            out.push(ch);
        }
        x += w;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/views/text_editor.rs"]
mod tests;
