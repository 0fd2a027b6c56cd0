//! Navigation panel (pure render + hit testing).

use crate::app::theme::UiTheme;
use crate::kernel::{DocumentKind, NavRow, NavRowKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

#[derive(Debug, Default)]
pub struct NavigatorView {
    area: Option<Rect>,
}

impl NavigatorView {
    pub fn new() -> Self {
        Self { area: None }
    }

    pub fn area(&self) -> Option<Rect> {
        self.area
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        self.area
            .map(|a| x >= a.x && x < a.x + a.width && y >= a.y && y < a.y + a.height)
            .unwrap_or(false)
    }

    pub fn hit_test_row(&self, x: u16, y: u16, scroll_offset: usize) -> Option<usize> {
        if !self.contains(x, y) {
            return None;
        }
        let area = self.area?;
        Some((y - area.y) as usize + scroll_offset)
    }

    pub(crate) fn render_row(
        &self,
        row: &NavRow,
        is_selected: bool,
        is_open: bool,
        theme: &UiTheme,
    ) -> Line<'static> {
        let indent = "  ".repeat(row.depth as usize);
        let (text, style) = match &row.kind {
            NavRowKind::Section(title) => (
                format!("{indent}▼ {title}"),
                Style::default()
                    .fg(theme.header_fg)
                    .add_modifier(Modifier::BOLD),
            ),
            NavRowKind::Document { name, kind } => {
                let icon = match kind {
                    DocumentKind::Text => "≡",
                    DocumentKind::Graph => "◉",
                    DocumentKind::Pdf => "▤",
                };
                let marker = if is_open { "•" } else { " " };
                (format!("{indent}{icon} {name}{marker}"), Style::default())
            }
            NavRowKind::Upload(name) => (
                format!("{indent}▤ {name}"),
                Style::default().fg(theme.muted_fg),
            ),
            NavRowKind::Placeholder(text) => (
                format!("{indent}{text}"),
                Style::default().fg(theme.muted_fg),
            ),
        };

        let style = if is_selected {
            style.bg(theme.selected_bg)
        } else {
            style
        };
        Line::from(Span::styled(text, style))
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        rows: &[NavRow],
        selected: Option<usize>,
        scroll_offset: usize,
        is_open: impl Fn(&str) -> bool,
        theme: &UiTheme,
    ) {
        self.area = Some(area);

        let visible_height = area.height as usize;
        let start = scroll_offset.min(rows.len());
        let end = (start + visible_height).min(rows.len());

        let lines: Vec<Line> = rows[start..end]
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let open = row.document_name().is_some_and(&is_open);
                self.render_row(row, selected == Some(start + i), open, theme)
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), area);
    }
}

/// Keeps `selected` inside a window of `height` rows starting at the returned offset.
pub fn scroll_to_selection(selected: usize, scroll_offset: usize, height: usize) -> usize {
    if height == 0 {
        return scroll_offset;
    }
    if selected < scroll_offset {
        selected
    } else if selected >= scroll_offset + height {
        selected + 1 - height
    } else {
        scroll_offset
    }
}

#[cfg(test)]
#[path = "../../tests/unit/views/navigator.rs"]
mod tests;
