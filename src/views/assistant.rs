//! Assistant panel: context chips, prompt input and the mode selector.

use crate::app::theme::UiTheme;
use crate::kernel::{AssistantMode, AssistantState};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

pub const PROMPT_PLACEHOLDER: &str = "Plan, search, write anything";
pub const ADD_CONTEXT_LABEL: &str = "@ Add context";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssistantHit {
    Mode(AssistantMode),
    ClearContext,
    Prompt,
}

#[derive(Debug, Default)]
pub struct AssistantView {
    area: Option<Rect>,
    context_row: Option<Rect>,
    prompt_area: Option<Rect>,
    mode_row: Option<Rect>,
    cursor: Option<(u16, u16)>,
}

impl AssistantView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn area(&self) -> Option<Rect> {
        self.area
    }

    pub fn cursor_position(&self) -> Option<(u16, u16)> {
        self.cursor
    }

    pub fn hit_test(&self, x: u16, y: u16) -> Option<AssistantHit> {
        let inside = |r: Option<Rect>| {
            r.is_some_and(|a| x >= a.x && x < a.x + a.width && y >= a.y && y < a.y + a.height)
        };
        if inside(self.mode_row) {
            let row = self.mode_row?;
            let agent_end = row.x + mode_chip(AssistantMode::Agent).width() as u16;
            return Some(if x < agent_end {
                AssistantHit::Mode(AssistantMode::Agent)
            } else {
                AssistantHit::Mode(AssistantMode::Ask)
            });
        }
        if inside(self.context_row) {
            return Some(AssistantHit::ClearContext);
        }
        if inside(self.prompt_area) {
            return Some(AssistantHit::Prompt);
        }
        None
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AssistantState,
        focused: bool,
        theme: &UiTheme,
    ) {
        self.area = Some(area);
        self.cursor = None;
        if area.height == 0 {
            return;
        }

        let [context_row, prompt_area, mode_row] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(area);
        self.context_row = Some(context_row);
        self.prompt_area = Some(prompt_area);
        self.mode_row = Some(mode_row);

        let muted = Style::default().fg(theme.muted_fg);
        let mut chips = vec![Span::styled(ADD_CONTEXT_LABEL, muted)];
        for label in &state.context {
            chips.push(Span::raw(" "));
            chips.push(Span::styled(
                format!("[{label}]"),
                Style::default().fg(theme.accent_fg),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(chips)), context_row);

        let prompt = if state.prompt.is_empty() {
            Paragraph::new(Line::from(Span::styled(PROMPT_PLACEHOLDER, muted)))
        } else {
            Paragraph::new(state.prompt.as_str()).wrap(Wrap { trim: false })
        };
        frame.render_widget(prompt, prompt_area);

        if focused && prompt_area.width > 0 {
            let used = state.prompt.width() as u16;
            let line = used / prompt_area.width;
            if line < prompt_area.height {
                self.cursor = Some((
                    prompt_area.x + used % prompt_area.width,
                    prompt_area.y + line,
                ));
            }
        }

        let mut modes = Vec::new();
        for mode in [AssistantMode::Agent, AssistantMode::Ask] {
            let style = if mode == state.mode {
                Style::default()
                    .fg(theme.accent_fg)
                    .add_modifier(Modifier::BOLD)
            } else {
                muted
            };
            modes.push(Span::styled(mode_chip(mode), style));
        }
        frame.render_widget(Paragraph::new(Line::from(modes)), mode_row);
    }
}

fn mode_chip(mode: AssistantMode) -> String {
    format!("[{}] ", mode.label())
}

#[cfg(test)]
#[path = "../../tests/unit/views/assistant.rs"]
mod tests;
