use super::util;
use super::Workbench;
use crate::kernel::{DocumentKind, FocusTarget, NoticeKind};
use crate::views::{compute_tab_row_layout, ellipsize_title, scroll_to_selection, tab_row, TextEditor};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

pub(crate) const NO_FILE_OPEN: &str = "No file open";
pub(crate) const PDF_PLACEHOLDER: &str = "PDF preview is not available in the terminal";
const UPLOAD_PROMPT_LABEL: &str = "Upload PDF: ";
const KEY_HINTS: &str = "Tab focus | Ctrl+U upload | Ctrl+W close | Ctrl+L logs | Ctrl+Q quit";

pub(super) fn render(workbench: &mut Workbench, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(super::HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(super::STATUS_HEIGHT),
        ])
        .split(area);

    render_header(workbench, frame, chunks[0]);
    render_panels(workbench, frame, chunks[1]);
    render_status(workbench, frame, chunks[2]);

    if workbench.show_logs {
        render_log_overlay(workbench, frame, area);
    }
}

fn render_header(workbench: &Workbench, frame: &mut Frame, area: Rect) {
    let title = Span::styled(
        " tripane ",
        Style::default()
            .fg(workbench.theme.header_fg)
            .add_modifier(Modifier::BOLD),
    );
    let mut spans = vec![title];
    if let Some(name) = workbench.store.state().workspace.active_name() {
        spans.push(Span::styled(
            format!("| {name}"),
            Style::default().fg(workbench.theme.muted_fg),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn panel_block(title: String, focused: bool, workbench: &Workbench) -> Block<'static> {
    let color = if focused {
        workbench.theme.focus_border
    } else {
        workbench.theme.inactive_border
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(title)
}

fn render_panels(workbench: &mut Workbench, frame: &mut Frame, area: Rect) {
    let (nav_w, content_w, assistant_w) = util::panel_widths(area.width);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(nav_w),
            Constraint::Length(content_w),
            Constraint::Length(assistant_w),
        ])
        .split(area);

    let focus = workbench.store.state().focus;

    let nav_block = panel_block(" Explorer ".to_string(), focus == FocusTarget::Navigator, workbench);
    let nav_inner = nav_block.inner(columns[0]);
    frame.render_widget(nav_block, columns[0]);
    workbench.last_navigator_area = Some(nav_inner);
    render_navigator(workbench, frame, nav_inner);

    let content_title = match workbench.store.state().workspace.active() {
        Some(doc) => format!(" {} ", doc.kind.label()),
        None => " Content ".to_string(),
    };
    let content_block = panel_block(content_title, focus == FocusTarget::Content, workbench);
    let content_inner = content_block.inner(columns[1]);
    frame.render_widget(content_block, columns[1]);
    workbench.last_content_area = Some(content_inner);
    render_content(workbench, frame, content_inner);

    let assistant_block = panel_block(
        " Assistant ".to_string(),
        focus == FocusTarget::Assistant,
        workbench,
    );
    let assistant_inner = assistant_block.inner(columns[2]);
    frame.render_widget(assistant_block, columns[2]);
    workbench.last_assistant_area = Some(assistant_inner);
    let state = workbench.store.state();
    workbench.assistant.render(
        frame,
        assistant_inner,
        &state.assistant,
        focus == FocusTarget::Assistant,
        &workbench.theme,
    );
}

fn render_navigator(workbench: &mut Workbench, frame: &mut Frame, area: Rect) {
    let state = workbench.store.state();
    let rows = state.navigator_rows();
    let selected = state.navigator.selected.min(rows.len().saturating_sub(1));
    workbench.nav_scroll = scroll_to_selection(selected, workbench.nav_scroll, area.height as usize);
    let workspace = &state.workspace;
    workbench.navigator.render(
        frame,
        area,
        &rows,
        Some(selected),
        workbench.nav_scroll,
        |name| workspace.is_open(name),
        &workbench.theme,
    );
}

fn render_content(workbench: &mut Workbench, frame: &mut Frame, area: Rect) {
    workbench.last_tab_row = None;
    if area.width == 0 || area.height == 0 {
        return;
    }

    let state = workbench.store.state();
    let Some(active) = state.workspace.active() else {
        let muted = Style::default().fg(workbench.theme.muted_fg);
        let mut lines = vec![Line::from(Span::styled(NO_FILE_OPEN, muted))];
        if !state.pending_fetches.is_empty() {
            let names: Vec<&str> = state.pending_fetches.iter().map(String::as_str).collect();
            lines.push(Line::from(Span::styled(
                format!("Loading {}…", names.join(", ")),
                muted,
            )));
        }
        frame.render_widget(Paragraph::new(lines), area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);
    let (tabs_area, path_area, body_area) = (chunks[0], chunks[1], chunks[2]);

    let docs = state.workspace.open_documents();
    let layout = compute_tab_row_layout(tabs_area, docs);
    let active_index = state.workspace.active_index();
    let buf = frame.buffer_mut();
    for slot in &layout.slots {
        let doc = &docs[slot.index];
        let style = if Some(slot.index) == active_index {
            Style::default()
                .fg(workbench.theme.accent_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(workbench.theme.muted_fg)
        };
        let title = ellipsize_title(&doc.name, slot.title_width);
        buf.set_stringn(
            slot.title_x,
            tabs_area.y,
            &title,
            slot.title_width as usize,
            style,
        );
        if slot.close_start < slot.end {
            buf.set_stringn(
                slot.close_start,
                tabs_area.y,
                tab_row::CLOSE_GLYPH,
                (slot.end - slot.close_start) as usize,
                Style::default().fg(workbench.theme.muted_fg),
            );
        }
    }

    let mut path_line = active.path.clone();
    if active.kind == DocumentKind::Graph {
        if let Some(instance) = workbench.graph.instance() {
            path_line.push_str(&format!("  zoom {:.2}x", instance.zoom()));
        }
    }
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            path_line,
            Style::default().fg(workbench.theme.muted_fg),
        ))),
        path_area,
    );

    match active.kind {
        DocumentKind::Text => {
            let editor = workbench
                .editors
                .entry(active.name.clone())
                .or_insert_with(|| TextEditor::new(&active.content));
            editor.sync(&active.content);
            editor.render(frame, body_area, &workbench.theme);
        }
        DocumentKind::Graph => match workbench.graph.instance_mut() {
            Some(instance) => {
                workbench
                    .graph_view
                    .render(frame, body_area, instance, &workbench.theme);
            }
            None => frame.render_widget(Paragraph::new("Empty graph"), body_area),
        },
        DocumentKind::Pdf => {
            let muted = Style::default().fg(workbench.theme.muted_fg);
            frame.render_widget(
                Paragraph::new(vec![
                    Line::from(Span::styled(PDF_PLACEHOLDER, muted)),
                    Line::from(active.path.clone()),
                ]),
                body_area,
            );
        }
    }

    workbench.last_tab_row = Some((tabs_area, layout));
}

fn render_status(workbench: &mut Workbench, frame: &mut Frame, area: Rect) {
    workbench.last_status_area = Some(area);
    let state = workbench.store.state();
    let theme = &workbench.theme;

    let line = if let Some(input) = state.upload_prompt.as_deref() {
        Line::from(vec![
            Span::styled(UPLOAD_PROMPT_LABEL, Style::default().fg(theme.accent_fg)),
            Span::raw(input.to_string()),
        ])
    } else if let Some(notice) = state.notice.as_ref() {
        let color = match notice.kind {
            NoticeKind::Info => theme.accent_fg,
            NoticeKind::Error => theme.error_fg,
        };
        Line::from(Span::styled(notice.text.clone(), Style::default().fg(color)))
    } else {
        Line::from(Span::styled(KEY_HINTS, Style::default().fg(theme.muted_fg)))
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_log_overlay(workbench: &Workbench, frame: &mut Frame, area: Rect) {
    let height = area.height.saturating_mul(2) / 3;
    let overlay = util::centered_rect(80, height, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(workbench.theme.focus_border))
        .title(format!(" Logs ({}) ", workbench.logs.len()));
    let inner = block.inner(overlay);

    let visible = inner.height as usize;
    let skip = workbench.logs.len().saturating_sub(visible);
    let lines: Vec<Line> = workbench
        .logs
        .iter()
        .skip(skip)
        .map(|l| Line::from(l.as_str()))
        .collect();

    frame.render_widget(Clear, overlay);
    frame.render_widget(block, overlay);
    frame.render_widget(Paragraph::new(lines), inner);
}

pub(super) fn cursor_position(workbench: &Workbench) -> Option<(u16, u16)> {
    let state = workbench.store.state();
    if let Some(input) = state.upload_prompt.as_deref() {
        let area = workbench.last_status_area?;
        let x = area.x + (UPLOAD_PROMPT_LABEL.width() + input.width()) as u16;
        return (x < area.x + area.width).then_some((x, area.y));
    }
    if workbench.show_logs {
        return None;
    }

    match state.focus {
        FocusTarget::Content => {
            let doc = state.workspace.active()?;
            if doc.kind != DocumentKind::Text {
                return None;
            }
            workbench.editors.get(&doc.name)?.cursor_screen_position()
        }
        FocusTarget::Assistant => workbench.assistant.cursor_position(),
        FocusTarget::Navigator => None,
    }
}
