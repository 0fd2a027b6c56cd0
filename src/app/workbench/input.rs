use super::util;
use super::Workbench;
use crate::core::event::{
    InputEvent, Key, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use crate::core::view::EventResult;
use crate::kernel::graph::GraphInstance;
use crate::kernel::{Action as KernelAction, DocumentKind, FocusTarget};
use crate::views::{AssistantHit, CursorMove, TabHit, TextEditor};

/// Graph pan step in viewport units.
const PAN_STEP: f64 = 24.0;

fn consumed(changed: bool) -> EventResult {
    if changed {
        EventResult::Consumed
    } else {
        EventResult::Ignored
    }
}

pub(super) fn handle_input(workbench: &mut Workbench, event: &InputEvent) -> EventResult {
    match event {
        InputEvent::Key(key_event) => {
            if key_event.kind == KeyEventKind::Release {
                return EventResult::Ignored;
            }
            handle_key_event(workbench, key_event)
        }
        InputEvent::Mouse(mouse_event) => handle_mouse_event(workbench, mouse_event),
        InputEvent::Paste(text) => handle_paste(workbench, text),
        InputEvent::Resize(_, _) => EventResult::Consumed,
        _ => EventResult::Ignored,
    }
}

fn handle_key_event(workbench: &mut Workbench, event: &KeyEvent) -> EventResult {
    let key = Key::from(*event);

    if workbench.store.state().upload_prompt.is_some() {
        return handle_upload_prompt_key(workbench, &key);
    }

    if let Some(result) = handle_global_key(workbench, &key) {
        return result;
    }

    let focus = workbench.store.state().focus;
    match focus {
        FocusTarget::Navigator => handle_navigator_key(workbench, &key),
        FocusTarget::Content => handle_content_key(workbench, &key),
        FocusTarget::Assistant => handle_assistant_key(workbench, &key),
    }
}

fn handle_global_key(workbench: &mut Workbench, key: &Key) -> Option<EventResult> {
    let ctrl = key.has_ctrl();
    let result = match key.code {
        KeyCode::Char('q') if ctrl => {
            workbench.shutdown();
            EventResult::Quit
        }
        KeyCode::Char('l') if ctrl => {
            workbench.show_logs = !workbench.show_logs;
            EventResult::Consumed
        }
        KeyCode::Char('u') if ctrl => {
            consumed(workbench.dispatch_kernel(KernelAction::UploadPromptOpen))
        }
        KeyCode::Char('w') if ctrl => {
            consumed(workbench.dispatch_kernel(KernelAction::CloseActiveDocument))
        }
        KeyCode::PageDown if ctrl => {
            consumed(workbench.dispatch_kernel(KernelAction::CycleActiveDocument { delta: 1 }))
        }
        KeyCode::PageUp if ctrl => {
            consumed(workbench.dispatch_kernel(KernelAction::CycleActiveDocument { delta: -1 }))
        }
        KeyCode::Tab => consumed(workbench.dispatch_kernel(KernelAction::CycleFocus {
            reverse: key.modifiers.contains(KeyModifiers::SHIFT),
        })),
        KeyCode::BackTab => {
            consumed(workbench.dispatch_kernel(KernelAction::CycleFocus { reverse: true }))
        }
        KeyCode::Esc if workbench.show_logs => {
            workbench.show_logs = false;
            EventResult::Consumed
        }
        KeyCode::Esc if workbench.store.state().notice.is_some() => {
            consumed(workbench.dispatch_kernel(KernelAction::DismissNotice))
        }
        _ => return None,
    };
    Some(result)
}

fn handle_upload_prompt_key(workbench: &mut Workbench, key: &Key) -> EventResult {
    let action = match key.code {
        KeyCode::Enter => KernelAction::UploadPromptSubmit,
        KeyCode::Esc => KernelAction::UploadPromptCancel,
        KeyCode::Backspace => KernelAction::UploadPromptBackspace,
        KeyCode::Char(ch) if !key.has_ctrl() => KernelAction::UploadPromptAppend(typed_char(key, ch)),
        _ => return EventResult::Consumed,
    };
    let _ = workbench.dispatch_kernel(action);
    EventResult::Consumed
}

fn handle_navigator_key(workbench: &mut Workbench, key: &Key) -> EventResult {
    let action = match key.code {
        KeyCode::Up => KernelAction::NavigatorMoveSelection { delta: -1 },
        KeyCode::Down => KernelAction::NavigatorMoveSelection { delta: 1 },
        KeyCode::PageUp => KernelAction::NavigatorMoveSelection { delta: -10 },
        KeyCode::PageDown => KernelAction::NavigatorMoveSelection { delta: 10 },
        KeyCode::Enter => KernelAction::NavigatorActivate,
        _ => return EventResult::Ignored,
    };
    let changed = workbench.dispatch_kernel(action);
    if changed && key.code == KeyCode::Enter {
        let _ = workbench.dispatch_kernel(KernelAction::SetFocus(FocusTarget::Content));
    }
    EventResult::Consumed
}

fn handle_content_key(workbench: &mut Workbench, key: &Key) -> EventResult {
    let Some(kind) = workbench.store.state().workspace.active().map(|d| d.kind) else {
        return EventResult::Ignored;
    };
    match kind {
        DocumentKind::Text => handle_text_key(workbench, key),
        DocumentKind::Graph => match workbench.graph.instance_mut() {
            Some(instance) => handle_graph_key(instance, key),
            None => EventResult::Ignored,
        },
        DocumentKind::Pdf => EventResult::Ignored,
    }
}

fn handle_graph_key(instance: &mut GraphInstance, key: &Key) -> EventResult {
    match key.code {
        KeyCode::Char('+') | KeyCode::Char('=') => {
            instance.zoom_in();
        }
        KeyCode::Char('-') | KeyCode::Char('_') => {
            instance.zoom_out();
        }
        KeyCode::Char('0') => instance.reset_view(),
        KeyCode::Left => instance.pan_by(PAN_STEP, 0.0),
        KeyCode::Right => instance.pan_by(-PAN_STEP, 0.0),
        KeyCode::Up => instance.pan_by(0.0, PAN_STEP),
        KeyCode::Down => instance.pan_by(0.0, -PAN_STEP),
        _ => return EventResult::Ignored,
    }
    EventResult::Consumed
}

/// Runs `edit` against the active text document's buffer and publishes the result.
fn edit_active_text(workbench: &mut Workbench, edit: impl FnOnce(&mut TextEditor) -> bool) -> bool {
    let Some(doc) = workbench.store.state().workspace.active() else {
        return false;
    };
    if doc.kind != DocumentKind::Text {
        return false;
    }
    let name = doc.name.clone();
    let editor = workbench
        .editors
        .entry(name.clone())
        .or_insert_with(|| TextEditor::new(&doc.content));
    editor.sync(&doc.content);
    if !edit(editor) {
        return false;
    }
    let content = editor.take_published();
    let _ = workbench.dispatch_kernel(KernelAction::UpdateContent { name, content });
    true
}

fn handle_text_key(workbench: &mut Workbench, key: &Key) -> EventResult {
    let movement = match key.code {
        KeyCode::Left => Some(CursorMove::Left),
        KeyCode::Right => Some(CursorMove::Right),
        KeyCode::Up => Some(CursorMove::Up),
        KeyCode::Down => Some(CursorMove::Down),
        KeyCode::Home => Some(CursorMove::Home),
        KeyCode::End => Some(CursorMove::End),
        KeyCode::PageUp => Some(CursorMove::PageUp),
        KeyCode::PageDown => Some(CursorMove::PageDown),
        _ => None,
    };
    if let Some(movement) = movement {
        let _ = edit_active_text(workbench, |editor| {
            editor.move_cursor(movement);
            false
        });
        return EventResult::Consumed;
    }

    match key.code {
        KeyCode::Char(ch) if !key.has_ctrl() => {
            let ch = typed_char(key, ch);
            edit_active_text(workbench, |editor| editor.insert_char(ch));
        }
        KeyCode::Enter => {
            edit_active_text(workbench, TextEditor::insert_newline);
        }
        KeyCode::Backspace => {
            edit_active_text(workbench, TextEditor::delete_backward);
        }
        KeyCode::Delete => {
            edit_active_text(workbench, TextEditor::delete_forward);
        }
        _ => return EventResult::Ignored,
    }
    EventResult::Consumed
}

fn handle_assistant_key(workbench: &mut Workbench, key: &Key) -> EventResult {
    let action = match key.code {
        KeyCode::Char('t') if key.has_ctrl() => KernelAction::AssistantToggleMode,
        KeyCode::Char('k') if key.has_ctrl() => KernelAction::AssistantClearContext,
        KeyCode::Char(ch) if !key.has_ctrl() => KernelAction::AssistantAppend(typed_char(key, ch)),
        KeyCode::Backspace => KernelAction::AssistantBackspace,
        KeyCode::Enter => KernelAction::AssistantSubmit,
        _ => return EventResult::Ignored,
    };
    let _ = workbench.dispatch_kernel(action);
    EventResult::Consumed
}

/// Undoes the uppercase folding done by [`Key::from`].
fn typed_char(key: &Key, ch: char) -> char {
    if key.modifiers.contains(KeyModifiers::SHIFT) {
        ch.to_ascii_uppercase()
    } else {
        ch
    }
}

fn handle_paste(workbench: &mut Workbench, text: &str) -> EventResult {
    let prompt_open = workbench.store.state().upload_prompt.is_some();
    if prompt_open {
        for ch in text.chars().filter(|c| !c.is_control()) {
            let _ = workbench.dispatch_kernel(KernelAction::UploadPromptAppend(ch));
        }
        return EventResult::Consumed;
    }
    let focus = workbench.store.state().focus;
    match focus {
        FocusTarget::Content => {
            consumed(edit_active_text(workbench, |editor| editor.insert_str(text)))
        }
        FocusTarget::Assistant => {
            for ch in text.chars().filter(|c| !c.is_control()) {
                let _ = workbench.dispatch_kernel(KernelAction::AssistantAppend(ch));
            }
            EventResult::Consumed
        }
        FocusTarget::Navigator => EventResult::Ignored,
    }
}

fn handle_mouse_event(workbench: &mut Workbench, event: &MouseEvent) -> EventResult {
    let (x, y) = (event.column, event.row);
    let inside = |area: Option<ratatui::layout::Rect>| {
        area.is_some_and(|a| util::rect_contains(a, x, y))
    };

    let target = if inside(workbench.last_navigator_area) {
        FocusTarget::Navigator
    } else if inside(workbench.last_content_area) {
        FocusTarget::Content
    } else if inside(workbench.last_assistant_area) {
        FocusTarget::Assistant
    } else {
        return EventResult::Ignored;
    };

    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let mut changed = workbench.dispatch_kernel(KernelAction::SetFocus(target));
            changed |= match target {
                FocusTarget::Navigator => click_navigator(workbench, x, y),
                FocusTarget::Content => click_content(workbench, x, y),
                FocusTarget::Assistant => click_assistant(workbench, x, y),
            };
            consumed(changed)
        }
        MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
            let delta: isize = if event.kind == MouseEventKind::ScrollUp { -3 } else { 3 };
            scroll(workbench, target, delta)
        }
        _ => EventResult::Ignored,
    }
}

fn click_navigator(workbench: &mut Workbench, x: u16, y: u16) -> bool {
    match workbench.navigator.hit_test_row(x, y, workbench.nav_scroll) {
        Some(row) => workbench.dispatch_kernel(KernelAction::NavigatorClickRow { row }),
        None => false,
    }
}

fn click_content(workbench: &mut Workbench, x: u16, y: u16) -> bool {
    if let Some((tabs_area, layout)) = workbench.last_tab_row.as_ref() {
        if util::rect_contains(*tabs_area, x, y) {
            let Some(hit) = layout.hit_test(x) else {
                return false;
            };
            let docs = workbench.store.state().workspace.open_documents();
            let action = match hit {
                TabHit::Select(i) => docs.get(i).map(|d| KernelAction::SetActiveDocument(d.name.clone())),
                TabHit::Close(i) => docs.get(i).map(|d| KernelAction::CloseDocument(d.name.clone())),
            };
            return action.is_some_and(|a| workbench.dispatch_kernel(a));
        }
    }

    let Some(kind) = workbench.store.state().workspace.active().map(|d| d.kind) else {
        return false;
    };
    match kind {
        DocumentKind::Graph => {
            let Some(instance) = workbench.graph.instance() else {
                return false;
            };
            let Some(id) = workbench.graph_view.hit_test(instance, x, y) else {
                return false;
            };
            let label = instance
                .data()
                .node(&id)
                .map(|n| n.label.clone())
                .unwrap_or_else(|| id.clone());
            workbench.dispatch_kernel(KernelAction::GraphNodeClicked { id, label })
        }
        DocumentKind::Text => {
            let _ = edit_active_text(workbench, |editor| {
                editor.click(x, y);
                false
            });
            true
        }
        DocumentKind::Pdf => false,
    }
}

fn click_assistant(workbench: &mut Workbench, x: u16, y: u16) -> bool {
    match workbench.assistant.hit_test(x, y) {
        Some(AssistantHit::Mode(mode)) => {
            workbench.dispatch_kernel(KernelAction::AssistantSetMode(mode))
        }
        Some(AssistantHit::ClearContext) => {
            workbench.dispatch_kernel(KernelAction::AssistantClearContext)
        }
        Some(AssistantHit::Prompt) | None => false,
    }
}

fn scroll(workbench: &mut Workbench, target: FocusTarget, delta: isize) -> EventResult {
    match target {
        FocusTarget::Navigator => consumed(
            workbench.dispatch_kernel(KernelAction::NavigatorMoveSelection { delta }),
        ),
        FocusTarget::Content => {
            let kind = workbench.store.state().workspace.active().map(|d| d.kind);
            match kind {
                Some(DocumentKind::Graph) => match workbench.graph.instance_mut() {
                    Some(instance) => {
                        if delta < 0 {
                            instance.zoom_in();
                        } else {
                            instance.zoom_out();
                        }
                        EventResult::Consumed
                    }
                    None => EventResult::Ignored,
                },
                Some(DocumentKind::Text) => {
                    let _ = edit_active_text(workbench, |editor| {
                        editor.scroll_by(delta);
                        false
                    });
                    EventResult::Consumed
                }
                _ => EventResult::Ignored,
            }
        }
        FocusTarget::Assistant => EventResult::Ignored,
    }
}
