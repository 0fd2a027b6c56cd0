use std::path::PathBuf;

use super::state::{AssistantMode, NavRowKind, Notice};
use super::{Action, AppState, Effect};

pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
}

impl DispatchResult {
    fn changed(state_changed: bool) -> Self {
        Self {
            effects: Vec::new(),
            state_changed,
        }
    }

    fn unchanged() -> Self {
        Self::changed(false)
    }
}

/// Sole owner of [`AppState`]; actions are the only way to mutate it.
pub struct Store {
    state: AppState,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        match action {
            Action::OpenDocument(name) => self.open_document(&name),
            Action::CloseDocument(name) => {
                let changed = self.state.workspace.close(&name);
                if changed {
                    tracing::debug!(name = %name, "document closed");
                }
                DispatchResult::changed(changed)
            }
            Action::CloseActiveDocument => {
                let active = self.state.workspace.active_name().map(str::to_string);
                match active {
                    Some(name) => DispatchResult::changed(self.state.workspace.close(&name)),
                    None => DispatchResult::unchanged(),
                }
            }
            Action::SetActiveDocument(name) => {
                DispatchResult::changed(self.state.workspace.set_active(&name))
            }
            Action::CycleActiveDocument { delta } => {
                DispatchResult::changed(self.state.workspace.cycle_active(delta))
            }
            Action::UpdateContent { name, content } => self.update_content(name, content),
            Action::DocumentFetched { name, content } => self.document_fetched(&name, &content),
            Action::DocumentFetchFailed { name } => {
                let was_pending = self.state.pending_fetches.remove(&name);
                tracing::warn!(name = %name, "fetch failed, document not opened");
                DispatchResult::changed(was_pending)
            }
            Action::DocumentSaved { name, success } => {
                if success {
                    tracing::debug!(name = %name, "document saved");
                } else {
                    tracing::warn!(name = %name, "document save failed");
                }
                DispatchResult::unchanged()
            }
            Action::UploadPdf { path } => self.upload_pdf(path),
            Action::UploadFinished { file_name, success } => {
                tracing::info!(file = %file_name, success, "upload finished");
                let (notice, effects) = if success {
                    (Notice::info("Upload successful!"), vec![Effect::ListUploads])
                } else {
                    (Notice::error("Upload failed!"), Vec::new())
                };
                self.state.notice = Some(notice);
                DispatchResult {
                    effects,
                    state_changed: true,
                }
            }
            Action::RefreshUploads => DispatchResult {
                effects: vec![Effect::ListUploads],
                state_changed: false,
            },
            Action::UploadsListed { files } => {
                if self.state.uploads == files {
                    return DispatchResult::unchanged();
                }
                self.state.uploads = files;
                self.clamp_navigator_selection();
                DispatchResult::changed(true)
            }
            Action::DismissNotice => DispatchResult::changed(self.state.notice.take().is_some()),
            Action::SetFocus(target) => {
                let prev = self.state.focus;
                self.state.focus = target;
                DispatchResult::changed(prev != target)
            }
            Action::CycleFocus { reverse } => {
                self.state.focus = self.state.focus.next(reverse);
                DispatchResult::changed(true)
            }
            Action::NavigatorMoveSelection { delta } => {
                let len = self.state.navigator_rows().len();
                if len == 0 {
                    return DispatchResult::unchanged();
                }
                let prev = self.state.navigator.selected;
                let next = (prev as isize + delta).clamp(0, len as isize - 1) as usize;
                self.state.navigator.selected = next;
                DispatchResult::changed(next != prev)
            }
            Action::NavigatorActivate => {
                let selected = self.state.navigator.selected;
                self.activate_navigator_row(selected)
            }
            Action::NavigatorClickRow { row } => {
                let len = self.state.navigator_rows().len();
                if row >= len {
                    return DispatchResult::unchanged();
                }
                self.state.navigator.selected = row;
                let mut result = self.activate_navigator_row(row);
                result.state_changed = true;
                result
            }
            Action::GraphNodeClicked { id, label } => {
                tracing::info!(node = %id, "graph node clicked");
                let ctx = &mut self.state.assistant.context;
                if !ctx.contains(&label) {
                    ctx.push(label.clone());
                }
                self.state.notice = Some(Notice::info(format!("Selected node: {label}")));
                DispatchResult::changed(true)
            }
            Action::AssistantAppend(ch) => {
                self.state.assistant.prompt.push(ch);
                DispatchResult::changed(true)
            }
            Action::AssistantBackspace => {
                DispatchResult::changed(self.state.assistant.prompt.pop().is_some())
            }
            Action::AssistantSubmit => {
                let prompt = std::mem::take(&mut self.state.assistant.prompt);
                if prompt.trim().is_empty() {
                    return DispatchResult::changed(!prompt.is_empty());
                }
                tracing::info!(
                    mode = self.state.assistant.mode.label(),
                    context = self.state.assistant.context.len(),
                    "assistant prompt submitted"
                );
                self.state.notice = Some(Notice::info("Assistant is not connected"));
                DispatchResult::changed(true)
            }
            Action::AssistantSetMode(mode) => {
                let prev = self.state.assistant.mode;
                self.state.assistant.mode = mode;
                DispatchResult::changed(prev != mode)
            }
            Action::AssistantToggleMode => {
                self.state.assistant.mode = match self.state.assistant.mode {
                    AssistantMode::Agent => AssistantMode::Ask,
                    AssistantMode::Ask => AssistantMode::Agent,
                };
                DispatchResult::changed(true)
            }
            Action::AssistantClearContext => {
                let had = !self.state.assistant.context.is_empty();
                self.state.assistant.context.clear();
                DispatchResult::changed(had)
            }
            Action::UploadPromptOpen => {
                if self.state.upload_prompt.is_some() {
                    return DispatchResult::unchanged();
                }
                self.state.upload_prompt = Some(String::new());
                DispatchResult::changed(true)
            }
            Action::UploadPromptAppend(ch) => match self.state.upload_prompt.as_mut() {
                Some(input) => {
                    input.push(ch);
                    DispatchResult::changed(true)
                }
                None => DispatchResult::unchanged(),
            },
            Action::UploadPromptBackspace => match self.state.upload_prompt.as_mut() {
                Some(input) => DispatchResult::changed(input.pop().is_some()),
                None => DispatchResult::unchanged(),
            },
            Action::UploadPromptSubmit => match self.state.upload_prompt.take() {
                Some(input) if !input.trim().is_empty() => {
                    let mut result = self.upload_pdf(PathBuf::from(input.trim()));
                    result.state_changed = true;
                    result
                }
                Some(_) => DispatchResult::changed(true),
                None => DispatchResult::unchanged(),
            },
            Action::UploadPromptCancel => {
                DispatchResult::changed(self.state.upload_prompt.take().is_some())
            }
        }
    }

    fn open_document(&mut self, name: &str) -> DispatchResult {
        if let Some(doc) = self.state.registry.get(name) {
            let doc = doc.clone();
            let changed = self.state.workspace.open(doc);
            tracing::debug!(name = %name, "document opened");
            return DispatchResult::changed(changed);
        }

        if self.state.registry.reserved(name).is_some() {
            if self.state.pending_fetches.contains(name) {
                tracing::debug!(name = %name, "fetch already in flight");
                return DispatchResult::unchanged();
            }
            self.state.pending_fetches.insert(name.to_string());
            return DispatchResult {
                effects: vec![Effect::FetchDocument {
                    name: name.to_string(),
                }],
                state_changed: true,
            };
        }

        tracing::debug!(name = %name, "open ignored, unknown document");
        DispatchResult::unchanged()
    }

    fn document_fetched(&mut self, name: &str, content: &str) -> DispatchResult {
        let was_pending = self.state.pending_fetches.remove(name);
        let Some(reserved) = self.state.registry.reserved(name) else {
            tracing::warn!(name = %name, "fetched document is not a reserved name");
            return DispatchResult::changed(was_pending);
        };
        let Some(doc) = reserved.synthesize(content) else {
            return DispatchResult::changed(was_pending);
        };
        let changed = self.state.workspace.open(doc);
        tracing::debug!(name = %name, "fetched document opened");
        DispatchResult::changed(changed || was_pending)
    }

    fn update_content(&mut self, name: String, content: String) -> DispatchResult {
        if !self.state.workspace.is_open(&name) {
            return DispatchResult::unchanged();
        }
        let persist = self.state.registry.persists(&name);
        let changed = self.state.workspace.update_content(&name, content.clone());
        let effects = if changed && persist {
            vec![Effect::SaveDocument { name, content }]
        } else {
            Vec::new()
        };
        DispatchResult {
            effects,
            state_changed: changed,
        }
    }

    fn upload_pdf(&mut self, path: PathBuf) -> DispatchResult {
        tracing::info!(path = %path.display(), "upload requested");
        DispatchResult {
            effects: vec![Effect::UploadFile { path }],
            state_changed: false,
        }
    }

    fn activate_navigator_row(&mut self, row: usize) -> DispatchResult {
        let rows = self.state.navigator_rows();
        match rows.get(row).map(|r| &r.kind) {
            Some(NavRowKind::Document { name, .. }) => {
                let name = name.clone();
                self.open_document(&name)
            }
            _ => DispatchResult::unchanged(),
        }
    }

    fn clamp_navigator_selection(&mut self) {
        let len = self.state.navigator_rows().len();
        let nav = &mut self.state.navigator;
        nav.selected = nav.selected.min(len.saturating_sub(1));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
