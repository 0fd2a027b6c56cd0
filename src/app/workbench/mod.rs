//! Workbench: owns the store, the async runtime and the per-panel view state.

use super::theme::UiTheme;
use crate::core::event::InputEvent;
use crate::core::view::{EventResult, View};
use crate::kernel::graph::{GraphData, GraphRenderer};
use crate::kernel::services::adapters::{AppMessage, AsyncRuntime};
use crate::kernel::services::ports::Settings;
use crate::kernel::{Action as KernelAction, AppState, DocumentKind, FocusTarget, Store};
use crate::views::{AssistantView, GraphView, NavigatorView, TabRowLayout, TextEditor};
use ratatui::layout::Rect;
use ratatui::Frame;
use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver};

mod input;
mod render;
mod util;

const HEADER_HEIGHT: u16 = 1;
const STATUS_HEIGHT: u16 = 1;
const NAVIGATOR_WIDTH_PERCENT: u16 = 20;
const CONTENT_WIDTH_PERCENT: u16 = 50;
const LOG_BUFFER_CAP: usize = 2000;
const MAX_LOG_DRAIN_PER_TICK: usize = 1024;

pub struct Workbench {
    store: Store,
    runtime: AsyncRuntime,
    theme: UiTheme,
    graph: GraphRenderer,
    /// Text buffers of open text documents, keyed by document name.
    editors: FxHashMap<String, TextEditor>,
    navigator: NavigatorView,
    nav_scroll: usize,
    graph_view: GraphView,
    assistant: AssistantView,
    log_rx: Option<Receiver<String>>,
    logs: VecDeque<String>,
    show_logs: bool,
    last_navigator_area: Option<Rect>,
    last_content_area: Option<Rect>,
    last_assistant_area: Option<Rect>,
    last_tab_row: Option<(Rect, TabRowLayout)>,
    last_status_area: Option<Rect>,
}

impl Workbench {
    pub fn new(runtime: AsyncRuntime, settings: &Settings, log_rx: Option<Receiver<String>>) -> Self {
        let mut theme = UiTheme::default();
        theme.apply_settings(&settings.theme);

        let mut workbench = Self {
            store: Store::new(AppState::default()),
            runtime,
            theme,
            graph: GraphRenderer::new(settings.graph.options()),
            editors: FxHashMap::default(),
            navigator: NavigatorView::new(),
            nav_scroll: 0,
            graph_view: GraphView::new(),
            assistant: AssistantView::new(),
            log_rx,
            logs: VecDeque::with_capacity(256),
            show_logs: false,
            last_navigator_area: None,
            last_content_area: None,
            last_assistant_area: None,
            last_tab_row: None,
            last_status_area: None,
        };
        let _ = workbench.dispatch_kernel(KernelAction::RefreshUploads);
        workbench
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    pub fn focus(&self) -> FocusTarget {
        self.store.state().focus
    }

    pub fn runtime(&self) -> &AsyncRuntime {
        &self.runtime
    }

    pub fn graph(&self) -> &GraphRenderer {
        &self.graph
    }

    pub fn logs_visible(&self) -> bool {
        self.show_logs
    }

    pub fn editor(&self, name: &str) -> Option<&TextEditor> {
        self.editors.get(name)
    }

    pub fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::DocumentFetched { name, content } => {
                self.dispatch_kernel(KernelAction::DocumentFetched { name, content })
            }
            AppMessage::DocumentFetchFailed { name, error } => {
                tracing::warn!(name = %name, error = %error, "fetch failed");
                self.dispatch_kernel(KernelAction::DocumentFetchFailed { name })
            }
            AppMessage::DocumentSaved { name, success } => {
                self.dispatch_kernel(KernelAction::DocumentSaved { name, success })
            }
            AppMessage::UploadFinished { file_name, success } => {
                self.dispatch_kernel(KernelAction::UploadFinished { file_name, success })
            }
            AppMessage::UploadsListed { files } => {
                self.dispatch_kernel(KernelAction::UploadsListed { files })
            }
            AppMessage::UploadsListFailed { error } => {
                tracing::warn!(error = %error, "listing uploads failed");
                false
            }
        }
    }

    /// Drains pending log lines (called by the main loop).
    pub fn tick(&mut self) -> bool {
        let Some(rx) = self.log_rx.take() else {
            return false;
        };

        let mut changed = false;
        let mut drained = 0usize;
        let mut disconnected = false;

        loop {
            match rx.try_recv() {
                Ok(line) => {
                    changed = true;
                    drained += 1;
                    self.logs.push_back(line);
                    while self.logs.len() > LOG_BUFFER_CAP {
                        self.logs.pop_front();
                    }
                    if drained >= MAX_LOG_DRAIN_PER_TICK {
                        break;
                    }
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    disconnected = true;
                    break;
                }
            }
        }

        if !disconnected {
            self.log_rx = Some(rx);
        }

        changed && self.show_logs
    }

    /// Aborts every in-flight request; called once before exit.
    pub fn shutdown(&mut self) {
        self.runtime.cancel_all();
    }

    pub(super) fn dispatch_kernel(&mut self, action: KernelAction) -> bool {
        let result = self.store.dispatch(action);
        for effect in result.effects {
            self.runtime.run_effect(effect);
        }
        if result.state_changed {
            self.sync_views();
        }
        result.state_changed
    }

    /// Aligns view-side state (graph instance, text buffers) with the workspace.
    fn sync_views(&mut self) {
        let workspace = &self.store.state().workspace;
        self.editors.retain(|name, _| workspace.is_open(name));

        match workspace.active() {
            Some(doc) if doc.kind == DocumentKind::Graph => {
                let data = GraphData::parse(&doc.content);
                self.graph.sync(&data);
            }
            _ => self.graph.teardown(),
        }
    }
}

impl View for Workbench {
    fn handle_input(&mut self, event: &InputEvent) -> EventResult {
        input::handle_input(self, event)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        render::render(self, frame, area);
    }

    fn cursor_position(&self) -> Option<(u16, u16)> {
        render::cursor_position(self)
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/app/workbench.rs"]
mod tests;
