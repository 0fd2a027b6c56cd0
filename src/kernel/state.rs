use std::collections::BTreeSet;

use super::document::DocumentKind;
use super::registry::FileRegistry;
use super::workspace::WorkspaceState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusTarget {
    Navigator,
    #[default]
    Content,
    Assistant,
}

impl FocusTarget {
    pub fn next(self, reverse: bool) -> Self {
        match (self, reverse) {
            (FocusTarget::Navigator, false) => FocusTarget::Content,
            (FocusTarget::Content, false) => FocusTarget::Assistant,
            (FocusTarget::Assistant, false) => FocusTarget::Navigator,
            (FocusTarget::Navigator, true) => FocusTarget::Assistant,
            (FocusTarget::Content, true) => FocusTarget::Navigator,
            (FocusTarget::Assistant, true) => FocusTarget::Content,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssistantMode {
    #[default]
    Agent,
    Ask,
}

impl AssistantMode {
    pub fn label(self) -> &'static str {
        match self {
            AssistantMode::Agent => "Agent",
            AssistantMode::Ask => "Ask",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AssistantState {
    pub prompt: String,
    pub mode: AssistantMode,
    pub context: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// One-shot message shown in the status row until replaced or dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavRowKind {
    Section(&'static str),
    Document { name: String, kind: DocumentKind },
    Upload(String),
    Placeholder(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavRow {
    pub depth: u8,
    pub kind: NavRowKind,
}

impl NavRow {
    fn section(title: &'static str) -> Self {
        Self {
            depth: 0,
            kind: NavRowKind::Section(title),
        }
    }

    fn document(name: &str, kind: DocumentKind) -> Self {
        Self {
            depth: 1,
            kind: NavRowKind::Document {
                name: name.to_string(),
                kind,
            },
        }
    }

    pub fn document_name(&self) -> Option<&str> {
        match &self.kind {
            NavRowKind::Document { name, .. } => Some(name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NavigatorState {
    pub selected: usize,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub registry: FileRegistry,
    pub workspace: WorkspaceState,
    /// Reserved names with a fetch in flight.
    pub pending_fetches: BTreeSet<String>,
    pub uploads: Vec<String>,
    pub notice: Option<Notice>,
    pub focus: FocusTarget,
    pub navigator: NavigatorState,
    pub assistant: AssistantState,
    /// Path being typed for a PDF upload, when the prompt is open.
    pub upload_prompt: Option<String>,
}

impl AppState {
    pub fn new(registry: FileRegistry) -> Self {
        Self {
            registry,
            workspace: WorkspaceState::new(),
            pending_fetches: BTreeSet::new(),
            uploads: Vec::new(),
            notice: None,
            focus: FocusTarget::default(),
            navigator: NavigatorState::default(),
            assistant: AssistantState::default(),
            upload_prompt: None,
        }
    }

    /// Rows of the navigation panel, in display order.
    pub fn navigator_rows(&self) -> Vec<NavRow> {
        let mut rows = vec![NavRow::section("WORKSPACE")];
        rows.extend(
            self.registry
                .documents()
                .iter()
                .filter(|d| d.kind != DocumentKind::Graph)
                .map(|d| NavRow::document(&d.name, d.kind)),
        );

        rows.push(NavRow::section("BUBBLE-MAP"));
        rows.extend(
            self.registry
                .documents()
                .iter()
                .filter(|d| d.kind == DocumentKind::Graph)
                .map(|d| NavRow::document(&d.name, d.kind)),
        );
        rows.extend(
            self.registry
                .reserved_names()
                .filter(|r| r.kind == DocumentKind::Graph)
                .map(|r| NavRow::document(r.name, r.kind)),
        );

        rows.push(NavRow::section("OUTLINE"));
        rows.extend(
            self.registry
                .reserved_names()
                .filter(|r| r.kind != DocumentKind::Graph)
                .map(|r| NavRow::document(r.name, r.kind)),
        );

        rows.push(NavRow::section("UPLOADS"));
        if self.uploads.is_empty() {
            rows.push(NavRow {
                depth: 1,
                kind: NavRowKind::Placeholder("(none)"),
            });
        } else {
            rows.extend(self.uploads.iter().map(|f| NavRow {
                depth: 1,
                kind: NavRowKind::Upload(f.clone()),
            }));
        }

        rows.push(NavRow::section("TIMELINE"));
        rows
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(FileRegistry::default())
    }
}
