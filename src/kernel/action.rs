use std::path::PathBuf;

use crate::kernel::state::{AssistantMode, FocusTarget};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    OpenDocument(String),
    CloseDocument(String),
    CloseActiveDocument,
    SetActiveDocument(String),
    CycleActiveDocument {
        delta: isize,
    },
    UpdateContent {
        name: String,
        content: String,
    },
    DocumentFetched {
        name: String,
        content: String,
    },
    DocumentFetchFailed {
        name: String,
    },
    DocumentSaved {
        name: String,
        success: bool,
    },
    UploadPdf {
        path: PathBuf,
    },
    UploadFinished {
        file_name: String,
        success: bool,
    },
    RefreshUploads,
    UploadsListed {
        files: Vec<String>,
    },
    DismissNotice,
    SetFocus(FocusTarget),
    CycleFocus {
        reverse: bool,
    },
    NavigatorMoveSelection {
        delta: isize,
    },
    NavigatorActivate,
    NavigatorClickRow {
        row: usize,
    },
    GraphNodeClicked {
        id: String,
        label: String,
    },
    AssistantAppend(char),
    AssistantBackspace,
    AssistantSubmit,
    AssistantSetMode(AssistantMode),
    AssistantToggleMode,
    AssistantClearContext,
    UploadPromptOpen,
    UploadPromptAppend(char),
    UploadPromptBackspace,
    UploadPromptSubmit,
    UploadPromptCancel,
}
