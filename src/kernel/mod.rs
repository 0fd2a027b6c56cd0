//! Headless application core (state/action/effect).

pub mod action;
pub mod document;
pub mod effect;
pub mod graph;
pub mod registry;
pub mod services;
pub mod state;
pub mod store;
pub mod workspace;

pub use action::Action;
pub use document::{Document, DocumentKind};
pub use effect::Effect;
pub use registry::{FileRegistry, ReservedName};
pub use state::{
    AppState, AssistantMode, AssistantState, FocusTarget, NavRow, NavRowKind, NavigatorState,
    Notice, NoticeKind,
};
pub use store::{DispatchResult, Store};
pub use workspace::WorkspaceState;
