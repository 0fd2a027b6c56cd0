//! Panel views: pure rendering plus hit testing against the last drawn area.

pub mod assistant;
pub mod graph_view;
pub mod navigator;
pub mod tab_row;
pub mod text_editor;

pub use assistant::{AssistantHit, AssistantView};
pub use graph_view::GraphView;
pub use navigator::{scroll_to_selection, NavigatorView};
pub use tab_row::{compute_tab_row_layout, ellipsize_title, TabHit, TabRowLayout, TabRowSlot};
pub use text_editor::{CursorMove, TextEditor};
