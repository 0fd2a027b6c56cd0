//! Application layer: the three-panel workbench and its theme.

pub mod theme;
pub mod workbench;

pub use workbench::Workbench;
