//! tripane: a three-panel document workspace.
//!
//! - kernel: headless state (registry, open documents, graph model) and service ports/adapters
//! - core/views/app/tui: the terminal frontend, behind the `tui` feature

pub mod cli;
pub mod kernel;

#[cfg(feature = "tui")]
pub mod app;
#[cfg(feature = "tui")]
pub mod core;
#[cfg(feature = "tui")]
pub mod tui;
#[cfg(feature = "tui")]
pub mod views;
