//! Terminal integration (crossterm setup/teardown and signal handling).

pub mod terminal_guard;

pub use terminal_guard::{
    CrosstermTerminalOps, TerminalGuard, TerminalOps, TerminalRestorer, TerminationSignal,
};
