//! Command-line interface for the storebot client.

pub mod args;
pub mod presenter;

pub use args::{parse_args, CliCommand, RunOptions};
pub use presenter::TerminalPresenter;
