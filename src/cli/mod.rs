//! Command-line entry point: global flags, one-shot subcommands and TUI launch
pub mod commands;
mod output;

pub use commands::{Cli, Commands, HistoryAction, run};
