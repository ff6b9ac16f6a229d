//! CLI layer - Command-line interface

pub mod commands;
pub mod output;
pub mod registry;

pub use commands::Cli;
pub use registry::{dispatch, dispatch_and_close, find_command, Command, COMMANDS};
