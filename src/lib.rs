//! todo - Command-line todo list manager
//!
//! Keeps a list of todo items in a swappable backend (a JSON file or a SQLite
//! database) and exposes add/remove/list/toggle through a small command registry.

pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::TodoError;
