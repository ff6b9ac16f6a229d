//! Output formatting utilities

use crate::cli::registry::Command;
use crate::domain::Item;

/// Format the todo list for display
pub fn format_item_list(items: &[Item]) -> String {
    if items.is_empty() {
        return "No todos found\n".to_string();
    }

    let mut output = String::new();
    for item in items {
        output.push_str(&format!("  {}\n", item));
    }
    output
}

/// One line per registered command, name column padded
pub fn format_command_list(commands: &[Command]) -> String {
    let mut output = String::from("Commands:\n");
    for cmd in commands {
        output.push_str(&format!("  {:<18}{}\n", cmd.name, cmd.description));
    }
    output
}

/// Overview shown by `help` and on a missing command name
pub fn format_help(commands: &[Command]) -> String {
    format!(
        "Usage: todo <command> [...args]\n\n{}",
        format_command_list(commands)
    )
}

pub fn format_unknown_command(name: &str, commands: &[Command]) -> String {
    format!(
        "Unknown command '{}'\n\n{}",
        name,
        format_command_list(commands)
    )
}

/// Usage of a single command
pub fn format_command_usage(cmd: &Command) -> String {
    format!("Usage: {}\n\n{}\n", cmd.usage, cmd.description)
}
