//! CLI argument definitions

use crate::infrastructure::StoreConfig;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "todo")]
#[command(about = "Command-line todo list manager", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Storage backend (sqlite, json)
    #[arg(long, env = "DB_TYPE", value_name = "TYPE")]
    pub db_type: Option<String>,

    /// Database file (default: todos.db or todos.json)
    #[arg(long, env = "DB_PATH", value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    /// Command name followed by its arguments (see `todo help`)
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub args: Vec<String>,
}

impl Cli {
    /// Storage settings resolved from flags and environment
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::from_values(self.db_type.as_deref(), self.db_path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::StorageKind;

    #[test]
    fn test_command_vector_is_collected() {
        let cli = Cli::try_parse_from(["todo", "add", "buy milk"]).unwrap();
        assert_eq!(cli.args, vec!["add", "buy milk"]);
    }

    #[test]
    fn test_hyphen_values_pass_through() {
        let cli = Cli::try_parse_from(["todo", "remove", "-3"]).unwrap();
        assert_eq!(cli.args, vec!["remove", "-3"]);
    }

    #[test]
    fn test_flags_select_backend() {
        let cli = Cli::try_parse_from([
            "todo",
            "--db-type",
            "json",
            "--db-path",
            "mine.json",
            "list",
        ])
        .unwrap();

        let config = cli.store_config();
        assert_eq!(config.kind, StorageKind::Json);
        assert_eq!(config.path, PathBuf::from("mine.json"));
        assert_eq!(cli.args, vec!["list"]);
    }

    #[test]
    fn test_no_arguments() {
        let cli = Cli::try_parse_from(["todo"]).unwrap();
        assert!(cli.args.is_empty());
    }
}
