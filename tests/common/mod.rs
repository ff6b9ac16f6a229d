use assert_cmd::Command;
use std::path::Path;

pub fn todo_cmd() -> Command {
    let mut cmd = Command::cargo_bin("todo").unwrap();
    cmd.env_remove("DB_TYPE");
    cmd.env_remove("DB_PATH");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// A command bound to one backend living in `dir`
pub fn todo_in(dir: &Path, db_type: &str) -> Command {
    let file = match db_type {
        "json" => "todos.json",
        _ => "todos.db",
    };
    let mut cmd = todo_cmd();
    cmd.current_dir(dir)
        .env("DB_TYPE", db_type)
        .env("DB_PATH", dir.join(file));
    cmd
}
