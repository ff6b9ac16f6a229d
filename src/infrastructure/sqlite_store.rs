//! SQLite backend
//!
//! Every operation is a single statement executed immediately; IDs come from
//! the `AUTOINCREMENT` primary key, so SQLite itself guarantees they are never
//! reused.

use crate::domain::{Item, TodoId};
use crate::error::{Result, TodoError};
use crate::infrastructure::storage::{validate_title, TodoStore};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS todos (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        done INTEGER DEFAULT 0
    );
";

/// SQLite-backed implementation of TodoStore
pub struct SqliteStore {
    conn: Option<Connection>,
}

impl SqliteStore {
    /// Open (or create) a database at the given path
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| {
            TodoError::StorageUnavailable(format!("cannot open {}: {}", path.display(), e))
        })?;
        log::debug!("opened sqlite database {}", path.display());
        Self::init_with_connection(conn)
    }

    /// Create an in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| TodoError::StorageUnavailable(format!("open_in_memory: {}", e)))?;
        Self::init_with_connection(conn)
    }

    fn init_with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)
            .map_err(|e| TodoError::StorageUnavailable(format!("init_schema: {}", e)))?;
        Ok(SqliteStore { conn: Some(conn) })
    }

    fn conn(&self) -> Result<&Connection> {
        self.conn.as_ref().ok_or_else(|| {
            TodoError::StorageUnavailable("database connection is already closed".to_string())
        })
    }
}

/// SQLite integers are signed; IDs beyond i64 cannot exist in the table
fn sql_id(id: TodoId) -> Option<i64> {
    i64::try_from(id).ok()
}

fn row_to_item(row: &Row<'_>) -> rusqlite::Result<Item> {
    let id: i64 = row.get(0)?;
    let done: Option<i64> = row.get(2)?;
    Ok(Item {
        id: id as TodoId,
        title: row.get(1)?,
        done: done.unwrap_or(0) != 0,
    })
}

/// A single-row statement may touch zero or one rows, never more
fn check_single_row(operation: &str, affected: usize) -> Result<bool> {
    match affected {
        0 => Ok(false),
        1 => Ok(true),
        n => Err(TodoError::Consistency(format!(
            "expected {} to affect 0 or 1 todos, but it affected {}",
            operation, n
        ))),
    }
}

impl TodoStore for SqliteStore {
    fn get_all(&self) -> Result<Vec<Item>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT id, title, done FROM todos ORDER BY id")?;
        let items = stmt
            .query_map([], row_to_item)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(items)
    }

    fn get_one(&self, id: TodoId) -> Result<Item> {
        let Some(key) = sql_id(id) else {
            return Err(TodoError::NotFound(id));
        };

        self.conn()?
            .query_row(
                "SELECT id, title, done FROM todos WHERE id = ?1",
                params![key],
                row_to_item,
            )
            .optional()?
            .ok_or(TodoError::NotFound(id))
    }

    fn add(&mut self, title: &str) -> Result<TodoId> {
        validate_title(title)?;
        let conn = self.conn()?;

        conn.execute("INSERT INTO todos (title) VALUES (?1)", params![title])?;
        let id = conn.last_insert_rowid() as TodoId;
        log::debug!("inserted todo {}", id);
        Ok(id)
    }

    fn remove(&mut self, id: TodoId) -> Result<bool> {
        let Some(key) = sql_id(id) else {
            return Ok(false);
        };

        let affected = self
            .conn()?
            .execute("DELETE FROM todos WHERE id = ?1", params![key])?;
        check_single_row("remove", affected)
    }

    fn toggle_done(&mut self, id: TodoId) -> Result<bool> {
        let Some(key) = sql_id(id) else {
            return Ok(false);
        };

        let affected = self.conn()?.execute(
            "UPDATE todos SET done = 1 - COALESCE(done, 0) WHERE id = ?1",
            params![key],
        )?;
        check_single_row("toggle", affected)
    }

    fn close(&mut self) -> Result<()> {
        if let Some(conn) = self.conn.take() {
            conn.close().map_err(|(_, e)| TodoError::Sqlite(e))?;
            log::debug!("closed sqlite database");
        }
        Ok(())
    }
}
