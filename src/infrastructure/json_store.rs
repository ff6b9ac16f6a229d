//! JSON file backend
//!
//! The file is opened for reading and writing when the store is opened, read
//! in full, and rewritten through the same handle when the store is closed.
//! The ID counter is persisted next to the items so that IDs of removed items
//! are never handed out again.

use crate::domain::{Item, TodoId};
use crate::error::{Result, TodoError};
use crate::infrastructure::storage::{validate_title, TodoStore};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Largest ID either backend can hold (SQLite integers are signed)
pub const MAX_ID: TodoId = i64::MAX as TodoId;

/// Layout written to disk
#[derive(Debug, Serialize)]
struct Document<'a> {
    next_id: TodoId,
    items: &'a [Item],
}

/// Layouts accepted when reading
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredDocument {
    Current { next_id: TodoId, items: Vec<Item> },
    /// A bare array of items, as written by early versions
    Legacy(Vec<Item>),
}

/// File-backed implementation of TodoStore
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    file: File,
    next_id: TodoId,
    items: Vec<Item>,
    closed: bool,
}

fn unavailable(path: &Path, action: &str, e: impl std::fmt::Display) -> TodoError {
    TodoError::StorageUnavailable(format!("cannot {} {}: {}", action, path.display(), e))
}

impl JsonStore {
    /// Open the store at `path`, creating an empty file (and its parent
    /// directories) when none exists yet.
    ///
    /// Fails with `StorageUnavailable` unless the file is both readable and
    /// writable, so no command runs against a store that cannot be saved.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| unavailable(parent, "create", e))?;
            }
        }

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| unavailable(&path, "open", e))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| unavailable(&path, "read", e))?;

        let (next_id, items) = Self::parse(&path, &contents)?;
        log::debug!(
            "opened {} with {} todos (next id {})",
            path.display(),
            items.len(),
            next_id
        );

        Ok(JsonStore {
            path,
            file,
            next_id,
            items,
            closed: false,
        })
    }

    fn parse(path: &Path, contents: &str) -> Result<(TodoId, Vec<Item>)> {
        if contents.trim().is_empty() {
            return Ok((1, Vec::new()));
        }

        let stored: StoredDocument =
            serde_json::from_str(contents).map_err(|e| unavailable(path, "parse", e))?;

        let (stored_next, items) = match stored {
            StoredDocument::Current { next_id, items } => (next_id, items),
            StoredDocument::Legacy(items) => (0, items),
        };

        let mut seen = HashSet::new();
        if let Some(dup) = items.iter().find(|item| !seen.insert(item.id)) {
            return Err(TodoError::StorageUnavailable(format!(
                "{} contains ID {} more than once",
                path.display(),
                dup.id
            )));
        }

        if let Some(item) = items.iter().find(|item| item.id > MAX_ID) {
            return Err(TodoError::StorageUnavailable(format!(
                "{} contains ID {}, above the largest supported ID {}",
                path.display(),
                item.id,
                MAX_ID
            )));
        }

        // The counter must stay ahead of every stored ID, even in hand-edited files
        let highest = items.iter().map(|item| item.id).max().unwrap_or(0);
        let floor = highest.checked_add(1).ok_or_else(|| {
            TodoError::StorageUnavailable(format!("{} has no IDs left", path.display()))
        })?;
        let next_id = stored_next.max(floor);

        // One past MAX_ID means the ID space is used up, which `add` reports
        if next_id > MAX_ID + 1 {
            return Err(TodoError::StorageUnavailable(format!(
                "{} has next_id {}, above the largest supported ID {}",
                path.display(),
                next_id,
                MAX_ID
            )));
        }

        Ok((next_id, items))
    }

    fn save(&mut self) -> Result<()> {
        let document = Document {
            next_id: self.next_id,
            items: &self.items,
        };
        let mut contents = serde_json::to_string_pretty(&document)?;
        contents.push('\n');

        self.file.set_len(0)?;
        self.file.seek(SeekFrom::Start(0))?;
        self.file.write_all(contents.as_bytes())?;
        self.file.sync_all()?;
        log::debug!("wrote {} todos to {}", self.items.len(), self.path.display());
        Ok(())
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            Err(TodoError::StorageUnavailable(format!(
                "{} is already closed",
                self.path.display()
            )))
        } else {
            Ok(())
        }
    }

    fn position(&self, id: TodoId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }
}

impl TodoStore for JsonStore {
    fn get_all(&self) -> Result<Vec<Item>> {
        self.ensure_open()?;
        Ok(self.items.clone())
    }

    fn get_one(&self, id: TodoId) -> Result<Item> {
        self.ensure_open()?;
        self.items
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or(TodoError::NotFound(id))
    }

    fn add(&mut self, title: &str) -> Result<TodoId> {
        self.ensure_open()?;
        validate_title(title)?;

        let id = self.next_id;
        if id > MAX_ID {
            return Err(TodoError::StorageUnavailable(format!(
                "{} has no IDs left (largest supported ID is {})",
                self.path.display(),
                MAX_ID
            )));
        }
        self.next_id = id + 1;
        self.items.push(Item::new(id, title));
        Ok(id)
    }

    fn remove(&mut self, id: TodoId) -> Result<bool> {
        self.ensure_open()?;
        match self.position(id) {
            Some(index) => {
                self.items.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn toggle_done(&mut self, id: TodoId) -> Result<bool> {
        self.ensure_open()?;
        match self.position(id) {
            Some(index) => {
                let item = &mut self.items[index];
                item.done = !item.done;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        // Marked first so a failed flush is not retried from Drop
        self.closed = true;
        self.save()
    }
}

impl Drop for JsonStore {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            log::error!("failed to flush {}: {}", self.path.display(), e);
        }
    }
}
