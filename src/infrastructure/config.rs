//! Backend selection

use crate::error::{Result, TodoError};
use crate::infrastructure::{JsonStore, SqliteStore, TodoStore};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Which backend holds the todos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageKind {
    #[default]
    Sqlite,
    Json,
}

impl StorageKind {
    /// Parse a backend name, falling back to SQLite for anything unrecognized
    pub fn parse_or_default(value: &str) -> Self {
        if value.trim().is_empty() {
            return StorageKind::default();
        }

        value.parse().unwrap_or_else(|e: String| {
            log::warn!("{}; falling back to {}", e, StorageKind::default());
            StorageKind::default()
        })
    }

    /// File used when no path is configured
    pub fn default_path(&self) -> &'static str {
        match self {
            StorageKind::Sqlite => "todos.db",
            StorageKind::Json => "todos.json",
        }
    }
}

impl FromStr for StorageKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sqlite" => Ok(StorageKind::Sqlite),
            "json" => Ok(StorageKind::Json),
            _ => Err(format!(
                "Unknown DB_TYPE '{}'. Valid types are: sqlite, json",
                s
            )),
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageKind::Sqlite => write!(f, "sqlite"),
            StorageKind::Json => write!(f, "json"),
        }
    }
}

/// Resolved storage settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub kind: StorageKind,
    pub path: PathBuf,
}

impl StoreConfig {
    /// Build a config from raw DB_TYPE / DB_PATH values
    pub fn from_values(db_type: Option<&str>, db_path: Option<PathBuf>) -> Self {
        let kind = db_type
            .map(StorageKind::parse_or_default)
            .unwrap_or_default();
        let path = db_path
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| PathBuf::from(kind.default_path()));

        StoreConfig { kind, path }
    }
}

/// Construct the configured backend.
///
/// Every failure is reported as `StorageUnavailable`.
pub fn open_store(config: &StoreConfig) -> Result<Box<dyn TodoStore>> {
    log::debug!("opening {} store at {}", config.kind, config.path.display());

    let opened: Result<Box<dyn TodoStore>> = match config.kind {
        StorageKind::Sqlite => SqliteStore::open(&config.path).map(|s| Box::new(s) as _),
        StorageKind::Json => JsonStore::open(&config.path).map(|s| Box::new(s) as _),
    };

    opened.map_err(|e| match e {
        TodoError::StorageUnavailable(_) => e,
        other => TodoError::StorageUnavailable(other.to_string()),
    })
}
