//! Persisted connection settings.
//!
//! The user's [`ConnectionConfig`] survives between runs as a JSON value in
//! a small SQLite key-value table:
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS settings (
//!     key        TEXT PRIMARY KEY,
//!     value      TEXT NOT NULL,
//!     updated_at TEXT NOT NULL
//! );
//! ```
//!
//! The quiz client never reads this store. Front ends load a config from
//! it and pass the value into each call.

use std::path::{Path, PathBuf};

use chrono::Utc;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use tracing::{debug, info};

use crate::config::ConnectionConfig;
use crate::error::{GenieError, Result};

/// Key under which the connection config is stored.
pub const SETTINGS_KEY: &str = "mathGenieConfig";

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS settings (
    key        TEXT PRIMARY KEY,
    value      TEXT NOT NULL,
    updated_at TEXT NOT NULL
);";

/// Storage for the user's connection settings.
pub trait SettingsStore {
    /// Load the stored config, or `None` if nothing was saved yet.
    ///
    /// # Errors
    /// Returns an error if the backing storage fails or holds invalid JSON.
    fn load(&self) -> Result<Option<ConnectionConfig>>;

    /// Save (replace) the stored config.
    ///
    /// # Errors
    /// Returns an error if the backing storage fails.
    fn save(&self, config: &ConnectionConfig) -> Result<()>;

    /// Remove the stored config. Returns `true` if something was removed.
    ///
    /// # Errors
    /// Returns an error if the backing storage fails.
    fn clear(&self) -> Result<bool>;

    /// Load the stored config, falling back to [`ConnectionConfig::default`].
    ///
    /// # Errors
    /// Propagates storage and decoding errors; a missing entry is not one.
    fn load_or_default(&self) -> Result<ConnectionConfig> {
        Ok(self.load()?.unwrap_or_default())
    }
}

/// [`SettingsStore`] backed by an SQLite file.
pub struct SqliteSettingsStore {
    conn: Connection,
    db_path: PathBuf,
}

impl std::fmt::Debug for SqliteSettingsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteSettingsStore")
            .field("db_path", &self.db_path)
            .finish_non_exhaustive()
    }
}

impl SqliteSettingsStore {
    /// Open (or create) a settings database at `path`.
    ///
    /// # Errors
    /// Returns [`GenieError::Database`] on SQLite failures.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db_path = path.as_ref().to_path_buf();
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        let conn = Connection::open_with_flags(&db_path, flags)?;
        conn.execute_batch("PRAGMA busy_timeout = 5000;")?;
        conn.execute_batch(SCHEMA)?;

        info!(path = %db_path.display(), "Settings store opened");

        Ok(Self { conn, db_path })
    }

    /// Open an in-memory database (useful for tests).
    ///
    /// # Errors
    /// Returns [`GenieError::Database`] on SQLite failures.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn,
            db_path: PathBuf::from(":memory:"),
        })
    }

    /// Path of the backing database.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.db_path
    }
}

impl SettingsStore for SqliteSettingsStore {
    fn load(&self) -> Result<Option<ConnectionConfig>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT value FROM settings WHERE key = ?1")?;

        let value: Option<String> = stmt
            .query_row(params![SETTINGS_KEY], |row| row.get(0))
            .optional()?;

        let Some(value) = value else {
            debug!("No stored settings, caller falls back to defaults");
            return Ok(None);
        };

        let config: ConnectionConfig =
            serde_json::from_str(&value).map_err(|e| GenieError::Serialization(e.to_string()))?;

        debug!(base_url = %config.base_url, model = %config.model_name, "Loaded settings");
        Ok(Some(config))
    }

    fn save(&self, config: &ConnectionConfig) -> Result<()> {
        let json =
            serde_json::to_string(config).map_err(|e| GenieError::Serialization(e.to_string()))?;
        let now = Utc::now().to_rfc3339();

        self.conn.execute(
            "INSERT INTO settings (key, value, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at",
            params![SETTINGS_KEY, json, now],
        )?;

        info!(base_url = %config.base_url, model = %config.model_name, "Saved settings");
        Ok(())
    }

    fn clear(&self) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM settings WHERE key = ?1", params![SETTINGS_KEY])?;
        Ok(deleted > 0)
    }
}
