//! Database layer for AgriCure.

mod schema;
mod profiles;
mod recommendations;
mod users;

pub use schema::*;
#[allow(unused_imports)]
pub use profiles::*;
#[allow(unused_imports)]
pub use recommendations::*;
#[allow(unused_imports)]
pub use users::*;

use rusqlite::Connection;
use std::path::Path;
use thiserror::Error;

/// Database errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

pub type DbResult<T> = Result<T, DbError>;

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open database at path, creating if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Create in-memory database (for testing).
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Initialize schema.
    fn initialize(&self) -> DbResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Get raw connection (for advanced queries).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Begin a transaction.
    pub fn transaction(&mut self) -> DbResult<rusqlite::Transaction<'_>> {
        Ok(self.conn.transaction()?)
    }

    /// Read a value from the key/value app state table.
    pub fn get_state(&self, key: &str) -> DbResult<Option<String>> {
        use rusqlite::OptionalExtension;

        Ok(self
            .conn
            .query_row("SELECT value FROM app_state WHERE key = ?", [key], |row| row.get(0))
            .optional()?)
    }

    /// Write a value to the key/value app state table.
    pub fn set_state(&self, key: &str, value: &str) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO app_state (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
            [key, value],
        )?;
        Ok(())
    }

    /// Remove a value from the app state table.
    pub fn clear_state(&self, key: &str) -> DbResult<bool> {
        let rows_affected = self.conn.execute("DELETE FROM app_state WHERE key = ?", [key])?;
        Ok(rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory();
        assert!(db.is_ok());
    }

    #[test]
    fn test_schema_initialized() {
        let db = Database::open_in_memory().unwrap();

        // Check that tables exist
        let tables: Vec<String> = db
            .conn()
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        assert!(tables.contains(&"users".to_string()));
        assert!(tables.contains(&"sessions".to_string()));
        assert!(tables.contains(&"user_profiles".to_string()));
        assert!(tables.contains(&"fertilizer_recommendations".to_string()));
        assert!(tables.contains(&"app_state".to_string()));
    }

    #[test]
    fn test_app_state() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.get_state("current_session").unwrap(), None);

        db.set_state("current_session", "abc").unwrap();
        db.set_state("current_session", "def").unwrap();
        assert_eq!(db.get_state("current_session").unwrap(), Some("def".into()));

        assert!(db.clear_state("current_session").unwrap());
        assert!(!db.clear_state("current_session").unwrap());
    }

    #[test]
    fn test_open_on_disk_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agricure.db");

        {
            let db = Database::open(&path).unwrap();
            db.set_state("k", "v").unwrap();
        }

        let db = Database::open(&path).unwrap();
        assert_eq!(db.get_state("k").unwrap(), Some("v".into()));
    }
}
