use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;

use crate::logger::{self, LogTag};

/// Handle to the document store
///
/// Wraps a single SQLite connection behind a mutex. Domain operations are
/// implemented in sibling modules as `impl Database` blocks.
pub struct Database {
    pub(crate) conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) the document store at the given path
    pub fn new(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::init_schema(&conn)?;

        logger::info(
            LogTag::Database,
            &format!("Document store ready at {}", path.display()),
        );

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory store (tests and ephemeral runs)
    pub fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create tables and indexes if they don't exist yet
    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS documents (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                collection TEXT NOT NULL,
                body TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_documents_collection
                ON documents(collection);",
        )?;

        Ok(())
    }
}
