//! The single SQLite connection and the `books` schema.

use log::{debug, info};
use rusqlite::Connection;
use rusqlite::functions::FunctionFlags;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Owns the process-wide connection to the reading-log database.
///
/// Opened once at startup and passed by reference to everything that talks
/// to the store.
pub struct Database {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Database {
    /// Open (or create) the database file at `path` and make sure the schema exists.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        register_functions(&conn)?;
        init_schema(&conn)?;
        info!("Opened reading log database at {}", path.display());

        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// Open a private in-memory database. Used by tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        register_functions(&conn)?;
        init_schema(&conn)?;
        debug!("Opened in-memory reading log database");
        Ok(Self { conn, path: None })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Location on disk, `None` for in-memory databases.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Close the connection, reporting any error SQLite raises while doing so.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| e)?;
        info!("Closed reading log database");
        Ok(())
    }
}

/// `casefold(text)`: Unicode lowercase of `text`, NULL stays NULL.
fn register_functions(conn: &Connection) -> Result<()> {
    conn.create_scalar_function(
        "casefold",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let text: Option<String> = ctx.get(0)?;
            Ok(text.map(|t| t.to_lowercase()))
        },
    )?;
    Ok(())
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS books (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL,
            title TEXT NOT NULL,
            description TEXT,
            status TEXT NOT NULL DEFAULT 'pending'
                CHECK (status IN ('pending', 'reading', 'complete')),
            pct_read INTEGER NOT NULL DEFAULT 0,
            start_read_date TEXT,
            end_read_date TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_books_status ON books(status);
        "#,
    )?;
    Ok(())
}
