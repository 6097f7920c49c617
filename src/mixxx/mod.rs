//! Mixxx library database access
//!
//! Opens Mixxx's SQLite database (mixxxdb.sqlite) and exposes crate and
//! track queries through a [`Repository`] bound to a single transaction.

mod database;
mod matcher;

#[cfg(test)]
pub(crate) mod fixtures;

pub use database::{CrateOutcome, LinkOutcome, Repository};
pub use matcher::find_track;

use crate::error::CrateError;
use anyhow::{Context, Result};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;

/// Default location of the Mixxx database
#[cfg(target_os = "macos")]
pub const DEFAULT_DATABASE: &str = "~/Library/Application Support/Mixxx/mixxxdb.sqlite";

/// Default location of the Mixxx database
#[cfg(not(target_os = "macos"))]
pub const DEFAULT_DATABASE: &str = "~/.mixxx/mixxxdb.sqlite";

/// The part of the Mixxx schema this tool reads and writes
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS track_locations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    location VARCHAR(512) UNIQUE,
    filename VARCHAR(512),
    directory VARCHAR(512),
    filesize INTEGER,
    fs_deleted INTEGER,
    needs_verification INTEGER
);
CREATE TABLE IF NOT EXISTS library (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    artist VARCHAR(64),
    title VARCHAR(64),
    filetype VARCHAR(8) DEFAULT '?',
    location INTEGER REFERENCES track_locations(id)
);
CREATE TABLE IF NOT EXISTS crates (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name VARCHAR(48) UNIQUE NOT NULL,
    count INTEGER DEFAULT 0,
    show INTEGER DEFAULT 1,
    locked INTEGER DEFAULT 0
);
CREATE TABLE IF NOT EXISTS crate_tracks (
    crate_id INTEGER NOT NULL REFERENCES crates(id),
    track_id INTEGER NOT NULL REFERENCES library(id),
    UNIQUE (crate_id, track_id)
);
";

/// Handle on an open Mixxx database
///
/// All reads and writes go through [`MixxxLibrary::session`], which scopes
/// them to one transaction.
pub struct MixxxLibrary {
    conn: Connection,
}

impl MixxxLibrary {
    /// Open an existing Mixxx database for reading and writing
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(CrateError::DatabaseMissing(path.to_path_buf()).into());
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("Failed to open Mixxx database: {:?}", path))?;

        log::debug!("Opened Mixxx database at {:?}", path);
        Ok(Self { conn })
    }

    /// Open a private in-memory database (schema not created)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Ok(Self { conn })
    }

    /// Create the crate/track tables if they do not exist yet
    pub fn initialize_schema(&self) -> Result<()> {
        self.conn
            .execute_batch(SCHEMA)
            .context("Failed to create Mixxx schema")
    }

    /// Underlying connection, for direct SQL outside a session
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Run `f` inside one transaction
    ///
    /// Commits when `f` returns `Ok`. When `f` fails (or panics) the
    /// transaction is dropped uncommitted, which rolls it back.
    pub fn session<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&Repository<'_>) -> Result<T>,
    {
        let tx = self
            .conn
            .transaction()
            .context("Failed to begin transaction")?;

        let value = f(&Repository::new(&tx))?;

        tx.commit().context("Failed to commit transaction")?;
        Ok(value)
    }
}
