//! Crate and track queries against the Mixxx schema

use super::matcher;
use crate::model::{CrateDocument, CrateEntry, Track, TrackDescriptor, TrackSnapshot};
use anyhow::{Context, Result};
use rusqlite::{params, Connection, ErrorCode};
use std::collections::BTreeSet;

/// Members of one crate joined through the location table, in link order
const CRATE_TRACKS_SELECT: &str = "
SELECT
    COALESCE(library.artist, '') AS artist,
    COALESCE(library.title, '') AS title,
    COALESCE(track_locations.location, '') AS location,
    COALESCE(track_locations.filename, '') AS filename
FROM crate_tracks
    INNER JOIN library
        ON crate_tracks.track_id = library.id
    INNER JOIN track_locations
        ON library.location = track_locations.id
WHERE
    crate_tracks.crate_id = ?1
ORDER BY crate_tracks.rowid
";

/// Result of [`Repository::ensure_crate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrateOutcome {
    Created,
    AlreadyExisted,
}

/// Result of [`Repository::link_track`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    Linked,
    AlreadyLinked,
}

/// Crate/track queries bound to one open transaction
pub struct Repository<'a> {
    conn: &'a Connection,
}

impl<'a> Repository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// All crate names, ordered by crate id
    pub fn list_crate_names(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM crates ORDER BY id")
            .context("Failed to query crates")?;

        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()
            .context("Failed to read crate names")?;

        Ok(names)
    }

    /// Every crate with snapshots of its member tracks
    pub fn crates_with_tracks(&self) -> Result<CrateDocument> {
        let crates = self.crate_ids()?;
        let mut stmt = self
            .conn
            .prepare(CRATE_TRACKS_SELECT)
            .context("Failed to prepare crate track query")?;

        let mut document = CrateDocument::new();
        for (id, name) in crates {
            let mut entry = CrateEntry::new(name);

            let rows = stmt.query_map(params![id], |row| {
                Ok(TrackSnapshot {
                    artist: row.get("artist")?,
                    title: row.get("title")?,
                    location: row.get("location")?,
                    filename: row.get("filename")?,
                })
            })?;
            for snapshot in rows {
                let snapshot = snapshot
                    .with_context(|| format!("Failed to read tracks of crate {}", entry.name))?;
                entry.add_track(snapshot);
            }

            log::debug!("Crate '{}': {} tracks", entry.name, entry.len());
            document.add_crate(entry);
        }

        Ok(document)
    }

    /// Locations of every track in any crate, each path once
    pub fn referenced_file_paths(&self) -> Result<BTreeSet<String>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT DISTINCT track_locations.location
                 FROM crate_tracks
                     INNER JOIN library
                         ON crate_tracks.track_id = library.id
                     INNER JOIN track_locations
                         ON library.location = track_locations.id
                 WHERE track_locations.location IS NOT NULL",
            )
            .context("Failed to query referenced files")?;

        let paths = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<BTreeSet<String>>>()
            .context("Failed to read referenced files")?;

        Ok(paths)
    }

    /// Return the id of crate `name`, inserting it if it does not exist
    pub fn ensure_crate(&self, name: &str) -> Result<(i64, CrateOutcome)> {
        let outcome = match self
            .conn
            .execute("INSERT INTO crates (name) VALUES (?1)", params![name])
        {
            Ok(_) => CrateOutcome::Created,
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                CrateOutcome::AlreadyExisted
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to create crate {}", name));
            }
        };

        let id = self
            .conn
            .query_row(
                "SELECT id FROM crates WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .with_context(|| format!("Failed to look up crate {}", name))?;

        Ok((id, outcome))
    }

    /// Add track `track_id` to crate `crate_id`; an existing link is not an error
    pub fn link_track(&self, crate_id: i64, track_id: i64) -> Result<LinkOutcome> {
        match self.conn.execute(
            "INSERT INTO crate_tracks (crate_id, track_id) VALUES (?1, ?2)",
            params![crate_id, track_id],
        ) {
            Ok(_) => Ok(LinkOutcome::Linked),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Ok(LinkOutcome::AlreadyLinked)
            }
            Err(e) => Err(e).with_context(|| {
                format!("Failed to link track {} into crate {}", track_id, crate_id)
            }),
        }
    }

    /// Resolve a descriptor to an existing track
    pub fn find_track(&self, descriptor: &TrackDescriptor<'_>) -> Result<Option<Track>> {
        matcher::find_track(self.conn, descriptor)
    }

    fn crate_ids(&self) -> Result<Vec<(i64, String)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM crates ORDER BY id")
            .context("Failed to query crates")?;

        let crates = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<rusqlite::Result<Vec<(i64, String)>>>()
            .context("Failed to read crates")?;

        Ok(crates)
    }
}
