//! Track matching for imported crate documents
//!
//! A descriptor from an external document may be stale: the library could
//! have moved or been reorganized since export. Rules are tried in order
//! and the first one that yields a row wins:
//!
//! 1. exact stored location (same machine/mount)
//! 2. exact file name (library moved)
//! 3. exact artist and title (library reorganized)
//!
//! No fuzzy or partial matching is performed.

use crate::model::{Track, TrackDescriptor};
use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};

/// A single matching rule: `Ok(None)` means "no row, try the next rule"
type MatchRule = fn(&Connection, &TrackDescriptor<'_>) -> rusqlite::Result<Option<Track>>;

/// Rules in resolution order
const MATCH_RULES: &[(&str, MatchRule)] = &[
    ("location", by_location),
    ("filename", by_filename),
    ("artist/title", by_artist_title),
];

/// Resolve `descriptor` to exactly one existing track, if any rule matches
pub fn find_track(conn: &Connection, descriptor: &TrackDescriptor<'_>) -> Result<Option<Track>> {
    for (name, rule) in MATCH_RULES {
        let found = rule(conn, descriptor)
            .with_context(|| format!("Track lookup by {} failed", name))?;

        if let Some(track) = found {
            log::debug!("Matched track {} by {}: {:?}", track.id, name, descriptor);
            return Ok(Some(track));
        }
    }

    log::debug!("No track matches {:?}", descriptor);
    Ok(None)
}

fn by_location(conn: &Connection, desc: &TrackDescriptor<'_>) -> rusqlite::Result<Option<Track>> {
    let Some(location) = desc.location else {
        return Ok(None);
    };

    conn.query_row(
        "SELECT l.id, l.artist, l.title, l.filetype
         FROM library l
             INNER JOIN track_locations tl
                 ON l.location = tl.id
         WHERE tl.location = ?1
         ORDER BY l.id
         LIMIT 1",
        params![location],
        row_to_track,
    )
    .optional()
}

fn by_filename(conn: &Connection, desc: &TrackDescriptor<'_>) -> rusqlite::Result<Option<Track>> {
    let Some(filename) = desc.filename else {
        return Ok(None);
    };

    conn.query_row(
        "SELECT l.id, l.artist, l.title, l.filetype
         FROM library l
             INNER JOIN track_locations tl
                 ON l.location = tl.id
         WHERE tl.filename = ?1
         ORDER BY l.id
         LIMIT 1",
        params![filename],
        row_to_track,
    )
    .optional()
}

fn by_artist_title(
    conn: &Connection,
    desc: &TrackDescriptor<'_>,
) -> rusqlite::Result<Option<Track>> {
    let (Some(artist), Some(title)) = (desc.artist, desc.title) else {
        return Ok(None);
    };

    conn.query_row(
        "SELECT l.id, l.artist, l.title, l.filetype
         FROM library l
         WHERE l.artist = ?1 AND l.title = ?2
         ORDER BY l.id
         LIMIT 1",
        params![artist, title],
        row_to_track,
    )
    .optional()
}

fn row_to_track(row: &Row<'_>) -> rusqlite::Result<Track> {
    Ok(Track {
        id: row.get(0)?,
        artist: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        title: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        filetype: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
    })
}
