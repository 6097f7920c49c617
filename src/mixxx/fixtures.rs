//! In-memory Mixxx stores for unit tests

use super::MixxxLibrary;
use rusqlite::params;
use std::path::Path;

/// Fresh in-memory store with the schema and no rows
pub(crate) fn empty_library() -> MixxxLibrary {
    let library = MixxxLibrary::open_in_memory().unwrap();
    library.initialize_schema().unwrap();
    library
}

/// Insert a location row and a library row pointing at it, returning the track id
pub(crate) fn add_track(library: &MixxxLibrary, artist: &str, title: &str, location: &str) -> i64 {
    let path = Path::new(location);
    let filename = path.file_name().unwrap().to_string_lossy().to_string();
    let filetype = path
        .extension()
        .map(|e| e.to_string_lossy().to_string())
        .unwrap_or_default();

    let conn = library.connection();
    conn.execute(
        "INSERT INTO track_locations (location, filename, directory) VALUES (?1, ?2, ?3)",
        params![
            location,
            filename,
            path.parent().unwrap().to_string_lossy().to_string()
        ],
    )
    .unwrap();
    let location_id = conn.last_insert_rowid();

    conn.execute(
        "INSERT INTO library (artist, title, filetype, location) VALUES (?1, ?2, ?3, ?4)",
        params![artist, title, filetype, location_id],
    )
    .unwrap();
    conn.last_insert_rowid()
}

/// Link a track into a crate, creating the crate when needed
pub(crate) fn link(library: &MixxxLibrary, crate_name: &str, track_id: i64) {
    let conn = library.connection();
    conn.execute(
        "INSERT OR IGNORE INTO crates (name) VALUES (?1)",
        params![crate_name],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO crate_tracks (crate_id, track_id)
         SELECT id, ?2 FROM crates WHERE name = ?1",
        params![crate_name, track_id],
    )
    .unwrap();
}

/// Store with crate "Techno" holding /music/a.mp3 and /music/b.mp3
pub(crate) fn techno_library() -> (MixxxLibrary, i64, i64) {
    let library = empty_library();
    let a = add_track(&library, "Surgeon", "Klonk", "/music/a.mp3");
    let b = add_track(&library, "Regis", "Blood Witness", "/music/b.mp3");
    link(&library, "Techno", a);
    link(&library, "Techno", b);
    (library, a, b)
}
