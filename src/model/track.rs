use std::path::Path;

/// A track row from the Mixxx `library` table
///
/// Tracks are only ever referenced by this tool, never created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    /// `library.id`
    pub id: i64,

    /// Artist name (empty when NULL in the store)
    pub artist: String,

    /// Track title (empty when NULL in the store)
    pub title: String,

    /// File type as recorded by Mixxx (e.g. "mp3")
    pub filetype: String,
}

/// Denormalized view of a crate member, as written to external documents
///
/// The field set is closed: artist, title, location and filename are the
/// only attributes exported for a track.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackSnapshot {
    pub artist: String,
    pub title: String,

    /// Absolute path of the backing audio file
    pub location: String,

    /// File name component of `location`
    pub filename: String,
}

impl TrackSnapshot {
    /// Descriptor used to resolve this snapshot against a store
    pub fn descriptor(&self) -> TrackDescriptor<'_> {
        TrackDescriptor {
            location: non_empty(&self.location),
            filename: non_empty(&self.filename),
            artist: non_empty(&self.artist),
            title: non_empty(&self.title),
        }
    }

    /// Extension of the audio file including the leading dot, or "" if none
    pub fn extension(&self) -> String {
        Path::new(&self.location)
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default()
    }
}

/// Partial description of a track, possibly stale or incomplete
///
/// Absent fields disable the matching rule that needs them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackDescriptor<'a> {
    pub location: Option<&'a str>,
    pub filename: Option<&'a str>,
    pub artist: Option<&'a str>,
    pub title: Option<&'a str>,
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
