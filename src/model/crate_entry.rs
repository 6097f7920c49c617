use super::TrackSnapshot;

/// A crate and its member tracks, in link order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrateEntry {
    /// Crate name (unique within a store)
    pub name: String,

    /// Member tracks (ordered)
    pub tracks: Vec<TrackSnapshot>,
}

impl CrateEntry {
    /// Create a new empty crate
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tracks: Vec::new(),
        }
    }

    /// Append a track to this crate
    pub fn add_track(&mut self, track: TrackSnapshot) {
        self.tracks.push(track);
    }

    /// Number of tracks in this crate
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if crate is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
