use super::CrateEntry;

/// External crate document: crates with snapshots of their tracks
///
/// Only exists at the export/import boundary. The snapshots may drift from
/// the live store between an export and a later import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrateDocument {
    crates: Vec<CrateEntry>,
}

impl CrateDocument {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a crate to the document
    pub fn add_crate(&mut self, entry: CrateEntry) {
        self.crates.push(entry);
    }

    /// All crates, in document order
    pub fn crates(&self) -> &[CrateEntry] {
        &self.crates
    }

    /// Look up a crate by name
    pub fn get_crate(&self, name: &str) -> Option<&CrateEntry> {
        self.crates.iter().find(|c| c.name == name)
    }

    /// Total number of crates
    pub fn crate_count(&self) -> usize {
        self.crates.len()
    }

    /// Total number of track references across all crates
    pub fn track_count(&self) -> usize {
        self.crates.iter().map(CrateEntry::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TrackSnapshot;

    #[test]
    fn test_document_creation() {
        let doc = CrateDocument::new();
        assert_eq!(doc.crate_count(), 0);
        assert_eq!(doc.track_count(), 0);
    }

    #[test]
    fn test_counts_span_crates() {
        let mut doc = CrateDocument::new();

        let mut techno = CrateEntry::new("Techno");
        techno.add_track(TrackSnapshot {
            location: "/music/a.mp3".to_string(),
            ..Default::default()
        });
        techno.add_track(TrackSnapshot {
            location: "/music/b.mp3".to_string(),
            ..Default::default()
        });
        doc.add_crate(techno);
        doc.add_crate(CrateEntry::new("Empty"));

        assert_eq!(doc.crate_count(), 2);
        assert_eq!(doc.track_count(), 2);
        assert!(doc.get_crate("Empty").unwrap().is_empty());
        assert_eq!(doc.get_crate("Techno").unwrap().len(), 2);
        assert!(doc.get_crate("House").is_none());
    }
}
