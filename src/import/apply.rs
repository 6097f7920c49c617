//! Applying a parsed crate document to the store

use crate::mixxx::{CrateOutcome, LinkOutcome, Repository};
use crate::model::CrateDocument;
use anyhow::Result;

/// What an import did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Crates that did not exist before
    pub crates_created: usize,

    /// Crates that were already in the store
    pub crates_existing: usize,

    /// New crate/track links
    pub tracks_added: usize,

    /// Links that were already present
    pub tracks_already_linked: usize,

    /// Track entries no matching rule could resolve (dropped)
    pub tracks_unmatched: usize,
}

/// Create missing crates and link every resolvable track into its crate
///
/// Unmatched tracks are skipped without a diagnostic beyond a debug record.
pub fn import_document(repo: &Repository<'_>, doc: &CrateDocument) -> Result<ImportReport> {
    let mut report = ImportReport::default();

    for entry in doc.crates() {
        let (crate_id, outcome) = repo.ensure_crate(&entry.name)?;
        match outcome {
            CrateOutcome::Created => {
                log::info!("Creating new crate: {}", entry.name);
                report.crates_created += 1;
            }
            CrateOutcome::AlreadyExisted => {
                log::info!("Already created: {}", entry.name);
                report.crates_existing += 1;
            }
        }

        for snapshot in &entry.tracks {
            let Some(track) = repo.find_track(&snapshot.descriptor())? else {
                log::debug!("Skipping unmatched track {:?}", snapshot.location);
                report.tracks_unmatched += 1;
                continue;
            };

            match repo.link_track(crate_id, track.id)? {
                LinkOutcome::Linked => {
                    log::info!("Adding track: {} - {}", track.artist, track.title);
                    report.tracks_added += 1;
                }
                LinkOutcome::AlreadyLinked => {
                    log::info!(
                        "Track already in crate {}: {} - {}",
                        entry.name,
                        track.artist,
                        track.title
                    );
                    report.tracks_already_linked += 1;
                }
            }
        }
    }

    Ok(report)
}
