//! Folder-copy export: one subfolder per crate holding renamed copies

use super::{crate_path_names, path_safe_name, ExportConfig, ExportOutcome, ExportStats};
use crate::confirm::Confirmer;
use crate::error::CrateError;
use crate::model::{CrateDocument, TrackSnapshot};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Punctuation kept in copied file names
const ALLOWED_PUNCTUATION: &str = "-_.()'[]& ";

/// Accented letters kept in copied file names
const ALLOWED_ACCENTED: &str = "àáâäãåçèéêëìíîïñòóôöõùúûüýÀÁÂÄÃÅÇÈÉÊËÌÍÎÏÑÒÓÔÖÕÙÚÛÜÝ";

/// Manages the `<root>/<crate>/<artist> - <title><ext>` layout
pub struct FolderOrganizer {
    /// Destination root (must already exist)
    root: PathBuf,
}

impl FolderOrganizer {
    /// Create an organizer for an existing destination root
    pub fn new(root: PathBuf) -> Result<Self> {
        if !root.is_dir() {
            return Err(CrateError::DestinationMissing(root).into());
        }
        Ok(Self { root })
    }

    /// Subfolder for crate `name`
    pub fn crate_dir(&self, name: &str) -> PathBuf {
        self.root.join(path_safe_name(name))
    }

    /// Create the crate subfolder if it is missing; true when it was created
    pub fn ensure_crate_dir(&self, dir: &Path) -> Result<bool> {
        if dir.is_dir() {
            return Ok(false);
        }
        fs::create_dir(dir).with_context(|| format!("Failed to create folder {:?}", dir))?;
        Ok(true)
    }

    /// Destination of `track` inside `crate_dir`
    pub fn track_file_path(&self, crate_dir: &Path, track: &TrackSnapshot) -> PathBuf {
        crate_dir.join(copy_file_name(track))
    }

    /// Copy a track file into place
    pub fn copy_track(&self, source: &Path, dest: &Path) -> Result<u64> {
        fs::copy(source, dest)
            .with_context(|| format!("Failed to copy {:?} to {:?}", source, dest))
    }
}

/// Copy every crate member into its crate subfolder under `config.output_dir`
///
/// Asks for confirmation before starting. Files whose computed name already
/// exists are left untouched. Crates whose names clean up to the same folder
/// name get numbered folders instead of sharing one.
pub fn export_folders(
    doc: &CrateDocument,
    config: &ExportConfig,
    confirmer: &mut dyn Confirmer,
) -> Result<ExportOutcome> {
    let organizer = FolderOrganizer::new(config.output_dir.clone())?;

    let prompt = format!(
        "Copy {} track(s) from {} crate(s) into {:?}?",
        doc.track_count(),
        doc.crate_count(),
        config.output_dir
    );
    if !confirmer.confirm(&prompt)? {
        log::info!("Folder export cancelled, nothing copied");
        return Ok(ExportOutcome::Declined);
    }

    let mut stats = ExportStats::default();
    for (name, entry) in crate_path_names(doc).iter().zip(doc.crates()) {
        let dir = organizer.crate_dir(name);
        if organizer.ensure_crate_dir(&dir)? {
            decision(config, format_args!("Created folder {:?}", dir));
        }

        for track in &entry.tracks {
            let dest = organizer.track_file_path(&dir, track);
            if dest.exists() {
                decision(config, format_args!("Skipping existing {:?}", dest));
                stats.skipped += 1;
                continue;
            }

            organizer.copy_track(Path::new(&track.location), &dest)?;
            decision(config, format_args!("Copied {:?}", dest));
            stats.written += 1;
        }
    }

    log::info!(
        "Folder export complete: {} copied, {} already present",
        stats.written,
        stats.skipped
    );
    Ok(ExportOutcome::Completed(stats))
}

/// `<artist> - <title><ext>` restricted to the allowed characters
///
/// Disallowed characters are dropped, not replaced.
pub fn copy_file_name(track: &TrackSnapshot) -> String {
    let name = format!("{} - {}{}", track.artist, track.title, track.extension());
    name.chars().filter(|c| is_allowed(*c)).collect()
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || ALLOWED_PUNCTUATION.contains(c) || ALLOWED_ACCENTED.contains(c)
}

fn decision(config: &ExportConfig, message: std::fmt::Arguments<'_>) {
    if config.log_decisions {
        log::info!("{}", message);
    } else {
        log::debug!("{}", message);
    }
}
