//! Exporters for crate documents
//!
//! XML documents, streamed tar archives, per-crate M3U playlists and
//! per-crate folders of renamed copies.

pub mod archive;
pub mod config;
pub mod folder;
pub mod m3u;
pub mod xml;

pub use archive::write_tar;
pub use config::ExportConfig;
pub use folder::{export_folders, FolderOrganizer};
pub use m3u::export_m3u;
pub use xml::{to_xml_string, write_document};

use crate::model::CrateDocument;
use std::collections::HashSet;

/// How a confirmable export ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Export ran to completion
    Completed(ExportStats),

    /// User refused the confirmation; nothing was written
    Declined,
}

/// Files handled by an export
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportStats {
    /// Files written or copied
    pub written: usize,

    /// Files left untouched because they already existed
    pub skipped: usize,
}

/// Turn a crate name into a single path component
///
/// Separators and NUL are dropped; names that end up empty or as `.`/`..`
/// become `_`.
pub(crate) fn path_safe_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !matches!(c, '/' | '\\' | '\0'))
        .collect();

    match cleaned.as_str() {
        "" | "." | ".." => "_".to_string(),
        _ => cleaned,
    }
}

/// One distinct path component per crate, in document order
///
/// Crates whose cleaned names coincide get a `-2`, `-3`, ... suffix so no
/// two crates share a playlist file or folder. A suffix never takes a name
/// some other crate would get unsuffixed.
pub(crate) fn crate_path_names(doc: &CrateDocument) -> Vec<String> {
    let cleaned: Vec<String> = doc
        .crates()
        .iter()
        .map(|entry| path_safe_name(&entry.name))
        .collect();
    let reserved: HashSet<&str> = cleaned.iter().map(String::as_str).collect();
    let mut taken: HashSet<String> = HashSet::new();

    let mut names = Vec::with_capacity(cleaned.len());
    for (entry, name) in doc.crates().iter().zip(&cleaned) {
        if taken.insert(name.clone()) {
            names.push(name.clone());
            continue;
        }

        let mut n = 2;
        let unique = loop {
            let candidate = format!("{}-{}", name, n);
            if !reserved.contains(candidate.as_str()) && !taken.contains(&candidate) {
                break candidate;
            }
            n += 1;
        };
        log::warn!(
            "Crate '{}' clashes with another crate's file name, using '{}'",
            entry.name,
            unique
        );
        taken.insert(unique.clone());
        names.push(unique);
    }
    names
}
