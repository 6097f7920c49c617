//! Streamed tar archive of referenced audio files

use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use tar::Builder;

/// Stream every file in `paths` into a tar archive written to `sink`
///
/// Entries keep the source hierarchy with the root stripped
/// (`/music/a.mp3` is stored as `music/a.mp3`). A missing file aborts the
/// archive. Returns the sink once the archive is finished.
pub fn write_tar<W: Write>(paths: &BTreeSet<String>, sink: W) -> Result<W> {
    let mut builder = Builder::new(sink);

    for path in paths {
        let source = Path::new(path);
        builder
            .append_path_with_name(source, archive_name(source))
            .with_context(|| format!("Failed to add {:?} to archive", source))?;
        log::debug!("Archived {:?}", source);
    }

    let sink = builder
        .into_inner()
        .context("Failed to finish tar archive")?;

    log::info!("Archived {} files", paths.len());
    Ok(sink)
}

/// Relative name for `path` inside the archive
fn archive_name(path: &Path) -> PathBuf {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect()
}
