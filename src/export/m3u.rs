//! M3U playlist export, one `<crate>.m3u` per crate

use super::{crate_path_names, path_safe_name, ExportConfig, ExportOutcome, ExportStats};
use crate::confirm::Confirmer;
use crate::model::{CrateDocument, CrateEntry, TrackSnapshot};
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Write one playlist per crate into `config.output_dir`
///
/// If any target file already exists, the user is asked once; after a yes
/// every existing playlist of the same name is overwritten. Crates whose
/// names clean up to the same file name get numbered files.
pub fn export_m3u(
    doc: &CrateDocument,
    config: &ExportConfig,
    confirmer: &mut dyn Confirmer,
) -> Result<ExportOutcome> {
    let targets: Vec<(PathBuf, &CrateEntry)> = crate_path_names(doc)
        .iter()
        .zip(doc.crates())
        .map(|(name, entry)| (playlist_path(&config.output_dir, name), entry))
        .collect();

    let existing = targets.iter().filter(|(path, _)| path.exists()).count();
    if existing > 0 {
        let prompt = format!(
            "{} playlist file(s) already exist in {:?} and will be overwritten. Continue?",
            existing, config.output_dir
        );
        if !confirmer.confirm(&prompt)? {
            log::info!("M3U export cancelled, nothing written");
            return Ok(ExportOutcome::Declined);
        }
    }

    let mut stats = ExportStats::default();
    for (path, entry) in targets {
        let playlist = render_playlist(entry, config.relative_to.as_deref());
        fs::write(&path, playlist)
            .with_context(|| format!("Failed to write playlist {:?}", path))?;

        log::info!("Wrote {:?} ({} tracks)", path, entry.len());
        stats.written += 1;
    }

    Ok(ExportOutcome::Completed(stats))
}

/// Playlist file for crate `name` inside `dir`
pub fn playlist_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.m3u", path_safe_name(name)))
}

/// Extended M3U text for one crate
pub fn render_playlist(entry: &CrateEntry, relative_to: Option<&Path>) -> String {
    let mut out = String::from("#EXTM3U\n");

    for track in &entry.tracks {
        let location = Path::new(&track.location);
        let path = match relative_to {
            Some(base) => relative_path(location, base),
            None => location.to_path_buf(),
        };

        // Writing to a String cannot fail
        let _ = writeln!(out, "#EXTINF:-1,{}", display_title(track));
        let _ = writeln!(out, "{}", path.display());
    }

    out
}

/// `artist - title`, or whichever of the two is set, or the file name
fn display_title(track: &TrackSnapshot) -> String {
    match (track.artist.is_empty(), track.title.is_empty()) {
        (false, false) => format!("{} - {}", track.artist, track.title),
        (false, true) => track.artist.clone(),
        (true, false) => track.title.clone(),
        (true, true) => track.filename.clone(),
    }
}

/// Express `path` relative to `base`, walking up with `..` where needed
///
/// Paths that are already relative are returned unchanged.
fn relative_path(path: &Path, base: &Path) -> PathBuf {
    if !path.is_absolute() {
        return path.to_path_buf();
    }

    let mut path_parts = path.components().peekable();
    let mut base_parts = base.components().peekable();
    while let (Some(p), Some(b)) = (path_parts.peek(), base_parts.peek()) {
        if p != b {
            break;
        }
        path_parts.next();
        base_parts.next();
    }

    let mut relative = PathBuf::new();
    for part in base_parts {
        if matches!(part, Component::Normal(_)) {
            relative.push("..");
        }
    }
    for part in path_parts {
        relative.push(part);
    }
    relative
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirm::AutoConfirm;
    use tempfile::TempDir;

    struct Decline {
        asked: usize,
    }

    impl Confirmer for Decline {
        fn confirm(&mut self, _prompt: &str) -> Result<bool> {
            self.asked += 1;
            Ok(false)
        }
    }

    struct Accept {
        asked: usize,
    }

    impl Confirmer for Accept {
        fn confirm(&mut self, _prompt: &str) -> Result<bool> {
            self.asked += 1;
            Ok(true)
        }
    }

    fn techno_document() -> CrateDocument {
        let mut techno = CrateEntry::new("Techno");
        let tracks = [
            ("Surgeon", "Klonk", "a.mp3"),
            ("Regis", "Blood Witness", "b.mp3"),
        ];
        for (artist, title, name) in tracks {
            techno.add_track(TrackSnapshot {
                artist: artist.to_string(),
                title: title.to_string(),
                location: format!("/music/{}", name),
                filename: name.to_string(),
            });
        }
        let mut doc = CrateDocument::new();
        doc.add_crate(techno);
        doc
    }

    #[test]
    fn test_techno_playlist() {
        let temp_dir = TempDir::new().unwrap();
        let config = ExportConfig::new(temp_dir.path().to_path_buf());
        let mut confirmer = Accept { asked: 0 };

        let outcome = export_m3u(&techno_document(), &config, &mut confirmer).unwrap();

        assert_eq!(
            outcome,
            ExportOutcome::Completed(ExportStats {
                written: 1,
                skipped: 0
            })
        );
        assert_eq!(confirmer.asked, 0, "no prompt without existing files");

        let content = fs::read_to_string(temp_dir.path().join("Techno.m3u")).unwrap();
        assert_eq!(
            content,
            "#EXTM3U\n\
             #EXTINF:-1,Surgeon - Klonk\n\
             /music/a.mp3\n\
             #EXTINF:-1,Regis - Blood Witness\n\
             /music/b.mp3\n"
        );
    }

    #[test]
    fn test_relative_paths() {
        let doc = techno_document();
        let entry = &doc.crates()[0];

        let content = render_playlist(entry, Some(Path::new("/music")));
        assert!(content.contains("\na.mp3\n"));

        let content = render_playlist(entry, Some(Path::new("/home/dj")));
        assert!(content.contains("\n../../music/b.mp3\n"));
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(
            relative_path(Path::new("/music/techno/a.mp3"), Path::new("/music")),
            PathBuf::from("techno/a.mp3")
        );
        assert_eq!(
            relative_path(Path::new("/music/a.mp3"), Path::new("/home/dj/lists")),
            PathBuf::from("../../../music/a.mp3")
        );
        assert_eq!(
            relative_path(Path::new("already/rel.mp3"), Path::new("/home")),
            PathBuf::from("already/rel.mp3")
        );
    }

    #[test]
    fn test_declined_overwrite_leaves_file() {
        let temp_dir = TempDir::new().unwrap();
        let existing = temp_dir.path().join("Techno.m3u");
        fs::write(&existing, "old").unwrap();

        let config = ExportConfig::new(temp_dir.path().to_path_buf());
        let mut confirmer = Decline { asked: 0 };
        let outcome = export_m3u(&techno_document(), &config, &mut confirmer).unwrap();

        assert_eq!(outcome, ExportOutcome::Declined);
        assert_eq!(confirmer.asked, 1);
        assert_eq!(fs::read_to_string(&existing).unwrap(), "old");
    }

    #[test]
    fn test_confirmed_overwrite_asks_once() {
        let temp_dir = TempDir::new().unwrap();
        let mut doc = techno_document();
        doc.add_crate(CrateEntry::new("House"));
        fs::write(temp_dir.path().join("Techno.m3u"), "old").unwrap();
        fs::write(temp_dir.path().join("House.m3u"), "old").unwrap();

        let config = ExportConfig::new(temp_dir.path().to_path_buf());
        let mut confirmer = Accept { asked: 0 };
        export_m3u(&doc, &config, &mut confirmer).unwrap();

        assert_eq!(confirmer.asked, 1);
        let house = fs::read_to_string(temp_dir.path().join("House.m3u")).unwrap();
        assert_eq!(house, "#EXTM3U\n");
    }

    #[test]
    fn test_clashing_crate_names_get_own_playlists() {
        let temp_dir = TempDir::new().unwrap();
        let mut doc = CrateDocument::new();
        let crates = [("Drum/Bass", "/music/dnb.mp3"), ("DrumBass", "/music/db.mp3")];
        for (name, location) in crates {
            let mut entry = CrateEntry::new(name);
            entry.add_track(TrackSnapshot {
                location: location.to_string(),
                ..TrackSnapshot::default()
            });
            doc.add_crate(entry);
        }

        let config = ExportConfig::new(temp_dir.path().to_path_buf());
        let outcome = export_m3u(&doc, &config, &mut AutoConfirm).unwrap();

        assert_eq!(
            outcome,
            ExportOutcome::Completed(ExportStats {
                written: 2,
                skipped: 0
            })
        );
        let first = fs::read_to_string(temp_dir.path().join("DrumBass.m3u")).unwrap();
        let second = fs::read_to_string(temp_dir.path().join("DrumBass-2.m3u")).unwrap();
        assert!(first.contains("/music/dnb.mp3"));
        assert!(second.contains("/music/db.mp3"));
        assert!(!first.contains("/music/db.mp3"));
    }

    #[test]
    fn test_extinf_without_artist_and_title() {
        let mut entry = CrateEntry::new("Loose");
        entry.add_track(TrackSnapshot {
            location: "/music/untagged.mp3".to_string(),
            filename: "untagged.mp3".to_string(),
            ..TrackSnapshot::default()
        });
        entry.add_track(TrackSnapshot {
            title: "Intro".to_string(),
            location: "/music/intro.mp3".to_string(),
            filename: "intro.mp3".to_string(),
            ..TrackSnapshot::default()
        });

        let content = render_playlist(&entry, None);
        assert_eq!(
            content,
            "#EXTM3U\n\
             #EXTINF:-1,untagged.mp3\n\
             /music/untagged.mp3\n\
             #EXTINF:-1,Intro\n\
             /music/intro.mp3\n"
        );
    }
}
