//! Crate document XML writer
//!
//! Layout:
//!
//! ```xml
//! <crates>
//!     <crate name="...">
//!         <track artist="..." title="..." location="..." filename="..."/>
//!     </crate>
//! </crates>
//! ```
//!
//! Output is indented with tabs. [`crate::import::parse_document`] reads it
//! back.

use crate::model::{CrateDocument, TrackSnapshot};
use anyhow::{Context, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::io::Write;

/// Write `doc` as pretty-printed XML to `sink`
pub fn write_document<W: Write>(doc: &CrateDocument, sink: W) -> Result<()> {
    let mut writer = Writer::new_with_indent(sink, b'\t', 1);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .context("Failed to write XML declaration")?;

    if doc.crate_count() == 0 {
        writer.write_event(Event::Empty(BytesStart::new("crates")))?;
    } else {
        writer.write_event(Event::Start(BytesStart::new("crates")))?;

        for entry in doc.crates() {
            let start = BytesStart::new("crate").with_attributes([("name", entry.name.as_str())]);

            if entry.is_empty() {
                writer.write_event(Event::Empty(start))?;
                continue;
            }

            writer.write_event(Event::Start(start))?;
            for track in &entry.tracks {
                writer.write_event(Event::Empty(track_element(track)))?;
            }
            writer.write_event(Event::End(BytesEnd::new("crate")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("crates")))?;
    }

    let mut sink = writer.into_inner();
    sink.write_all(b"\n")?;
    sink.flush().context("Failed to flush XML output")?;

    log::debug!(
        "Wrote {} crates, {} track references",
        doc.crate_count(),
        doc.track_count()
    );
    Ok(())
}

/// Render `doc` to a string
pub fn to_xml_string(doc: &CrateDocument) -> Result<String> {
    let mut buf = Vec::new();
    write_document(doc, &mut buf)?;
    String::from_utf8(buf).context("XML output is not UTF-8")
}

fn track_element(track: &TrackSnapshot) -> BytesStart<'_> {
    BytesStart::new("track").with_attributes([
        ("artist", track.artist.as_str()),
        ("title", track.title.as_str()),
        ("location", track.location.as_str()),
        ("filename", track.filename.as_str()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CrateEntry;

    fn snapshot(artist: &str, title: &str, location: &str, filename: &str) -> TrackSnapshot {
        TrackSnapshot {
            artist: artist.to_string(),
            title: title.to_string(),
            location: location.to_string(),
            filename: filename.to_string(),
        }
    }

    #[test]
    fn test_techno_crate() {
        let mut techno = CrateEntry::new("Techno");
        techno.add_track(snapshot("Surgeon", "Klonk", "/music/a.mp3", "a.mp3"));
        techno.add_track(snapshot("Regis", "Blood Witness", "/music/b.mp3", "b.mp3"));
        let mut doc = CrateDocument::new();
        doc.add_crate(techno);

        let xml = to_xml_string(&doc).unwrap();
        let lines: Vec<&str> = xml.lines().collect();

        assert_eq!(lines[0], r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        assert_eq!(lines[1], "<crates>");
        assert_eq!(lines[2], "\t<crate name=\"Techno\">");
        assert_eq!(
            lines[3],
            "\t\t<track artist=\"Surgeon\" title=\"Klonk\" location=\"/music/a.mp3\" filename=\"a.mp3\"/>"
        );
        assert!(lines[4].contains(r#"location="/music/b.mp3""#));
        assert_eq!(lines[5], "\t</crate>");
        assert_eq!(lines[6], "</crates>");
        assert_eq!(xml.matches("<crate ").count(), 1);
        assert_eq!(xml.matches("<track ").count(), 2);
    }

    #[test]
    fn test_attributes_are_escaped() {
        let mut entry = CrateEntry::new("Rock & Roll");
        entry.add_track(snapshot("A \"B\"", "<C>", "/music/d&e.mp3", "d&e.mp3"));
        let mut doc = CrateDocument::new();
        doc.add_crate(entry);

        let xml = to_xml_string(&doc).unwrap();

        assert!(xml.contains("Rock &amp; Roll"));
        assert!(xml.contains("&lt;C&gt;"));
        assert!(xml.contains("/music/d&amp;e.mp3"));
        assert!(!xml.contains("\"B\""));
    }

    #[test]
    fn test_empty_document_and_empty_crate() {
        let xml = to_xml_string(&CrateDocument::new()).unwrap();
        assert!(xml.trim_end().ends_with("<crates/>"));

        let mut doc = CrateDocument::new();
        doc.add_crate(CrateEntry::new("Unused"));
        let xml = to_xml_string(&doc).unwrap();
        assert!(xml.contains("<crate name=\"Unused\"/>"));
    }
}
