//! Crates XML reader

use crate::error::CrateError;
use crate::model::{CrateDocument, CrateEntry, TrackSnapshot};
use anyhow::Result;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::BufRead;

/// Where the reader is in the `<crates><crate><track/>` tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    BeforeRoot,
    InCrates,
    InCrate,
    /// Inside a non-empty `<track>`; counts nested elements, which are ignored
    InTrack(usize),
    AfterRoot,
}

/// Parse a crates XML document
///
/// The root must be `<crates>`, its children `<crate>`, and their children
/// `<track>`; anything else fails with a [`CrateError`]. Attribute order is
/// irrelevant and missing attributes read as empty strings.
pub fn parse_document<R: BufRead>(input: R) -> Result<CrateDocument> {
    let mut reader = Reader::from_reader(input);
    reader.config_mut().trim_text(true);

    let mut builder = DocumentBuilder::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf).map_err(CrateError::from)? {
            Event::Start(e) => builder.open(&e, false)?,
            Event::Empty(e) => builder.open(&e, true)?,
            Event::End(_) => builder.close(),
            Event::Eof => break,
            // Declarations, comments and whitespace carry nothing
            _ => {}
        }

        buf.clear();
    }

    builder.finish()
}

struct DocumentBuilder {
    doc: CrateDocument,
    state: State,
    current: Option<CrateEntry>,
}

impl DocumentBuilder {
    fn new() -> Self {
        Self {
            doc: CrateDocument::new(),
            state: State::BeforeRoot,
            current: None,
        }
    }

    fn open(&mut self, e: &BytesStart<'_>, empty: bool) -> Result<(), CrateError> {
        let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();

        match self.state {
            State::BeforeRoot => {
                if name != "crates" {
                    return Err(CrateError::NotCratesDocument(name));
                }
                self.state = if empty {
                    State::AfterRoot
                } else {
                    State::InCrates
                };
            }
            State::InCrates => {
                if name != "crate" {
                    return Err(CrateError::UnexpectedElement {
                        expected: "crate",
                        found: name,
                    });
                }

                let entry = CrateEntry::new(attribute(e, b"name")?.unwrap_or_default());
                if empty {
                    self.doc.add_crate(entry);
                } else {
                    self.current = Some(entry);
                    self.state = State::InCrate;
                }
            }
            State::InCrate => {
                if name != "track" {
                    return Err(CrateError::UnexpectedElement {
                        expected: "track",
                        found: name,
                    });
                }

                let track = read_track(e)?;
                let entry = self.current.as_mut().ok_or(CrateError::UnexpectedElement {
                    expected: "crate",
                    found: name,
                })?;
                entry.add_track(track);

                if !empty {
                    self.state = State::InTrack(0);
                }
            }
            State::InTrack(depth) => {
                if !empty {
                    self.state = State::InTrack(depth + 1);
                }
            }
            State::AfterRoot => {
                return Err(CrateError::UnexpectedElement {
                    expected: "end of document",
                    found: name,
                });
            }
        }

        Ok(())
    }

    fn close(&mut self) {
        self.state = match self.state {
            State::InTrack(0) => State::InCrate,
            State::InTrack(depth) => State::InTrack(depth - 1),
            State::InCrate => {
                if let Some(entry) = self.current.take() {
                    self.doc.add_crate(entry);
                }
                State::InCrates
            }
            State::InCrates => State::AfterRoot,
            other => other,
        };
    }

    fn finish(self) -> Result<CrateDocument> {
        if self.state != State::AfterRoot {
            return Err(CrateError::UnexpectedEof.into());
        }
        Ok(self.doc)
    }
}

fn read_track(e: &BytesStart<'_>) -> Result<TrackSnapshot, CrateError> {
    let mut track = TrackSnapshot::default();

    for attr in e.attributes() {
        let attr = attr?;
        let value = attr.unescape_value()?.into_owned();
        match attr.key.as_ref() {
            b"artist" => track.artist = value,
            b"title" => track.title = value,
            b"location" => track.location = value,
            b"filename" => track.filename = value,
            _ => {}
        }
    }

    Ok(track)
}

fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>, CrateError> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == key {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}
