//! Data model shared by the store, the exporters and the importer
//!
//! Crates, tracks and the denormalized snapshots that travel in
//! external crate documents.

mod crate_entry;
mod document;
mod track;

pub use crate_entry::CrateEntry;
pub use document::CrateDocument;
pub use track::{Track, TrackDescriptor, TrackSnapshot};
