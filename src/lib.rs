//! Crateport - Mixxx crate import/export
//!
//! This library moves crate (playlist) membership between a Mixxx library
//! database and portable forms: an XML crate document, a tar archive of
//! the referenced audio files, M3U playlists, or a folder tree of renamed
//! copies.

pub mod confirm;
pub mod error;
pub mod export;
pub mod import;
pub mod mixxx;
pub mod model;

pub use confirm::{AutoConfirm, Confirmer, TerminalConfirmer};
pub use error::CrateError;
pub use export::{ExportConfig, ExportOutcome, ExportStats};
pub use import::{import_xml, ImportReport};
pub use mixxx::{MixxxLibrary, Repository};
