//! Domain errors
//!
//! Everything else travels as `anyhow::Error`; these are the failures a
//! caller may want to tell apart (and tests downcast to).

use quick_xml::events::attributes::AttrError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CrateError {
    /// Root element of an import document is not `<crates>`
    #[error("Not a crates XML file (root element is <{0}>)")]
    NotCratesDocument(String),

    /// An element appeared where another one was required
    #[error("Expected <{expected}> element, found <{found}>")]
    UnexpectedElement {
        expected: &'static str,
        found: String,
    },

    /// The document stopped before `</crates>`
    #[error("Crates document ended before </crates>")]
    UnexpectedEof,

    /// Folder-copy destination root is missing (it is never created)
    #[error("Destination folder does not exist: {0:?}")]
    DestinationMissing(PathBuf),

    /// Mixxx database file is missing
    #[error("Mixxx database not found: {0:?}")]
    DatabaseMissing(PathBuf),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    Attribute(#[from] AttrError),
}
