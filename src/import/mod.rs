//! Crate document import
//!
//! Reads a crates XML document and links its tracks into the store's
//! crates, creating crates that do not exist yet.

mod apply;
mod reader;

pub use apply::{import_document, ImportReport};
pub use reader::parse_document;

use crate::mixxx::Repository;
use anyhow::Result;
use std::io::BufRead;

/// Parse a crates XML document from `input` and apply it to the store
///
/// The whole document is validated before anything is written.
pub fn import_xml<R: BufRead>(repo: &Repository<'_>, input: R) -> Result<ImportReport> {
    let doc = parse_document(input)?;
    log::info!(
        "Importing {} crates, {} track references",
        doc.crate_count(),
        doc.track_count()
    );
    import_document(repo, &doc)
}
