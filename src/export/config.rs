//! Export configuration

use std::path::PathBuf;

/// Configuration for the file-writing exporters (M3U and folder copy)
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Directory that receives playlists, or the root of the copied folder tree
    pub output_dir: PathBuf,

    /// Write playlist entries relative to this directory instead of absolute
    pub relative_to: Option<PathBuf>,

    /// Log per-file create/skip decisions at info level
    pub log_decisions: bool,
}

impl ExportConfig {
    /// Create a new export configuration
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            relative_to: None,
            log_decisions: false,
        }
    }

    /// Write M3U entries relative to `base` (normally the working directory)
    pub fn with_relative_paths(mut self, base: PathBuf) -> Self {
        self.relative_to = Some(base);
        self
    }

    /// Report each create/skip decision
    pub fn with_decision_logging(mut self, enabled: bool) -> Self {
        self.log_decisions = enabled;
        self
    }
}
