//! Confirmation before destructive bulk operations
//!
//! Exporters that overwrite or bulk-copy files ask a [`Confirmer`] first,
//! so they can run against a terminal, a `--yes` flag, or a test double.

use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

/// Asks the user a yes/no question
pub trait Confirmer {
    /// Return `true` to proceed
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// Interactive prompt on stderr, answer read from stdin
pub struct TerminalConfirmer;

impl TerminalConfirmer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalConfirmer {
    fn default() -> Self {
        Self::new()
    }
}

impl Confirmer for TerminalConfirmer {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        let mut stderr = io::stderr().lock();
        write!(stderr, "{} [y/N] ", prompt)?;
        stderr.flush()?;

        let mut answer = String::new();
        io::stdin()
            .lock()
            .read_line(&mut answer)
            .context("Failed to read confirmation from stdin")?;

        Ok(is_yes(&answer))
    }
}

/// Answers every prompt with yes (`--yes`)
pub struct AutoConfirm;

impl Confirmer for AutoConfirm {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        log::debug!("Auto-confirmed: {}", prompt);
        Ok(true)
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
