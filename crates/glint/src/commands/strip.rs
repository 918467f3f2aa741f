//! `glint strip` command implementation.

use std::path::PathBuf;

use clap::Args;
use glint_frontmatter::remove_frontmatter;

use crate::document::Document;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the strip command.
#[derive(Args)]
pub(crate) struct StripArgs {
    /// Document to read (default: stdin, also `-`).
    file: Option<PathBuf>,
}

impl StripArgs {
    /// Execute the strip command.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read or written.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let document = Document::read(self.file.as_deref())?;
        output.document(remove_frontmatter(&document.content))?;
        Ok(())
    }
}
